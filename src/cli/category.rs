//! Category CLI commands

use clap::Subcommand;

use crate::display::{format_category_details, format_category_list};
use crate::error::FinanzResult;
use crate::models::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::services::CategoryService;

use super::{print_response, AppContext};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// List categories offered for income
    Income,

    /// List categories offered for expenses
    Expense,

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Create a new category
    Create {
        /// Category name
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Emoji or icon name
        #[arg(short, long)]
        icon: Option<String>,
        /// Display color, e.g. "#22c55e"
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        icon: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(ctx: &AppContext, cmd: CategoryCommands) -> FinanzResult<()> {
    let service = CategoryService::new(&ctx.client, ctx.fallback());

    match cmd {
        CategoryCommands::List => {
            let response = service.list()?;
            print_response(&response, format_category_list(&response.data));
        }

        CategoryCommands::Income => {
            let response = service.income_categories()?;
            print_response(&response, format_category_list(&response.data));
        }

        CategoryCommands::Expense => {
            let response = service.expense_categories()?;
            print_response(&response, format_category_list(&response.data));
        }

        CategoryCommands::Show { category } => {
            let category = service.find(&category)?;
            print!("{}", format_category_details(&category));
        }

        CategoryCommands::Create {
            name,
            description,
            icon,
            color,
        } => {
            let category = service.create(&CreateCategoryRequest {
                name,
                description,
                icon,
                color,
            })?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Edit {
            category,
            name,
            description,
            icon,
            color,
        } => {
            let existing = service.find(&category)?;
            let updated = service.update(
                existing.id.as_str(),
                &UpdateCategoryRequest {
                    name,
                    description,
                    icon,
                    color,
                },
            )?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let existing = service.find(&category)?;
            service.delete(existing.id.as_str())?;
            println!("Deleted category: {}", existing.name);
        }
    }

    Ok(())
}
