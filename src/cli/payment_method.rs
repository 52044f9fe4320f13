//! Payment method CLI commands

use clap::Subcommand;

use crate::display::{format_payment_method_details, format_payment_method_list};
use crate::error::FinanzResult;
use crate::models::{CreatePaymentMethodRequest, UpdatePaymentMethodRequest};
use crate::services::PaymentMethodService;

use super::{print_response, AppContext};

/// Payment method subcommands
#[derive(Subcommand)]
pub enum PaymentMethodCommands {
    /// List all payment methods
    List,

    /// Show payment method details
    Show {
        /// Payment method name or ID
        method: String,
    },

    /// Create a payment method
    Create {
        /// Name, e.g. "Debit card"
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        icon: Option<String>,
    },

    /// Edit a payment method
    Edit {
        /// Payment method name or ID
        method: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        icon: Option<String>,
        /// Mark active (true) or inactive (false)
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a payment method
    Delete {
        /// Payment method name or ID
        method: String,
    },
}

/// Handle a payment method command
pub fn handle_payment_method_command(
    ctx: &AppContext,
    cmd: PaymentMethodCommands,
) -> FinanzResult<()> {
    let service = PaymentMethodService::new(&ctx.client, ctx.fallback());

    match cmd {
        PaymentMethodCommands::List => {
            let response = service.list()?;
            print_response(&response, format_payment_method_list(&response.data));
        }

        PaymentMethodCommands::Show { method } => {
            let found = service.find(&method)?;
            let response = service.get(found.id.as_str())?;
            print_response(&response, format_payment_method_details(&response.data));
        }

        PaymentMethodCommands::Create {
            name,
            description,
            icon,
        } => {
            let response = service.create(&CreatePaymentMethodRequest {
                name,
                description,
                icon,
            })?;
            print_response(
                &response,
                format!("Created payment method: {}\n  ID: {}\n", response.data.name, response.data.id),
            );
        }

        PaymentMethodCommands::Edit {
            method,
            name,
            description,
            icon,
            active,
        } => {
            let existing = service.find(&method)?;
            let response = service.update(
                existing.id.as_str(),
                &UpdatePaymentMethodRequest {
                    name,
                    description,
                    icon,
                    is_active: active,
                },
            )?;
            print_response(
                &response,
                format!("Updated payment method: {}\n", response.data.name),
            );
        }

        PaymentMethodCommands::Delete { method } => {
            let existing = service.find(&method)?;
            let response = service.delete(existing.id.as_str())?;
            print_response(&response, format!("Deleted payment method: {}\n", existing.name));
        }
    }

    Ok(())
}
