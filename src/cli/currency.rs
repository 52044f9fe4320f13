//! Currency CLI commands

use clap::Subcommand;

use crate::display::{format_currency_details, format_currency_list};
use crate::error::FinanzResult;
use crate::models::{CreateCurrencyRequest, UpdateCurrencyRequest};
use crate::services::CurrencyService;

use super::{print_response, AppContext};

/// Currency subcommands
#[derive(Subcommand)]
pub enum CurrencyCommands {
    /// List all currencies
    List,

    /// Show currency details
    Show {
        /// Currency code, name or ID
        currency: String,
    },

    /// Create a new currency
    Create {
        /// ISO 4217 code, e.g. EUR
        code: String,
        /// Display name
        name: String,
        /// Symbol, e.g. €
        symbol: String,
    },

    /// Edit a currency
    Edit {
        /// Currency code, name or ID
        currency: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        symbol: Option<String>,
        /// Mark active (true) or inactive (false)
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a currency
    Delete {
        /// Currency code, name or ID
        currency: String,
    },

    /// Make a currency the default
    #[command(name = "set-default")]
    SetDefault {
        /// Currency code, name or ID
        currency: String,
    },
}

/// Handle a currency command
pub fn handle_currency_command(ctx: &AppContext, cmd: CurrencyCommands) -> FinanzResult<()> {
    let service = CurrencyService::new(&ctx.client, ctx.fallback());

    match cmd {
        CurrencyCommands::List => {
            let response = service.list()?;
            print_response(&response, format_currency_list(&response.data));
        }

        CurrencyCommands::Show { currency } => {
            print!("{}", format_currency_details(&service.find(&currency)?));
        }

        CurrencyCommands::Create { code, name, symbol } => {
            let currency = service.create(&CreateCurrencyRequest {
                code,
                name,
                symbol,
                is_active: None,
            })?;
            println!("Created currency: {}", currency);
            println!("  ID: {}", currency.id);
        }

        CurrencyCommands::Edit {
            currency,
            code,
            name,
            symbol,
            active,
        } => {
            let existing = service.find(&currency)?;
            let mut request = UpdateCurrencyRequest::from_current(&existing);
            if let Some(code) = code {
                request.code = code.trim().to_uppercase();
            }
            if let Some(name) = name {
                request.name = name;
            }
            if let Some(symbol) = symbol {
                request.symbol = symbol;
            }
            if active.is_some() {
                request.is_active = active;
            }

            let updated = service.update(existing.id.as_str(), &request)?;
            println!("Updated currency: {}", updated);
        }

        CurrencyCommands::Delete { currency } => {
            let existing = service.find(&currency)?;
            service.delete(existing.id.as_str())?;
            println!("Deleted currency: {}", existing);
        }

        CurrencyCommands::SetDefault { currency } => {
            let existing = service.find(&currency)?;
            let updated = service.set_default(existing.id.as_str())?;
            println!("Default currency is now {}", updated);
        }
    }

    Ok(())
}
