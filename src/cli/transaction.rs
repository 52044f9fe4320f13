//! Transaction CLI commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::{Subcommand, ValueEnum};

use crate::display::{format_category_totals, format_stats, format_summary, TransactionView};
use crate::error::{FinanzError, FinanzResult};
use crate::export::{export_json, export_transactions_csv, export_yaml, TransactionExport};
use crate::models::{
    parse_wire_date, Category, CategoryId, CreateTransactionRequest, CurrencyId, PaymentMethodId,
    Transaction, TransactionFilter, TransactionType, UpdateTransactionRequest,
};
use crate::services::mock_data::DEFAULT_CURRENCY_ID;
use crate::services::{CategoryService, CurrencyService, PaymentMethodService, TransactionService};

use super::{date_range, parse_amount, parse_date, print_response, AppContext};

/// Local dump formats
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DumpFormat {
    /// One row per transaction
    Csv,
    /// Transactions, categories and totals
    Json,
    /// Same as JSON, human-readable
    Yaml,
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions
    List {
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// income or expense
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
        /// Payment method name or ID
        #[arg(short, long)]
        payment_method: Option<String>,
        /// Currency code or ID
        #[arg(long)]
        currency: Option<String>,
        /// Minimum amount
        #[arg(long)]
        min: Option<String>,
        /// Maximum amount
        #[arg(long)]
        max: Option<String>,
        /// Text to search descriptions for
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one page of transactions
    Page {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },

    /// Record a transaction
    Add {
        /// Amount (e.g. "42.99")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: TransactionType,
        /// Payment method name or ID
        #[arg(short, long)]
        payment_method: Option<String>,
        /// Currency code or ID (defaults to the default currency)
        #[arg(long)]
        currency: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Date (YYYY-MM-DD or RFC 3339; defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
        #[arg(short, long)]
        payment_method: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Income, expense and balance
    Summary,

    /// Transactions within a date range
    Range {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },

    /// Backend statistics for a date range
    Stats {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },

    /// Totals per category for a date range
    #[command(name = "by-category")]
    ByCategory {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },

    /// Download the backend's CSV export
    Export {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// Directory to save into (defaults to the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write fetched transactions to a local file
    Dump {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: DumpFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(ctx: &AppContext, cmd: TransactionCommands) -> FinanzResult<()> {
    let service = TransactionService::new(&ctx.client, ctx.fallback());

    match cmd {
        TransactionCommands::List {
            from,
            to,
            category,
            transaction_type,
            payment_method,
            currency,
            min,
            max,
            search,
        } => {
            let filter = TransactionFilter {
                start_date: from.as_deref().map(parse_date).transpose()?,
                end_date: to.as_deref().map(parse_date).transpose()?,
                category_id: category
                    .as_deref()
                    .map(|c| resolve_category(ctx, c))
                    .transpose()?,
                transaction_type,
                payment_method_id: payment_method
                    .as_deref()
                    .map(|m| resolve_payment_method(ctx, m))
                    .transpose()?,
                currency_id: currency
                    .as_deref()
                    .map(|c| resolve_currency(ctx, c))
                    .transpose()?,
                min_amount: min.as_deref().map(parse_amount).transpose()?,
                max_amount: max.as_deref().map(parse_amount).transpose()?,
                search,
            };

            let response = service.list(&filter)?;
            let categories = categories_for_display(ctx);
            let view = transaction_view(ctx, &categories);
            print_response(&response, view.list(&response.data));
        }

        TransactionCommands::Page { page, limit } => {
            let response = service.page(page, limit)?;
            let categories = categories_for_display(ctx);
            let view = transaction_view(ctx, &categories);
            print_response(&response, view.list(&response.data.data));
        }

        TransactionCommands::Show { id } => {
            let response = service.get(&id)?;
            let categories = categories_for_display(ctx);
            let view = transaction_view(ctx, &categories);
            print_response(&response, view.details(&response.data));
        }

        TransactionCommands::Add {
            amount,
            category,
            transaction_type,
            payment_method,
            currency,
            description,
            date,
        } => {
            let currency_id = match currency {
                Some(c) => resolve_currency(ctx, &c)?,
                None => default_currency(ctx)?,
            };
            let request = CreateTransactionRequest {
                amount: parse_amount(&amount)?,
                description,
                category_id: resolve_category(ctx, &category)?,
                payment_method_id: payment_method
                    .as_deref()
                    .map(|m| resolve_payment_method(ctx, m))
                    .transpose()?,
                currency_id,
                date: match date {
                    Some(d) => parse_wire_date(&d).map_err(FinanzError::Validation)?,
                    None => Utc::now(),
                },
                transaction_type,
            };

            let response = service.create(&request)?;
            print_response(
                &response,
                format!(
                    "Recorded {} of {}\n  ID: {}\n",
                    response.data.transaction_type.to_string().to_lowercase(),
                    response.data.amount,
                    response.data.id
                ),
            );
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            transaction_type,
            payment_method,
            currency,
            description,
            date,
        } => {
            let request = UpdateTransactionRequest {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
                category_id: category
                    .as_deref()
                    .map(|c| resolve_category(ctx, c))
                    .transpose()?,
                payment_method_id: payment_method
                    .as_deref()
                    .map(|m| resolve_payment_method(ctx, m))
                    .transpose()?,
                currency_id: currency
                    .as_deref()
                    .map(|c| resolve_currency(ctx, c))
                    .transpose()?,
                date: date
                    .as_deref()
                    .map(parse_wire_date)
                    .transpose()
                    .map_err(FinanzError::Validation)?,
                transaction_type,
            };

            let response = service.update(&id, &request)?;
            print_response(
                &response,
                format!("Updated transaction {}\n", response.data.id),
            );
        }

        TransactionCommands::Delete { id } => {
            let response = service.delete(&id)?;
            print_response(&response, format!("Deleted transaction {}\n", id));
        }

        TransactionCommands::Summary => {
            let response = service.summary()?;
            print_response(&response, format_summary(&response.data, ctx.symbol()));
        }

        TransactionCommands::Range { from, to } => {
            let range = date_range(from.as_deref(), to.as_deref())?;
            let response = service.by_date_range(&range)?;
            let categories = categories_for_display(ctx);
            let view = transaction_view(ctx, &categories);
            println!("{} to {}", range.start_date, range.end_date);
            print_response(&response, view.list(&response.data.data));
        }

        TransactionCommands::Stats { from, to } => {
            let range = date_range(from.as_deref(), to.as_deref())?;
            let response = service.stats(&range)?;
            print_response(&response, format_stats(&response.data));
        }

        TransactionCommands::ByCategory { from, to } => {
            let range = date_range(from.as_deref(), to.as_deref())?;
            let totals = service.summary_by_category(&range)?;
            println!("{}", format_category_totals(&totals, ctx.symbol()));
        }

        TransactionCommands::Export { from, to, output } => {
            let range = date_range(from.as_deref(), to.as_deref())?;
            let download = service.export_csv(&range)?;
            let dir = output.unwrap_or_else(|| ctx.paths.export_dir());
            let path = download.save_to(&dir)?;
            println!("Saved {} bytes to {}", download.len(), path.display());
        }

        TransactionCommands::Dump {
            format,
            output,
            pretty,
            from,
            to,
        } => {
            let filter = TransactionFilter {
                start_date: from.as_deref().map(parse_date).transpose()?,
                end_date: to.as_deref().map(parse_date).transpose()?,
                ..Default::default()
            };
            let transactions = service.list(&filter)?.data;
            let categories = categories_for_display(ctx);

            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        FinanzError::Export(format!(
                            "Failed to create file {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    let mut writer = BufWriter::new(file);
                    dump(format, pretty, transactions, categories, &mut writer)?;
                    writer
                        .flush()
                        .map_err(|e| FinanzError::Export(e.to_string()))?;
                    println!("Exported to: {}", path.display());
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut writer = stdout.lock();
                    dump(format, pretty, transactions, categories, &mut writer)?;
                }
            }
        }
    }

    Ok(())
}

fn dump<W: Write>(
    format: DumpFormat,
    pretty: bool,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    writer: &mut W,
) -> FinanzResult<()> {
    match format {
        DumpFormat::Csv => {
            export_transactions_csv(&transactions, &categories, writer)?;
        }
        DumpFormat::Json => {
            export_json(&TransactionExport::new(transactions, categories), writer, pretty)?;
        }
        DumpFormat::Yaml => {
            export_yaml(&TransactionExport::new(transactions, categories), writer)?;
        }
    }
    Ok(())
}

fn transaction_view<'a>(ctx: &'a AppContext, categories: &'a [Category]) -> TransactionView<'a> {
    TransactionView::new(categories, ctx.symbol(), &ctx.settings.date_format)
}

/// Categories used to label rows; an unreachable backend just means IDs
fn categories_for_display(ctx: &AppContext) -> Vec<Category> {
    CategoryService::new(&ctx.client, ctx.fallback())
        .list()
        .map(|response| response.data)
        .unwrap_or_default()
}

fn resolve_category(ctx: &AppContext, identifier: &str) -> FinanzResult<CategoryId> {
    Ok(CategoryService::new(&ctx.client, ctx.fallback())
        .find(identifier)?
        .id)
}

fn resolve_payment_method(ctx: &AppContext, identifier: &str) -> FinanzResult<PaymentMethodId> {
    Ok(PaymentMethodService::new(&ctx.client, ctx.fallback())
        .find(identifier)?
        .id)
}

fn resolve_currency(ctx: &AppContext, identifier: &str) -> FinanzResult<CurrencyId> {
    Ok(CurrencyService::new(&ctx.client, ctx.fallback())
        .find(identifier)?
        .id)
}

fn default_currency(ctx: &AppContext) -> FinanzResult<CurrencyId> {
    Ok(CurrencyService::new(&ctx.client, ctx.fallback())
        .default_currency()?
        .map(|c| c.id)
        .unwrap_or_else(|| CurrencyId::from(DEFAULT_CURRENCY_ID)))
}
