use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, warn};

use finanz::cli::{
    handle_ai_command, handle_auth_command, handle_category_command, handle_config_command,
    handle_currency_command, handle_dashboard_command, handle_payment_method_command,
    handle_transaction_command, handle_user_command, AppContext,
};
use finanz::config::{paths::FinanzPaths, settings::Settings};
use finanz::logging;

#[derive(Parser)]
#[command(
    name = "finanz",
    author = "FinanzApp Contributors",
    version,
    about = "Terminal client for the FinanzApp personal finance tracker",
    long_about = "FinanzCLI talks to a FinanzApp backend to record income and \
                  expenses, manage categories, currencies and payment methods, \
                  and turn text, receipt photos or voice notes into transactions."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend URL for this run (overrides settings and FINANZ_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, register and manage the session
    #[command(subcommand)]
    Auth(finanz::cli::AuthCommands),

    /// Profile of the logged-in user
    #[command(subcommand)]
    User(finanz::cli::UserCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(finanz::cli::CategoryCommands),

    /// Currency management commands
    #[command(subcommand)]
    Currency(finanz::cli::CurrencyCommands),

    /// Payment method management commands
    #[command(subcommand, name = "payment-method", alias = "pm")]
    PaymentMethod(finanz::cli::PaymentMethodCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(finanz::cli::TransactionCommands),

    /// Create transactions from text, images or audio
    #[command(subcommand)]
    Ai(finanz::cli::AiCommands),

    /// Balance, savings and expense distribution
    Dashboard,

    /// Show or change configuration
    #[command(subcommand)]
    Config(finanz::cli::ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinanzPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    if let Err(e) = logging::init(&paths, cli.verbose) {
        eprintln!("warning: {}", e);
    }

    let Some(command) = cli.command else {
        println!("FinanzCLI - Personal finance from the terminal");
        println!();
        println!("Run 'finanz --help' for usage information.");
        println!("Run 'finanz auth login <email>' to connect to your backend.");
        return Ok(());
    };

    let ctx = AppContext::new(paths, settings, cli.api_url)?;
    debug!(api_url = ctx.client.base_url(), fallback = %ctx.fallback(), "starting");

    let result = match command {
        Commands::Auth(cmd) => handle_auth_command(&ctx, cmd),
        Commands::User(cmd) => handle_user_command(&ctx, cmd),
        Commands::Category(cmd) => handle_category_command(&ctx, cmd),
        Commands::Currency(cmd) => handle_currency_command(&ctx, cmd),
        Commands::PaymentMethod(cmd) => handle_payment_method_command(&ctx, cmd),
        Commands::Transaction(cmd) => handle_transaction_command(&ctx, cmd),
        Commands::Ai(cmd) => handle_ai_command(&ctx, cmd),
        Commands::Dashboard => handle_dashboard_command(&ctx),
        Commands::Config(cmd) => handle_config_command(ctx, cmd),
    };

    if let Err(e) = &result {
        warn!(error = %e, "command failed");
    }
    Ok(result?)
}
