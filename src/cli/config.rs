//! Configuration CLI commands

use clap::Subcommand;

use crate::config::FallbackMode;
use crate::error::{FinanzError, FinanzResult};

use super::AppContext;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,

    /// Set the backend URL
    #[command(name = "set-api-url")]
    SetApiUrl {
        /// e.g. https://finanz.example.com
        url: String,
    },

    /// Set the offline fallback policy
    #[command(name = "set-fallback")]
    SetFallback {
        /// off, read-only or simulate
        mode: FallbackMode,
    },
}

/// Handle a config command. Takes ownership so settings can be updated.
pub fn handle_config_command(ctx: AppContext, cmd: ConfigCommands) -> FinanzResult<()> {
    let AppContext {
        paths,
        mut settings,
        client,
    } = ctx;

    match cmd {
        ConfigCommands::Show => {
            let logged_in = client.session().is_logged_in()?;

            println!("FinanzCLI Configuration");
            println!("=======================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Session file:     {}", paths.session_file().display());
            println!("Log file:         {}", paths.log_file().display());
            println!("Exports:          {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  API URL:        {}", client.base_url());
            println!("  Fallback:       {}", settings.fallback);
            println!("  Timeout:        {}s", settings.request_timeout_secs);
            println!("  Currency:       {}", settings.currency_symbol);
            println!("  Date format:    {}", settings.date_format);
            println!("  AI model:       {}", settings.ai.model);
            println!(
                "  AI key:         {}",
                if settings.ai.api_key().is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
            println!("  Logged in:      {}", if logged_in { "yes" } else { "no" });
        }

        ConfigCommands::SetApiUrl { url } => {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(FinanzError::Validation(format!(
                    "'{}' is not an http(s) URL",
                    url
                )));
            }
            settings.api_url = url;
            settings.save(&paths)?;
            println!("API URL set to {}", settings.api_url);
        }

        ConfigCommands::SetFallback { mode } => {
            settings.fallback = mode;
            settings.save(&paths)?;
            println!("Fallback mode set to {}", mode);
        }
    }

    Ok(())
}
