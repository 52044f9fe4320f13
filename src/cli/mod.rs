//! CLI command handlers
//!
//! Each submodule pairs a clap `Subcommand` enum with a `handle_*_command`
//! function that calls the service layer and prints the formatted result.

pub mod ai;
pub mod auth;
pub mod category;
pub mod config;
pub mod currency;
pub mod dashboard;
pub mod payment_method;
pub mod transaction;
pub mod user;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};

use crate::api::{ApiClient, ApiResponse, ReqwestTransport, Transport};
use crate::config::{FallbackMode, FinanzPaths, Settings};
use crate::display::with_banner;
use crate::error::{FinanzError, FinanzResult};
use crate::models::{DateRangeRequest, Money};
use crate::storage::SessionStore;

pub use ai::{handle_ai_command, AiCommands};
pub use auth::{handle_auth_command, AuthCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use currency::{handle_currency_command, CurrencyCommands};
pub use dashboard::handle_dashboard_command;
pub use payment_method::{handle_payment_method_command, PaymentMethodCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use user::{handle_user_command, UserCommands};

/// Everything a handler needs: paths, settings and the API client
pub struct AppContext {
    pub paths: FinanzPaths,
    pub settings: Settings,
    pub client: ApiClient,
}

impl AppContext {
    /// Build the production context. `api_url` overrides the configured
    /// backend for this run.
    pub fn new(paths: FinanzPaths, settings: Settings, api_url: Option<String>) -> FinanzResult<Self> {
        let base_url = api_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| settings.effective_api_url());

        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(Duration::from_secs(
            settings.request_timeout_secs,
        ))?);
        let session = Arc::new(SessionStore::open(paths.session_file())?);
        let client = ApiClient::new(base_url, transport, session);

        Ok(Self::with_client(paths, settings, client))
    }

    pub fn with_client(paths: FinanzPaths, settings: Settings, client: ApiClient) -> Self {
        Self {
            paths,
            settings,
            client,
        }
    }

    pub fn fallback(&self) -> FallbackMode {
        self.settings.fallback
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Print a formatted response, prefixed with the mock banner when needed
pub(crate) fn print_response<T>(response: &ApiResponse<T>, body: String) {
    let text = with_banner(response.origin, body);
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}

pub(crate) fn parse_amount(s: &str) -> FinanzResult<Money> {
    Money::parse(s).map_err(|e| FinanzError::Validation(format!("Invalid amount: {}", e)))
}

pub(crate) fn parse_date(s: &str) -> FinanzResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        FinanzError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
    })
}

/// Inclusive range from optional bounds; defaults to the current month so far
pub(crate) fn date_range(from: Option<&str>, to: Option<&str>) -> FinanzResult<DateRangeRequest> {
    let today = Utc::now().date_naive();
    let start = match from {
        Some(s) => parse_date(s)?,
        None => today.with_day(1).unwrap_or(today),
    };
    let end = match to {
        Some(s) => parse_date(s)?,
        None => today,
    };
    DateRangeRequest::new(start, end).map_err(FinanzError::Validation)
}

pub(crate) fn prompt_password(prompt: &str) -> FinanzResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| FinanzError::Io(format!("Failed to read password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date("28/02/2025").unwrap_err().is_validation());
    }

    #[test]
    fn test_date_range_defaults_to_month_to_date() {
        let range = date_range(None, None).unwrap();
        assert_eq!(range.start_date.day(), 1);
        assert_eq!(range.end_date, Utc::now().date_naive());
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        let err = date_range(Some("2025-03-10"), Some("2025-03-01")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("twelve").is_err());
    }
}
