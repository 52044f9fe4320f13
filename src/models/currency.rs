//! Currency model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CurrencyId;

/// A currency transactions can be recorded in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,

    pub name: String,

    /// ISO 4217 code, e.g. "USD"
    pub code: String,

    pub symbol: String,

    #[serde(default)]
    pub is_default: bool,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Currency {
    /// Check whether this currency matches an ID, code or name
    pub fn matches(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.id.as_str() == identifier
            || self.code.eq_ignore_ascii_case(identifier)
            || self.name.eq_ignore_ascii_case(identifier)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.symbol)
    }
}

/// Body of `POST /currencies`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCurrencyRequest {
    pub code: String,
    pub name: String,
    pub symbol: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CreateCurrencyRequest {
    pub fn validate(&self) -> Result<(), String> {
        let code = self.code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Currency code must be 3 letters, got '{}'", code));
        }
        if self.name.trim().is_empty() {
            return Err("Currency name cannot be empty".into());
        }
        if self.symbol.trim().is_empty() {
            return Err("Currency symbol cannot be empty".into());
        }
        Ok(())
    }
}

/// Body of `PUT /currencies/{id}`.
///
/// The backend expects the full record on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCurrencyRequest {
    pub code: String,
    pub name: String,
    pub symbol: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateCurrencyRequest {
    /// Start an update from the current record
    pub fn from_current(currency: &Currency) -> Self {
        Self {
            code: currency.code.clone(),
            name: currency.name.clone(),
            symbol: currency.symbol.clone(),
            is_active: Some(currency.is_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_flags_missing() {
        let json = r#"{"id": "cur-1", "name": "Euro", "code": "EUR", "symbol": "€"}"#;
        let currency: Currency = serde_json::from_str(json).unwrap();
        assert!(!currency.is_default);
        assert!(currency.is_active);
        assert_eq!(currency.to_string(), "EUR (€)");
    }

    #[test]
    fn test_matches_code_case_insensitive() {
        let json = r#"{"id": "cur-1", "name": "Euro", "code": "EUR", "symbol": "€"}"#;
        let currency: Currency = serde_json::from_str(json).unwrap();
        assert!(currency.matches("eur"));
        assert!(currency.matches("cur-1"));
        assert!(!currency.matches("USD"));
    }

    #[test]
    fn test_validate_code() {
        let mut request = CreateCurrencyRequest {
            code: "US".into(),
            name: "Dollar".into(),
            symbol: "$".into(),
            is_active: None,
        };
        assert!(request.validate().is_err());

        request.code = "USD".into();
        assert!(request.validate().is_ok());
    }
}
