//! Custom error types for FinanzCLI
//!
//! This module defines the error hierarchy for the client using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for FinanzCLI operations
#[derive(Error, Debug)]
pub enum FinanzError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The request never produced a response (connection refused, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// A success response whose body did not have the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// 401 on a request that cannot be refreshed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Token refresh failed; the stored session has been cleared
    #[error("Session expired: {0}. Run `finanz auth login` to sign in again")]
    SessionExpired(String),

    /// Session storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// AI completion errors
    #[error("AI error: {0}")]
    Ai(String),

    /// Export and download errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinanzError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for currencies
    pub fn currency_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Currency",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for payment methods
    pub fn payment_method_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Payment method",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Http { status: 404, .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an authentication failure
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::SessionExpired(_))
    }

    /// Whether the backend is down or answered with garbage.
    ///
    /// These are the failures the mock-data fallback is allowed to mask.
    pub fn is_backend_unavailable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Decode(_) => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FinanzError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanzError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for FinanzError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for FinanzCLI operations
pub type FinanzResult<T> = Result<T, FinanzError>;
