//! Strongly-typed ID wrappers for all entity types
//!
//! The backend hands out UUID strings; records simulated while offline use
//! `mock-<uuid>`. Both are carried as opaque strings, wrapped per entity so
//! IDs from different entity types can't be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix for IDs of records that never reached the backend
pub const MOCK_ID_PREFIX: &str = "mock-";

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an ID handed out by the backend
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate an ID for a simulated record
            pub fn mock() -> Self {
                Self(format!("{}{}", MOCK_ID_PREFIX, Uuid::new_v4()))
            }

            /// Get the raw string
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether this ID was generated locally
            pub fn is_mock(&self) -> bool {
                self.0.starts_with(MOCK_ID_PREFIX)
            }

            /// Shortened form for tables
            pub fn short(&self) -> &str {
                let s = self.0.strip_prefix(MOCK_ID_PREFIX).unwrap_or(&self.0);
                match s.char_indices().nth(8) {
                    Some((idx, _)) => &s[..idx],
                    None => s,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(CategoryId);
define_id!(CurrencyId);
define_id!(PaymentMethodId);
define_id!(TransactionId);
define_id!(UserId);
