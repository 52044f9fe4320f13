//! Transaction model
//!
//! An income or expense record. Amounts are always positive; the direction
//! comes from `TransactionType`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, CurrencyId, PaymentMethodId, TransactionId, UserId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    #[serde(alias = "income", alias = "Income")]
    Income,
    #[default]
    #[serde(alias = "expense", alias = "Expense")]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}'. Use income or expense",
                other
            )),
        }
    }
}

/// Parse a date the way the backend and AI replies send them: RFC 3339,
/// a naive `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_wire_date(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!("Invalid date '{}'. Use YYYY-MM-DD or RFC 3339", s))
}

/// Format a date for the wire (`2025-05-10T20:15:00Z`)
pub fn format_wire_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) mod wire_date {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_wire_date(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_wire_date(&s).map_err(de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_str(&super::super::format_wire_date(date)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(s) if !s.trim().is_empty() => super::super::parse_wire_date(&s)
                    .map(Some)
                    .map_err(de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

/// A related record embedded in a transaction by some backend endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedRef {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    pub amount: Money,

    #[serde(default)]
    pub description: String,

    #[serde(with = "wire_date")]
    pub date: DateTime<Utc>,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<PaymentMethodId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<CurrencyId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EmbeddedRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<EmbeddedRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<EmbeddedRef>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Amount with the sign of its direction (expenses negative)
    pub fn signed_amount(&self) -> Money {
        match self.transaction_type {
            TransactionType::Income => self.amount.abs(),
            TransactionType::Expense => -self.amount.abs(),
        }
    }

    /// The category ID, whether sent flat or embedded
    pub fn effective_category_id(&self) -> Option<&str> {
        self.category_id
            .as_ref()
            .map(|id| id.as_str())
            .or_else(|| self.category.as_ref().map(|c| c.id.as_str()))
            .filter(|id| !id.is_empty())
    }

    /// Apply an update locally (used when simulating writes)
    pub fn apply(&mut self, update: &UpdateTransactionRequest) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(category_id) = &update.category_id {
            self.category_id = Some(category_id.clone());
        }
        if let Some(payment_method_id) = &update.payment_method_id {
            self.payment_method_id = Some(payment_method_id.clone());
        }
        if let Some(currency_id) = &update.currency_id {
            self.currency_id = Some(currency_id.clone());
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(transaction_type) = update.transaction_type {
            self.transaction_type = transaction_type;
        }
        self.updated_at = Some(Utc::now());
    }
}

/// Body of `POST /transactions`, also the shape the AI is asked to produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub category_id: CategoryId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<PaymentMethodId>,

    pub currency_id: CurrencyId,

    #[serde(with = "wire_date")]
    pub date: DateTime<Utc>,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl CreateTransactionRequest {
    /// Validate the request before sending it
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_positive() {
            return Err(format!(
                "Amount must be greater than zero, got {}",
                self.amount
            ));
        }
        if self.category_id.as_str().trim().is_empty() {
            return Err("A category is required".into());
        }
        if self.currency_id.as_str().trim().is_empty() {
            return Err("A currency is required".into());
        }
        Ok(())
    }
}

/// Body of `PUT /transactions/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTransactionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<PaymentMethodId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<CurrencyId>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "wire_date::option"
    )]
    pub date: Option<DateTime<Utc>>,

    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type: Option<TransactionType>,
}

impl UpdateTransactionRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Inclusive date range used by the range, stats and export endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRangeRequest {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, String> {
        if start_date > end_date {
            return Err(format!(
                "Start date {} is after end date {}",
                start_date, end_date
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Query parameters for the request
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("start_date".into(), self.start_date.format("%Y-%m-%d").to_string()),
            ("end_date".into(), self.end_date.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// Filters for `GET /transactions`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
    pub transaction_type: Option<TransactionType>,
    pub payment_method_id: Option<PaymentMethodId>,
    pub currency_id: Option<CurrencyId>,
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>,
    pub search: Option<String>,
}

impl TransactionFilter {
    /// Query parameters for the set filters, in a stable order
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(date) = self.start_date {
            params.push(("start_date".into(), date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.end_date {
            params.push(("end_date".into(), date.format("%Y-%m-%d").to_string()));
        }
        if let Some(id) = &self.category_id {
            params.push(("category_id".into(), id.to_string()));
        }
        if let Some(t) = self.transaction_type {
            params.push(("type".into(), t.as_str().to_string()));
        }
        if let Some(id) = &self.payment_method_id {
            params.push(("payment_method_id".into(), id.to_string()));
        }
        if let Some(id) = &self.currency_id {
            params.push(("currency_id".into(), id.to_string()));
        }
        // Zero bounds are treated as unset
        if let Some(amount) = self.min_amount.filter(|a| !a.is_zero()) {
            params.push(("min_amount".into(), amount.to_string()));
        }
        if let Some(amount) = self.max_amount.filter(|a| !a.is_zero()) {
            params.push(("max_amount".into(), amount.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            params.push(("search".into(), search.to_string()));
        }

        params
    }
}
