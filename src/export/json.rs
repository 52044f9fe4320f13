//! JSON export of fetched transactions

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinanzError, FinanzResult};
use crate::models::{Category, Money, Transaction};
use crate::services::stats;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A snapshot of transactions with the categories they reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Client version that wrote the export
    pub app_version: String,

    pub categories: Vec<Category>,

    pub transactions: Vec<Transaction>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub total_income: Money,
    pub total_expense: Money,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl TransactionExport {
    pub fn new(transactions: Vec<Transaction>, categories: Vec<Category>) -> Self {
        let totals = stats::totals(&transactions);
        let earliest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.date_naive().to_string());
        let latest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.date_naive().to_string());

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            total_income: totals.income,
            total_expense: totals.expense,
            earliest_transaction,
            latest_transaction,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            transactions,
            metadata,
        }
    }
}

/// Write the export as JSON
pub fn export_json<W: Write>(
    export: &TransactionExport,
    writer: &mut W,
    pretty: bool,
) -> FinanzResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    };
    result.map_err(|e| FinanzError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FinanzError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::services::mock_data;
    use chrono::TimeZone;

    pub(crate) fn sample_export() -> TransactionExport {
        let mut first = mock_data::mock_transaction("t-1");
        first.date = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let mut second = mock_data::mock_transaction("t-2");
        second.transaction_type = TransactionType::Income;
        second.amount = Money::from_cents(250_000);
        second.date = Utc.with_ymd_and_hms(2025, 3, 20, 10, 0, 0).unwrap();

        TransactionExport::new(vec![first, second], mock_data::categories())
    }

    #[test]
    fn test_metadata() {
        let export = sample_export();
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.total_income, Money::from_cents(250_000));
        assert_eq!(export.metadata.total_expense, Money::from_cents(10_000));
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-03-01"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2025-03-20"));
    }

    #[test]
    fn test_json_export_parses_back() {
        let mut buffer = Vec::new();
        export_json(&sample_export(), &mut buffer, true).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\n  \"schema_version\": \"1.0.0\""));

        let parsed: TransactionExport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.transactions.len(), 2);
        assert_eq!(parsed.transactions[1].transaction_type, TransactionType::Income);
    }

    #[test]
    fn test_compact_json_is_one_line() {
        let mut buffer = Vec::new();
        export_json(&sample_export(), &mut buffer, false).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }
}
