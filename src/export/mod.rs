//! Local export of fetched transactions
//!
//! - CSV: one row per transaction (spreadsheet-compatible)
//! - JSON: transactions, categories and totals (machine-readable)
//! - YAML: the same document, human-readable
//!
//! The backend's own CSV export is a download; see
//! `TransactionService::export_csv`.

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_transactions_csv;
pub use json::{export_json, ExportMetadata, TransactionExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
