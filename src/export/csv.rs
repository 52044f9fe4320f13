//! CSV export of fetched transactions

use std::collections::HashMap;
use std::io::Write;

use crate::error::{FinanzError, FinanzResult};
use crate::models::{format_wire_date, Category, Transaction};

const HEADER: [&str; 8] = [
    "ID",
    "Date",
    "Type",
    "Amount",
    "Category",
    "Description",
    "Payment Method",
    "Currency",
];

fn export_error(e: impl std::fmt::Display) -> FinanzError {
    FinanzError::Export(e.to_string())
}

/// Write transactions as CSV, one row each. Amounts are unsigned; the
/// direction is in the Type column.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    categories: &[Category],
    writer: W,
) -> FinanzResult<usize> {
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER).map_err(export_error)?;

    for txn in transactions {
        let category = txn
            .effective_category_id()
            .map(|id| names.get(id).copied().unwrap_or(id))
            .unwrap_or("");
        let payment_method = txn
            .payment_method
            .as_ref()
            .and_then(|m| m.name.clone())
            .or_else(|| txn.payment_method_id.as_ref().map(|id| id.to_string()))
            .unwrap_or_default();
        let currency = txn
            .currency
            .as_ref()
            .and_then(|c| c.code.clone())
            .or_else(|| txn.currency_id.as_ref().map(|id| id.to_string()))
            .unwrap_or_default();

        let date = format_wire_date(&txn.date);
        let amount = txn.amount.abs().to_string();
        csv.write_record([
            txn.id.as_str(),
            date.as_str(),
            txn.transaction_type.as_str(),
            amount.as_str(),
            category,
            txn.description.as_str(),
            payment_method.as_str(),
            currency.as_str(),
        ])
        .map_err(export_error)?;
    }

    csv.flush().map_err(export_error)?;
    Ok(transactions.len())
}
