//! Transaction display formatting

use std::collections::HashMap;

use chrono::Utc;

use crate::models::{Category, Money, Transaction};

use super::format::{cell, format_currency, format_date, format_relative_date};

/// Lookup tables and preferences used when rendering transactions
pub struct TransactionView<'a> {
    categories: HashMap<&'a str, &'a str>,
    symbol: &'a str,
    date_format: &'a str,
}

impl<'a> TransactionView<'a> {
    pub fn new(categories: &'a [Category], symbol: &'a str, date_format: &'a str) -> Self {
        Self {
            categories: categories
                .iter()
                .map(|c| (c.id.as_str(), c.name.as_str()))
                .collect(),
            symbol,
            date_format,
        }
    }

    fn category_name<'t>(&'t self, txn: &'t Transaction) -> &'t str {
        txn.effective_category_id()
            .and_then(|id| self.categories.get(id).copied())
            .or_else(|| txn.category.as_ref().and_then(|c| c.name.as_deref()))
            .unwrap_or("(uncategorized)")
    }

    fn amount(&self, txn: &Transaction) -> String {
        let symbol = txn
            .currency
            .as_ref()
            .and_then(|c| c.symbol.as_deref())
            .unwrap_or(self.symbol);
        format_currency(txn.signed_amount(), symbol)
    }

    /// One register row
    pub fn row(&self, txn: &Transaction) -> String {
        let description = if txn.description.is_empty() {
            "(no description)"
        } else {
            &txn.description
        };

        format!(
            "{:10}  {:7}  {:>14}  {}  {}  {}",
            format_date(txn.date, self.date_format),
            txn.transaction_type.to_string(),
            self.amount(txn),
            cell(self.category_name(txn), 16),
            cell(description, 28),
            txn.id.short()
        )
    }

    /// Register of transactions with a closing total
    pub fn list(&self, transactions: &[Transaction]) -> String {
        if transactions.is_empty() {
            return "No transactions found.".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!(
            "{:10}  {:7}  {:>14}  {:16}  {:28}  {}\n",
            "Date", "Type", "Amount", "Category", "Description", "ID"
        ));
        output.push_str(&"-".repeat(92));
        output.push('\n');

        for txn in transactions {
            output.push_str(&self.row(txn));
            output.push('\n');
        }

        let net: Money = transactions.iter().map(Transaction::signed_amount).sum();
        output.push_str(&"-".repeat(92));
        output.push('\n');
        output.push_str(&format!(
            "{} transaction(s), net {}\n",
            transactions.len(),
            format_currency(net, self.symbol)
        ));

        output
    }

    pub fn details(&self, txn: &Transaction) -> String {
        let mut output = String::new();

        output.push_str(&format!("Transaction: {}\n", txn.id));
        output.push_str(&format!(
            "Date:        {} ({})\n",
            format_date(txn.date, self.date_format),
            format_relative_date(txn.date, Utc::now(), self.date_format)
        ));
        output.push_str(&format!("Type:        {}\n", txn.transaction_type));
        output.push_str(&format!("Amount:      {}\n", self.amount(txn)));
        output.push_str(&format!("Category:    {}\n", self.category_name(txn)));

        if let Some(method) = &txn.payment_method {
            output.push_str(&format!(
                "Paid with:   {}\n",
                method.name.as_deref().unwrap_or(&method.id)
            ));
        } else if let Some(id) = &txn.payment_method_id {
            output.push_str(&format!("Paid with:   {}\n", id));
        }

        if !txn.description.is_empty() {
            output.push_str(&format!("Description: {}\n", txn.description));
        }

        if txn.id.is_mock() {
            output.push_str("\n(simulated, not stored on the backend)\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, TransactionType};
    use crate::services::mock_data;
    use chrono::TimeZone;

    fn sample() -> Transaction {
        let mut txn = mock_data::mock_transaction("6f9619ff-8b86-d011-b42d-00cf4fc964ff");
        txn.date = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        txn.amount = Money::from_cents(5_000);
        txn.description = "Test Store".into();
        txn
    }

    #[test]
    fn test_format_empty_register() {
        let view = TransactionView::new(&[], "$", "%Y-%m-%d");
        assert_eq!(view.list(&[]), "No transactions found.");
    }

    #[test]
    fn test_row() {
        let categories = mock_data::categories();
        let view = TransactionView::new(&categories, "$", "%Y-%m-%d");
        let txn = sample();

        let row = view.row(&txn);
        assert!(row.starts_with("2025-01-15"));
        assert!(row.contains("Expense"));
        assert!(row.contains("-$ 50.00"));
        assert!(row.contains("Food"));
        assert!(row.ends_with("6f9619ff"));
    }

    #[test]
    fn test_list_total() {
        let view = TransactionView::new(&[], "$", "%Y-%m-%d");
        let mut income = sample();
        income.transaction_type = TransactionType::Income;
        income.amount = Money::from_cents(8_000);

        let output = view.list(&[sample(), income]);
        assert!(output.contains("2 transaction(s), net $ 30.00"));
    }

    #[test]
    fn test_details_unknown_category() {
        let view = TransactionView::new(&[], "€", "%d/%m/%Y");
        let mut txn = sample();
        txn.category_id = Some(CategoryId::from("c-unknown"));

        let output = view.details(&txn);
        assert!(output.contains("Date:        15/01/2025"));
        assert!(output.contains("(uncategorized)"));
        assert!(output.contains("Test Store"));
        assert!(!output.contains("simulated"));
    }

    #[test]
    fn test_unusable_date_format() {
        let view = TransactionView::new(&[], "$", "%Q");
        assert!(view.row(&sample()).starts_with("2025-01-15"));
        assert!(view.details(&sample()).contains("Date:        2025-01-15"));
    }
}
