//! Aggregate shapes returned by the summary, stats and pagination endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;
use super::transaction::Transaction;

/// Dashboard summary from `GET /transactions/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    #[serde(default)]
    pub total_income: Money,

    #[serde(default)]
    pub total_expense: Money,

    #[serde(default)]
    pub balance: Money,

    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,

    #[serde(default)]
    pub expense_by_category: Vec<CategoryExpense>,
}

impl TransactionSummary {
    /// The canned summary used while the backend is simulated
    pub fn simulated() -> Self {
        Self {
            total_income: Money::from_units_cents(1000, 0),
            total_expense: Money::from_units_cents(750, 0),
            balance: Money::from_units_cents(250, 0),
            recent_transactions: Vec::new(),
            expense_by_category: Vec::new(),
        }
    }
}

/// One slice of the expense breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    pub category_id: String,

    #[serde(default)]
    pub category_name: String,

    pub amount: Money,

    #[serde(default)]
    pub percentage: f64,
}

/// A list with its length, as returned by the paged endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    /// Wrap a full list; `total` is its length
    pub fn from_vec(data: Vec<T>) -> Self {
        let total = data.len();
        Self { data, total }
    }

    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Row of `GET /transactions/summary/category`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
}

/// Named figures from `GET /transactions/stats`
pub type TransactionStats = BTreeMap<String, f64>;

/// The stats reported while the backend is simulated
pub fn simulated_stats() -> TransactionStats {
    ["total", "income", "expense"]
        .into_iter()
        .map(|key| (key.to_string(), 0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_camel_case_wire() {
        let json = r#"{
            "totalIncome": 2500,
            "totalExpense": 1200.5,
            "balance": 1299.5,
            "recentTransactions": [],
            "expenseByCategory": [
                {"categoryId": "c-1", "categoryName": "Food", "amount": 800, "percentage": 66.6}
            ]
        }"#;
        let summary: TransactionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_income.cents(), 250000);
        assert_eq!(summary.total_expense.cents(), 120050);
        assert_eq!(summary.expense_by_category[0].category_name, "Food");
    }

    #[test]
    fn test_summary_missing_fields_default() {
        let summary: TransactionSummary = serde_json::from_str("{}").unwrap();
        assert!(summary.balance.is_zero());
        assert!(summary.recent_transactions.is_empty());
    }

    #[test]
    fn test_simulated_summary() {
        let summary = TransactionSummary::simulated();
        assert_eq!(summary.balance, summary.total_income - summary.total_expense);
    }

    #[test]
    fn test_page_total_is_len() {
        let page = Page::from_vec(vec![1, 2, 3]);
        assert_eq!(page.total, 3);
        assert!(Page::<u8>::empty().is_empty());
    }

    #[test]
    fn test_simulated_stats() {
        let stats = simulated_stats();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats.get("income"), Some(&0.0));
    }
}
