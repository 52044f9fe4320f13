//! Dashboard statistics
//!
//! Computed locally from the summary endpoint and from fetched transaction
//! lists.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Category, Money, Transaction, TransactionSummary};

/// Label for expenses whose category is unknown
pub const OTHER_CATEGORY: &str = "Other";

/// Headline figures shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_balance: Money,
    pub income: Money,
    pub expense: Money,
    /// Income minus expense
    pub monthly_savings: Money,
    /// Expense as a share of income, 0 when there is no income
    pub expense_percentage: f64,
}

impl DashboardStats {
    pub fn from_summary(summary: &TransactionSummary) -> Self {
        let income = summary.total_income;
        let expense = summary.total_expense;
        Self {
            total_balance: summary.balance,
            income,
            expense,
            monthly_savings: income - expense,
            expense_percentage: percentage_of(expense, income),
        }
    }
}

/// Income, expense and balance of a transaction list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) =
        transactions
            .iter()
            .fold((Money::zero(), Money::zero()), |(income, expense), txn| {
                if txn.is_income() {
                    (income + txn.amount.abs(), expense)
                } else {
                    (income, expense + txn.amount.abs())
                }
            });

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// One category's share of total expense
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSlice {
    pub category: String,
    pub amount: Money,
    pub count: usize,
    pub percentage: f64,
}

/// Expense totals per category, largest first
pub fn expense_distribution(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<ExpenseSlice> {
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut by_category: HashMap<String, (Money, usize)> = HashMap::new();
    let mut total = Money::zero();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let label = category_label(txn, &names);
        let entry = by_category.entry(label).or_insert((Money::zero(), 0));
        entry.0 += txn.amount.abs();
        entry.1 += 1;
        total += txn.amount.abs();
    }

    let mut slices: Vec<ExpenseSlice> = by_category
        .into_iter()
        .map(|(category, (amount, count))| ExpenseSlice {
            category,
            amount,
            count,
            percentage: percentage_of(amount, total),
        })
        .collect();

    // Ties are broken by name so the output is stable
    slices.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    slices
}

fn category_label(txn: &Transaction, names: &HashMap<&str, &str>) -> String {
    if let Some(name) = txn.effective_category_id().and_then(|id| names.get(id)) {
        return (*name).to_string();
    }
    txn.category
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(OTHER_CATEGORY)
        .to_string()
}

fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}
