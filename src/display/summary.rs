//! Summary, stats and dashboard formatting

use crate::models::{CategoryTotal, TransactionStats, TransactionSummary};
use crate::services::{DashboardStats, ExpenseSlice};

use super::format::{format_currency, format_percentage, truncate_text};

const BAR_WIDTH: usize = 20;

/// Horizontal bar scaled against `max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn format_summary(summary: &TransactionSummary, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Income:   {:>16}\n",
        format_currency(summary.total_income, symbol)
    ));
    output.push_str(&format!(
        "Expense:  {:>16}\n",
        format_currency(summary.total_expense, symbol)
    ));
    output.push_str(&format!("{}\n", "─".repeat(26)));
    output.push_str(&format!(
        "Balance:  {:>16}\n",
        format_currency(summary.balance, symbol)
    ));

    if !summary.expense_by_category.is_empty() {
        output.push_str("\nExpenses by category:\n");
        for slice in &summary.expense_by_category {
            let name = if slice.category_name.is_empty() {
                &slice.category_id
            } else {
                &slice.category_name
            };
            output.push_str(&format!(
                "  {:<20} {:>14} {:>7}\n",
                truncate_text(name, 20),
                format_currency(slice.amount, symbol),
                format_percentage(slice.percentage)
            ));
        }
    }

    output
}

/// Named figures from the stats endpoint
pub fn format_stats(stats: &TransactionStats) -> String {
    if stats.is_empty() {
        return "No statistics available.".to_string();
    }

    let width = stats.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    stats
        .iter()
        .map(|(key, value)| format!("{:<width$}  {:>12.2}\n", key, value, width = width))
        .collect()
}

pub fn format_category_totals(totals: &[CategoryTotal], symbol: &str) -> String {
    if totals.is_empty() {
        return "No category totals found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<24} {:>16}\n", "Category", "Amount"));
    output.push_str(&format!("{}\n", "-".repeat(41)));
    for total in totals {
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            truncate_text(&total.category, 24),
            format_currency(total.amount, symbol)
        ));
    }
    output
}

/// Dashboard: headline figures and the expense distribution
pub fn format_dashboard(stats: &DashboardStats, slices: &[ExpenseSlice], symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Dashboard\n");
    output.push_str(&format!("{}\n", "═".repeat(40)));
    output.push_str(&format!(
        "Total balance:    {:>16}\n",
        format_currency(stats.total_balance, symbol)
    ));
    output.push_str(&format!(
        "Income:           {:>16}\n",
        format_currency(stats.income, symbol)
    ));
    output.push_str(&format!(
        "Expense:          {:>16}\n",
        format_currency(stats.expense, symbol)
    ));
    output.push_str(&format!(
        "Monthly savings:  {:>16}\n",
        format_currency(stats.monthly_savings, symbol)
    ));
    output.push_str(&format!(
        "Spent of income:  {:>16}\n",
        format_percentage(stats.expense_percentage)
    ));

    output.push_str("\nExpense distribution\n");
    output.push_str(&format!("{}\n", "─".repeat(40)));

    if slices.is_empty() {
        output.push_str("No expenses recorded.\n");
        return output;
    }

    let max = slices
        .iter()
        .map(|s| s.amount.as_decimal())
        .fold(0.0_f64, f64::max);
    for slice in slices {
        output.push_str(&format!(
            "{:<16} {} {:>14} {:>7}\n",
            truncate_text(&slice.category, 16),
            format_bar(slice.amount.as_decimal(), max, BAR_WIDTH),
            format_currency(slice.amount, symbol),
            format_percentage(slice.percentage)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{simulated_stats, Money};

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_format_summary() {
        let output = format_summary(&TransactionSummary::simulated(), "$");
        assert!(output.contains("$ 1,000.00"));
        assert!(output.contains("$ 750.00"));
        assert!(output.contains("Balance:"));
        assert!(!output.contains("Expenses by category"));
    }

    #[test]
    fn test_format_stats() {
        let output = format_stats(&simulated_stats());
        assert_eq!(output.lines().count(), 3);
        assert!(output.starts_with("expense"));
        assert_eq!(format_stats(&TransactionStats::new()), "No statistics available.");
    }

    #[test]
    fn test_format_category_totals_empty() {
        assert_eq!(format_category_totals(&[], "$"), "No category totals found.");
    }

    #[test]
    fn test_dashboard() {
        let stats = DashboardStats::from_summary(&TransactionSummary::simulated());
        let slices = vec![ExpenseSlice {
            category: "Food".into(),
            amount: Money::from_cents(7_500),
            count: 3,
            percentage: 100.0,
        }];

        let output = format_dashboard(&stats, &slices, "$");
        assert!(output.contains("Monthly savings:"));
        assert!(output.contains("75.0%"));
        assert!(output.contains(&"█".repeat(BAR_WIDTH)));

        let empty = format_dashboard(&stats, &[], "$");
        assert!(empty.contains("No expenses recorded."));
    }
}
