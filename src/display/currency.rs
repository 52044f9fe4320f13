//! Currency and payment method display formatting

use crate::models::{Currency, PaymentMethod};

use super::format::truncate_text;

/// Format currencies as a table, marking the default
pub fn format_currency_list(currencies: &[Currency]) -> String {
    if currencies.is_empty() {
        return "No currencies found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:1} {:<5} {:<6} {:<24} {}\n",
        "", "Code", "Symbol", "Name", "ID"
    ));
    output.push_str(&format!("{}\n", "-".repeat(74)));

    for currency in currencies {
        let marker = if currency.is_default { "*" } else { " " };
        let inactive = if currency.is_active { "" } else { " (inactive)" };
        output.push_str(&format!(
            "{:1} {:<5} {:<6} {:<24} {}{}\n",
            marker,
            currency.code,
            currency.symbol,
            truncate_text(&currency.name, 24),
            currency.id,
            inactive
        ));
    }

    output.push_str("\n* default currency\n");
    output
}

pub fn format_currency_details(currency: &Currency) -> String {
    let mut output = String::new();
    output.push_str(&format!("Currency: {} ({})\n", currency.name, currency.code));
    output.push_str(&format!("  ID:      {}\n", currency.id));
    output.push_str(&format!("  Symbol:  {}\n", currency.symbol));
    output.push_str(&format!(
        "  Default: {}\n",
        if currency.is_default { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Active:  {}\n",
        if currency.is_active { "Yes" } else { "No" }
    ));
    output
}

/// Format payment methods as a table
pub fn format_payment_method_list(methods: &[PaymentMethod]) -> String {
    if methods.is_empty() {
        return "No payment methods found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:2}  {:<20}  {:<30}  {}\n",
        "", "Payment method", "Description", "ID"
    ));
    output.push_str(&format!("{}\n", "-".repeat(94)));

    for method in methods {
        let inactive = if method.is_active { "" } else { " (inactive)" };
        output.push_str(&format!(
            "{:2}  {:<20}  {:<30}  {}{}\n",
            method.icon,
            truncate_text(&method.name, 20),
            truncate_text(&method.description, 30),
            method.id,
            inactive
        ));
    }

    output
}

pub fn format_payment_method_details(method: &PaymentMethod) -> String {
    let mut output = String::new();
    output.push_str(&format!("Payment method: {}\n", method.name));
    output.push_str(&format!("  ID:          {}\n", method.id));
    if !method.icon.is_empty() {
        output.push_str(&format!("  Icon:        {}\n", method.icon));
    }
    if !method.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", method.description));
    }
    output.push_str(&format!(
        "  Active:      {}\n",
        if method.is_active { "Yes" } else { "No" }
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock_data;

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_currency_list(&[]), "No currencies found.");
        assert_eq!(format_payment_method_list(&[]), "No payment methods found.");
    }

    #[test]
    fn test_currency_list_marks_default() {
        let output = format_currency_list(&mock_data::currencies());
        let usd = output.lines().find(|l| l.contains("USD")).unwrap();
        assert!(usd.starts_with('*'));
        let eur = output.lines().find(|l| l.contains("EUR")).unwrap();
        assert!(eur.starts_with(' '));
    }

    #[test]
    fn test_payment_method_details() {
        let mut method = mock_data::payment_method("33333333-3333-3333-3333-333333333334");
        method.is_active = false;
        let output = format_payment_method_details(&method);
        assert!(output.starts_with("Payment method: Credit card"));
        assert!(output.contains("Active:      No"));
    }
}
