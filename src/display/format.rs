//! Shared formatting helpers

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::api::Origin;
use crate::config::settings::DEFAULT_DATE_FORMAT;
use crate::models::Money;

/// Format an amount with a currency symbol and thousands separators
pub fn format_currency(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// One decimal place, e.g. `37.5%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Cut `text` to at most `max` characters, ending in `...` when cut
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max < 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{}...", kept)
}

/// Left-aligned, truncated cell of exactly `width` characters
pub(crate) fn cell(text: &str, width: usize) -> String {
    format!("{:width$}", truncate_text(text, width), width = width)
}

/// Render `date` with `date_format`, falling back to ISO dates when chrono
/// rejects the pattern
pub fn format_date(date: DateTime<Utc>, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_ok() {
        return out;
    }
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

/// "Today", "3 days ago", "2 months ago", or the date itself after a year
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>, date_format: &str) -> String {
    let days = (now.date_naive() - date.date_naive()).num_days();

    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => plural(days / 7, "week"),
        30..=364 => plural(days / 30, "month"),
        _ => format_date(date, date_format),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Warning line for data that did not come from the backend
pub fn origin_banner(origin: Origin) -> Option<&'static str> {
    match origin {
        Origin::Live => None,
        Origin::Mock => Some("⚠ Backend unavailable: showing sample data."),
        Origin::Simulated => Some("⚠ Simulate mode: nothing was sent to the backend."),
    }
}

/// Prefix `body` with the origin banner, if any
pub fn with_banner(origin: Origin, body: String) -> String {
    match origin_banner(origin) {
        Some(banner) => format!("{}\n\n{}", banner, body),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Money::from_cents(125_050), "$"), "$ 1,250.50");
        assert_eq!(format_currency(Money::from_cents(-500), "€"), "-€ 5.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(37.5), "37.5%");
        assert_eq!(format_percentage(0.0), "0.0%");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Short", 10), "Short");
        assert_eq!(truncate_text("A very long string", 10), "A very ...");
        assert_eq!(truncate_text("Café au lait", 6), "Caf...");
        assert_eq!(truncate_text("abcdef", 2), "ab");
    }

    #[test]
    fn test_relative_dates() {
        let now = now();
        let fmt = "%Y-%m-%d";
        assert_eq!(format_relative_date(now, now, fmt), "Today");
        assert_eq!(format_relative_date(now - Duration::days(1), now, fmt), "Yesterday");
        assert_eq!(format_relative_date(now - Duration::days(4), now, fmt), "4 days ago");
        assert_eq!(format_relative_date(now - Duration::days(8), now, fmt), "1 week ago");
        assert_eq!(format_relative_date(now - Duration::days(21), now, fmt), "3 weeks ago");
        assert_eq!(format_relative_date(now - Duration::days(65), now, fmt), "2 months ago");
        assert_eq!(format_relative_date(now - Duration::days(400), now, fmt), "2024-05-11");
    }

    #[test]
    fn test_unusable_date_format_falls_back() {
        let now = now();
        let old = now - Duration::days(400);
        assert_eq!(format_date(old, "%Q"), "2024-05-11");
        assert_eq!(format_relative_date(old, now, "%Q"), "2024-05-11");
        assert_eq!(format_date(old, "%d/%m/%Y"), "11/05/2024");
    }

    #[test]
    fn test_banner_only_for_non_live() {
        assert!(origin_banner(Origin::Live).is_none());
        assert!(with_banner(Origin::Mock, "body".into()).starts_with("⚠ Backend unavailable"));
        assert_eq!(with_banner(Origin::Live, "body".into()), "body");
    }
}
