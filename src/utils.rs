use chrono::{DateTime, Utc};

use crate::models::TransactionKind;

/// Which page load is current. Every reload bumps the counter; a task
/// keeps the value it started with and its response only counts while
/// that value is still the latest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadGeneration(u64);

impl LoadGeneration {
    pub fn next(self) -> LoadGeneration {
        LoadGeneration(self.0 + 1)
    }
}

/// Gate for storing an async result: a value from a superseded load
/// is dropped instead of overwriting the current one.
pub fn keep_if_current<T>(started: LoadGeneration, current: LoadGeneration, value: T) -> Option<T> {
    if started == current {
        Some(value)
    } else {
        None
    }
}

/// "12345 RUB" minor units -> "123.45 RUB". Negative values keep their
/// sign, which the dashboard needs for net flow.
pub fn format_minor(minor: i64, currency: &str) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let magnitude = minor.abs();
    format!(
        "{}{}.{:02} {}",
        sign,
        magnitude / 100,
        magnitude % 100,
        currency
    )
}

/// Display amount for the transactions list. The stored magnitude is
/// unsigned; the sign comes from the kind alone: expenses are
/// outflows, income is an inflow, transfers are neutral.
pub fn signed_amount(kind: TransactionKind, amount_minor: i64, currency: &str) -> String {
    let magnitude = amount_minor.abs();
    match kind {
        TransactionKind::Expense => format!("-{}", format_minor(magnitude, currency)),
        TransactionKind::Income => format!("+{}", format_minor(magnitude, currency)),
        TransactionKind::Transfer => format_minor(magnitude, currency),
    }
}

pub fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => "amount expense",
        TransactionKind::Income => "amount income",
        TransactionKind::Transfer => "amount transfer",
    }
}

pub fn format_dt(dt: &str) -> String {
    DateTime::parse_from_rfc3339(dt)
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| dt.to_string())
}

pub fn today_iso() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// 0.27 -> "27%".
pub fn format_share(share: f64) -> String {
    format!("{:.0}%", share * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minor_units_with_two_decimals() {
        assert_eq!(format_minor(12345, "RUB"), "123.45 RUB");
        assert_eq!(format_minor(5000, "USD"), "50.00 USD");
        assert_eq!(format_minor(-500, "RUB"), "-5.00 RUB");
        assert_eq!(format_minor(7, "EUR"), "0.07 EUR");
    }

    #[test]
    fn display_sign_comes_from_kind_not_from_the_number() {
        assert_eq!(
            signed_amount(TransactionKind::Expense, 12345, "RUB"),
            "-123.45 RUB"
        );
        assert_eq!(
            signed_amount(TransactionKind::Income, 12345, "RUB"),
            "+123.45 RUB"
        );
        assert_eq!(
            signed_amount(TransactionKind::Transfer, 5000, "RUB"),
            "50.00 RUB"
        );
        // A signed magnitude coming back from the server renders the
        // same as an unsigned one.
        assert_eq!(
            signed_amount(TransactionKind::Expense, -12345, "RUB"),
            "-123.45 RUB"
        );
    }

    #[test]
    fn formats_iso_datetimes_for_the_list() {
        assert_eq!(
            format_dt("2024-03-01T12:30:00.000Z"),
            "2024-03-01 12:30"
        );
        assert_eq!(format_dt("not a date"), "not a date");
    }

    #[test]
    fn formats_category_shares_as_percentages() {
        assert_eq!(format_share(0.27), "27%");
        assert_eq!(format_share(0.0), "0%");
        assert_eq!(format_share(1.0), "100%");
    }

    #[test]
    fn results_from_a_superseded_load_are_dropped() {
        let first = LoadGeneration::default().next();
        assert_eq!(keep_if_current(first, first, "summary"), Some("summary"));

        // Parameters changed while the request was in flight: the next
        // load started, so the old result must not be stored.
        let second = first.next();
        assert_eq!(keep_if_current(first, second, "summary"), None);
        assert_eq!(keep_if_current(second, second, "trends"), Some("trends"));
    }
}
