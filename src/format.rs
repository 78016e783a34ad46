//! Display formatting for balances and dates.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::catalog::PLAN_NOT_SET;
use crate::models::Currency;

pub const NEVER_REFRESHED: &str = "Never refreshed";

/// Render a balance in its currency.
///
/// Tokens render as a grouped count followed by the `tokens` unit
/// (`2,000,000 tokens`); monetary currencies render with their symbol and two
/// decimals (`¥12.50`).
pub fn format_balance(balance: f64, currency: Currency) -> String {
    let balance = balance + 0.0;
    match currency {
        Currency::Tokens => format!("{} {}", group_thousands(balance), currency.symbol()),
        _ => format!("{}{:.2}", currency.symbol(), balance),
    }
}

pub fn currency_symbol(currency: Currency) -> &'static str {
    currency.symbol()
}

/// Render per-currency totals as one space-separated line.
pub fn format_totals(totals: &BTreeMap<Currency, f64>) -> String {
    totals
        .iter()
        .map(|(currency, amount)| format_balance(*amount, *currency))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Long-form expiry date, or `Not set` when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => PLAN_NOT_SET.to_string(),
    }
}

/// Local calendar date of the last refresh, or `Never refreshed`.
pub fn format_refresh_date(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => NEVER_REFRESHED.to_string(),
    }
}

/// Group the integer part by thousands and keep up to three fractional
/// digits, dropping trailing zeros.
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}
