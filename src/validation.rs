//! Input validation and the text parsers it shares with normalization.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::models::PlatformInput;

pub const NAME_REQUIRED: &str = "Platform name is required";
pub const BALANCE_REQUIRED: &str = "Balance is required";
pub const BALANCE_INVALID: &str = "Balance must be a non-negative number";
pub const EXPIRY_INVALID: &str = "Expiry date is not a valid date";

/// Outcome of [`validate_platform`]. `errors` lists every violated rule in
/// rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check a platform input against every rule and report all violations.
pub fn validate_platform(input: &PlatformInput) -> Validation {
    let mut errors = Vec::new();

    if input.name.trim().is_empty() {
        errors.push(NAME_REQUIRED.to_string());
    }

    match input.balance.as_deref().map(str::trim) {
        None | Some("") => errors.push(BALANCE_REQUIRED.to_string()),
        Some(raw) => {
            if parse_balance(raw).is_none() {
                errors.push(BALANCE_INVALID.to_string());
            }
        }
    }

    if let Some(raw) = non_empty(input.expiry_date.as_deref()) {
        if parse_date(raw).is_none() {
            errors.push(EXPIRY_INVALID.to_string());
        }
    }

    Validation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Parse a balance; `None` unless the text is a finite, non-negative number.
pub fn parse_balance(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    // Adding 0.0 turns -0.0 into 0.0.
    (value.is_finite() && value >= 0.0).then_some(value + 0.0)
}

/// Parse a calendar date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Treat blank optional text as absent.
pub(crate) fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
