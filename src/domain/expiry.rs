//! Expiry-window checks.
//!
//! An expiry date means "expires at local midnight starting that day".

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Whole days from `now` until `expiry`, rounded up.
///
/// Zero or negative once the expiry instant has been reached.
pub fn days_until(expiry: NaiveDate, now: NaiveDateTime) -> i64 {
    let ms = (expiry.and_time(NaiveTime::MIN) - now).num_milliseconds();
    if ms > 0 {
        (ms + DAY_MS - 1) / DAY_MS
    } else {
        // Truncating division rounds non-positive values up already.
        ms / DAY_MS
    }
}

/// True iff `expiry` is set and lies strictly in the future within
/// `threshold_days` of `now`.
pub fn is_expiring_soon_at(expiry: Option<NaiveDate>, threshold_days: i64, now: NaiveDateTime) -> bool {
    match expiry {
        Some(expiry) => {
            let days = days_until(expiry, now);
            days > 0 && days <= threshold_days
        }
        None => false,
    }
}

/// [`is_expiring_soon_at`] evaluated against the local clock.
pub fn is_expiring_soon(expiry: Option<NaiveDate>, threshold_days: i64) -> bool {
    is_expiring_soon_at(expiry, threshold_days, Local::now().naive_local())
}
