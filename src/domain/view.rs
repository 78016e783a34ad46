//! Display-ready projection of a platform for front ends.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::expiry::is_expiring_soon_at;
use super::refresh::needs_refresh_on;
use crate::catalog;
use crate::format::{format_balance, format_date, format_refresh_date};
use crate::models::Platform;

/// Daily-refresh state shown next to a platform's balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshStatus {
    pub needs_refresh: bool,
    pub daily_tokens: f64,
    /// Local date of the last refresh, or `Never refreshed`.
    pub last_refresh: String,
}

/// Everything a card for one platform displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformView {
    pub id: String,
    pub name: String,
    pub type_name: String,
    pub type_icon: &'static str,
    pub plan_name: &'static str,
    pub plan_icon: &'static str,
    pub plan_color: &'static str,
    pub balance_text: String,
    pub expiry_text: String,
    pub expiring_soon: bool,
    pub notes: String,
    /// Present only for daily-refresh plans.
    pub refresh: Option<RefreshStatus>,
}

impl PlatformView {
    /// Build the view of `platform` as seen at local time `now`.
    pub fn of(platform: &Platform, now: NaiveDateTime, threshold_days: i64) -> Self {
        let plan = platform.plan.as_deref();
        let refresh = catalog::is_daily_refresh_plan(plan).then(|| RefreshStatus {
            needs_refresh: needs_refresh_on(platform, now.date()),
            daily_tokens: catalog::daily_tokens(plan),
            last_refresh: format_refresh_date(platform.last_refresh_date),
        });

        Self {
            id: platform.id.clone(),
            name: platform.name.clone(),
            type_name: catalog::type_name(&platform.type_field).to_string(),
            type_icon: catalog::type_icon(&platform.type_field),
            plan_name: catalog::plan_name(plan),
            plan_icon: catalog::plan_icon(plan),
            plan_color: catalog::plan_color(plan),
            balance_text: format_balance(platform.balance, platform.currency),
            expiry_text: format_date(platform.expiry_date),
            expiring_soon: is_expiring_soon_at(platform.expiry_date, threshold_days, now),
            notes: platform.notes.clone(),
            refresh,
        }
    }
}
