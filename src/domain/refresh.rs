//! Daily quota refresh for plans flagged `daily_refresh`.
//!
//! A daily-refresh platform is *stale* until its balance has been reset to
//! the plan quota on the current local calendar day, and becomes stale again
//! at the next local midnight. Only [`DailyRefresh::refresh_balance`] and
//! [`DailyRefresh::refresh_all`] move it back to fresh.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::catalog::{self, PlanType};
use crate::error::{Result, TokenBankError};
use crate::models::{Currency, Platform, PlatformPatch};
use crate::store::PlatformStore;

/// Whether `platform` still needs its quota reset on the local day `today`.
///
/// False for plans without daily refresh. Refresh instants are compared by
/// local calendar date, never by instant.
pub fn needs_refresh_on(platform: &Platform, today: NaiveDate) -> bool {
    if !catalog::is_daily_refresh_plan(platform.plan.as_deref()) {
        return false;
    }
    match platform.last_refresh_date {
        Some(at) => at.with_timezone(&Local).date_naive() != today,
        None => true,
    }
}

/// Patch that resets a platform to the daily quota of `plan` as of `now`.
pub fn refresh_patch(plan: &PlanType, now: DateTime<Utc>) -> PlatformPatch {
    PlatformPatch {
        balance: Some(plan.daily_tokens),
        currency: Some(Currency::Tokens),
        last_refresh_date: Some(Some(now)),
        ..Default::default()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn daily_plan(platform: &Platform) -> Option<&'static PlanType> {
    catalog::plan_type(platform.plan.as_deref()).filter(|p| p.daily_refresh)
}

// ---------------------------------------------------------------------------
// DailyRefresh
// ---------------------------------------------------------------------------

pub struct DailyRefresh<'a> {
    store: &'a PlatformStore,
}

impl<'a> DailyRefresh<'a> {
    /// Create a new `DailyRefresh` bound to the given store.
    pub fn new(store: &'a PlatformStore) -> Self {
        Self { store }
    }

    /// Whether the platform `id` exists, is on a daily-refresh plan, and has
    /// not been refreshed today.
    pub fn needs_refresh(&self, id: &str) -> bool {
        self.store
            .get_by_id(id)
            .is_some_and(|p| needs_refresh_on(&p, today()))
    }

    pub fn last_refresh_date(&self, id: &str) -> Option<DateTime<Utc>> {
        self.store.get_by_id(id).and_then(|p| p.last_refresh_date)
    }

    /// Reset one platform to its plan's daily quota, in tokens, stamped now.
    ///
    /// Fails with `NotFound` for an unknown id and `InvalidArgument` when the
    /// platform's plan has no daily refresh.
    pub fn refresh_balance(&self, id: &str) -> Result<Platform> {
        let platform = self
            .store
            .get_by_id(id)
            .ok_or_else(|| TokenBankError::NotFound(format!("Platform {id}")))?;
        let plan = daily_plan(&platform).ok_or_else(|| {
            TokenBankError::InvalidArgument(format!("Platform {id} is not on a daily-refresh plan"))
        })?;
        let refreshed = self.store.update(id, &refresh_patch(plan, Utc::now()))?;
        tracing::info!(id, tokens = plan.daily_tokens, "refreshed daily balance");
        Ok(refreshed)
    }

    /// Refresh every platform that needs it in one pass over the collection.
    ///
    /// Returns the number of platforms refreshed. A second call on the same
    /// local day refreshes nothing.
    pub fn refresh_all(&self) -> Result<usize> {
        let today = today();
        let now = Utc::now();
        let mut platforms = self.store.list();
        let mut refreshed = 0;

        for platform in platforms.iter_mut() {
            if !needs_refresh_on(platform, today) {
                continue;
            }
            if let Some(plan) = daily_plan(platform) {
                *platform = platform.merged(&refresh_patch(plan, now), now);
                refreshed += 1;
            }
        }

        if refreshed > 0 {
            self.store.save(&platforms)?;
            tracing::info!(count = refreshed, "refreshed daily platforms");
        }
        Ok(refreshed)
    }
}
