//! Aggregate statistics over the platform collection.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use super::expiry::is_expiring_soon_at;
use crate::catalog::{self, PLAN_TYPES};
use crate::models::{Currency, Platform};
use crate::store::PlatformStore;

/// Platforms grouped under one catalog plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStats {
    pub plan: &'static str,
    pub count: usize,
    pub total_balance: f64,
    pub platform_ids: Vec<String>,
}

/// Headline numbers for a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_platforms: usize,
    pub totals: BTreeMap<Currency, f64>,
    pub expiring_soon: usize,
}

/// Sum balances per currency. Currencies without records are absent.
pub fn total_balance_by_currency(platforms: &[Platform]) -> BTreeMap<Currency, f64> {
    let mut totals = BTreeMap::new();
    for platform in platforms {
        *totals.entry(platform.currency).or_insert(0.0) += platform.balance;
    }
    totals
}

pub fn expiring_soon_count_at(platforms: &[Platform], threshold_days: i64, now: NaiveDateTime) -> usize {
    platforms
        .iter()
        .filter(|p| is_expiring_soon_at(p.expiry_date, threshold_days, now))
        .count()
}

/// Group platforms by catalog plan, in catalog order.
///
/// Platforms without a plan count as `free`; platforms whose plan is not in
/// the catalog are left out.
pub fn stats_by_plan(platforms: &[Platform]) -> Vec<PlanStats> {
    let mut stats: Vec<PlanStats> = PLAN_TYPES
        .iter()
        .map(|p| PlanStats {
            plan: p.key,
            count: 0,
            total_balance: 0.0,
            platform_ids: Vec::new(),
        })
        .collect();

    for platform in platforms {
        let key = platform.plan.as_deref().unwrap_or(catalog::FALLBACK_PLAN);
        if let Some(entry) = stats.iter_mut().find(|s| s.plan == key) {
            entry.count += 1;
            entry.total_balance += platform.balance;
            entry.platform_ids.push(platform.id.clone());
        }
    }

    stats
}

// ---------------------------------------------------------------------------
// StatsQuery
// ---------------------------------------------------------------------------

pub struct StatsQuery<'a> {
    store: &'a PlatformStore,
    default_threshold_days: i64,
}

impl<'a> StatsQuery<'a> {
    /// Create a new `StatsQuery` bound to the given store.
    ///
    /// `default_threshold_days` is used when an expiry query is not given a
    /// window of its own.
    pub fn new(store: &'a PlatformStore, default_threshold_days: i64) -> Self {
        Self {
            store,
            default_threshold_days,
        }
    }

    pub fn total_balance_by_currency(&self) -> BTreeMap<Currency, f64> {
        total_balance_by_currency(&self.store.list())
    }

    /// Count platforms expiring within `threshold_days` (or the configured
    /// default) of now.
    pub fn expiring_soon_count(&self, threshold_days: Option<i64>) -> usize {
        let days = threshold_days.unwrap_or(self.default_threshold_days);
        expiring_soon_count_at(&self.store.list(), days, Local::now().naive_local())
    }

    pub fn stats_by_plan(&self) -> Vec<PlanStats> {
        stats_by_plan(&self.store.list())
    }

    /// Platform count, per-currency totals and expiring-soon count from a
    /// single read of the collection.
    pub fn summary(&self) -> Summary {
        let platforms = self.store.list();
        Summary {
            total_platforms: platforms.len(),
            totals: total_balance_by_currency(&platforms),
            expiring_soon: expiring_soon_count_at(
                &platforms,
                self.default_threshold_days,
                Local::now().naive_local(),
            ),
        }
    }
}
