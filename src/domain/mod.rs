//! Domain operations over the platform store.
//!
//! Each module provides a lightweight struct that borrows the
//! [`PlatformStore`](crate::store::PlatformStore) and interprets its records
//! against the static catalogs. Pure helpers that take the current date or
//! time as an argument sit next to them so the date-dependent rules can be
//! exercised without touching the clock.

pub mod expiry;
pub mod platforms;
pub mod refresh;
pub mod stats;
pub mod view;

pub use expiry::{days_until, is_expiring_soon, is_expiring_soon_at};
pub use platforms::PlatformManager;
pub use refresh::{needs_refresh_on, DailyRefresh};
pub use stats::{PlanStats, StatsQuery, Summary};
pub use view::{PlatformView, RefreshStatus};
