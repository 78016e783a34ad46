//! TokenBank: a local tracker for balances held on AI-service platforms.
//!
//! Records each platform's type, plan tier, monetary or token balance, expiry
//! date and notes in a single JSON file, and derives what a front end shows:
//! per-currency totals, platforms expiring soon, and the daily quota reset of
//! the collaboration plan.
//!
//! # Quick start
//!
//! ```no_run
//! use tokenbank::{PlatformInput, TokenBank};
//!
//! let bank = TokenBank::builder().build().unwrap();
//!
//! let input = PlatformInput::for_type("deepseek", "").with_balance("120.5");
//! if tokenbank::validate_platform(&input).valid {
//!     bank.platforms().create(&input).unwrap();
//! }
//!
//! bank.daily().refresh_all().unwrap();
//! let totals = bank.stats().total_balance_by_currency();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod models;
pub mod store;
pub mod validation;

#[cfg(feature = "async")]
pub use async_client::AsyncTokenBank;
pub use domain::{PlatformView, RefreshStatus};
pub use error::{Result, TokenBankError};
pub use models::{Currency, NewPlatform, Platform, PlatformInput, PlatformPatch};
pub use store::PlatformStore;
pub use validation::{validate_platform, Validation};

use chrono::Local;
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// TokenBankBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`TokenBank`] instance.
///
/// Use [`TokenBank::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](TokenBankBuilder::build) to open the store.
pub struct TokenBankBuilder {
    data_dir: Option<PathBuf>,
    expiry_threshold_days: i64,
}

impl Default for TokenBankBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            expiry_threshold_days: config::DEFAULT_EXPIRY_THRESHOLD_DAYS,
        }
    }
}

impl TokenBankBuilder {
    /// Set a custom data directory.
    ///
    /// If not set, the platform-appropriate data directory is used (e.g.
    /// `~/.local/share/tokenbank` on Linux, `~/Library/Application
    /// Support/tokenbank` on macOS, `%APPDATA%\tokenbank` on Windows).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the default "expiring soon" window in days.
    ///
    /// Defaults to 7.
    pub fn expiry_threshold_days(mut self, days: i64) -> Self {
        self.expiry_threshold_days = days;
        self
    }

    /// Build the bank, creating the data directory if needed.
    ///
    /// Nothing is read from storage until the first query.
    pub fn build(self) -> Result<TokenBank> {
        let store = PlatformStore::new(self.data_dir)?;
        Ok(TokenBank {
            store,
            expiry_threshold_days: self.expiry_threshold_days,
        })
    }
}

// ---------------------------------------------------------------------------
// TokenBank
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Owns the [`PlatformStore`] and exposes domain operations as lightweight
/// borrowing wrappers.
pub struct TokenBank {
    store: PlatformStore,
    expiry_threshold_days: i64,
}

impl TokenBank {
    /// Create a new builder for configuring the bank.
    pub fn builder() -> TokenBankBuilder {
        TokenBankBuilder::default()
    }

    // -- Accessors ---------------------------------------------------------

    /// Platform create/update/delete driven by form input.
    pub fn platforms(&self) -> domain::PlatformManager<'_> {
        domain::PlatformManager::new(&self.store)
    }

    /// Aggregate statistics.
    pub fn stats(&self) -> domain::StatsQuery<'_> {
        domain::StatsQuery::new(&self.store, self.expiry_threshold_days)
    }

    /// Daily quota refresh for daily-refresh plans.
    pub fn daily(&self) -> domain::DailyRefresh<'_> {
        domain::DailyRefresh::new(&self.store)
    }

    /// Raw persistence operations, including import and export.
    pub fn store(&self) -> &PlatformStore {
        &self.store
    }

    // -- Presentation ------------------------------------------------------

    /// Display-ready view of `platform` at the current local time.
    pub fn view(&self, platform: &Platform) -> PlatformView {
        PlatformView::of(platform, Local::now().naive_local(), self.expiry_threshold_days)
    }

    /// Views of every platform, most important plan first.
    pub fn views(&self) -> Vec<PlatformView> {
        let now = Local::now().naive_local();
        self.platforms()
            .sorted_by_plan()
            .iter()
            .map(|p| PlatformView::of(p, now, self.expiry_threshold_days))
            .collect()
    }

    /// Default "expiring soon" window in days.
    pub fn expiry_threshold_days(&self) -> i64 {
        self.expiry_threshold_days
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for TokenBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenBank(storage={}, expiry_threshold_days={})",
            self.store.path().display(),
            self.expiry_threshold_days
        )
    }
}
