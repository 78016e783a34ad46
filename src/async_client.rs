//! Async wrapper around [`TokenBank`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every operation on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], since each one is a synchronous file
//! read-modify-write. A mutex serializes access so two operations never
//! interleave their writes.
//!
//! # Example
//!
//! ```no_run
//! use tokenbank::AsyncTokenBank;
//!
//! #[tokio::main]
//! async fn main() {
//!     let bank = AsyncTokenBank::builder().build().await.unwrap();
//!
//!     let refreshed = bank.refresh_all().await.unwrap();
//!     let platforms = bank.run(|b| Ok(b.platforms().all())).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Result, TokenBankError};
use crate::models::Platform;
use crate::TokenBank;

// ---------------------------------------------------------------------------
// AsyncTokenBankBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncTokenBank`] instance.
#[derive(Default)]
pub struct AsyncTokenBankBuilder {
    data_dir: Option<PathBuf>,
    expiry_threshold_days: Option<i64>,
}

impl AsyncTokenBankBuilder {
    /// Set a custom data directory.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the default "expiring soon" window in days.
    pub fn expiry_threshold_days(mut self, days: i64) -> Self {
        self.expiry_threshold_days = Some(days);
        self
    }

    /// Build the async bank on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncTokenBank> {
        tokio::task::spawn_blocking(move || {
            let mut builder = TokenBank::builder();
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if let Some(days) = self.expiry_threshold_days {
                builder = builder.expiry_threshold_days(days);
            }
            let bank = builder.build()?;
            Ok(AsyncTokenBank {
                inner: Arc::new(Mutex::new(bank)),
            })
        })
        .await
        .map_err(|e| TokenBankError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncTokenBank
// ---------------------------------------------------------------------------

/// Async wrapper around [`TokenBank`].
///
/// Cloning is cheap; clones share the same underlying bank.
#[derive(Clone)]
pub struct AsyncTokenBank {
    inner: Arc<Mutex<TokenBank>>,
}

impl AsyncTokenBank {
    /// Create a new builder for configuring the async bank.
    pub fn builder() -> AsyncTokenBankBuilder {
        AsyncTokenBankBuilder::default()
    }

    /// Run a sync bank operation on the blocking thread pool.
    ///
    /// The closure receives a `&TokenBank` and holds the lock for its whole
    /// duration.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&TokenBank) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let bank = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = bank
                .lock()
                .map_err(|_| TokenBankError::InvalidArgument("TokenBank lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| TokenBankError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Load the full platform collection.
    pub async fn list(&self) -> Result<Vec<Platform>> {
        self.run(|b| Ok(b.store().list())).await
    }

    /// Refresh every daily-refresh platform that is stale today.
    pub async fn refresh_all(&self) -> Result<usize> {
        self.run(|b| b.daily().refresh_all()).await
    }

    /// Export the collection as pretty-printed JSON.
    pub async fn export_all(&self) -> Result<String> {
        self.run(|b| b.store().export_all()).await
    }

    /// Replace the collection with the JSON array in `text`.
    pub async fn import_all(&self, text: impl Into<String>) -> Result<usize> {
        let text = text.into();
        self.run(move |b| b.store().import_all(&text)).await
    }
}
