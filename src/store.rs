//! Durable single-key store for the platform collection.
//!
//! The whole collection lives in one JSON file named after
//! [`STORAGE_KEY`](crate::config::STORAGE_KEY). Every operation loads the
//! collection wholesale, modifies it in memory, and writes it back wholesale.

use crate::config;
use crate::error::{Result, TokenBankError};
use crate::models::{NewPlatform, Platform, PlatformPatch};
use chrono::Utc;
use rand::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Persists the list of [`Platform`] records.
///
/// Unreadable or malformed storage reads as an empty collection. Writes go to
/// a temp file first and are renamed into place, so a failed write never
/// leaves a truncated collection behind.
pub struct PlatformStore {
    /// Directory holding the storage file.
    pub data_dir: PathBuf,
    path: PathBuf,
}

impl PlatformStore {
    /// Open a store rooted at `data_dir`.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate data directory.
    /// Creates the directory if it does not exist.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        let path = dir.join(config::storage_file_name());
        Ok(Self {
            data_dir: dir,
            path,
        })
    }

    /// Location of the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection.
    ///
    /// Returns an empty collection when nothing has been stored yet or the
    /// stored data cannot be read or is not a JSON array. Individual records
    /// that fail to parse are skipped so the rest of the collection survives
    /// the next write.
    pub fn list(&self) -> Vec<Platform> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read platform storage");
                return Vec::new();
            }
        };

        let records = match serde_json::from_str::<Vec<serde_json::Value>>(&contents) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "malformed platform storage, treating as empty");
                return Vec::new();
            }
        };

        let total = records.len();
        let platforms: Vec<Platform> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Platform>(record) {
                Ok(platform) => Some(platform),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed platform record");
                    None
                }
            })
            .collect();
        tracing::debug!(count = platforms.len(), skipped = total - platforms.len(), "loaded platforms");
        platforms
    }

    /// Serialize and persist the full collection, replacing what was stored.
    pub fn save(&self, platforms: &[Platform]) -> Result<()> {
        let json = serde_json::to_string(platforms)?;
        let tmp_path = self.path.with_extension("json.tmp");

        let result = (|| -> Result<()> {
            fs::write(&tmp_path, json.as_bytes())?;
            fs::rename(&tmp_path, &self.path)?;
            Ok(())
        })();

        match &result {
            Ok(()) => tracing::debug!(count = platforms.len(), "saved platforms"),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to save platforms");
                let _ = fs::remove_file(&tmp_path);
            }
        }

        result
    }

    /// Append a new record with a fresh id and timestamps.
    pub fn add(&self, new: NewPlatform) -> Result<Platform> {
        check_balance(new.balance)?;
        let mut platforms = self.list();
        let id = unique_id(&platforms);
        let platform = Platform::from_new(new, id, Utc::now());
        platforms.push(platform.clone());
        self.save(&platforms)?;
        tracing::info!(id = %platform.id, name = %platform.name, "added platform");
        Ok(platform)
    }

    /// Merge `patch` into the record with the given id and bump `updated_at`.
    pub fn update(&self, id: &str, patch: &PlatformPatch) -> Result<Platform> {
        if let Some(balance) = patch.balance {
            check_balance(balance)?;
        }
        let mut platforms = self.list();
        let slot = platforms
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| TokenBankError::NotFound(format!("Platform {id}")))?;
        *slot = slot.merged(patch, Utc::now());
        let updated = slot.clone();
        self.save(&platforms)?;
        tracing::debug!(id, "updated platform");
        Ok(updated)
    }

    /// Delete the record with the given id.
    pub fn remove(&self, id: &str) -> Result<()> {
        let platforms = self.list();
        let before = platforms.len();
        let filtered: Vec<Platform> = platforms.into_iter().filter(|p| p.id != id).collect();
        if filtered.len() == before {
            return Err(TokenBankError::NotFound(format!("Platform {id}")));
        }
        self.save(&filtered)?;
        tracing::info!(id, "removed platform");
        Ok(())
    }

    pub fn get_by_id(&self, id: &str) -> Option<Platform> {
        self.list().into_iter().find(|p| p.id == id)
    }

    /// Replace the balance of one record.
    pub fn set_balance(&self, id: &str, balance: f64) -> Result<Platform> {
        self.update(id, &PlatformPatch::balance(balance))
    }

    /// Remove all stored data. Succeeds when nothing is stored.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "cleared platform storage");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Serialize the full collection as a pretty-printed JSON array.
    pub fn export_all(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }

    /// Replace the stored collection with the records in `text`.
    ///
    /// `text` must be a JSON array of well-formed records with non-negative
    /// balances and distinct ids. Anything else is rejected and the stored
    /// collection is left untouched. Returns the number of imported records.
    pub fn import_all(&self, text: &str) -> Result<usize> {
        let platforms = parse_import(text).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected platform import");
        })?;
        self.save(&platforms)?;
        tracing::info!(count = platforms.len(), "imported platforms");
        Ok(platforms.len())
    }
}

fn parse_import(text: &str) -> Result<Vec<Platform>> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| TokenBankError::InvalidImport(format!("not valid JSON: {e}")))?;
    if !value.is_array() {
        return Err(TokenBankError::InvalidImport(
            "expected a JSON array of platforms".into(),
        ));
    }

    let platforms: Vec<Platform> = serde_json::from_value(value)
        .map_err(|e| TokenBankError::InvalidImport(format!("malformed platform record: {e}")))?;

    let mut seen = HashSet::with_capacity(platforms.len());
    for platform in &platforms {
        if !seen.insert(platform.id.as_str()) {
            return Err(TokenBankError::InvalidImport(format!(
                "duplicate platform id {}",
                platform.id
            )));
        }
        check_balance(platform.balance)
            .map_err(|_| TokenBankError::InvalidImport(format!("platform {} has a negative balance", platform.id)))?;
    }

    Ok(platforms)
}

fn check_balance(balance: f64) -> Result<()> {
    if balance.is_finite() && balance >= 0.0 {
        Ok(())
    } else {
        Err(TokenBankError::InvalidArgument(format!(
            "Balance must be a non-negative number, got {balance}"
        )))
    }
}

/// Generate a platform id: `platform_<unix millis>_<random base36>`.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let mut rng = thread_rng();
    let suffix: String = (0..config::ID_RANDOM_LEN)
        .map(|_| std::char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
        .collect();
    format!("{}{}_{}", config::ID_PREFIX, millis, suffix)
}

/// Generate an id not already present in `platforms`.
fn unique_id(platforms: &[Platform]) -> String {
    loop {
        let id = generate_id();
        if platforms.iter().all(|p| p.id != id) {
            return id;
        }
    }
}
