//! Platform CRUD driven by raw form input.

use crate::catalog;
use crate::error::{Result, TokenBankError};
use crate::models::{NewPlatform, Platform, PlatformInput, PlatformPatch};
use crate::store::PlatformStore;
use crate::validation::{non_empty, parse_balance, parse_date};

// ---------------------------------------------------------------------------
// PlatformManager
// ---------------------------------------------------------------------------

/// Creates, updates and deletes platforms from [`PlatformInput`].
///
/// Input should be checked with
/// [`validate_platform`](crate::validation::validate_platform) first; the
/// manager only normalizes it and rejects values it cannot convert.
pub struct PlatformManager<'a> {
    store: &'a PlatformStore,
}

impl<'a> PlatformManager<'a> {
    /// Create a new `PlatformManager` bound to the given store.
    pub fn new(store: &'a PlatformStore) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<Platform> {
        self.store.list()
    }

    pub fn get(&self, id: &str) -> Option<Platform> {
        self.store.get_by_id(id)
    }

    /// Normalize `input` and store it as a new platform.
    ///
    /// Currency defaults to CNY, a blank plan or expiry date is stored as
    /// absent, and notes default to empty.
    pub fn create(&self, input: &PlatformInput) -> Result<Platform> {
        let balance = required_balance(input.balance.as_deref())?;
        let new = NewPlatform {
            name: input.name.trim().to_string(),
            type_field: input.type_field.clone(),
            plan: non_empty(input.plan.as_deref()).map(str::to_string),
            balance,
            currency: input.currency.unwrap_or_default(),
            expiry_date: optional_date(input.expiry_date.as_deref())?,
            notes: input.notes.clone().unwrap_or_default(),
        };
        self.store.add(new)
    }

    /// Normalize `input` into a patch and merge it into the platform `id`.
    ///
    /// Blank name or type and `None` optional fields leave the stored value
    /// untouched. `Some("")` for plan or expiry date clears it.
    pub fn update(&self, id: &str, input: &PlatformInput) -> Result<Platform> {
        let balance = match non_empty(input.balance.as_deref()) {
            Some(raw) => Some(required_balance(Some(raw))?),
            None => None,
        };
        let expiry_date = match input.expiry_date.as_deref() {
            Some(raw) => Some(optional_date(Some(raw))?),
            None => None,
        };
        let patch = PlatformPatch {
            name: non_empty(Some(input.name.as_str())).map(str::to_string),
            type_field: non_empty(Some(input.type_field.as_str())).map(str::to_string),
            plan: input
                .plan
                .as_deref()
                .map(|raw| non_empty(Some(raw)).map(str::to_string)),
            balance,
            currency: input.currency,
            expiry_date,
            notes: input.notes.clone(),
            last_refresh_date: None,
        };
        self.store.update(id, &patch)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.remove(id)
    }

    /// Set a platform's balance from text, e.g. a form field.
    pub fn update_balance(&self, id: &str, raw: &str) -> Result<Platform> {
        let balance = required_balance(Some(raw))?;
        self.store.set_balance(id, balance)
    }

    /// All platforms, most important plan first, then by name.
    pub fn sorted_by_plan(&self) -> Vec<Platform> {
        let mut platforms = self.store.list();
        platforms.sort_by(|a, b| {
            catalog::plan_priority(b.plan.as_deref())
                .cmp(&catalog::plan_priority(a.plan.as_deref()))
                .then_with(|| a.name.cmp(&b.name))
        });
        platforms
    }
}

fn required_balance(raw: Option<&str>) -> Result<f64> {
    let raw = raw.unwrap_or_default();
    parse_balance(raw).ok_or_else(|| {
        TokenBankError::InvalidArgument(format!("Balance must be a non-negative number, got {raw:?}"))
    })
}

fn optional_date(raw: Option<&str>) -> Result<Option<chrono::NaiveDate>> {
    match non_empty(raw) {
        Some(raw) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| TokenBankError::InvalidArgument(format!("Invalid expiry date {raw:?}"))),
        None => Ok(None),
    }
}
