use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::currency::Currency;
use crate::validation::parse_date;

// ---------------------------------------------------------------------------
// Platform — one tracked AI-service balance, as persisted
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_field: String,
    #[serde(default)]
    pub plan: Option<String>,
    pub balance: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_refresh_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Platform {
    /// Materialize a caller-supplied record with its store-assigned id and
    /// timestamps.
    pub fn from_new(new: NewPlatform, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            type_field: new.type_field,
            plan: new.plan,
            balance: new.balance,
            currency: new.currency,
            expiry_date: new.expiry_date,
            notes: new.notes,
            last_refresh_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge `patch` into a copy of this record.
    ///
    /// Fields the patch leaves as `None` are untouched. `id` and `created_at`
    /// never change; `updated_at` becomes `now`, clamped so it never precedes
    /// `created_at`.
    pub fn merged(&self, patch: &PlatformPatch, now: DateTime<Utc>) -> Platform {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(type_field) = &patch.type_field {
            next.type_field = type_field.clone();
        }
        if let Some(plan) = &patch.plan {
            next.plan = plan.clone();
        }
        if let Some(balance) = patch.balance {
            next.balance = balance;
        }
        if let Some(currency) = patch.currency {
            next.currency = currency;
        }
        if let Some(expiry_date) = patch.expiry_date {
            next.expiry_date = expiry_date;
        }
        if let Some(notes) = &patch.notes {
            next.notes = notes.clone();
        }
        if let Some(last_refresh_date) = patch.last_refresh_date {
            next.last_refresh_date = last_refresh_date;
        }
        next.updated_at = now.max(self.created_at);
        next
    }
}

// ---------------------------------------------------------------------------
// NewPlatform — fields supplied when adding a record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlatform {
    pub name: String,
    pub type_field: String,
    pub plan: Option<String>,
    pub balance: f64,
    pub currency: Currency,
    pub expiry_date: Option<NaiveDate>,
    pub notes: String,
}

impl NewPlatform {
    pub fn new(name: impl Into<String>, type_field: impl Into<String>, balance: f64) -> Self {
        Self {
            name: name.into(),
            type_field: type_field.into(),
            plan: None,
            balance,
            currency: Currency::default(),
            expiry_date: None,
            notes: String::new(),
        }
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_expiry(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

// ---------------------------------------------------------------------------
// PlatformPatch — partial update
// ---------------------------------------------------------------------------

/// Partial update merged into a stored [`Platform`].
///
/// `None` leaves a field unchanged. Nullable fields take `Some(None)` to clear
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformPatch {
    pub name: Option<String>,
    pub type_field: Option<String>,
    pub plan: Option<Option<String>>,
    pub balance: Option<f64>,
    pub currency: Option<Currency>,
    pub expiry_date: Option<Option<NaiveDate>>,
    pub notes: Option<String>,
    pub last_refresh_date: Option<Option<DateTime<Utc>>>,
}

impl PlatformPatch {
    pub fn balance(balance: f64) -> Self {
        Self {
            balance: Some(balance),
            ..Default::default()
        }
    }
}

/// Accepts `null`, `""`, a `YYYY-MM-DD` date or an RFC 3339 timestamp.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid expiry date: {s}"))),
    }
}
