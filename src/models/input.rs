use serde::{Deserialize, Serialize};

use super::currency::Currency;
use crate::catalog;

// ---------------------------------------------------------------------------
// PlatformInput — raw form input, before validation and normalization
// ---------------------------------------------------------------------------

/// Unvalidated input as collected from a form or command line.
///
/// Balance and expiry date are kept as text so that validation can report
/// non-numeric or malformed values instead of failing to construct the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInput {
    pub name: String,
    #[serde(rename = "type")]
    pub type_field: String,
    pub plan: Option<String>,
    pub balance: Option<String>,
    pub currency: Option<Currency>,
    pub expiry_date: Option<String>,
    pub notes: Option<String>,
}

impl PlatformInput {
    /// Start an input for the given platform type.
    ///
    /// Catalogued types other than `other` are named after their catalog
    /// entry; `other` (and unknown types) use `custom_name`.
    pub fn for_type(type_field: &str, custom_name: &str) -> Self {
        let name = if type_field != catalog::OTHER_TYPE && catalog::platform_type(type_field).is_some() {
            catalog::type_name(type_field).to_string()
        } else {
            custom_name.to_string()
        };
        Self {
            name,
            type_field: type_field.to_string(),
            ..Default::default()
        }
    }

    pub fn with_balance(mut self, balance: impl Into<String>) -> Self {
        self.balance = Some(balance.into());
        self
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_expiry(mut self, expiry_date: impl Into<String>) -> Self {
        self.expiry_date = Some(expiry_date.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
