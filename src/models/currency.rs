use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TokenBankError;

// ---------------------------------------------------------------------------
// Currency — unit a platform balance is held in
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "CNY")]
    Cny,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "tokens")]
    Tokens,
}

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Currency; 3] = [Currency::Cny, Currency::Usd, Currency::Tokens];

    /// Wire code, as stored in the `currency` field.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Cny => "CNY",
            Currency::Usd => "USD",
            Currency::Tokens => "tokens",
        }
    }

    /// Display symbol. Monetary currencies prefix the amount, tokens suffix it.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Cny => "¥",
            Currency::Usd => "$",
            Currency::Tokens => "tokens",
        }
    }

    pub fn is_monetary(self) -> bool {
        !matches!(self, Currency::Tokens)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = TokenBankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TokenBankError::InvalidArgument(format!("Unknown currency: {s}")))
    }
}
