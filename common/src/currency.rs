//! Currency code type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency code such as `usd` or `twd`.
///
/// Codes are case-insensitive and stored lowercased, which is also the form
/// rate tables are keyed by. No ISO 4217 validation is performed: an unknown
/// code is simply one that no rate table contains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a new currency code, normalizing to lowercase.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    /// Get the lowercased code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the code in the uppercase form used for display.
    pub fn to_display(&self) -> String {
        self.0.to_uppercase()
    }

    /// Whether the code has the conventional three ASCII letters.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 3 && self.0.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Check if this code matches a raw string, ignoring case.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }

    pub fn usd() -> Self {
        Self::new("usd")
    }

    pub fn twd() -> Self {
        Self::new("twd")
    }

    pub fn eur() -> Self {
        Self::new("eur")
    }

    pub fn jpy() -> Self {
        Self::new("jpy")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display())
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CurrencyCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
