//! Currency catalog used to validate and label codes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{CurrencyCode, CurrexError, Result};

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// Currency code.
    pub code: CurrencyCode,
    /// Human-readable name, e.g. "New Taiwan Dollar".
    pub display_name: String,
    /// Currency symbol, e.g. "NT$".
    #[serde(default)]
    pub symbol: String,
}

impl CurrencyInfo {
    pub fn new(
        code: impl Into<CurrencyCode>,
        display_name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            symbol: symbol.into(),
        }
    }
}

/// Ordered list of known currencies, sorted by code.
#[derive(Debug, Clone, Default)]
pub struct CurrencyCatalog {
    entries: Vec<CurrencyInfo>,
}

impl CurrencyCatalog {
    /// Build a catalog, rejecting duplicate codes.
    pub fn new(mut entries: Vec<CurrencyInfo>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.code.clone()) {
                return Err(CurrexError::DuplicateCurrency(entry.code.to_display()));
            }
        }
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(Self { entries })
    }

    /// Decode a catalog from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<CurrencyInfo> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Look up a record by code, ignoring case.
    pub fn find(&self, code: &str) -> Option<&CurrencyInfo> {
        self.entries.iter().find(|e| e.code.matches(code))
    }

    /// Check if a code is listed.
    pub fn contains(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    pub fn entries(&self) -> &[CurrencyInfo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
