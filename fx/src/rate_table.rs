//! Base-relative rate tables.

use chrono::{DateTime, NaiveDate, Utc};
use currex_common::CurrencyCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::conversion::RateQuote;
use crate::error::{FxError, FxResult};

/// Rates for many currencies, all relative to one base currency.
///
/// A table is immutable once built and is replaced wholesale on every
/// successful fetch. The base currency always has rate 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, f64>,
    /// Publication date reported by the rate source, if any.
    as_of: Option<NaiveDate>,
    /// When this table was received.
    fetched_at: DateTime<Utc>,
}

impl RateTable {
    /// Build a table. Entries that are not finite or are negative are
    /// discarded.
    pub fn new<K, I>(base: CurrencyCode, rates: I) -> Self
    where
        K: Into<CurrencyCode>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut table = HashMap::new();
        for (code, rate) in rates {
            let code = code.into();
            if !rate.is_finite() || rate < 0.0 {
                warn!(code = %code, rate, "Discarding invalid rate");
                continue;
            }
            table.insert(code, rate);
        }
        table.entry(base.clone()).or_insert(1.0);

        Self {
            base,
            rates: table,
            as_of: None,
            fetched_at: Utc::now(),
        }
    }

    /// A table holding only the base currency.
    pub fn empty(base: CurrencyCode) -> Self {
        Self::new(base, std::iter::empty::<(CurrencyCode, f64)>())
    }

    /// Decode the upstream payload: `{"date": "2025-05-20", "usd": {"twd": 32.1, ...}}`.
    ///
    /// The base currency is the one key other than `date` whose value is an
    /// object. Non-numeric rates are skipped.
    pub fn from_api_json(json: &str) -> FxResult<Self> {
        let payload: Value =
            serde_json::from_str(json).map_err(|e| FxError::InvalidPayload(e.to_string()))?;
        let object = payload
            .as_object()
            .ok_or_else(|| FxError::InvalidPayload("expected a JSON object".to_string()))?;

        let as_of = match object.get("date") {
            Some(Value::String(date)) => Some(
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map_err(|e| FxError::InvalidPayload(format!("bad date {:?}: {}", date, e)))?,
            ),
            Some(_) => return Err(FxError::InvalidPayload("date is not a string".to_string())),
            None => None,
        };

        let (base, entries) = object
            .iter()
            .find_map(|(key, value)| match value {
                Value::Object(entries) if key != "date" => Some((key, entries)),
                _ => None,
            })
            .ok_or_else(|| FxError::InvalidPayload("no base currency key found".to_string()))?;

        let rates = entries.iter().filter_map(|(code, rate)| match rate.as_f64() {
            Some(rate) => Some((code.as_str(), rate)),
            None => {
                warn!(code = %code, "Skipping non-numeric rate");
                None
            }
        });

        let mut table = Self::new(CurrencyCode::new(base), rates);
        table.as_of = as_of;
        Ok(table)
    }

    /// Override the receive timestamp, e.g. when restoring a stored table.
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    /// Rate for a code relative to the base, case-insensitive.
    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.rates.contains_key(code)
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// All codes in the table, sorted.
    pub fn codes(&self) -> Vec<&CurrencyCode> {
        let mut codes: Vec<&CurrencyCode> = self.rates.keys().collect();
        codes.sort();
        codes
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Direct cross-rate quote between two codes.
    pub fn quote(&self, source: &CurrencyCode, target: &CurrencyCode) -> Option<RateQuote> {
        let source_rate = self.rate(source)?;
        let target_rate = self.rate(target)?;
        if source_rate == 0.0 {
            return None;
        }
        Some(RateQuote {
            source: source.clone(),
            target: target.clone(),
            rate: target_rate / source_rate,
            fetched_at: self.fetched_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "date": "2025-05-20",
        "usd": {"usd": 1, "twd": 30.12, "eur": 0.885, "jpy": 144.7}
    }"#;

    #[test]
    fn test_from_api_json() {
        let table = RateTable::from_api_json(PAYLOAD).unwrap();

        assert_eq!(table.base(), &CurrencyCode::usd());
        assert_eq!(table.len(), 4);
        assert_eq!(table.rate(&CurrencyCode::twd()), Some(30.12));
        assert_eq!(table.rate(&CurrencyCode::new("EUR")), Some(0.885));
        assert_eq!(table.as_of(), NaiveDate::from_ymd_opt(2025, 5, 20));
    }

    #[test]
    fn test_from_api_json_skips_non_numeric() {
        let table =
            RateTable::from_api_json(r#"{"date": "2025-05-20", "eur": {"usd": 1.13, "xyz": "n/a"}}"#)
                .unwrap();

        assert_eq!(table.base(), &CurrencyCode::eur());
        assert!(!table.contains(&CurrencyCode::new("xyz")));
        assert_eq!(table.rate(&CurrencyCode::eur()), Some(1.0));
    }

    #[test]
    fn test_from_api_json_rejects_bad_payloads() {
        for payload in [
            "not json",
            "[1, 2]",
            r#"{"date": "2025-05-20"}"#,
            r#"{"date": "yesterday", "usd": {}}"#,
            r#"{"date": 20250520, "usd": {}}"#,
        ] {
            assert!(
                matches!(RateTable::from_api_json(payload), Err(FxError::InvalidPayload(_))),
                "payload accepted: {}",
                payload
            );
        }
    }

    #[test]
    fn test_invalid_rates_discarded() {
        let table = RateTable::new(
            CurrencyCode::usd(),
            [("twd", 32.0), ("bad", f64::NAN), ("neg", -1.0), ("inf", f64::INFINITY)],
        );

        assert_eq!(table.codes(), vec![&CurrencyCode::twd(), &CurrencyCode::usd()]);
    }

    #[test]
    fn test_base_defaults_to_one() {
        let table = RateTable::empty(CurrencyCode::usd());
        assert_eq!(table.rate(&CurrencyCode::usd()), Some(1.0));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_quote() {
        let table = RateTable::new(CurrencyCode::usd(), [("eur", 0.5), ("twd", 32.0)]);
        let quote = table.quote(&CurrencyCode::eur(), &CurrencyCode::twd()).unwrap();

        assert_eq!(quote.rate, 64.0);
        assert!(table.quote(&CurrencyCode::eur(), &CurrencyCode::jpy()).is_none());
    }

    #[test]
    fn test_quote_zero_source_rate() {
        let table = RateTable::new(CurrencyCode::usd(), [("zzz", 0.0)]);
        assert!(table.quote(&CurrencyCode::new("zzz"), &CurrencyCode::usd()).is_none());
    }
}
