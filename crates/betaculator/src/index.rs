//! Currency to market index lookup.
//!
//! A security is regressed against the benchmark index of the market it
//! trades in. The table maps ISO currency codes to index tickers; callers may
//! extend it or load their own from a JSON object such as
//! `{"USD": "^GSPC", "GBP": "^FTSE"}`.

use crate::error::{BetaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default benchmark per currency.
pub const DEFAULT_INDICES: [(&str, &str); 2] = [("USD", "^GSPC"), ("INR", "^NSEI")];

/// Currency code to market index ticker mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketIndexTable {
    indices: BTreeMap<String, String>,
}

impl Default for MarketIndexTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (currency, index) in DEFAULT_INDICES {
            table.insert(currency, index);
        }
        table
    }
}

impl MarketIndexTable {
    /// Table with the default entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with no entries.
    pub const fn empty() -> Self {
        Self {
            indices: BTreeMap::new(),
        }
    }

    /// Add or replace the index for a currency.
    pub fn insert(&mut self, currency: impl AsRef<str>, index: impl Into<String>) {
        self.indices
            .insert(currency.as_ref().trim().to_ascii_uppercase(), index.into());
    }

    /// Index ticker for a currency, if configured.
    pub fn lookup(&self, currency: &str) -> Option<&str> {
        self.indices
            .get(&currency.trim().to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Index ticker for a currency.
    ///
    /// # Errors
    ///
    /// Returns [`BetaError::UnknownCurrency`] when the currency has no entry.
    pub fn market_for(&self, currency: &str) -> Result<&str> {
        self.lookup(currency)
            .ok_or_else(|| BetaError::UnknownCurrency(currency.to_string()))
    }

    /// Configured currencies, sorted.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.indices.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Parse a JSON object of `currency: index` pairs.
    ///
    /// Entries override the defaults; currencies not mentioned keep theirs.
    ///
    /// # Errors
    ///
    /// Returns [`BetaError::Serialization`] for malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut table = Self::default();
        for (currency, index) in entries {
            table.insert(currency, index);
        }
        Ok(table)
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`BetaError::Io`] if the file cannot be read and
    /// [`BetaError::Serialization`] if it is not a JSON object of strings.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading market index table");
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("USD", Some("^GSPC"))]
    #[case("usd", Some("^GSPC"))]
    #[case(" INR ", Some("^NSEI"))]
    #[case("EUR", None)]
    fn test_default_lookup(#[case] currency: &str, #[case] expected: Option<&str>) {
        assert_eq!(MarketIndexTable::default().lookup(currency), expected);
    }

    #[test]
    fn test_unknown_currency() {
        let table = MarketIndexTable::new();
        assert!(matches!(
            table.market_for("JPY"),
            Err(BetaError::UnknownCurrency(c)) if c == "JPY"
        ));
    }

    #[test]
    fn test_insert_overrides() {
        let mut table = MarketIndexTable::empty();
        assert!(table.is_empty());

        table.insert("gbp", "^FTSE");
        table.insert("GBP", "^FTMC");
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("GBP"), Some("^FTMC"));
    }

    #[test]
    fn test_from_json_merges_with_defaults() {
        let table = MarketIndexTable::from_json_str(r#"{"eur": "^STOXX50E", "USD": "^DJI"}"#)
            .unwrap();

        assert_eq!(table.lookup("EUR"), Some("^STOXX50E"));
        assert_eq!(table.lookup("USD"), Some("^DJI"));
        assert_eq!(table.lookup("INR"), Some("^NSEI"));
        assert_eq!(
            table.currencies().collect::<Vec<_>>(),
            vec!["EUR", "INR", "USD"]
        );
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            MarketIndexTable::from_json_str("[\"USD\"]"),
            Err(BetaError::Serialization(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            MarketIndexTable::from_json_file("/nonexistent/betaculator/indices.json"),
            Err(BetaError::Io(_))
        ));
    }
}
