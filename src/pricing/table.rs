//! Shipped base price table.
//!
//! A static, versioned set of rows embedded at build time and parsed once
//! at startup. The engine never mutates it; user corrections live in the
//! override store and shadow these values.

use serde::Deserialize;
use serde_json::Value;

use super::models::{LookupKey, PeriodBucket, PriceRow};

const BASE_PRICES_JSON: &str = include_str!("../../data/base_prices.json");

#[derive(Debug, Clone, Deserialize)]
pub struct PriceTable {
    pub version: u32,
    pub currency: String,
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Parse the embedded table. The data ships inside the binary, so a
    /// parse failure is a build defect and fails fast at startup.
    pub fn load_default() -> Self {
        serde_json::from_str(BASE_PRICES_JSON).expect("embedded base price table must parse")
    }

    pub fn from_rows(version: u32, currency: impl Into<String>, rows: Vec<PriceRow>) -> Self {
        Self {
            version,
            currency: currency.into(),
            rows,
        }
    }

    /// First row matching the key, in table order.
    ///
    /// Duplicate (level, size, tier) triples are a data-authoring error;
    /// when they occur the first row wins, deterministically, on every call.
    pub fn find(&self, key: &LookupKey) -> Option<&PriceRow> {
        self.rows.iter().find(|row| row.matches(key))
    }

    /// Raw cell for one key and bucket, straight from the shipped data.
    pub fn raw(&self, key: &LookupKey, bucket: PeriodBucket) -> Option<&Value> {
        self.find(key).and_then(|row| row.raw(bucket))
    }

    /// Distinct levels, in first-seen table order.
    pub fn levels(&self) -> Vec<String> {
        let mut levels: Vec<String> = Vec::new();
        for row in &self.rows {
            if !levels.contains(&row.level) {
                levels.push(row.level.clone());
            }
        }
        levels
    }

    /// Distinct sizes quoted for one level, in first-seen table order.
    pub fn sizes_for_level(&self, level: &str) -> Vec<String> {
        let mut sizes: Vec<String> = Vec::new();
        for row in self.rows.iter().filter(|r| r.level == level) {
            if !sizes.contains(&row.size) {
                sizes.push(row.size.clone());
            }
        }
        sizes
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::CustomerTier;
    use crate::pricing::normalize::normalize;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn row(level: &str, size: &str, tier: CustomerTier, monthly: Value) -> PriceRow {
        let mut rates = BTreeMap::new();
        rates.insert(PeriodBucket::OneMonth, monthly);
        PriceRow {
            level: level.to_string(),
            size: size.to_string(),
            customer: tier,
            rates,
        }
    }

    #[test]
    fn embedded_table_parses_and_has_rows() {
        let table = PriceTable::load_default();
        assert!(!table.is_empty());
        assert_eq!(table.currency, "LYD");
        assert!(table.version >= 1);
    }

    #[test]
    fn find_returns_none_for_unknown_key() {
        let table = PriceTable::from_rows(
            1,
            "LYD",
            vec![row("A", "12x4", CustomerTier::Standard, json!(25000))],
        );
        let key = LookupKey::new("Z", "9x9", CustomerTier::Standard);
        assert!(table.find(&key).is_none());
        assert!(table.raw(&key, PeriodBucket::OneMonth).is_none());
    }

    #[test]
    fn duplicate_rows_resolve_to_first_in_table_order() {
        let table = PriceTable::from_rows(
            1,
            "LYD",
            vec![
                row("A", "12x4", CustomerTier::Standard, json!(25000)),
                row("A", "12x4", CustomerTier::Standard, json!(99999)),
            ],
        );
        let key = LookupKey::new("A", "12x4", CustomerTier::Standard);
        for _ in 0..3 {
            let raw = table.raw(&key, PeriodBucket::OneMonth).cloned();
            assert_eq!(raw.as_ref().and_then(normalize), Some(dec!(25000)));
        }
    }

    #[test]
    fn levels_and_sizes_preserve_first_seen_order() {
        let table = PriceTable::from_rows(
            1,
            "LYD",
            vec![
                row("B", "8x3", CustomerTier::Standard, json!(1)),
                row("A", "12x4", CustomerTier::Standard, json!(2)),
                row("B", "6x3", CustomerTier::Standard, json!(3)),
                row("B", "8x3", CustomerTier::Marketer, json!(4)),
            ],
        );
        assert_eq!(table.levels(), vec!["B", "A"]);
        assert_eq!(table.sizes_for_level("B"), vec!["8x3", "6x3"]);
        assert_eq!(table.sizes_for_level("A"), vec!["12x4"]);
    }
}
