//! Layered price resolution.
//!
//! Overrides shadow the shipped base table; a missing row or malformed base
//! cell resolves to "no known price", which the UI renders as "—". Nothing
//! in this path returns an error to the caller.

use std::io;
use std::sync::{Mutex, MutexGuard};

use rust_decimal::Decimal;

use super::models::{CustomerTier, LookupKey, PeriodBucket};
use super::normalize::normalize;
use super::overrides::OverrideStore;
use super::table::PriceTable;

pub struct PricingEngine {
    table: PriceTable,
    overrides: Mutex<OverrideStore>,
}

impl PricingEngine {
    pub fn new(table: PriceTable, overrides: OverrideStore) -> Self {
        Self {
            table,
            overrides: Mutex::new(overrides),
        }
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    /// Resolve one price cell: override first, then the normalized base
    /// value, then unknown.
    ///
    /// Every call consults the live override store, so a completed
    /// [`set_override`](Self::set_override) is visible to the very next
    /// resolve with no staleness window.
    pub fn resolve(
        &self,
        level: &str,
        size: &str,
        tier: CustomerTier,
        bucket: PeriodBucket,
    ) -> Option<Decimal> {
        let key = LookupKey::new(level, size, tier);
        if let Some(amount) = self.overrides_lock().get(&key, bucket) {
            return Some(amount);
        }
        self.table.raw(&key, bucket).and_then(normalize)
    }

    /// Whether the resolved value for this cell comes from the override
    /// layer. Used by the pricing list to mark edited cells.
    pub fn has_override(
        &self,
        level: &str,
        size: &str,
        tier: CustomerTier,
        bucket: PeriodBucket,
    ) -> bool {
        let key = LookupKey::new(level, size, tier);
        self.overrides_lock().get(&key, bucket).is_some()
    }

    /// Store or clear one override cell. The change is durable on disk
    /// before this returns; only the persistence write itself can fail.
    pub fn set_override(
        &self,
        level: &str,
        size: &str,
        tier: CustomerTier,
        bucket: PeriodBucket,
        value: Option<Decimal>,
    ) -> io::Result<()> {
        let key = LookupKey::new(level, size, tier);
        self.overrides_lock().set(&key, bucket, value)
    }

    // A poisoned lock means a writer panicked mid-set; the in-memory map
    // itself is still a consistent snapshot, so resolution carries on.
    fn overrides_lock(&self) -> MutexGuard<'_, OverrideStore> {
        self.overrides.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::PriceRow;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;
    use std::path::Path;

    fn row(level: &str, size: &str, tier: CustomerTier, rates: Vec<(PeriodBucket, Value)>) -> PriceRow {
        PriceRow {
            level: level.to_string(),
            size: size.to_string(),
            customer: tier,
            rates: rates.into_iter().collect::<BTreeMap<_, _>>(),
        }
    }

    fn engine(dir: &Path) -> PricingEngine {
        let table = PriceTable::from_rows(
            1,
            "LYD",
            vec![
                row(
                    "A",
                    "12x4",
                    CustomerTier::Standard,
                    vec![
                        (PeriodBucket::OneMonth, json!(25000)),
                        (PeriodBucket::TwoMonths, json!("47,000 د.ل")),
                        (PeriodBucket::ThreeMonths, Value::Null),
                    ],
                ),
                row(
                    "A",
                    "12x4",
                    CustomerTier::Marketer,
                    vec![(PeriodBucket::OneMonth, json!(22500))],
                ),
            ],
        );
        PricingEngine::new(table, OverrideStore::load(dir.join("overrides.json")))
    }

    #[test]
    fn base_values_resolve_through_the_normalizer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine = engine(dir.path());

        assert_eq!(
            engine.resolve("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth),
            Some(dec!(25000))
        );
        // Formatted string cell still yields a number.
        assert_eq!(
            engine.resolve("A", "12x4", CustomerTier::Standard, PeriodBucket::TwoMonths),
            Some(dec!(47000))
        );
        // Null cell and absent bucket are both unknown, not errors.
        assert_eq!(
            engine.resolve("A", "12x4", CustomerTier::Standard, PeriodBucket::ThreeMonths),
            None
        );
        assert_eq!(
            engine.resolve("A", "12x4", CustomerTier::Standard, PeriodBucket::FullYear),
            None
        );
    }

    #[test]
    fn unknown_key_resolves_to_unknown() {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine = engine(dir.path());

        for bucket in PeriodBucket::ALL {
            assert_eq!(engine.resolve("Z", "9x9", CustomerTier::Corporate, bucket), None);
        }
    }

    #[test]
    fn override_shadows_the_base_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine = engine(dir.path());

        engine
            .set_override("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth, Some(dec!(500)))
            .expect("set");
        assert_eq!(
            engine.resolve("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth),
            Some(dec!(500))
        );
        assert!(engine.has_override("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth));
        // The sibling tier is untouched.
        assert_eq!(
            engine.resolve("A", "12x4", CustomerTier::Marketer, PeriodBucket::OneMonth),
            Some(dec!(22500))
        );
    }

    #[test]
    fn override_on_a_malformed_base_cell_fills_the_gap() {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine = engine(dir.path());

        engine
            .set_override("A", "12x4", CustomerTier::Standard, PeriodBucket::ThreeMonths, Some(dec!(65000)))
            .expect("set");
        assert_eq!(
            engine.resolve("A", "12x4", CustomerTier::Standard, PeriodBucket::ThreeMonths),
            Some(dec!(65000))
        );
    }

    #[test]
    fn clearing_an_override_reverts_to_the_base_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine = engine(dir.path());

        engine
            .set_override("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth, Some(dec!(500)))
            .expect("set");
        engine
            .set_override("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth, None)
            .expect("clear");

        assert_eq!(
            engine.resolve("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth),
            Some(dec!(25000))
        );
        assert!(!engine.has_override("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth));

        // Clearing a cell whose base value is malformed reverts to unknown.
        engine
            .set_override("A", "12x4", CustomerTier::Standard, PeriodBucket::ThreeMonths, Some(dec!(1)))
            .expect("set");
        engine
            .set_override("A", "12x4", CustomerTier::Standard, PeriodBucket::ThreeMonths, None)
            .expect("clear");
        assert_eq!(
            engine.resolve("A", "12x4", CustomerTier::Standard, PeriodBucket::ThreeMonths),
            None
        );
    }

    #[test]
    fn resolution_matches_across_a_simulated_restart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = engine(dir.path());
        first
            .set_override("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth, Some(dec!(30000)))
            .expect("set");
        let before = first.resolve("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth);
        drop(first);

        let second = engine(dir.path());
        let after = second.resolve("A", "12x4", CustomerTier::Standard, PeriodBucket::OneMonth);
        assert_eq!(before, after);
        assert_eq!(after, Some(dec!(30000)));
    }
}
