//! User-entered price corrections, persisted as a single JSON blob.
//!
//! The blob maps composite lookup keys to per-bucket amounts:
//!
//! ```json
//! { "A__12x4__standard": { "1m": 27000, "12m": 220000 } }
//! ```
//!
//! Every mutation rewrites the whole blob through a temp-file rename, so a
//! crash mid-write can lose at most the change being written, never the
//! entries already on disk. A missing or malformed blob means "no overrides
//! yet" and is never surfaced as an error.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use super::models::{LookupKey, PeriodBucket};
use super::normalize::normalize;

#[derive(Debug)]
pub struct OverrideStore {
    path: PathBuf,
    entries: HashMap<String, BTreeMap<PeriodBucket, Decimal>>,
}

impl OverrideStore {
    /// Load the store from `path`.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => parse_blob(&raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "override blob unreadable, starting empty");
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// Override for one exact key and bucket, if any.
    pub fn get(&self, key: &LookupKey, bucket: PeriodBucket) -> Option<Decimal> {
        self.entries
            .get(&key.composite())
            .and_then(|entry| entry.get(&bucket))
            .copied()
    }

    /// Store or clear one cell, then re-persist the whole blob before
    /// returning. `None` removes the override so the base table shows
    /// through again on the next lookup.
    pub fn set(
        &mut self,
        key: &LookupKey,
        bucket: PeriodBucket,
        value: Option<Decimal>,
    ) -> io::Result<()> {
        let composite = key.composite();
        match value {
            Some(amount) => {
                self.entries.entry(composite).or_default().insert(bucket, amount);
            }
            None => {
                if let Some(entry) = self.entries.get_mut(&composite) {
                    entry.remove(&bucket);
                    if entry.is_empty() {
                        self.entries.remove(&composite);
                    }
                }
            }
        }
        self.persist()
    }

    /// Number of overridden cells across all keys.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let blob = serde_json::to_string_pretty(&self.to_json())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &self.path)
    }

    fn to_json(&self) -> Value {
        let mut root = Map::new();
        for (composite, entry) in &self.entries {
            let mut cell = Map::new();
            for (bucket, amount) in entry {
                if let Some(n) = amount.to_f64().and_then(Number::from_f64) {
                    cell.insert(bucket.code().to_string(), Value::Number(n));
                }
            }
            root.insert(composite.clone(), Value::Object(cell));
        }
        Value::Object(root)
    }
}

/// Tolerant blob parse: a malformed document yields an empty store, and a
/// malformed entry or cell is skipped without dropping its neighbours.
fn parse_blob(raw: &str) -> HashMap<String, BTreeMap<PeriodBucket, Decimal>> {
    let root = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(root)) => root,
        _ => {
            tracing::warn!("override blob malformed, starting empty");
            return HashMap::new();
        }
    };

    let mut entries = HashMap::new();
    for (composite, cell) in root {
        let Value::Object(cell) = cell else { continue };
        let mut entry = BTreeMap::new();
        for (code, raw_amount) in &cell {
            let Some(bucket) = PeriodBucket::from_code(code) else { continue };
            let Some(amount) = normalize(raw_amount) else { continue };
            entry.insert(bucket, amount);
        }
        if !entry.is_empty() {
            entries.insert(composite, entry);
        }
    }
    entries
}
