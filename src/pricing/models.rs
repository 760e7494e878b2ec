//! Core types for the pricing resolution engine.
//!
//! The base table and the override store are both keyed by the
//! (level, size, customer tier) triple, reduced to a composite string.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Buyer classification. One of the three price columns of the base table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Standard,
    Marketer,
    Corporate,
}

impl CustomerTier {
    pub const ALL: [CustomerTier; 3] = [
        CustomerTier::Standard,
        CustomerTier::Marketer,
        CustomerTier::Corporate,
    ];

    /// Stable ASCII identifier used in composite keys, forms and URLs.
    pub fn slug(self) -> &'static str {
        match self {
            CustomerTier::Standard => "standard",
            CustomerTier::Marketer => "marketer",
            CustomerTier::Corporate => "corporate",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }

    /// Display name shown in the UI and on documents.
    pub fn label(self) -> &'static str {
        match self {
            CustomerTier::Standard => "عادي",
            CustomerTier::Marketer => "مسوق",
            CustomerTier::Corporate => "شركات",
        }
    }
}

/// Rental-duration bucket. The base table quotes whole-package prices per
/// bucket; there are no arbitrary durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PeriodBucket {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "2m")]
    TwoMonths,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "12m")]
    FullYear,
}

impl PeriodBucket {
    pub const ALL: [PeriodBucket; 6] = [
        PeriodBucket::OneDay,
        PeriodBucket::OneMonth,
        PeriodBucket::TwoMonths,
        PeriodBucket::ThreeMonths,
        PeriodBucket::SixMonths,
        PeriodBucket::FullYear,
    ];

    /// The buckets offered by the period selectors. Daily rental is quoted
    /// in the table but not bookable from the UI.
    pub const SELECTABLE: [PeriodBucket; 5] = [
        PeriodBucket::OneMonth,
        PeriodBucket::TwoMonths,
        PeriodBucket::ThreeMonths,
        PeriodBucket::SixMonths,
        PeriodBucket::FullYear,
    ];

    /// Stable ASCII code used in the persisted blob, forms and URLs.
    pub fn code(self) -> &'static str {
        match self {
            PeriodBucket::OneDay => "1d",
            PeriodBucket::OneMonth => "1m",
            PeriodBucket::TwoMonths => "2m",
            PeriodBucket::ThreeMonths => "3m",
            PeriodBucket::SixMonths => "6m",
            PeriodBucket::FullYear => "12m",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            PeriodBucket::OneDay => "يوم واحد",
            PeriodBucket::OneMonth => "شهر واحد",
            PeriodBucket::TwoMonths => "شهران",
            PeriodBucket::ThreeMonths => "3 أشهر",
            PeriodBucket::SixMonths => "6 أشهر",
            PeriodBucket::FullYear => "سنة كاملة",
        }
    }

    /// Bucket length in whole months; zero for the daily bucket.
    pub fn months(self) -> u32 {
        match self {
            PeriodBucket::OneDay => 0,
            PeriodBucket::OneMonth => 1,
            PeriodBucket::TwoMonths => 2,
            PeriodBucket::ThreeMonths => 3,
            PeriodBucket::SixMonths => 6,
            PeriodBucket::FullYear => 12,
        }
    }
}

/// The (level, size, tier) triple both price layers are keyed by.
///
/// Equality is exact on all three components; "a" and "A" are different
/// levels, "12x4" and "12X4" different sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub level: String,
    pub size: String,
    pub tier: CustomerTier,
}

impl LookupKey {
    pub fn new(level: impl Into<String>, size: impl Into<String>, tier: CustomerTier) -> Self {
        Self {
            level: level.into(),
            size: size.into(),
            tier,
        }
    }

    /// Composite string used to index the override blob.
    pub fn composite(&self) -> String {
        format!("{}__{}__{}", self.level, self.size, self.tier.slug())
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.composite())
    }
}

/// One shipped row of the base price table.
///
/// Rates are kept raw: the table is data-authored and cells may be numbers,
/// currency-formatted strings or null. Normalization happens at resolve
/// time, not at load time, so one bad cell never poisons the row.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRow {
    pub level: String,
    pub size: String,
    pub customer: CustomerTier,
    #[serde(default)]
    pub rates: BTreeMap<PeriodBucket, Value>,
}

impl PriceRow {
    pub fn matches(&self, key: &LookupKey) -> bool {
        self.level == key.level && self.size == key.size && self.customer == key.tier
    }

    pub fn raw(&self, bucket: PeriodBucket) -> Option<&Value> {
        self.rates.get(&bucket)
    }
}
