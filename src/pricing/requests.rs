//! Request DTOs for the pricing and document endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::models::{CustomerTier, PeriodBucket};
use super::normalize::normalize;

/// Query parameters for the pricing list page.
#[derive(Debug, Deserialize)]
pub struct PricingListQuery {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
}

impl PricingListQuery {
    pub fn bucket(&self) -> PeriodBucket {
        self.bucket
            .as_deref()
            .and_then(PeriodBucket::from_code)
            .unwrap_or(PeriodBucket::OneMonth)
    }
}

/// Form body for editing one price cell.
#[derive(Debug, Deserialize)]
pub struct OverrideForm {
    pub level: String,
    pub size: String,
    pub tier: String,
    pub bucket: String,
    /// Raw input text. Empty or non-numeric clears the override, matching
    /// the behaviour of clearing the cell in the UI.
    #[serde(default)]
    pub value: String,
}

impl OverrideForm {
    pub fn tier(&self) -> Option<CustomerTier> {
        CustomerTier::from_slug(&self.tier)
    }

    pub fn bucket(&self) -> Option<PeriodBucket> {
        PeriodBucket::from_code(&self.bucket)
    }

    /// The override amount, run through the same normalizer as every other
    /// raw price value. `None` means "clear".
    pub fn parsed_value(&self) -> Option<Decimal> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            return None;
        }
        normalize(&Value::String(trimmed.to_string()))
    }
}

/// Query parameters shared by the booking summary and both documents.
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
}

impl QuoteQuery {
    pub fn bucket(&self) -> PeriodBucket {
        self.bucket
            .as_deref()
            .and_then(PeriodBucket::from_code)
            .unwrap_or(PeriodBucket::OneMonth)
    }

    pub fn tier(&self) -> CustomerTier {
        self.tier
            .as_deref()
            .and_then(CustomerTier::from_slug)
            .unwrap_or(CustomerTier::Standard)
    }
}
