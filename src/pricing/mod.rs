//! Pricing resolution engine.
//!
//! A layered lookup from (level, size, customer tier, rental period) to a
//! dinar amount: user-entered overrides persist across sessions and shadow
//! the shipped base table. An absent price is a displayable state ("—"),
//! never an error.

pub mod models;
pub mod normalize;
pub mod overrides;
pub mod quote;
pub mod requests;
pub mod resolver;
pub mod table;

// Re-export commonly used items
pub use models::{CustomerTier, LookupKey, PeriodBucket, PriceRow};
pub use normalize::normalize;
pub use overrides::OverrideStore;
pub use quote::{format_dinars, grand_total, quote_lines, total, QuotedLine};
pub use resolver::PricingEngine;
pub use table::PriceTable;
