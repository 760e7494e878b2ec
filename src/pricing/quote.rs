//! Quote aggregation for the booking summary and printable documents.
//!
//! An item with no known price contributes nothing to the total; its row
//! still shows "—" so the gap is visible rather than silently absorbed.

use rust_decimal::Decimal;

use crate::models::Billboard;

use super::models::{CustomerTier, PeriodBucket};
use super::resolver::PricingEngine;

/// Sum of resolved prices over (level, size) pairs. Unknown counts as zero.
pub fn total<'a, I>(engine: &PricingEngine, items: I, tier: CustomerTier, bucket: PeriodBucket) -> Decimal
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    items
        .into_iter()
        .filter_map(|(level, size)| engine.resolve(level, size, tier, bucket))
        .sum()
}

/// One billboard of a quote with its resolved unit price.
#[derive(Debug)]
pub struct QuotedLine<'a> {
    pub billboard: &'a Billboard,
    pub price: Option<Decimal>,
}

/// Price every selected billboard for one period and tier.
pub fn quote_lines<'a, I>(
    engine: &PricingEngine,
    billboards: I,
    tier: CustomerTier,
    bucket: PeriodBucket,
) -> Vec<QuotedLine<'a>>
where
    I: IntoIterator<Item = &'a Billboard>,
{
    billboards
        .into_iter()
        .map(|billboard| QuotedLine {
            price: engine.resolve(&billboard.level, &billboard.size, tier, bucket),
            billboard,
        })
        .collect()
}

pub fn grand_total(lines: &[QuotedLine<'_>]) -> Decimal {
    lines.iter().filter_map(|line| line.price).sum()
}

/// Arabic display form: thousands-grouped dinars, "—" for unknown.
pub fn format_dinars(amount: Option<Decimal>) -> String {
    match amount {
        None => "—".to_string(),
        Some(amount) => format!("{} د.ل", group_thousands(&amount.normalize().to_string())),
    }
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = format!("{sign}{grouped}");
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}
