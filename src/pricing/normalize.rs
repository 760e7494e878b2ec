//! Raw price value normalization.
//!
//! The shipped price table and the override blob both carry values in
//! whatever shape the data author left them: plain numbers, currency
//! strings like `"25,000 د.ل"`, empty strings, nulls. Everything funnels
//! through [`normalize`] before the engine does arithmetic with it.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

/// Canonicalize one raw cell to an amount, or `None` for "no known price".
///
/// Pure and infallible: malformed input is a normal outcome, not an error.
/// Zero and negative amounts pass through unchanged.
pub fn normalize(raw: &Value) -> Option<Decimal> {
    match raw {
        Value::Null => None,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(Decimal::from_f64)
            }
        }
        Value::String(s) => parse_loose(s),
        other => parse_loose(&other.to_string()),
    }
}

/// Strip everything that is not an ASCII digit, `.` or `-`, then parse.
fn parse_loose(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn clean_numbers_pass_through_unchanged() {
        assert_eq!(normalize(&json!(25000)), Some(dec!(25000)));
        assert_eq!(normalize(&json!(123.45)), Some(dec!(123.45)));
        assert_eq!(normalize(&json!(0)), Some(dec!(0)));
        assert_eq!(normalize(&json!(-500)), Some(dec!(-500)));
    }

    #[test]
    fn missing_values_are_unknown() {
        assert_eq!(normalize(&Value::Null), None);
        assert_eq!(normalize(&json!("")), None);
    }

    #[test]
    fn currency_strings_are_stripped_and_parsed() {
        assert_eq!(normalize(&json!("25,000 د.ل")), Some(dec!(25000)));
        assert_eq!(normalize(&json!("47000")), Some(dec!(47000)));
        assert_eq!(normalize(&json!(" 1,250.50 LYD ")), Some(dec!(1250.50)));
        assert_eq!(normalize(&json!("-3,000")), Some(dec!(-3000)));
    }

    #[test]
    fn strings_without_digits_are_unknown() {
        assert_eq!(normalize(&json!("غير متوفر")), None);
        assert_eq!(normalize(&json!("n/a")), None);
        assert_eq!(normalize(&json!("-")), None);
    }

    #[test]
    fn garbled_numerics_are_unknown() {
        assert_eq!(normalize(&json!("1.2.3")), None);
        assert_eq!(normalize(&json!("--5")), None);
    }
}
