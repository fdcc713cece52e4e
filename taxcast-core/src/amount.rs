//! Monetary amounts as they arrive from ledger exports.
//!
//! Exports are loosely typed: an amount may be a plain number, a display
//! string like `"¥1,200,000"` or `"▲3,000"`, or an object wrapping the real
//! value (`{"value": ...}`). [`Amount`] names each shape explicitly and
//! [`Amount::normalize`] folds any of them into a signed `f64`.
//!
//! Normalization never fails. Anything unparseable becomes `0.0`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keys searched, in order, when unwrapping an object amount.
pub const WRAPPED_KEYS: [&str; 3] = ["value", "amount", "number"];

/// Markers that flag a formatted amount as negative wherever they appear.
/// `▲`/`△` are the conventional negative signs in Japanese ledgers.
const NEGATIVE_MARKERS: [char; 2] = ['▲', '△'];

/// Leading characters that flag a formatted amount as negative.
const LEADING_MINUS: [char; 2] = ['-', '−'];

/// A monetary value in one of the shapes ledger exports produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Plain JSON number
    Numeric(f64),
    /// Display string such as `"-¥12,000"` or `"▲3,000円"`
    Formatted(String),
    /// Object carrying the amount under `value`, `amount` or `number`
    Wrapped(BTreeMap<String, Amount>),
    /// Anything else (null, bool, array)
    Opaque(serde_json::Value),
}

impl Amount {
    /// Wrap `inner` under `key`, e.g. `Amount::wrapped("value", 100.0)`.
    pub fn wrapped(key: impl Into<String>, inner: impl Into<Amount>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(key.into(), inner.into());
        Amount::Wrapped(map)
    }

    /// Fold this amount into a signed number. Unparseable input yields `0.0`.
    pub fn normalize(&self) -> f64 {
        match self {
            Amount::Numeric(n) if n.is_finite() => *n,
            Amount::Numeric(_) => 0.0,
            Amount::Formatted(text) => parse_formatted(text),
            Amount::Wrapped(map) => WRAPPED_KEYS
                .iter()
                .find_map(|key| map.get(*key))
                .map(Amount::normalize)
                .unwrap_or(0.0),
            Amount::Opaque(_) => 0.0,
        }
    }

    /// Absolute value of the normalized amount
    pub fn magnitude(&self) -> f64 {
        self.normalize().abs()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Numeric(0.0)
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Numeric(n)
    }
}

impl From<i64> for Amount {
    fn from(n: i64) -> Self {
        Amount::Numeric(n as f64)
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Amount::Formatted(s.to_string())
    }
}

impl From<String> for Amount {
    fn from(s: String) -> Self {
        Amount::Formatted(s)
    }
}

fn parse_formatted(text: &str) -> f64 {
    let trimmed = text.trim();
    let negative = trimmed.starts_with(LEADING_MINUS) || trimmed.contains(NEGATIVE_MARKERS);

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match leading_number(&cleaned) {
        Some(magnitude) if negative => -magnitude,
        Some(magnitude) => magnitude,
        None => 0.0,
    }
}

/// Longest prefix of digits with at most one decimal point, parsed.
fn leading_number(cleaned: &str) -> Option<f64> {
    let mut seen_dot = false;
    let end = cleaned
        .char_indices()
        .find(|&(_, c)| {
            if c != '.' {
                return false;
            }
            if seen_dot {
                return true;
            }
            seen_dot = true;
            false
        })
        .map(|(i, _)| i)
        .unwrap_or(cleaned.len());

    let prefix = &cleaned[..end];
    if !prefix.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_passthrough() {
        assert_eq!(Amount::from(-4500.0).normalize(), -4500.0);
        assert_eq!(Amount::from(12_000_i64).normalize(), 12_000.0);
    }

    #[test]
    fn test_non_finite_numeric_is_zero() {
        assert_eq!(Amount::Numeric(f64::NAN).normalize(), 0.0);
        assert_eq!(Amount::Numeric(f64::INFINITY).normalize(), 0.0);
    }

    #[test]
    fn test_formatted_yen() {
        assert_eq!(Amount::from("¥1,200,000").normalize(), 1_200_000.0);
        assert_eq!(Amount::from("  3,000円 ").normalize(), 3_000.0);
        assert_eq!(Amount::from("12.50").normalize(), 12.5);
    }

    #[test]
    fn test_formatted_negative_forms() {
        assert_eq!(Amount::from("-¥5,000").normalize(), -5_000.0);
        assert_eq!(Amount::from("−800").normalize(), -800.0);
        assert_eq!(Amount::from("▲3,000").normalize(), -3_000.0);
        assert_eq!(Amount::from("¥△1,500").normalize(), -1_500.0);
    }

    #[test]
    fn test_minus_after_currency_is_not_negative() {
        // Only a leading minus counts; the marker characters count anywhere.
        assert_eq!(Amount::from("¥-5,000").normalize(), 5_000.0);
    }

    #[test]
    fn test_unparseable_strings_degrade_to_zero() {
        assert_eq!(Amount::from("").normalize(), 0.0);
        assert_eq!(Amount::from("n/a").normalize(), 0.0);
        // Sign is dropped when there is nothing to negate.
        assert_eq!(Amount::from("-").normalize(), 0.0);
        assert_eq!(Amount::from("▲ ---").normalize(), 0.0);
        assert_eq!(Amount::from("...").normalize(), 0.0);
    }

    #[test]
    fn test_second_decimal_point_truncates() {
        assert_eq!(Amount::from("1.2.3").normalize(), 1.2);
    }

    #[test]
    fn test_wrapped_key_priority() {
        let mut map = BTreeMap::new();
        map.insert("number".to_string(), Amount::from(3.0));
        map.insert("amount".to_string(), Amount::from(2.0));
        assert_eq!(Amount::Wrapped(map.clone()).normalize(), 2.0);

        map.insert("value".to_string(), Amount::from("¥1"));
        assert_eq!(Amount::Wrapped(map).normalize(), 1.0);
    }

    #[test]
    fn test_wrapped_recurses() {
        let nested = Amount::wrapped("value", Amount::wrapped("amount", "-¥7,000"));
        assert_eq!(nested.normalize(), -7_000.0);
    }

    #[test]
    fn test_wrapped_without_known_key_is_zero() {
        let amount = Amount::wrapped("currency", "JPY");
        assert_eq!(amount.normalize(), 0.0);
    }

    #[test]
    fn test_deserialize_every_shape() {
        let shapes: Vec<Amount> =
            serde_json::from_str(r#"[1500, "¥2,000", {"value": "▲300"}, null, true, [1, 2]]"#)
                .unwrap();
        let values: Vec<f64> = shapes.iter().map(Amount::normalize).collect();
        assert_eq!(values, vec![1500.0, 2000.0, -300.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(Amount::from("▲3,000").magnitude(), 3_000.0);
    }

    proptest::proptest! {
        #[test]
        fn prop_formatted_always_finite(text in ".*") {
            proptest::prop_assert!(Amount::from(text).normalize().is_finite());
        }
    }
}
