//! Value coercion for amounts, rates and ranges found in the datasets
//!
//! Text values may carry currency symbols (`€`, `$`), thousands separators,
//! percent signs, comparison prefixes (`>`, `<`, `≤`, `≥`) or a numeric range
//! such as `"50-60"`. Coercion proceeds in a fixed order:
//!
//! 1. trim surrounding whitespace
//! 2. drop `,`, `€` and `$`
//! 3. strip a leading run of comparison operators
//! 4. a `%` anywhere makes the value a percentage (divided by 100)
//! 5. otherwise `low-high` yields the midpoint of the range
//! 6. otherwise the remainder is parsed as a float
//!
//! The percent check comes before the range check, so `"5-10%"` is parsed
//! as the plain number `"5-10"` and fails.
//!
//! Underscores between digits (`"1_000"`) are accepted as digit separators.

use log::debug;
use std::borrow::Cow;

use crate::types::*;

/// Characters removed anywhere in the text
const STRIPPED_SYMBOLS: [char; 3] = [',', '€', '$'];

/// Characters stripped from the start of the text
const COMPARISON_PREFIXES: [char; 4] = ['>', '<', '≤', '≥'];

/// Coerce a raw dataset value into a float
///
/// Numbers are returned unchanged and booleans become `1.0` or `0.0`.
/// `Null` is a type error.
pub fn coerce_to_float(value: &RawAmount) -> FeeResult<f64> {
    match value {
        RawAmount::Number(number) => Ok(*number),
        RawAmount::Bool(flag) => Ok(if *flag { 1.0 } else { 0.0 }),
        RawAmount::Text(text) => coerce_str(text),
        RawAmount::Null => Err(FeeError::TypeMismatch(
            "cannot coerce a null value to a float".to_string(),
        )),
    }
}

/// Coerce a text value into a float
pub fn coerce_str(text: &str) -> FeeResult<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !STRIPPED_SYMBOLS.contains(c))
        .collect();
    let cleaned = cleaned.trim_start_matches(&COMPARISON_PREFIXES[..]);

    // Checked before ranges: "5-10%" must not become a range
    if cleaned.contains('%') {
        let percentage = parse_float(&cleaned.replace('%', ""))?;
        return Ok(percentage / 100.0);
    }

    if let Some(midpoint) = parse_range(cleaned) {
        return Ok(midpoint);
    }

    parse_float(cleaned)
}

impl RawAmount {
    /// Coerce this value into a float
    pub fn coerce(&self) -> FeeResult<f64> {
        coerce_to_float(self)
    }
}

/// Midpoint of a `low-high` range, or `None` if the text is not one
fn parse_range(text: &str) -> Option<f64> {
    let (low, high) = text.split_once('-')?;
    // "-5" and "1-2-3" are not ranges
    if low.is_empty() || high.is_empty() || high.contains('-') {
        return None;
    }

    match (parse_float(low), parse_float(high)) {
        (Ok(low), Ok(high)) => Some((low + high) / 2.0),
        _ => {
            debug!("'{}' is not a numeric range, parsing as a single value", text);
            None
        }
    }
}

fn parse_float(text: &str) -> FeeResult<f64> {
    strip_digit_separators(text.trim())
        .parse::<f64>()
        .map_err(|source| FeeError::Parse {
            input: text.to_string(),
            source,
        })
}

/// Drop `_` separators when every one sits between two digits
///
/// Misplaced underscores (`"_1"`, `"1__0"`, `"1_"`) are left in place so the
/// parse fails.
fn strip_digit_separators(text: &str) -> Cow<'_, str> {
    if !text.contains('_') {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let well_placed = bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'_')
        .all(|(i, _)| {
            i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit()
        });

    if well_placed {
        Cow::Owned(text.replace('_', ""))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numeric_strings() {
        for text in ["0", "42", "-3.5", "1e3", "0.001", "  7.25  "] {
            let expected: f64 = text.trim().parse().unwrap();
            assert_eq!(coerce_str(text).unwrap(), expected, "input {:?}", text);
        }
    }

    #[test]
    fn test_currency_and_separators() {
        assert_eq!(coerce_str("$1,234.50").unwrap(), 1234.50);
        assert_eq!(coerce_str("€1,000,000").unwrap(), 1_000_000.0);
        assert_eq!(coerce_str(" 99.9€ ").unwrap(), 99.9);
    }

    #[test]
    fn test_percentages() {
        assert_eq!(coerce_str("12%").unwrap(), 0.12);
        assert_eq!(coerce_str("7.5%").unwrap(), 0.075);
        assert_eq!(coerce_str(">8.3%").unwrap(), 0.083);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(coerce_str("50-60").unwrap(), 55.0);
        assert!(coerce_str("100k-1m").is_err());
        assert_eq!(coerce_str("0-1").unwrap(), 0.5);
    }

    #[test]
    fn test_comparison_prefixes() {
        assert_eq!(coerce_str(">100").unwrap(), 100.0);
        assert_eq!(coerce_str("<5").unwrap(), 5.0);
        assert_eq!(coerce_str("≥3.5").unwrap(), 3.5);
        assert_eq!(coerce_str("≤ 2").unwrap(), 2.0);
        assert_eq!(coerce_str(">>7").unwrap(), 7.0);
    }

    #[test]
    fn test_prefix_is_stripped_before_range() {
        assert_eq!(coerce_str(">50-60").unwrap(), 55.0);
    }

    #[test]
    fn test_percent_takes_precedence_over_range() {
        let result = coerce_str("5-10%");
        assert!(matches!(result, Err(FeeError::Parse { ref input, .. }) if input == "5-10"));
    }

    #[test]
    fn test_negative_number_is_not_a_range() {
        assert_eq!(coerce_str("-5").unwrap(), -5.0);
        assert_eq!(coerce_str("1e-5").unwrap(), 1e-5);
    }

    #[test]
    fn test_unparseable_text() {
        assert!(matches!(coerce_str("abc"), Err(FeeError::Parse { .. })));
        assert!(matches!(coerce_str(""), Err(FeeError::Parse { .. })));
        assert!(matches!(coerce_str("1-2-3"), Err(FeeError::Parse { .. })));
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(coerce_to_float(&RawAmount::Number(12.5)).unwrap(), 12.5);
        assert_eq!(coerce_to_float(&RawAmount::from(3_i64)).unwrap(), 3.0);
    }

    #[test]
    fn test_booleans_cast_to_unit_values() {
        assert_eq!(coerce_to_float(&RawAmount::from(true)).unwrap(), 1.0);
        assert_eq!(coerce_to_float(&RawAmount::Bool(false)).unwrap(), 0.0);
    }

    #[test]
    fn test_underscore_digit_separators() {
        assert_eq!(coerce_str("1_000").unwrap(), 1000.0);
        assert_eq!(coerce_str("€1_000.5").unwrap(), 1000.5);
        assert_eq!(coerce_str("1_000-2_000").unwrap(), 1500.0);
        assert_eq!(coerce_str("2_5%").unwrap(), 0.25);

        for text in ["_1", "1_", "1__0", "1_.5"] {
            assert!(
                matches!(coerce_str(text), Err(FeeError::Parse { .. })),
                "input {:?}",
                text
            );
        }
    }

    #[test]
    fn test_coercion_is_idempotent() {
        for text in ["$1,234.50", "12%", "50-60", ">100"] {
            let once = coerce_str(text).unwrap();
            let twice = coerce_to_float(&RawAmount::Number(once)).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_null_is_type_error() {
        assert!(matches!(
            coerce_to_float(&RawAmount::Null),
            Err(FeeError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let value = RawAmount::from("€2,500");
        assert_eq!(value.coerce().unwrap(), 2500.0);
        assert_eq!(value, RawAmount::Text("€2,500".to_string()));
    }
}
