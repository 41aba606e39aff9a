//! Field extraction helpers for raw rows.
//!
//! Raw values arrive as whatever the upstream reader produced: strings,
//! JSON numbers (when the reader infers types), `null`, or nothing at all.
//! These helpers coerce them into the record's field types with the
//! defaulting rules the normalizer relies on.

use serde_json::Value;

/// Reads a text column, defaulting to an empty string.
///
/// Numbers and booleans are rendered to their text form so that columns a
/// type-inferring reader turned into numbers (postal codes, districts)
/// survive normalization.
#[must_use]
pub fn text_field(row: &Value, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Reads an integer column, returning `None` if it is missing or unparsable.
///
/// Fractional values are truncated toward zero. Strings are trimmed first
/// and may hold either an integer or a decimal.
#[must_use]
pub fn integer_field(row: &Value, column: &str) -> Option<i64> {
    match row.get(column)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => parse_integer(s),
        _ => None,
    }
}

/// Parses an integer from text, accepting decimals by truncation.
#[must_use]
pub fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(truncate))
}

/// Reads a non-negative integer column, defaulting to `0` when missing,
/// unparsable, negative, or out of range.
#[must_use]
pub fn unsigned_field(row: &Value, column: &str) -> u32 {
    integer_field(row, column)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Reads a year column, defaulting to `0` when missing or unparsable.
#[must_use]
pub fn year_field(row: &Value, column: &str) -> i32 {
    integer_field(row, column)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(0)
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> Option<i64> {
    if !value.is_finite() || value.abs() >= 9.0e18 {
        return None;
    }
    Some(value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_text_from_strings_and_numbers() {
        let row = json!({"City": "Seattle", "Postal Code": 98101, "Flag": true});
        assert_eq!(text_field(&row, "City"), "Seattle");
        assert_eq!(text_field(&row, "Postal Code"), "98101");
        assert_eq!(text_field(&row, "Flag"), "true");
    }

    #[test]
    fn missing_or_null_text_is_empty() {
        let row = json!({"County": null});
        assert_eq!(text_field(&row, "County"), "");
        assert_eq!(text_field(&row, "City"), "");
    }

    #[test]
    fn parses_integer_strings() {
        assert_eq!(parse_integer("2022"), Some(2022));
        assert_eq!(parse_integer("  250 "), Some(250));
        assert_eq!(parse_integer("250.7"), Some(250));
        assert_eq!(parse_integer("-3"), Some(-3));
    }

    #[test]
    fn rejects_unparsable_integers() {
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("   "), None);
        assert_eq!(parse_integer("n/a"), None);
        assert_eq!(parse_integer("NaN"), None);
        assert_eq!(parse_integer("inf"), None);
    }

    #[test]
    fn reads_numeric_json_values() {
        let row = json!({"Electric Range": 215, "Base MSRP": 69900.0, "Model Year": "2019"});
        assert_eq!(integer_field(&row, "Electric Range"), Some(215));
        assert_eq!(integer_field(&row, "Base MSRP"), Some(69900));
        assert_eq!(integer_field(&row, "Model Year"), Some(2019));
    }

    #[test]
    fn unsigned_field_defaults_to_zero() {
        let row = json!({"a": -10, "b": "", "c": null, "d": "abc", "e": 5_000_000_000_i64});
        assert_eq!(unsigned_field(&row, "a"), 0);
        assert_eq!(unsigned_field(&row, "b"), 0);
        assert_eq!(unsigned_field(&row, "c"), 0);
        assert_eq!(unsigned_field(&row, "d"), 0);
        assert_eq!(unsigned_field(&row, "e"), 0);
        assert_eq!(unsigned_field(&row, "missing"), 0);
    }

    #[test]
    fn year_field_parses_or_defaults() {
        let row = json!({"Model Year": 2023, "Bad": "twenty"});
        assert_eq!(year_field(&row, "Model Year"), 2023);
        assert_eq!(year_field(&row, "Bad"), 0);
    }
}
