//! Lenient field decoding for upstream payloads
//!
//! Food data arrives from several sources with inconsistent typing: numbers
//! as strings, units glued onto amounts, nulls where values should be. These
//! helpers coerce such fields to safe defaults instead of failing the whole
//! record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Default serving count for a logged meal
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Parse the leading number of a string
///
/// Examples:
/// - "250" -> Some(250.0)
/// - "250 kcal" -> Some(250.0)
/// - "12.5g" -> Some(12.5)
/// - "kcal" -> None
pub fn parse_leading_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();

    let end = trimmed
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    trimmed[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read a JSON value as a finite number, if it can be one
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_leading_number(s),
        _ => None,
    }
}

/// Clamp a computed amount to a finite, non-negative number
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Coerce a nutrient amount: missing, unparseable or negative becomes 0
pub fn nutrient_amount(value: &Value) -> f64 {
    match value_to_f64(value) {
        Some(v) => sanitize_amount(v),
        None => {
            if !value.is_null() {
                tracing::debug!("Unparseable nutrient amount {} coerced to 0", value);
            }
            0.0
        }
    }
}

/// Coerce a serving quantity: missing, zero, negative or unparseable becomes 1
pub fn serving_quantity(value: &Value) -> f64 {
    match value_to_f64(value) {
        Some(v) if v > 0.0 => v,
        _ => {
            if !value.is_null() {
                tracing::debug!("Quantity {} coerced to {}", value, DEFAULT_QUANTITY);
            }
            DEFAULT_QUANTITY
        }
    }
}

/// Coerce free text: strings pass through, numbers are printed, anything else is empty
pub fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Coerce a list of ids or labels
///
/// Arrays keep their string elements and drop the rest; a bare string is a
/// one-element list; anything else is empty.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(elements) => elements
            .iter()
            .filter_map(|element| match element {
                Value::String(s) => Some(s.clone()),
                other => {
                    tracing::debug!("Skipping non-string list element {}", other);
                    None
                }
            })
            .collect(),
        Value::String(s) => vec![s.clone()],
        Value::Null => Vec::new(),
        other => {
            tracing::debug!("Expected a list, got {}", other);
            Vec::new()
        }
    }
}

pub fn default_quantity() -> f64 {
    DEFAULT_QUANTITY
}

pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(nutrient_amount(&value))
}

pub fn deserialize_quantity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serving_quantity(&value))
}

pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(&value))
}

/// Decode a label-like enum from a string, falling back to its default
/// for anything that is not a string
pub fn deserialize_label<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + for<'a> From<&'a str>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => T::from(s.as_str()),
        _ => T::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("250"), Some(250.0));
        assert_eq!(parse_leading_number(" 250 kcal"), Some(250.0));
        assert_eq!(parse_leading_number("12.5g"), Some(12.5));
        assert_eq!(parse_leading_number("-3"), Some(-3.0));
        assert_eq!(parse_leading_number("kcal"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("."), None);
    }

    #[test]
    fn test_nutrient_amount_defaults() {
        assert_eq!(nutrient_amount(&json!(10)), 10.0);
        assert_eq!(nutrient_amount(&json!("7.5 g")), 7.5);
        assert_eq!(nutrient_amount(&json!(-4)), 0.0);
        assert_eq!(nutrient_amount(&json!(null)), 0.0);
        assert_eq!(nutrient_amount(&json!("n/a")), 0.0);
        assert_eq!(nutrient_amount(&json!({"value": 3})), 0.0);
    }

    #[test]
    fn test_serving_quantity_defaults_to_one() {
        assert_eq!(serving_quantity(&json!(2)), 2.0);
        assert_eq!(serving_quantity(&json!("1.5")), 1.5);
        assert_eq!(serving_quantity(&json!(0)), 1.0);
        assert_eq!(serving_quantity(&json!(-2)), 1.0);
        assert_eq!(serving_quantity(&json!(null)), 1.0);
        assert_eq!(serving_quantity(&json!("lots")), 1.0);
    }

    #[test]
    fn test_sanitize_amount() {
        assert_eq!(sanitize_amount(f64::NAN), 0.0);
        assert_eq!(sanitize_amount(f64::INFINITY), 0.0);
        assert_eq!(sanitize_amount(-1.0), 0.0);
        assert_eq!(sanitize_amount(3.25), 3.25);
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(text(&json!("Energy")), "Energy");
        assert_eq!(text(&json!(42)), "42");
        assert_eq!(text(&json!(null)), "");
        assert_eq!(text(&json!(["a"])), "");
    }
}
