//! Tool payload decoding
//!
//! Tool parameters carry raw JSON from the backend. This is the single place
//! where that JSON becomes model types; everything downstream works on the
//! normalized records.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::{FoodRecord, MealLogEntry, UserProfile};

/// Payload error types
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Invalid payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array for {0}")]
    NotAnArray(&'static str),
}

/// Result type for payload decoding
pub type PayloadResult<T> = Result<T, PayloadError>;

fn decode<T: DeserializeOwned + Default>(value: Value) -> PayloadResult<T> {
    match value {
        Value::Null => Ok(T::default()),
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Decode a food record; `null` is an empty record
pub fn parse_food(value: Value) -> PayloadResult<FoodRecord> {
    decode(value)
}

/// Decode a user profile; `null` is an empty profile
pub fn parse_profile(value: Value) -> PayloadResult<UserProfile> {
    decode(value)
}

/// Decode a list of meal entries
///
/// `null` is an empty list. Anything other than an array is rejected.
pub fn parse_entries(value: Value, field: &'static str) -> PayloadResult<Vec<MealLogEntry>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(PayloadError::from))
            .collect(),
        _ => Err(PayloadError::NotAnArray(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_food_null_is_empty() {
        let food = parse_food(Value::Null).unwrap();
        assert!(food.nutrition_data.is_empty());
        assert!(food.ingredients_text().is_empty());
    }

    #[test]
    fn test_parse_food_tolerates_loose_values() {
        let food = parse_food(json!({
            "name": "Granola",
            "ingredients": ["Oats", "Honey"],
            "nutritionData": [{"name": "Energy", "unit": "kcal", "value": "210 kcal"}]
        }))
        .unwrap();
        assert_eq!(food.nutrition_data[0].items[0].value, 210.0);
        assert_eq!(food.ingredients_text(), "Oats, Honey");
    }

    #[test]
    fn test_parse_entries() {
        let entries = parse_entries(
            json!([
                {"id": 1, "quantity": "2", "nutritionData": []},
                {"id": "b", "mealType": "lunch"}
            ]),
            "entries",
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "1");
        assert_eq!(entries[0].quantity, 2.0);
        assert_eq!(entries[1].quantity, 1.0);
    }

    #[test]
    fn test_parse_entries_null_is_empty() {
        assert!(parse_entries(Value::Null, "entries").unwrap().is_empty());
    }

    #[test]
    fn test_parse_entries_rejects_non_array() {
        let err = parse_entries(json!({"id": "a"}), "entries").unwrap_err();
        assert!(matches!(err, PayloadError::NotAnArray("entries")));
        assert_eq!(err.to_string(), "Expected a JSON array for entries");
    }

    #[test]
    fn test_parse_profile() {
        let profile = parse_profile(json!({
            "allergens": ["peanuts", "none"],
            "heightValue": "5",
            "heightInches": 10,
            "heightUnit": "ft_in",
            "weightValue": 180,
            "weightUnit": "lb"
        }))
        .unwrap();
        assert!(profile.allergens.declares_none());
        assert!((profile.body.height_cm() - 177.8).abs() < 1e-9);
    }

    #[test]
    fn test_parse_profile_with_malformed_allergens() {
        let profile = parse_profile(json!({"allergens": null, "heightValue": 170, "weightValue": 70})).unwrap();
        assert!(profile.allergens.is_empty());
        assert_eq!(profile.body.weight_kg(), 70.0);

        let profile = parse_profile(json!({"allergens": ["soy", 3, "milk"]})).unwrap();
        assert_eq!(profile.allergens.ids(), &["soy".to_string(), "milk".to_string()]);
    }
}
