//! Food Record MCP Tools
//!
//! Nutrient lookup and paged nutrient display for a single food record.

use serde::Serialize;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::models::{NutrientItem, Nutrition};
use crate::nutrition::{
    extract_kind, extract_nutrition, find_item, flatten_and_chunk, round_for_display, MacroKind,
};
use crate::tools::payload::parse_food;

/// Response for lookup_nutrient
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupNutrientResponse {
    pub nutrient: &'static str,
    pub value: f64,
    /// Name of the item the value came from, if any matched
    pub matched_item: Option<String>,
}

/// Response for nutrient_pages
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientPagesResponse {
    pub food_name: String,
    pub pages: Vec<Vec<NutrientItem>>,
    pub page_count: usize,
    pub item_count: usize,
    pub per_serving: Nutrition,
}

pub fn lookup_nutrient(config: &EngineConfig, food: Value, nutrient: &str) -> Result<LookupNutrientResponse, String> {
    let kind = MacroKind::from_str(nutrient).ok_or_else(|| {
        format!("Unknown nutrient '{}'. Use calories, protein, carbs or fat", nutrient)
    })?;
    let record = parse_food(food).map_err(|e| format!("Failed to read food record: {}", e))?;

    let matched_item = find_item(&record.nutrition_data, config.synonyms.get(kind))
        .map(|item| item.name.clone());

    Ok(LookupNutrientResponse {
        nutrient: kind.as_str(),
        value: round_for_display(extract_kind(&record.nutrition_data, &config.synonyms, kind)),
        matched_item,
    })
}

pub fn nutrient_pages(
    config: &EngineConfig,
    food: Value,
    chunk_size: Option<usize>,
) -> Result<NutrientPagesResponse, String> {
    let record = parse_food(food).map_err(|e| format!("Failed to read food record: {}", e))?;
    let pages = flatten_and_chunk(&record.nutrition_data, config.chunk_size(chunk_size));
    let item_count = pages.iter().map(Vec::len).sum();

    Ok(NutrientPagesResponse {
        per_serving: extract_nutrition(&record.nutrition_data, &config.synonyms).map(round_for_display),
        page_count: pages.len(),
        item_count,
        pages,
        food_name: record.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn granola() -> Value {
        json!({
            "name": "Granola",
            "nutritionData": [
                {"title": "Macronutrients", "items": [
                    {"name": "Energy", "unit": "kcal", "value": 190},
                    {"name": "Protein", "unit": "g", "value": "4.5 g"},
                    {"name": "Total Fat", "unit": "g", "value": 7},
                    {"name": "Carbohydrate", "unit": "g", "value": 29}
                ]},
                {"title": "Other", "items": [
                    {"name": "Saturated Fat", "unit": "g", "value": 1},
                    {"name": "Sodium", "unit": "mg", "value": 95}
                ]}
            ]
        })
    }

    #[test]
    fn test_lookup_nutrient() {
        let config = EngineConfig::default();
        let response = lookup_nutrient(&config, granola(), "protein").unwrap();
        assert_eq!(response.nutrient, "protein");
        assert_eq!(response.value, 4.5);
        assert_eq!(response.matched_item.as_deref(), Some("Protein"));

        let fat = lookup_nutrient(&config, granola(), "fat").unwrap();
        assert_eq!(fat.value, 7.0);
        assert_eq!(fat.matched_item.as_deref(), Some("Total Fat"));
    }

    #[test]
    fn test_lookup_missing_nutrient_is_zero() {
        let config = EngineConfig::default();
        let response = lookup_nutrient(&config, json!({"nutritionData": []}), "calories").unwrap();
        assert_eq!(response.value, 0.0);
        assert_eq!(response.matched_item, None);
    }

    #[test]
    fn test_lookup_unknown_nutrient() {
        let err = lookup_nutrient(&EngineConfig::default(), granola(), "sodium").unwrap_err();
        assert!(err.starts_with("Unknown nutrient 'sodium'"));
    }

    #[test]
    fn test_nutrient_pages() {
        let config = EngineConfig::default();
        let response = nutrient_pages(&config, granola(), None).unwrap();
        assert_eq!(response.page_count, 2);
        assert_eq!(response.item_count, 6);
        assert_eq!(response.pages[1].len(), 2);
        assert_eq!(response.per_serving.calories, 190.0);

        let response = nutrient_pages(&config, granola(), Some(5)).unwrap();
        assert_eq!(response.pages.iter().map(Vec::len).collect::<Vec<_>>(), vec![5, 1]);
    }
}
