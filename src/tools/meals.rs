//! Meal Aggregation MCP Tools
//!
//! Totals and display pages over logged meal entries.

use serde::Serialize;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::models::{DayMeals, MacroTotals, MealType, Nutrition};
use crate::nutrition::{round_for_display, DaySummary, MealAggregator, MealSummary};
use crate::tools::payload::parse_entries;

/// Totals rounded for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_calories: f64,
    pub macro_totals: MacroTotals,
}

/// Response for remove_meal_entry
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMealEntryResponse {
    pub removed_id: String,
    pub before: Totals,
    pub after: Totals,
    pub remaining_count: usize,
}

pub fn summarize_meals(
    config: &EngineConfig,
    entries: Value,
    chunk_size: Option<usize>,
) -> Result<MealSummary, String> {
    let entries = parse_entries(entries, "entries").map_err(|e| format!("Failed to read meal entries: {}", e))?;
    let aggregator = MealAggregator::new(&config.synonyms);
    Ok(aggregator.summarize(&entries, config.chunk_size(chunk_size)))
}

/// Summarize a day's meals given per-bucket entry lists
///
/// Entries are placed in the bucket they were passed under; their own
/// `mealType` is overwritten to match.
pub fn summarize_day(
    config: &EngineConfig,
    breakfast: Value,
    lunch: Value,
    dinner: Value,
    other: Value,
    chunk_size: Option<usize>,
) -> Result<DaySummary, String> {
    let mut day = DayMeals::default();
    for (meal_type, value, field) in [
        (MealType::Breakfast, breakfast, "breakfast"),
        (MealType::Lunch, lunch, "lunch"),
        (MealType::Dinner, dinner, "dinner"),
        (MealType::Other, other, "other"),
    ] {
        let entries = parse_entries(value, field).map_err(|e| format!("Failed to read {} entries: {}", field, e))?;
        let bucket = match meal_type {
            MealType::Breakfast => &mut day.breakfast,
            MealType::Lunch => &mut day.lunch,
            MealType::Dinner => &mut day.dinner,
            MealType::Other => &mut day.other,
        };
        bucket.extend(entries.into_iter().map(|e| e.with_meal_type(meal_type)));
    }

    let aggregator = MealAggregator::new(&config.synonyms);
    let summary = aggregator.summarize_day(&day, config.chunk_size(chunk_size));
    tracing::info!(
        "Summarized day: {} entries, {} kcal",
        summary.entry_count,
        summary.total_calories
    );
    Ok(summary)
}

/// Remove one entry from a meal list and report the running total before and after
///
/// The after-total is the before-total minus the removed entry's own
/// contribution, not a recomputation over the remaining entries.
pub fn remove_meal_entry(config: &EngineConfig, entries: Value, id: &str) -> Result<RemoveMealEntryResponse, String> {
    let entries = parse_entries(entries, "entries").map_err(|e| format!("Failed to read meal entries: {}", e))?;
    let index = entries
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| format!("Meal entry not found: {}", id))?;

    let aggregator = MealAggregator::new(&config.synonyms);
    let mut ledger = aggregator.ledger(&entries);
    let before = ledger.totals();
    aggregator.remove_entry(&mut ledger, &entries[index]);
    let after = ledger.totals();

    let display = |n: Nutrition| {
        let n = n.map(round_for_display);
        Totals {
            total_calories: n.calories,
            macro_totals: n.macros(),
        }
    };

    Ok(RemoveMealEntryResponse {
        removed_id: id.to_string(),
        before: display(before),
        after: display(after),
        remaining_count: entries.len() - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meal(id: &str, calories: f64, protein: f64, quantity: f64) -> Value {
        json!({
            "id": id,
            "name": id,
            "quantity": quantity,
            "nutritionData": [
                {"title": "Macro", "items": [
                    {"name": "Energy", "unit": "kcal", "value": calories},
                    {"name": "Protein", "unit": "g", "value": protein}
                ]}
            ]
        })
    }

    #[test]
    fn test_summarize_meals() {
        let config = EngineConfig::default();
        let summary = summarize_meals(&config, json!([meal("a", 200.0, 10.0, 2.0), meal("b", 150.5, 3.0, 1.0)]), None).unwrap();
        assert_eq!(summary.total_calories, 550.5);
        assert_eq!(summary.macro_totals.protein, 23.0);
        assert_eq!(summary.entry_count, 2);
        // Energy and Protein merged across entries
        assert_eq!(summary.display_chunks.len(), 1);
        assert_eq!(summary.display_chunks[0][0].value, 550.5);
    }

    #[test]
    fn test_summarize_meals_rejects_non_array() {
        let err = summarize_meals(&EngineConfig::default(), json!({"id": "a"}), None).unwrap_err();
        assert!(err.contains("Expected a JSON array for entries"));
    }

    #[test]
    fn test_summarize_day_buckets() {
        let config = EngineConfig::default();
        let summary = summarize_day(
            &config,
            json!([meal("a", 300.0, 12.0, 1.0)]),
            Value::Null,
            json!([meal("b", 650.0, 40.0, 1.0)]),
            json!([{"id": "c", "mealType": "breakfast", "nutritionData": [{"name": "Calories", "unit": "kcal", "value": 90}]}]),
            None,
        )
        .unwrap();

        assert_eq!(summary.breakfast.total_calories, 300.0);
        assert_eq!(summary.lunch.entry_count, 0);
        assert_eq!(summary.dinner.total_calories, 650.0);
        assert_eq!(summary.other.total_calories, 90.0);
        assert_eq!(summary.total_calories, 1040.0);
        assert_eq!(summary.entry_count, 3);
    }

    #[test]
    fn test_remove_meal_entry_exact() {
        let config = EngineConfig::default();
        let entries = json!([meal("a", 0.1, 0.2, 3.0), meal("b", 200.0, 10.0, 2.0)]);
        let response = remove_meal_entry(&config, entries, "b").unwrap();

        assert_eq!(response.before.total_calories, 400.3);
        assert_eq!(response.after.total_calories, 0.3);
        assert_eq!(response.after.macro_totals.protein, 0.6);
        assert_eq!(response.remaining_count, 1);
    }

    #[test]
    fn test_remove_only_entry_returns_zero() {
        let config = EngineConfig::default();
        let response = remove_meal_entry(&config, json!([meal("a", 200.0, 0.0, 2.0)]), "a").unwrap();
        assert_eq!(response.before.total_calories, 400.0);
        assert_eq!(response.after.total_calories, 0.0);
    }

    #[test]
    fn test_remove_meal_entry_with_huge_energy() {
        let config = EngineConfig::default();
        let entries = json!([meal("a", 1e13, 0.0, 1.0), meal("b", 1e13, 0.0, 1.0)]);
        let response = remove_meal_entry(&config, entries, "a").unwrap();
        assert_eq!(response.before.total_calories, 2e13);
        assert_eq!(response.after.total_calories, 1e13);
    }

    #[test]
    fn test_remove_unknown_entry() {
        let err = remove_meal_entry(&EngineConfig::default(), json!([meal("a", 1.0, 0.0, 1.0)]), "zzz").unwrap_err();
        assert_eq!(err, "Meal entry not found: zzz");
    }
}
