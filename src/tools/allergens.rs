//! Allergen MCP Tools
//!
//! Catalog listing and ingredient screening.

use serde::Serialize;
use serde_json::Value;

use crate::models::{AllergenSelection, ALLERGEN_CATALOG};
use crate::nutrition::detect_in_record;
use crate::tools::payload::parse_food;

/// One catalog entry
#[derive(Debug, Serialize)]
pub struct AllergenInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub exclusions: &'static [&'static str],
}

/// Response for list_allergens
#[derive(Debug, Serialize)]
pub struct ListAllergensResponse {
    pub allergens: Vec<AllergenInfo>,
    pub total: usize,
}

/// Response for detect_allergens
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectAllergensResponse {
    pub detected_allergens: Vec<String>,
    pub safe: bool,
    pub food_name: String,
}

/// Response for update_allergen_selection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub allergens: Vec<String>,
    pub declares_none: bool,
}

pub fn list_allergens() -> ListAllergensResponse {
    let allergens: Vec<AllergenInfo> = ALLERGEN_CATALOG
        .iter()
        .map(|a| AllergenInfo {
            id: a.id,
            name: a.name,
            keywords: a.keywords,
            exclusions: a.exclusions,
        })
        .collect();
    let total = allergens.len();
    ListAllergensResponse { allergens, total }
}

/// Detect which of the user's allergens the food's ingredients contain
pub fn detect_allergens(allergens: &[String], food: Value) -> Result<DetectAllergensResponse, String> {
    let record = parse_food(food).map_err(|e| format!("Failed to read food record: {}", e))?;
    let detected = detect_in_record(allergens, &record);

    tracing::info!(
        "Screened '{}' for {} allergen(s): {} detected",
        record.name,
        allergens.len(),
        detected.len()
    );

    Ok(DetectAllergensResponse {
        safe: detected.is_empty(),
        detected_allergens: detected,
        food_name: record.name,
    })
}

/// Apply select/deselect/toggle operations to an allergen selection
pub fn update_selection(
    current: &[String],
    select: &[String],
    deselect: &[String],
    toggle: &[String],
) -> Result<SelectionResponse, String> {
    let mut selection = AllergenSelection::from_ids(current);

    for id in select {
        if !selection.select(id) {
            return Err(format!("Unknown allergen id: {}", id));
        }
    }
    for id in deselect {
        selection.deselect(id);
    }
    for id in toggle {
        let was_selected = selection.contains(id);
        if !selection.toggle(id) && !was_selected {
            return Err(format!("Unknown allergen id: {}", id));
        }
    }

    Ok(SelectionResponse {
        declares_none: selection.declares_none(),
        allergens: selection.ids().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_list_allergens_includes_none() {
        let response = list_allergens();
        assert_eq!(response.total, ALLERGEN_CATALOG.len());
        assert_eq!(response.allergens[0].id, "none");
    }

    #[test]
    fn test_detect_allergens() {
        let response = detect_allergens(
            &ids(&["eggs", "peanuts"]),
            json!({"name": "Bar", "ingredients": "Peanuts, sugar, egg white"}),
        )
        .unwrap();
        assert_eq!(response.detected_allergens, vec!["eggs", "peanuts"]);
        assert!(!response.safe);
    }

    #[test]
    fn test_detect_allergens_eggplant_is_safe() {
        let response = detect_allergens(
            &ids(&["eggs", "peanuts"]),
            json!({"ingredients": "Eggplant parmesan with breadcrumbs"}),
        )
        .unwrap();
        assert!(response.detected_allergens.is_empty());
        assert!(response.safe);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["detectedAllergens"], json!([]));
    }

    #[test]
    fn test_detect_allergens_bad_payload() {
        let result = detect_allergens(&ids(&["milk"]), json!({"nutritionData": 5, "ingredients": {"a": 1}}));
        // Loose shapes degrade instead of failing
        assert!(result.unwrap().safe);

        let err = detect_allergens(&ids(&["milk"]), json!("just a string")).unwrap_err();
        assert!(err.starts_with("Failed to read food record"));
    }

    #[test]
    fn test_update_selection() {
        let response = update_selection(&ids(&["none"]), &ids(&["milk"]), &[], &ids(&["soy"])).unwrap();
        assert_eq!(response.allergens, vec!["milk", "soy"]);
        assert!(!response.declares_none);

        let response = update_selection(&response.allergens, &ids(&["none"]), &[], &[]).unwrap();
        assert_eq!(response.allergens, vec!["none"]);
        assert!(response.declares_none);
    }

    #[test]
    fn test_update_selection_unknown_id() {
        let err = update_selection(&[], &ids(&["mustard"]), &[], &[]).unwrap_err();
        assert_eq!(err, "Unknown allergen id: mustard");
    }
}
