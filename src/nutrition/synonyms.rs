//! Nutrient synonym tables
//!
//! Upstream sources label the same nutrient inconsistently ("Energy",
//! "Calories", "Total Fat", "Carbohydrate, by difference"). A synonym set
//! lists case-insensitive substrings that identify one logical nutrient.

use serde::{Deserialize, Serialize};

use crate::models::NutrientItem;

/// The nutrients the engine aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroKind {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl MacroKind {
    pub const ALL: [MacroKind; 4] = [
        MacroKind::Calories,
        MacroKind::Protein,
        MacroKind::Carbs,
        MacroKind::Fat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MacroKind::Calories => "calories",
            MacroKind::Protein => "protein",
            MacroKind::Carbs => "carbs",
            MacroKind::Fat => "fat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "calories" | "calorie" | "energy" | "kcal" => Some(MacroKind::Calories),
            "protein" | "proteins" => Some(MacroKind::Protein),
            "carbs" | "carb" | "carbohydrate" | "carbohydrates" => Some(MacroKind::Carbs),
            "fat" | "fats" => Some(MacroKind::Fat),
            _ => None,
        }
    }
}

/// Name and unit substrings identifying one nutrient
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SynonymSet {
    /// Substrings matched against the item name
    pub keywords: Vec<String>,
    /// Substrings matched against the item unit
    pub unit_keywords: Vec<String>,
}

impl SynonymSet {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.as_ref().to_lowercase()).collect(),
            unit_keywords: Vec::new(),
        }
    }

    pub fn with_unit_keywords<S: AsRef<str>>(mut self, unit_keywords: &[S]) -> Self {
        self.unit_keywords = unit_keywords.iter().map(|k| k.as_ref().to_lowercase()).collect();
        self
    }

    /// Whether an item's name (or unit) contains one of the synonyms
    pub fn matches(&self, item: &NutrientItem) -> bool {
        contains_any(&item.name, &self.keywords) || contains_any(&item.unit, &self.unit_keywords)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    if needles.is_empty() || haystack.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .any(|n| haystack.contains(&n.to_lowercase()))
}

/// Synonym sets for every aggregated nutrient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynonymTable {
    pub calories: SynonymSet,
    pub protein: SynonymSet,
    pub carbs: SynonymSet,
    pub fat: SynonymSet,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self {
            calories: SynonymSet::new(&["energy", "calorie", "kcal"]).with_unit_keywords(&["kcal"]),
            protein: SynonymSet::new(&["protein"]),
            carbs: SynonymSet::new(&["carb"]),
            fat: SynonymSet::new(&["fat"]),
        }
    }
}

impl SynonymTable {
    pub fn get(&self, kind: MacroKind) -> &SynonymSet {
        match kind {
            MacroKind::Calories => &self.calories,
            MacroKind::Protein => &self.protein,
            MacroKind::Carbs => &self.carbs,
            MacroKind::Fat => &self.fat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_match_is_case_insensitive_substring() {
        let fat = SynonymSet::new(&["fat"]);
        assert!(fat.matches(&NutrientItem::new("Total Fat", "g", 10.0)));
        assert!(fat.matches(&NutrientItem::new("SATURATED FAT", "g", 2.0)));
        assert!(!fat.matches(&NutrientItem::new("Protein", "g", 2.0)));
    }

    #[test]
    fn test_unit_keywords_match_calories() {
        let table = SynonymTable::default();
        let item = NutrientItem::new("Value per serving", "KCAL", 180.0);
        assert!(table.calories.matches(&item));
        assert!(!table.protein.matches(&item));
    }

    #[test]
    fn test_empty_keywords_never_match() {
        let set = SynonymSet::new(&["", "  "]);
        assert!(!set.matches(&NutrientItem::new("Energy", "kcal", 1.0)));
    }

    #[test]
    fn test_config_keywords_are_case_insensitive() {
        let set: SynonymSet = serde_json::from_str(r#"{"keywords": ["PROTEIN"]}"#).unwrap();
        assert!(set.matches(&NutrientItem::new("protein", "g", 1.0)));
        assert!(set.unit_keywords.is_empty());
    }

    #[test]
    fn test_partial_table_config_keeps_defaults() {
        let table: SynonymTable =
            serde_json::from_str(r#"{"fat": {"keywords": ["lipid"]}}"#).unwrap();
        assert_eq!(table.fat.keywords, vec!["lipid".to_string()]);
        assert_eq!(table.calories, SynonymTable::default().calories);
    }

    #[test]
    fn test_macro_kind_from_str() {
        assert_eq!(MacroKind::from_str("Calories"), Some(MacroKind::Calories));
        assert_eq!(MacroKind::from_str("carbohydrates"), Some(MacroKind::Carbs));
        assert_eq!(MacroKind::from_str("sodium"), None);
        for kind in MacroKind::ALL {
            assert_eq!(MacroKind::from_str(kind.as_str()), Some(kind));
        }
    }
}
