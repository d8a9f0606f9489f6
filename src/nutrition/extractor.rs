//! Nutrient extraction
//!
//! Resolves calorie and macro values out of a food's categorized nutrient
//! list by synonym search, and pages the flattened list for display.

use crate::models::{lenient, NutrientCategory, NutrientItem, Nutrition};

use super::synonyms::{MacroKind, SynonymSet, SynonymTable};

/// All items in category order, then item order within each category
pub fn flatten(categories: &[NutrientCategory]) -> impl Iterator<Item = &NutrientItem> {
    categories.iter().flat_map(|c| c.items.iter())
}

/// The first item matching the synonym set in flattened order
///
/// When several items could match, the first one wins; matches are never
/// summed.
pub fn find_item<'a>(
    categories: &'a [NutrientCategory],
    synonyms: &SynonymSet,
) -> Option<&'a NutrientItem> {
    flatten(categories).find(|item| synonyms.matches(item))
}

/// Value of the first matching item, or 0 when nothing matches
pub fn extract(categories: &[NutrientCategory], synonyms: &SynonymSet) -> f64 {
    match find_item(categories, synonyms) {
        Some(item) => {
            tracing::debug!("Matched nutrient '{}' ({}) = {}", item.name, item.unit, item.value);
            lenient::sanitize_amount(item.value)
        }
        None => 0.0,
    }
}

/// Value of one aggregated nutrient
pub fn extract_kind(categories: &[NutrientCategory], table: &SynonymTable, kind: MacroKind) -> f64 {
    extract(categories, table.get(kind))
}

/// Calories and macros of one serving
pub fn extract_nutrition(categories: &[NutrientCategory], table: &SynonymTable) -> Nutrition {
    Nutrition {
        calories: extract_kind(categories, table, MacroKind::Calories),
        protein: extract_kind(categories, table, MacroKind::Protein),
        carbs: extract_kind(categories, table, MacroKind::Carbs),
        fat: extract_kind(categories, table, MacroKind::Fat),
    }
}

/// Split a flat item list into display pages of `chunk_size`
///
/// Order is preserved and the last page may be short; it is never padded.
/// A chunk size of 0 is treated as 1.
pub fn chunk_items(items: Vec<NutrientItem>, chunk_size: usize) -> Vec<Vec<NutrientItem>> {
    if chunk_size == 0 {
        tracing::warn!("Display chunk size 0 requested; using 1");
    }
    let size = chunk_size.max(1);

    let mut pages = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        pages.push(iter.by_ref().take(size).collect());
    }
    pages
}

/// Flatten all categories and split them into display pages
pub fn flatten_and_chunk(categories: &[NutrientCategory], chunk_size: usize) -> Vec<Vec<NutrientItem>> {
    chunk_items(flatten(categories).cloned().collect(), chunk_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, unit: &str, value: f64) -> NutrientItem {
        NutrientItem::new(name, unit, value)
    }

    fn sample() -> Vec<NutrientCategory> {
        vec![
            NutrientCategory::new(
                "Macronutrients",
                vec![
                    item("Energy", "kcal", 250.0),
                    item("Protein", "g", 12.0),
                    item("Total Fat", "g", 10.0),
                    item("Carbohydrate", "g", 30.0),
                ],
            ),
            NutrientCategory::new(
                "Details",
                vec![item("Saturated Fat", "g", 3.0), item("Sodium", "mg", 400.0)],
            ),
        ]
    }

    #[test]
    fn test_extract_fat() {
        let categories = vec![NutrientCategory::new("Macro", vec![item("Total Fat", "g", 10.0)])];
        assert_eq!(extract(&categories, &SynonymSet::new(&["fat"])), 10.0);
    }

    #[test]
    fn test_extract_no_match_is_zero() {
        let categories = vec![NutrientCategory::new("Macro", vec![item("Sodium", "mg", 10.0)])];
        assert_eq!(extract(&categories, &SynonymSet::new(&["fat"])), 0.0);
        assert_eq!(extract(&[], &SynonymSet::new(&["fat"])), 0.0);
    }

    #[test]
    fn test_first_match_wins() {
        // "Total Fat" precedes "Saturated Fat" in flattened order
        assert_eq!(extract(&sample(), &SynonymSet::new(&["fat"])), 10.0);

        let reversed: Vec<_> = sample().into_iter().rev().collect();
        assert_eq!(extract(&reversed, &SynonymSet::new(&["fat"])), 3.0);
    }

    #[test]
    fn test_calorie_unit_fallback() {
        let categories = vec![NutrientCategory::new(
            "",
            vec![item("Sodium", "mg", 90.0), item("Per serving", "kcal", 180.0)],
        )];
        let table = SynonymTable::default();
        assert_eq!(extract_kind(&categories, &table, MacroKind::Calories), 180.0);
        assert_eq!(extract_kind(&categories, &table, MacroKind::Protein), 0.0);
    }

    #[test]
    fn test_negative_values_never_escape() {
        let mut categories = sample();
        categories[0].items[1].value = -5.0;
        assert_eq!(extract(&categories, &SynonymSet::new(&["protein"])), 0.0);
    }

    #[test]
    fn test_extract_nutrition() {
        let nutrition = extract_nutrition(&sample(), &SynonymTable::default());
        assert_eq!(
            nutrition,
            Nutrition {
                calories: 250.0,
                protein: 12.0,
                carbs: 30.0,
                fat: 10.0
            }
        );
    }

    #[test]
    fn test_flatten_and_chunk_preserves_order() {
        let pages = flatten_and_chunk(&sample(), 4);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 4);
        assert_eq!(pages[1].len(), 2);
        assert_eq!(pages[0][0].name, "Energy");
        assert_eq!(pages[1][0].name, "Saturated Fat");
        assert_eq!(pages[1][1].name, "Sodium");
    }

    #[test]
    fn test_chunk_exact_multiple_has_no_empty_page() {
        let pages = flatten_and_chunk(&sample(), 3);
        assert_eq!(pages.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 3]);
    }

    #[test]
    fn test_chunk_empty_and_zero_size() {
        assert!(flatten_and_chunk(&[], 4).is_empty());
        let pages = flatten_and_chunk(&sample(), 0);
        assert_eq!(pages.len(), 6);
    }
}
