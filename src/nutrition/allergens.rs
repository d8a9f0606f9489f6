//! Allergen detection in ingredient text
//!
//! Matching is whole-word: ingredient text and allergen terms are normalized
//! to lowercase words separated by single spaces, and a term is present only
//! when its full word sequence appears in the ingredients. "egg" therefore
//! matches "egg whites" and "free-range egg" but not "eggplant". Each
//! allergen's exclusion phrases are blanked out of the text before its terms
//! are looked up, so "peanut butter" never reads as milk.

use std::collections::HashSet;

use crate::models::{find_allergen, normalize_id, FoodRecord, NO_ALLERGIES_ID};

/// Normalize free text for matching
///
/// Lowercases, turns hyphens, punctuation and any other non-alphanumeric
/// characters into spaces, and collapses runs of spaces.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ingredient text prepared for whole-word lookups
#[derive(Debug, Clone)]
pub struct IngredientText {
    /// Normalized phrase padded with a space on each side
    padded: String,
    words: HashSet<String>,
}

impl IngredientText {
    pub fn new(text: &str) -> Self {
        let phrase = normalize_text(text);
        let words = phrase.split(' ').filter(|w| !w.is_empty()).map(str::to_string).collect();
        Self {
            padded: format!(" {} ", phrase),
            words,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether an already-normalized term occurs as whole words
    pub fn contains_term(&self, term: &str) -> bool {
        if term.is_empty() {
            return false;
        }
        if term.contains(' ') {
            self.padded.contains(&format!(" {} ", term))
        } else {
            self.words.contains(term)
        }
    }

    /// A copy with every occurrence of the given phrases removed
    pub fn without_phrases<S: AsRef<str>>(&self, phrases: &[S]) -> Self {
        let mut padded = self.padded.clone();
        for phrase in phrases {
            let phrase = normalize_text(phrase.as_ref());
            if phrase.is_empty() {
                continue;
            }
            let needle = format!(" {} ", phrase);
            // Adjacent occurrences share a space, so repeat until none remain
            while padded.contains(&needle) {
                padded = padded.replace(&needle, " ");
            }
        }
        Self::new(&padded)
    }
}

/// Normalized terms that indicate an allergen
///
/// Catalog allergens contribute their id, name and keywords. Ids outside the
/// catalog are matched by their own normalized text.
pub fn allergen_terms(id: &str) -> Vec<String> {
    let mut terms = vec![normalize_text(id)];
    if let Some(allergen) = find_allergen(id) {
        terms.push(normalize_text(allergen.name));
        terms.extend(allergen.keywords.iter().map(|k| normalize_text(k)));
    }

    let mut seen = HashSet::new();
    terms.retain(|t| !t.is_empty() && seen.insert(t.clone()));
    terms
}

/// Phrases that contain one of the allergen's terms without indicating it
pub fn allergen_exclusions(id: &str) -> &'static [&'static str] {
    find_allergen(id).map(|a| a.exclusions).unwrap_or(&[])
}

/// The subset of the user's allergens present in the ingredient text
///
/// Results keep the order of `user_allergen_ids`, deduplicated by normalized
/// id. The "none" sentinel is never reported, and empty input on either side
/// yields an empty result.
pub fn detect<S: AsRef<str>>(user_allergen_ids: &[S], ingredients_text: &str) -> Vec<String> {
    let candidates: Vec<&str> = user_allergen_ids
        .iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty() && normalize_id(id) != NO_ALLERGIES_ID)
        .collect();

    if candidates.is_empty() || ingredients_text.trim().is_empty() {
        return Vec::new();
    }

    let text = IngredientText::new(ingredients_text);
    if text.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut detected = Vec::new();

    for id in candidates {
        if !seen.insert(normalize_id(id)) {
            continue;
        }
        let exclusions = allergen_exclusions(id);
        let screened = if exclusions.is_empty() { text.clone() } else { text.without_phrases(exclusions) };
        if let Some(term) = allergen_terms(id).into_iter().find(|t| screened.contains_term(t)) {
            tracing::debug!("Allergen '{}' detected via '{}'", id, term);
            detected.push(id.to_string());
        }
    }

    detected
}

/// Detect the user's allergens in a food record's ingredients
pub fn detect_in_record<S: AsRef<str>>(user_allergen_ids: &[S], record: &FoodRecord) -> Vec<String> {
    detect(user_allergen_ids, &record.ingredients_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredients;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Soy-Based  Sauce (Water, Salt)."), "soy based sauce water salt");
        assert_eq!(normalize_text("  "), "");
        assert_eq!(normalize_text("tree_nuts"), "tree nuts");
    }

    #[test]
    fn test_detect_single_allergen() {
        assert_eq!(detect(&["peanuts"], "Contains peanuts and soy"), vec!["peanuts"]);
    }

    #[test]
    fn test_none_sentinel_detects_nothing() {
        assert!(detect(&["none"], "Contains peanuts").is_empty());
        assert!(detect(&["NONE"], "Contains peanuts").is_empty());
    }

    #[test]
    fn test_empty_inputs_detect_nothing() {
        assert!(detect(&["milk"], "").is_empty());
        assert!(detect(&["milk"], " ,;. ").is_empty());
        let none: [&str; 0] = [];
        assert!(detect(&none, "milk").is_empty());
    }

    #[test]
    fn test_whole_word_policy_rejects_embedded_matches() {
        // "egg" inside "eggplant" is not an egg
        let detected = detect(&["eggs", "peanuts"], "Eggplant parmesan with breadcrumbs");
        assert!(detected.is_empty());
    }

    #[test]
    fn test_keywords_cover_singular_forms() {
        assert_eq!(detect(&["eggs"], "Pasta (durum wheat, egg whites)"), vec!["eggs"]);
        assert_eq!(detect(&["peanuts"], "roasted peanut oil"), vec!["peanuts"]);
    }

    #[test]
    fn test_hyphenated_text_matches() {
        assert_eq!(detect(&["soy"], "Soy-based protein isolate"), vec!["soy"]);
        assert_eq!(detect(&["soy"], "soy based protein isolate"), vec!["soy"]);
    }

    #[test]
    fn test_multi_word_allergen() {
        assert_eq!(detect(&["tree_nuts"], "May contain tree nuts."), vec!["tree_nuts"]);
        assert!(detect(&["tree_nuts"], "street nutsack").is_empty());
    }

    #[test]
    fn test_plant_butters_and_creams_are_not_milk() {
        let text = "Peanut butter (roasted peanuts, salt), cocoa butter, coconut cream";
        assert!(detect(&["milk"], text).is_empty());
        assert_eq!(detect(&["milk", "peanuts"], text), vec!["peanuts"]);
        assert!(detect(&["milk"], "cream of tartar, oat milk").is_empty());
    }

    #[test]
    fn test_dairy_butter_still_detected_next_to_exclusions() {
        assert_eq!(detect(&["milk"], "Butter, sugar, flour"), vec!["milk"]);
        assert_eq!(detect(&["milk"], "peanut butter, heavy cream"), vec!["milk"]);
        assert_eq!(detect(&["milk"], "cocoa butter, whey powder"), vec!["milk"]);
    }

    #[test]
    fn test_without_phrases_handles_repeats() {
        let text = IngredientText::new("peanut butter peanut butter");
        let screened = text.without_phrases(&["peanut butter"]);
        assert!(screened.is_empty());
        assert!(!screened.contains_term("butter"));
    }

    #[test]
    fn test_order_and_dedup_follow_input() {
        let detected = detect(
            &["soy", "milk", "SOY", "fish", "peanuts"],
            "milk chocolate, peanuts, soy lecithin",
        );
        assert_eq!(detected, vec!["soy", "milk", "peanuts"]);
    }

    #[test]
    fn test_unknown_ids_match_by_name() {
        assert_eq!(detect(&["mustard"], "Vinegar, Mustard Seed"), vec!["mustard"]);
        assert!(detect(&["mustard"], "Vinegar, salt").is_empty());
    }

    #[test]
    fn test_none_mixed_with_allergens_is_ignored() {
        assert_eq!(detect(&["none", "milk"], "whole milk"), vec!["milk"]);
    }

    #[test]
    fn test_detect_in_record_with_ingredient_list() {
        let record = FoodRecord {
            ingredients: Ingredients::List(vec!["Wheat flour".into(), "Sesame seeds".into()]),
            ..Default::default()
        };
        assert_eq!(detect_in_record(&["sesame", "gluten", "milk"], &record), vec!["sesame", "gluten"]);
    }

    #[test]
    fn test_allergen_terms_for_catalog_entry() {
        let terms = allergen_terms("tree_nuts");
        assert_eq!(terms[0], "tree nuts");
        assert!(terms.contains(&"almond".to_string()));
        assert_eq!(terms.iter().filter(|t| *t == "tree nuts").count(), 1);
    }
}
