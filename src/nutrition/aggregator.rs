//! Meal aggregation
//!
//! Sums calories and macros across logged meals, weighting each entry by the
//! servings eaten, and builds the merged nutrient list shown in meal detail
//! pages. Values stay unrounded while accumulating; rounding happens once
//! when a summary is produced.

use std::collections::HashMap;

use serde::Serialize;

use super::converter::round_to;
use super::extractor::{chunk_items, extract, extract_nutrition, flatten};
use super::synonyms::SynonymTable;
use crate::models::{DayMeals, MacroTotals, MealLogEntry, MealType, NutrientItem, Nutrition};

/// Fixed-point scale used by [`CalorieLedger`]
const LEDGER_SCALE: f64 = 1_000_000.0;

/// Largest magnitude a single ledger contribution may carry
const LEDGER_MAX_VALUE: f64 = 1e15;

/// Round a finished aggregate for display
///
/// Whole numbers are returned unchanged; anything else is rounded to 2
/// decimal places.
pub fn round_for_display(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    if value.fract() == 0.0 {
        value
    } else {
        round_to(value, 2)
    }
}

/// Totals and display pages for a group of meal entries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    pub total_calories: f64,
    pub macro_totals: MacroTotals,
    pub display_chunks: Vec<Vec<NutrientItem>>,
    pub entry_count: usize,
}

/// Per-bucket summaries plus the day's totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub breakfast: MealSummary,
    pub lunch: MealSummary,
    pub dinner: MealSummary,
    pub other: MealSummary,
    pub total_calories: f64,
    pub macro_totals: MacroTotals,
    pub entry_count: usize,
}

/// Running calorie and macro total with exact add/remove
///
/// Contributions are held in integer micro-units, so removing an entry
/// restores exactly the total that preceded adding it. Each contribution is
/// clamped to `LEDGER_MAX_VALUE` before scaling, and the `i128` sums
/// saturate instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalorieLedger {
    calories: i128,
    protein: i128,
    carbs: i128,
    fat: i128,
}

fn to_micro(value: f64) -> i128 {
    if !value.is_finite() {
        tracing::debug!("Non-finite ledger contribution {} counted as 0", value);
        return 0;
    }
    let clamped = value.clamp(-LEDGER_MAX_VALUE, LEDGER_MAX_VALUE);
    if clamped != value {
        tracing::warn!("Ledger contribution {} clamped to {}", value, clamped);
    }
    (clamped * LEDGER_SCALE).round() as i128
}

fn from_micro(value: i128) -> f64 {
    value as f64 / LEDGER_SCALE
}

impl CalorieLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, contribution: &Nutrition) {
        self.calories = self.calories.saturating_add(to_micro(contribution.calories));
        self.protein = self.protein.saturating_add(to_micro(contribution.protein));
        self.carbs = self.carbs.saturating_add(to_micro(contribution.carbs));
        self.fat = self.fat.saturating_add(to_micro(contribution.fat));
    }

    pub fn remove(&mut self, contribution: &Nutrition) {
        self.calories = self.calories.saturating_sub(to_micro(contribution.calories));
        self.protein = self.protein.saturating_sub(to_micro(contribution.protein));
        self.carbs = self.carbs.saturating_sub(to_micro(contribution.carbs));
        self.fat = self.fat.saturating_sub(to_micro(contribution.fat));
    }

    pub fn total_calories(&self) -> f64 {
        from_micro(self.calories)
    }

    pub fn totals(&self) -> Nutrition {
        Nutrition {
            calories: from_micro(self.calories),
            protein: from_micro(self.protein),
            carbs: from_micro(self.carbs),
            fat: from_micro(self.fat),
        }
    }
}

/// Aggregates meal entries using an injected synonym table
#[derive(Debug, Clone, Copy)]
pub struct MealAggregator<'a> {
    synonyms: &'a SynonymTable,
}

impl<'a> MealAggregator<'a> {
    pub fn new(synonyms: &'a SynonymTable) -> Self {
        Self { synonyms }
    }

    /// One entry's quantity-weighted contribution
    pub fn entry_nutrition(&self, entry: &MealLogEntry) -> Nutrition {
        extract_nutrition(&entry.food.nutrition_data, self.synonyms).scale(entry.multiplier())
    }

    /// Sum of each entry's calories times its quantity
    pub fn total_calories(&self, entries: &[MealLogEntry]) -> f64 {
        entries
            .iter()
            .map(|e| extract(&e.food.nutrition_data, &self.synonyms.calories) * e.multiplier())
            .sum()
    }

    /// Quantity-weighted calories and macros, unrounded
    pub fn totals<'e>(&self, entries: impl IntoIterator<Item = &'e MealLogEntry>) -> Nutrition {
        entries.into_iter().map(|e| self.entry_nutrition(e)).sum()
    }

    pub fn macro_totals(&self, entries: &[MealLogEntry]) -> MacroTotals {
        self.totals(entries).macros()
    }

    /// Nutrient items across all entries, merged by case-insensitive name
    /// and unit with quantity-weighted values, in first-seen order
    pub fn merged_items(&self, entries: &[MealLogEntry]) -> Vec<NutrientItem> {
        let mut merged: Vec<NutrientItem> = Vec::new();
        let mut index: HashMap<(String, String), usize> = HashMap::new();

        for entry in entries {
            let multiplier = entry.multiplier();
            for item in flatten(&entry.food.nutrition_data) {
                let key = (item.name.trim().to_lowercase(), item.unit.trim().to_lowercase());
                let weighted = item.value * multiplier;
                match index.get(&key) {
                    Some(&i) => merged[i].value += weighted,
                    None => {
                        index.insert(key, merged.len());
                        merged.push(NutrientItem {
                            name: item.name.clone(),
                            unit: item.unit.clone(),
                            value: weighted,
                        });
                    }
                }
            }
        }

        merged
    }

    /// Summarize a group of entries for display
    pub fn summarize(&self, entries: &[MealLogEntry], chunk_size: usize) -> MealSummary {
        let totals = self.totals(entries).map(round_for_display);

        let items = self
            .merged_items(entries)
            .into_iter()
            .map(|mut item| {
                item.value = round_for_display(item.value);
                item
            })
            .collect();

        MealSummary {
            total_calories: totals.calories,
            macro_totals: totals.macros(),
            display_chunks: chunk_items(items, chunk_size),
            entry_count: entries.len(),
        }
    }

    /// Summarize each meal bucket and the whole day
    pub fn summarize_day(&self, day: &DayMeals, chunk_size: usize) -> DaySummary {
        // Day totals come from raw sums, not from rounded bucket totals
        let totals = self.totals(day.all_entries()).map(round_for_display);

        DaySummary {
            breakfast: self.summarize(day.bucket(MealType::Breakfast), chunk_size),
            lunch: self.summarize(day.bucket(MealType::Lunch), chunk_size),
            dinner: self.summarize(day.bucket(MealType::Dinner), chunk_size),
            other: self.summarize(day.bucket(MealType::Other), chunk_size),
            total_calories: totals.calories,
            macro_totals: totals.macros(),
            entry_count: day.all_entries().count(),
        }
    }

    /// A ledger holding the totals of `entries`
    pub fn ledger(&self, entries: &[MealLogEntry]) -> CalorieLedger {
        let mut ledger = CalorieLedger::new();
        for entry in entries {
            self.add_entry(&mut ledger, entry);
        }
        ledger
    }

    pub fn add_entry(&self, ledger: &mut CalorieLedger, entry: &MealLogEntry) {
        ledger.add(&self.entry_nutrition(entry));
    }

    /// Subtract an entry's own contribution, computed the same way it was added
    pub fn remove_entry(&self, ledger: &mut CalorieLedger, entry: &MealLogEntry) {
        ledger.remove(&self.entry_nutrition(entry));
    }
}
