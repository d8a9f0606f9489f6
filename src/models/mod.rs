//! Data models
//!
//! Rust structs for the payloads exchanged with the backend and the UI.

mod allergen;
mod food_record;
pub mod lenient;
mod meal_entry;
mod nutrition;
mod profile;

pub use allergen::{
    find_allergen, normalize_id, Allergen, AllergenSelection, ALLERGEN_CATALOG, NO_ALLERGIES_ID,
};
pub use food_record::{normalize_nutrition, FoodRecord, Ingredients, NutrientCategory, NutrientItem};
pub use meal_entry::{DayMeals, MealLogEntry, MealType};
pub use nutrition::{MacroTotals, Nutrition};
pub use profile::{AnthropometricProfile, UserProfile, WeightGoal};
