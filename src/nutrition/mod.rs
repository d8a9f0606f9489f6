//! Nutrition engine
//!
//! Unit conversion and body metrics, synonym-based nutrient extraction,
//! allergen detection and meal aggregation.

pub mod aggregator;
pub mod allergens;
pub mod body;
pub mod converter;
pub mod extractor;
pub mod synonyms;
pub mod units;

pub use aggregator::{round_for_display, CalorieLedger, DaySummary, MealAggregator, MealSummary};
pub use allergens::{detect, detect_in_record, normalize_text};
pub use body::{
    bmi, bmi_category, body_metrics, recommended_weight_range_kg, suggested_target_weight,
    BodyMetrics, WeightRange,
};
pub use converter::{cm_to_feet_inches, feet_inches_to_cm, kg_to_lb, lb_to_kg, round_to, FeetInches};
pub use extractor::{
    chunk_items, extract, extract_kind, extract_nutrition, find_item, flatten, flatten_and_chunk,
};
pub use synonyms::{MacroKind, SynonymSet, SynonymTable};
pub use units::{BmiCategory, HeightUnit, WeightUnit};
