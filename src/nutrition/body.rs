//! BMI and weight-target calculations
//!
//! All functions take canonical centimeters and kilograms. A height or
//! weight of 0 (or anything non-positive or non-finite) means "not entered"
//! and disables the dependent calculation instead of producing NaN or
//! infinity.

use serde::{Deserialize, Serialize};

use super::converter::round_to;
use super::units::{
    BmiCategory, BMI_NORMAL_MIN, BMI_OBESE_MIN, BMI_OVERWEIGHT_MIN, GAIN_TARGET_FACTOR,
    HEALTHY_BMI_MAX, HEALTHY_BMI_MIN, LOSE_TARGET_FACTOR,
};
use crate::models::{AnthropometricProfile, WeightGoal};

/// Weight range in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

/// Everything derived from a user's body measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub category: Option<BmiCategory>,
    pub recommended_range_kg: Option<WeightRange>,
    pub target_weight_kg: Option<f64>,
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Body mass index: `weight_kg / (height_cm / 100)^2`
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    let weight = positive(weight_kg)?;
    let height_m = positive(height_cm)? / 100.0;
    Some(weight / (height_m * height_m))
}

/// Classify a BMI value; each band includes its lower bound
pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < BMI_NORMAL_MIN {
        BmiCategory::Underweight
    } else if bmi < BMI_OVERWEIGHT_MIN {
        BmiCategory::Normal
    } else if bmi < BMI_OBESE_MIN {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Weight range corresponding to the healthy BMI band [18.5, 24.9]
pub fn recommended_weight_range_kg(height_cm: f64) -> Option<WeightRange> {
    let height_m = positive(height_cm)? / 100.0;
    let squared = height_m * height_m;
    Some(WeightRange {
        min: HEALTHY_BMI_MIN * squared,
        max: HEALTHY_BMI_MAX * squared,
    })
}

/// Suggested target weight for a goal
///
/// This is a product heuristic, not a physiological model:
/// - lose: the recommended max if currently above it, otherwise 7.5% below current
/// - gain: the recommended min if currently below it, otherwise 7.5% above current
/// - maintain: current weight
///
/// Without a recommended range only the percentage rule applies.
pub fn suggested_target_weight(
    current_weight_kg: f64,
    goal: WeightGoal,
    recommended: Option<&WeightRange>,
) -> f64 {
    match goal {
        WeightGoal::Lose => match recommended {
            Some(range) if current_weight_kg > range.max => range.max,
            _ => current_weight_kg * LOSE_TARGET_FACTOR,
        },
        WeightGoal::Gain => match recommended {
            Some(range) if current_weight_kg < range.min => range.min,
            _ => current_weight_kg * GAIN_TARGET_FACTOR,
        },
        WeightGoal::Maintain => current_weight_kg,
    }
}

/// Compute all body metrics for a profile, rounded for display
pub fn body_metrics(profile: &AnthropometricProfile) -> BodyMetrics {
    let height_cm = positive(profile.height_cm());
    let weight_kg = positive(profile.weight_kg());

    let bmi_value = match (weight_kg, height_cm) {
        (Some(w), Some(h)) => bmi(w, h),
        _ => None,
    };
    let range = height_cm.and_then(recommended_weight_range_kg);
    let target = weight_kg.map(|w| suggested_target_weight(w, profile.weight_goal, range.as_ref()));

    tracing::debug!(
        height_cm = ?height_cm,
        weight_kg = ?weight_kg,
        bmi = ?bmi_value,
        "Computed body metrics"
    );

    BodyMetrics {
        height_cm: height_cm.map(|v| round_to(v, 2)),
        weight_kg: weight_kg.map(|v| round_to(v, 2)),
        bmi: bmi_value.map(|v| round_to(v, 2)),
        category: bmi_value.map(bmi_category),
        recommended_range_kg: range.map(|r| WeightRange {
            min: round_to(r.min, 2),
            max: round_to(r.max, 2),
        }),
        target_weight_kg: target.map(|v| round_to(v, 2)),
    }
}
