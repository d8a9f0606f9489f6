//! User profile model
//!
//! The parts of a user's profile this engine reads: declared allergens and
//! body measurements.

use serde::{Deserialize, Serialize};

use super::{lenient, AllergenSelection};
use crate::nutrition::converter::{feet_inches_to_cm, lb_to_kg};
use crate::nutrition::units::{HeightUnit, WeightUnit};

/// Weight goal chosen during onboarding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightGoal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl WeightGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightGoal::Lose => "lose",
            WeightGoal::Maintain => "maintain",
            WeightGoal::Gain => "gain",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "lose" | "loss" | "lose_weight" => WeightGoal::Lose,
            "gain" | "gain_weight" => WeightGoal::Gain,
            _ => WeightGoal::Maintain,
        }
    }
}

impl From<&str> for WeightGoal {
    fn from(s: &str) -> Self {
        WeightGoal::from_str(s)
    }
}

/// Height, weight and goal as entered by the user
///
/// For `ft_in` heights, `height_value` holds the feet and `height_inches`
/// the remaining inches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnthropometricProfile {
    #[serde(default, alias = "height_value", deserialize_with = "lenient::deserialize_amount")]
    pub height_value: f64,
    #[serde(default, alias = "height_inches", deserialize_with = "lenient::deserialize_amount")]
    pub height_inches: f64,
    #[serde(default, alias = "height_unit", deserialize_with = "lenient::deserialize_label")]
    pub height_unit: HeightUnit,
    #[serde(default, alias = "weight_value", deserialize_with = "lenient::deserialize_amount")]
    pub weight_value: f64,
    #[serde(default, alias = "weight_unit", deserialize_with = "lenient::deserialize_label")]
    pub weight_unit: WeightUnit,
    #[serde(default, alias = "weight_goal", deserialize_with = "lenient::deserialize_label")]
    pub weight_goal: WeightGoal,
}

impl AnthropometricProfile {
    /// Height in centimeters; 0 when not entered
    pub fn height_cm(&self) -> f64 {
        match self.height_unit {
            HeightUnit::Centimeters => self.height_value,
            HeightUnit::FeetInches => feet_inches_to_cm(self.height_value, self.height_inches),
        }
    }

    /// Weight in kilograms; 0 when not entered
    pub fn weight_kg(&self) -> f64 {
        match self.weight_unit {
            WeightUnit::Kilograms => self.weight_value,
            WeightUnit::Pounds => lb_to_kg(self.weight_value),
        }
    }
}

/// User profile as delivered by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub allergens: AllergenSelection,
    #[serde(flatten)]
    pub body: AnthropometricProfile,
}
