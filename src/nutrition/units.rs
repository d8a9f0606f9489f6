//! Unit types and conversion constants
//!
//! Body-measurement units and the fixed factors and breakpoints used by the
//! conversion and BMI functions.

use serde::{Deserialize, Serialize};

/// Height unit selected by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightUnit {
    /// Feet and inches
    #[serde(rename = "ft_in")]
    FeetInches,
    /// Centimeters (canonical)
    #[default]
    #[serde(rename = "cm")]
    Centimeters,
}

impl HeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightUnit::FeetInches => "ft_in",
            HeightUnit::Centimeters => "cm",
        }
    }

    /// Parse a recognized unit name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ft_in" | "ft" | "feet" | "in" | "imperial" => Some(HeightUnit::FeetInches),
            "cm" | "centimeters" | "centimetres" | "metric" => Some(HeightUnit::Centimeters),
            _ => None,
        }
    }

    /// Parse from string; anything unrecognized is centimeters
    pub fn from_str(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl From<&str> for HeightUnit {
    fn from(s: &str) -> Self {
        HeightUnit::from_str(s)
    }
}

/// Weight unit selected by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "lb")]
    Pounds,
    /// Kilograms (canonical)
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Pounds => "lb",
            WeightUnit::Kilograms => "kg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lb" | "lbs" | "pound" | "pounds" => Some(WeightUnit::Pounds),
            "kg" | "kgs" | "kilogram" | "kilograms" => Some(WeightUnit::Kilograms),
            _ => None,
        }
    }

    /// Parse from string; anything unrecognized is kilograms
    pub fn from_str(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl From<&str> for WeightUnit {
    fn from(s: &str) -> Self {
        WeightUnit::from_str(s)
    }
}

/// BMI band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Length Conversion Constants
// ============================================================================

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Centimeters per foot
pub const CM_PER_FOOT: f64 = 30.48;
/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

// ============================================================================
// Mass Conversion Constants
// ============================================================================

/// Kilograms per pound (international avoirdupois pound)
pub const KG_PER_LB: f64 = 0.45359237;

// ============================================================================
// BMI Breakpoints
// ============================================================================

/// Lower bound of the Normal band
pub const BMI_NORMAL_MIN: f64 = 18.5;
/// Lower bound of the Overweight band
pub const BMI_OVERWEIGHT_MIN: f64 = 25.0;
/// Lower bound of the Obese band
pub const BMI_OBESE_MIN: f64 = 30.0;

/// Healthy BMI band used for recommended weight ranges
pub const HEALTHY_BMI_MIN: f64 = 18.5;
pub const HEALTHY_BMI_MAX: f64 = 24.9;

// ============================================================================
// Target Weight Heuristic
// ============================================================================

/// Multiplier applied to current weight for a "lose" goal inside the healthy range
pub const LOSE_TARGET_FACTOR: f64 = 0.925;
/// Multiplier applied to current weight for a "gain" goal inside the healthy range
pub const GAIN_TARGET_FACTOR: f64 = 1.075;
