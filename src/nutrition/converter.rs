//! Unit conversion functions
//!
//! Height and weight conversions between the units a user may enter and the
//! canonical centimeters/kilograms.

use serde::{Deserialize, Serialize};

use super::units::{CM_PER_FOOT, CM_PER_INCH, INCHES_PER_FOOT, KG_PER_LB};

/// A height split into whole feet and remaining inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeetInches {
    pub feet: u32,
    pub inches: f64,
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Convert feet and inches to centimeters
///
/// `cm = feet * 30.48 + inches * 2.54`
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    feet * CM_PER_FOOT + inches * CM_PER_INCH
}

/// Convert centimeters to whole feet and remaining inches
///
/// Negative or non-finite input yields 0 ft 0 in.
pub fn cm_to_feet_inches(cm: f64) -> FeetInches {
    if !cm.is_finite() || cm <= 0.0 {
        return FeetInches { feet: 0, inches: 0.0 };
    }

    // Snap away float noise so 152.4 cm is 5 ft 0 in, not 4 ft 11.9999 in
    let total_inches = round_to(cm / CM_PER_INCH, 6);
    let feet = (total_inches / INCHES_PER_FOOT).floor();

    FeetInches {
        feet: feet as u32,
        inches: total_inches - feet * INCHES_PER_FOOT,
    }
}

/// Convert pounds to kilograms, rounded to 2 decimal places
pub fn lb_to_kg(lb: f64) -> f64 {
    round_to(lb * KG_PER_LB, 2)
}

/// Convert kilograms to pounds
pub fn kg_to_lb(kg: f64) -> f64 {
    kg / KG_PER_LB
}
