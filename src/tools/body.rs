//! Body Measurement MCP Tools
//!
//! BMI and weight targets from a user profile, and unit conversion.

use serde::Serialize;
use serde_json::Value;

use crate::nutrition::{
    body_metrics as compute_body_metrics, cm_to_feet_inches, feet_inches_to_cm, kg_to_lb, lb_to_kg,
    round_to, BodyMetrics, HeightUnit, WeightUnit,
};
use crate::tools::payload::parse_profile;

/// Response for convert_measurement
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub from: &'static str,
    pub to: &'static str,
    pub value: f64,
    /// Remaining inches for ft_in results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inches: Option<f64>,
}

pub fn body_metrics(profile: Value) -> Result<BodyMetrics, String> {
    let profile = parse_profile(profile).map_err(|e| format!("Failed to read profile: {}", e))?;
    Ok(compute_body_metrics(&profile.body))
}

/// Convert a height or weight to the other unit of its kind
///
/// `from` is one of `cm`, `ft_in`, `kg`, `lb`. For `ft_in`, `value` holds
/// the feet and `inches` the remaining inches.
pub fn convert_measurement(value: f64, from: &str, inches: Option<f64>) -> Result<ConversionResponse, String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("Measurement must be a non-negative number, got {}", value));
    }

    let unit = from.trim().to_lowercase();
    if let Some(height) = HeightUnit::parse(&unit) {
        return Ok(match height {
            HeightUnit::Centimeters => {
                let fi = cm_to_feet_inches(value);
                ConversionResponse {
                    from: HeightUnit::Centimeters.as_str(),
                    to: HeightUnit::FeetInches.as_str(),
                    value: fi.feet as f64,
                    inches: Some(round_to(fi.inches, 2)),
                }
            }
            HeightUnit::FeetInches => ConversionResponse {
                from: HeightUnit::FeetInches.as_str(),
                to: HeightUnit::Centimeters.as_str(),
                value: round_to(feet_inches_to_cm(value, inches.unwrap_or(0.0).max(0.0)), 2),
                inches: None,
            },
        });
    }

    match WeightUnit::parse(&unit) {
        Some(WeightUnit::Pounds) => Ok(ConversionResponse {
            from: WeightUnit::Pounds.as_str(),
            to: WeightUnit::Kilograms.as_str(),
            value: lb_to_kg(value),
            inches: None,
        }),
        Some(WeightUnit::Kilograms) => Ok(ConversionResponse {
            from: WeightUnit::Kilograms.as_str(),
            to: WeightUnit::Pounds.as_str(),
            value: round_to(kg_to_lb(value), 2),
            inches: None,
        }),
        None => Err(format!("Unknown unit '{}'. Use cm, ft_in, kg or lb", from)),
    }
}
