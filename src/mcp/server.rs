//! NutriSafe MCP Server Implementation
//!
//! Implements the MCP server with all NutriSafe tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::EngineConfig;
use crate::tools::allergens;
use crate::tools::body;
use crate::tools::foods;
use crate::tools::meals;
use crate::tools::status::StatusTracker;

/// NutriSafe MCP Service
#[derive(Clone)]
pub struct NutriSafeService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    config: Arc<EngineConfig>,
    tool_router: ToolRouter<NutriSafeService>,
}

impl NutriSafeService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Allergen Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DetectAllergensParams {
    /// The user's allergen ids, e.g. ["peanuts", "milk"] or ["none"]
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Food record with an `ingredients` string or string list
    pub food: serde_json::Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateAllergenSelectionParams {
    /// Currently selected allergen ids
    #[serde(default)]
    pub current: Vec<String>,
    #[serde(default)]
    pub select: Vec<String>,
    #[serde(default)]
    pub deselect: Vec<String>,
    #[serde(default)]
    pub toggle: Vec<String>,
}

// ============================================================================
// Food Record Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupNutrientParams {
    pub food: serde_json::Value,
    /// calories, protein, carbs or fat
    pub nutrient: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutrientPagesParams {
    pub food: serde_json::Value,
    /// Items per page; defaults to the configured display chunk size
    #[serde(default, alias = "chunkSize")]
    pub chunk_size: Option<usize>,
}

// ============================================================================
// Meal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SummarizeMealsParams {
    /// Array of meal entries (food record plus id and quantity)
    #[serde(default)]
    pub entries: serde_json::Value,
    #[serde(default, alias = "chunkSize")]
    pub chunk_size: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SummarizeDayParams {
    #[serde(default)]
    pub breakfast: serde_json::Value,
    #[serde(default)]
    pub lunch: serde_json::Value,
    #[serde(default)]
    pub dinner: serde_json::Value,
    #[serde(default)]
    pub other: serde_json::Value,
    #[serde(default, alias = "chunkSize")]
    pub chunk_size: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveMealEntryParams {
    #[serde(default)]
    pub entries: serde_json::Value,
    /// Id of the entry to remove
    pub id: String,
}

// ============================================================================
// Body Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BodyMetricsParams {
    /// Profile with heightValue, heightInches, heightUnit, weightValue, weightUnit, weightGoal
    pub profile: serde_json::Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertMeasurementParams {
    pub value: f64,
    /// cm, ft_in, kg or lb
    pub from: String,
    /// Remaining inches when converting from ft_in
    pub inches: Option<f64>,
}

#[tool_router]
impl NutriSafeService {
    // --- Status ---

    #[tool(description = "Get the current status of the NutriSafe service including build info, active configuration, and process information")]
    async fn nutrisafe_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.config);
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for using the NutriSafe tools, including accepted payload shapes. Call this when unsure how to format food records or meal entries.")]
    fn engine_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::ENGINE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(ENGINE_INSTRUCTIONS)]))
    }

    // --- Allergens ---

    #[tool(description = "List the allergen catalog with ids, names and the ingredient keywords that indicate each allergen")]
    fn list_allergens(&self) -> Result<CallToolResult, McpError> {
        to_json(&allergens::list_allergens())
    }

    #[tool(description = "Detect which of the user's allergens appear in a food's ingredients. Matching is whole-word; 'none' means no allergies declared.")]
    fn detect_allergens(&self, Parameters(p): Parameters<DetectAllergensParams>) -> Result<CallToolResult, McpError> {
        let result = allergens::detect_allergens(&p.allergens, p.food).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Apply select/deselect/toggle changes to a user's allergen selection. Selecting 'none' clears all others; selecting an allergen clears 'none'.")]
    fn update_allergen_selection(&self, Parameters(p): Parameters<UpdateAllergenSelectionParams>) -> Result<CallToolResult, McpError> {
        let result = allergens::update_selection(&p.current, &p.select, &p.deselect, &p.toggle)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Food Records ---

    #[tool(description = "Look up one serving's calories, protein, carbs or fat in a food record by synonym search")]
    fn lookup_nutrient(&self, Parameters(p): Parameters<LookupNutrientParams>) -> Result<CallToolResult, McpError> {
        let result = foods::lookup_nutrient(&self.config, p.food, &p.nutrient).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Flatten a food record's nutrient list and split it into display pages")]
    fn nutrient_pages(&self, Parameters(p): Parameters<NutrientPagesParams>) -> Result<CallToolResult, McpError> {
        let result = foods::nutrient_pages(&self.config, p.food, p.chunk_size).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Meals ---

    #[tool(description = "Total calories and macros across meal entries, weighted by quantity, with merged nutrient display pages")]
    fn summarize_meals(&self, Parameters(p): Parameters<SummarizeMealsParams>) -> Result<CallToolResult, McpError> {
        let result = meals::summarize_meals(&self.config, p.entries, p.chunk_size).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Summarize a day's meals: per-meal (breakfast, lunch, dinner, other) and whole-day totals")]
    fn summarize_day(&self, Parameters(p): Parameters<SummarizeDayParams>) -> Result<CallToolResult, McpError> {
        let result = meals::summarize_day(&self.config, p.breakfast, p.lunch, p.dinner, p.other, p.chunk_size)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Remove one meal entry and return the running totals before and after, subtracting exactly that entry's contribution")]
    fn remove_meal_entry(&self, Parameters(p): Parameters<RemoveMealEntryParams>) -> Result<CallToolResult, McpError> {
        let result = meals::remove_meal_entry(&self.config, p.entries, &p.id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Body ---

    #[tool(description = "Compute BMI, BMI category, healthy weight range and a goal-based target weight from a profile")]
    fn body_metrics(&self, Parameters(p): Parameters<BodyMetricsParams>) -> Result<CallToolResult, McpError> {
        let result = body::body_metrics(p.profile).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Convert a height (cm <-> ft_in) or weight (kg <-> lb)")]
    fn convert_measurement(&self, Parameters(p): Parameters<ConvertMeasurementParams>) -> Result<CallToolResult, McpError> {
        let result = body::convert_measurement(p.value, &p.from, p.inches).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

#[tool_handler]
impl ServerHandler for NutriSafeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrisafe".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("NutriSafe".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "NutriSafe - nutrition reconciliation and allergen screening. \
                 Call engine_instructions for payload shapes. \
                 Allergens: list_allergens, detect_allergens, update_allergen_selection. \
                 Foods: lookup_nutrient, nutrient_pages. \
                 Meals: summarize_meals, summarize_day, remove_meal_entry. \
                 Body: body_metrics, convert_measurement. \
                 All tools are stateless; pass full payloads on each call."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize_params_accept_missing_entries() {
        let params: SummarizeMealsParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.entries.is_null());
        assert_eq!(params.chunk_size, None);
    }

    #[test]
    fn test_detect_params() {
        let params: DetectAllergensParams =
            serde_json::from_value(json!({"allergens": ["milk"], "food": {"ingredients": "whey"}})).unwrap();
        assert_eq!(params.allergens, vec!["milk"]);
        let result = allergens::detect_allergens(&params.allergens, params.food).unwrap();
        assert_eq!(result.detected_allergens, vec!["milk"]);
    }

    #[test]
    fn test_get_info() {
        let service = NutriSafeService::new(EngineConfig::default());
        let info = service.get_info();
        assert_eq!(info.server_info.name, "nutrisafe");
        assert!(info.instructions.unwrap().contains("detect_allergens"));
    }
}
