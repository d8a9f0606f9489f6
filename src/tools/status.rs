//! NutriSafe Status Tool
//!
//! Provides runtime status information about the NutriSafe service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::{EngineConfig, CONFIG_PATH_ENV};
use crate::nutrition::MacroKind;

/// Usage guide for AI assistants calling the engine tools
pub const ENGINE_INSTRUCTIONS: &str = r#"
# NutriSafe Tool Guide

NutriSafe reconciles food records from heterogeneous sources into calorie and
macro totals, and screens ingredient text for a user's declared allergens.
Every tool is stateless: pass the full payload on each call.

## Payload shapes

A food record:

```json
{
  "name": "Granola bar",
  "servingSize": "1 bar (40 g)",
  "ingredients": "Oats, honey, almonds, soy lecithin",
  "nutritionData": [
    {"title": "Macronutrients", "items": [
      {"name": "Energy", "unit": "kcal", "value": 180},
      {"name": "Protein", "unit": "g", "value": 4}
    ]}
  ],
  "source": "label-scan"
}
```

- `ingredients` may be a string or a list of strings.
- `nutritionData` may also be a flat list of items, or a list of item lists.
- Values may be numbers or strings such as "12.5 g". Anything unreadable counts as 0.

A meal entry is a food record plus `id`, `quantity` (servings, default 1) and
optional `mealType` (breakfast, lunch, dinner, other).

## Tools

1. **detect_allergens** - pass the user's allergen ids (see `list_allergens`)
   and the food record. Matching is whole-word: "egg" does not match "eggplant".
   `safe` is true when nothing was detected.
2. **lookup_nutrient** - calories, protein, carbs or fat of one serving.
3. **nutrient_pages** - the food's nutrient list split into display pages.
4. **summarize_meals** - quantity-weighted totals and merged nutrient pages
   for a list of entries.
5. **summarize_day** - per-meal and whole-day totals.
6. **remove_meal_entry** - totals before and after removing one entry.
7. **body_metrics** - BMI, category, healthy weight range and goal target.
8. **convert_measurement** - cm <-> ft/in, kg <-> lb.

## Notes

- Totals that are whole numbers are returned as-is; others are rounded to 2 decimals.
- The allergen id "none" means the user declared no allergies.
- A height or weight of 0 means "not entered"; dependent metrics are null.
- Target weights are a product heuristic, not medical advice.
"#;

/// Runtime status of the NutriSafe service
#[derive(Debug, Clone, Serialize)]
pub struct NutriSafeStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Configuration in effect
    pub config_path: Option<String>,
    pub display_chunk_size: usize,
    pub synonym_counts: Vec<(&'static str, usize)>,

    /// Process information
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    config_path: Option<String>,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            config_path: std::env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.is_empty()),
        }
    }

    /// Get the current status
    pub fn get_status(&self, config: &EngineConfig) -> NutriSafeStatus {
        let build_info = BuildInfo::current();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        let synonym_counts = MacroKind::ALL
            .iter()
            .map(|&kind| {
                let set = config.synonyms.get(kind);
                (kind.as_str(), set.keywords.len() + set.unit_keywords.len())
            })
            .collect();

        NutriSafeStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            config_path: self.config_path.clone(),
            display_chunk_size: config.display_chunk_size,
            synonym_counts,
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_config() {
        let tracker = StatusTracker::new();
        let status = tracker.get_status(&EngineConfig::default());
        assert_eq!(status.display_chunk_size, 4);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.synonym_counts[0], ("calories", 4));
        assert_eq!(status.synonym_counts.len(), 4);
        assert!(status.started_at <= Utc::now());
    }

    #[test]
    fn test_instructions_cover_every_tool() {
        for tool in [
            "detect_allergens",
            "lookup_nutrient",
            "nutrient_pages",
            "summarize_meals",
            "summarize_day",
            "remove_meal_entry",
            "body_metrics",
            "convert_measurement",
        ] {
            assert!(ENGINE_INSTRUCTIONS.contains(tool), "missing {}", tool);
        }
    }
}
