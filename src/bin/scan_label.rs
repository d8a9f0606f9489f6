//! Print an allergen and macro report for a scanned food
//! Usage: cargo run --bin scan_label -- <profile.json> <food.json>

use std::path::Path;

use nutrisafe::config::EngineConfig;
use nutrisafe::nutrition::{body_metrics, detect_in_record, extract_nutrition, flatten_and_chunk};
use nutrisafe::tools::payload::{parse_food, parse_profile};

fn read_json(path: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&raw)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: scan_label <profile.json> <food.json>");
        std::process::exit(2);
    }

    let config = EngineConfig::from_env()?;
    let profile = parse_profile(read_json(Path::new(&args[1]))?)?;
    let food = parse_food(read_json(Path::new(&args[2]))?)?;

    println!("Food: {}", if food.name.is_empty() { "(unnamed)" } else { food.name.as_str() });
    if !food.serving_size.is_empty() {
        println!("Serving: {}", food.serving_size);
    }

    // Allergens
    if profile.allergens.is_empty() {
        println!("Allergens: none declared");
    } else {
        let detected = detect_in_record(profile.allergens.ids(), &food);
        if detected.is_empty() {
            println!("Allergens: SAFE (screened {})", profile.allergens.ids().join(", "));
        } else {
            println!("Allergens: WARNING, contains {}", detected.join(", "));
        }
    }

    // Macros per serving
    let nutrition = extract_nutrition(&food.nutrition_data, &config.synonyms);
    println!(
        "Per serving: {} kcal | protein {} g | carbs {} g | fat {} g",
        nutrition.calories, nutrition.protein, nutrition.carbs, nutrition.fat
    );

    for (i, page) in flatten_and_chunk(&food.nutrition_data, config.display_chunk_size).iter().enumerate() {
        println!("  Page {}:", i + 1);
        for item in page {
            println!("    {:<24} {:>8} {}", item.name, item.value, item.unit);
        }
    }

    let metrics = body_metrics(&profile.body);
    if let (Some(bmi), Some(category)) = (metrics.bmi, metrics.category) {
        println!("BMI: {} ({})", bmi, category);
    }
    if let Some(target) = metrics.target_weight_kg {
        println!("Target weight: {} kg ({})", target, profile.body.weight_goal.as_str());
    }

    Ok(())
}
