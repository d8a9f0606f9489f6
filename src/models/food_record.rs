//! Food record model
//!
//! A recognized or entered food as delivered by an upstream source. Decoding
//! a `FoodRecord` is the single normalization point for the loosely shaped
//! upstream payloads: every consumer downstream sees categorized nutrients
//! with clean numeric values.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

/// One reported nutrient, e.g. ("Energy", "kcal", 250)
///
/// Some sources send the amount as `amount`; when both keys are present,
/// `value` wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawNutrientItem")]
pub struct NutrientItem {
    pub name: String,
    pub unit: String,
    pub value: f64,
}

#[derive(Deserialize)]
struct RawNutrientItem {
    #[serde(default)]
    name: Value,
    #[serde(default)]
    unit: Value,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    amount: Value,
}

impl From<RawNutrientItem> for NutrientItem {
    fn from(raw: RawNutrientItem) -> Self {
        let amount = if raw.value.is_null() { &raw.amount } else { &raw.value };
        Self {
            name: lenient::text(&raw.name),
            unit: lenient::text(&raw.unit),
            value: lenient::nutrient_amount(amount),
        }
    }
}

impl NutrientItem {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            value: lenient::sanitize_amount(value),
        }
    }
}

/// A named grouping of nutrient items (e.g. "Macronutrients")
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientCategory {
    #[serde(default, deserialize_with = "lenient::deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_items")]
    pub items: Vec<NutrientItem>,
}

impl NutrientCategory {
    pub fn new(title: impl Into<String>, items: Vec<NutrientItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }
}

/// Ingredient list, either free text or already tokenized upstream
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Ingredients {
    Text(String),
    List(Vec<String>),
}

impl Default for Ingredients {
    fn default() -> Self {
        Ingredients::Text(String::new())
    }
}

impl Ingredients {
    /// The ingredients as a single text; lists are joined with ", "
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Ingredients::Text(s) => Cow::Borrowed(s.as_str()),
            Ingredients::List(items) => Cow::Owned(items.join(", ")),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Ingredients::Text(s) => s.trim().is_empty(),
            Ingredients::List(items) => items.iter().all(|s| s.trim().is_empty()),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Ingredients::List(
                items
                    .iter()
                    .map(lenient::text)
                    .filter(|s| !s.is_empty())
                    .collect(),
            ),
            other => Ingredients::Text(lenient::text(other)),
        }
    }
}

impl<'de> Deserialize<'de> for Ingredients {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Ingredients::from_value(&value))
    }
}

/// A food record with its nutrition payload normalized to categories
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    #[serde(default, deserialize_with = "lenient::deserialize_text")]
    pub name: String,
    #[serde(default, alias = "serving_size", deserialize_with = "lenient::deserialize_text")]
    pub serving_size: String,
    #[serde(default)]
    pub ingredients: Ingredients,
    #[serde(default, alias = "nutrition_data", deserialize_with = "deserialize_nutrition")]
    pub nutrition_data: Vec<NutrientCategory>,
    #[serde(default, deserialize_with = "lenient::deserialize_text")]
    pub source: String,
}

impl FoodRecord {
    pub fn ingredients_text(&self) -> Cow<'_, str> {
        self.ingredients.text()
    }
}

fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<NutrientItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(elements) => items_from_values(&elements),
        _ => Vec::new(),
    })
}

fn items_from_values(elements: &[Value]) -> Vec<NutrientItem> {
    elements
        .iter()
        .filter(|v| v.is_object())
        .filter_map(|v| match serde_json::from_value::<NutrientItem>(v.clone()) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("Dropping nutrient item {}: {}", v, e);
                None
            }
        })
        .collect()
}

fn deserialize_nutrition<'de, D>(deserializer: D) -> Result<Vec<NutrientCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(normalize_nutrition(&value))
}

/// Normalize an upstream nutrition payload into categories
///
/// Accepted shapes, which may be mixed within one array:
/// - `[{title, items: [...]}, ...]` -> categories as given
/// - `[{name, unit, value}, ...]` -> consecutive items collected into one untitled category
/// - `[[{name, unit, value}, ...], ...]` -> one untitled category per inner group
///
/// Anything else (null, scalars, stray elements) is dropped.
pub fn normalize_nutrition(value: &Value) -> Vec<NutrientCategory> {
    let elements = match value {
        Value::Array(elements) => elements,
        Value::Null => return Vec::new(),
        other => {
            tracing::debug!("Ignoring non-array nutrition payload: {}", other);
            return Vec::new();
        }
    };

    let mut categories = Vec::new();
    let mut loose_items: Vec<NutrientItem> = Vec::new();

    for element in elements {
        match element {
            Value::Object(map) if map.contains_key("items") => {
                flush_loose_items(&mut categories, &mut loose_items);
                match serde_json::from_value::<NutrientCategory>(element.clone()) {
                    Ok(category) => categories.push(category),
                    Err(e) => tracing::debug!("Skipping malformed nutrient category: {}", e),
                }
            }
            Value::Object(_) => match serde_json::from_value::<NutrientItem>(element.clone()) {
                Ok(item) => loose_items.push(item),
                Err(e) => tracing::debug!("Dropping nutrient item {}: {}", element, e),
            },
            Value::Array(group) => {
                flush_loose_items(&mut categories, &mut loose_items);
                categories.push(NutrientCategory::new("", items_from_values(group)));
            }
            other => tracing::debug!("Skipping nutrition element: {}", other),
        }
    }

    flush_loose_items(&mut categories, &mut loose_items);
    categories
}

fn flush_loose_items(categories: &mut Vec<NutrientCategory>, loose_items: &mut Vec<NutrientItem>) {
    if !loose_items.is_empty() {
        categories.push(NutrientCategory::new("", std::mem::take(loose_items)));
    }
}
