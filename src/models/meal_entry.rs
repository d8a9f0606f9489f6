//! Meal log entry model
//!
//! A food record logged by the user with the number of servings eaten.
//! Entries are owned by the external diet history and replaced wholesale on
//! edit; this crate only reads them.

use serde::{Deserialize, Serialize};

use super::{lenient, FoodRecord};

/// Meal time bucket
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Other,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            _ => MealType::Other,
        }
    }
}

impl From<&str> for MealType {
    fn from(s: &str) -> Self {
        MealType::from_str(s)
    }
}

/// A logged meal: a food record plus servings consumed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLogEntry {
    #[serde(default, deserialize_with = "lenient::deserialize_text")]
    pub id: String,
    #[serde(
        default = "lenient::default_quantity",
        deserialize_with = "lenient::deserialize_quantity"
    )]
    pub quantity: f64,
    #[serde(default, alias = "meal_type", deserialize_with = "lenient::deserialize_label")]
    pub meal_type: MealType,
    #[serde(flatten)]
    pub food: FoodRecord,
}

impl MealLogEntry {
    pub fn new(id: impl Into<String>, food: FoodRecord, quantity: f64) -> Self {
        Self {
            id: id.into(),
            quantity: if quantity.is_finite() && quantity > 0.0 {
                quantity
            } else {
                lenient::DEFAULT_QUANTITY
            },
            meal_type: MealType::Other,
            food,
        }
    }

    pub fn with_meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = meal_type;
        self
    }

    /// Servings multiplier, re-checked in case the entry was built by hand
    pub fn multiplier(&self) -> f64 {
        if self.quantity.is_finite() && self.quantity > 0.0 {
            self.quantity
        } else {
            lenient::DEFAULT_QUANTITY
        }
    }
}

/// A day's meals partitioned by meal time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayMeals {
    #[serde(default)]
    pub breakfast: Vec<MealLogEntry>,
    #[serde(default)]
    pub lunch: Vec<MealLogEntry>,
    #[serde(default)]
    pub dinner: Vec<MealLogEntry>,
    #[serde(default)]
    pub other: Vec<MealLogEntry>,
}

impl DayMeals {
    /// Partition a flat list of entries by their meal type, preserving order
    pub fn from_entries(entries: impl IntoIterator<Item = MealLogEntry>) -> Self {
        let mut day = DayMeals::default();
        for entry in entries {
            day.bucket_mut(entry.meal_type).push(entry);
        }
        day
    }

    pub fn bucket(&self, meal_type: MealType) -> &[MealLogEntry] {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, meal_type: MealType) -> &mut Vec<MealLogEntry> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
            MealType::Other => &mut self.other,
        }
    }

    /// All entries in breakfast, lunch, dinner, other order
    pub fn all_entries(&self) -> impl Iterator<Item = &MealLogEntry> {
        self.breakfast
            .iter()
            .chain(self.lunch.iter())
            .chain(self.dinner.iter())
            .chain(self.other.iter())
    }
}
