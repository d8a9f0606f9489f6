//! Allergen catalog and user allergen selection
//!
//! The catalog is fixed. Each entry carries the whole-word keywords that
//! indicate its presence in an ingredient list; the entry's own name is
//! always one of them. Exclusions are phrases that contain a keyword but do
//! not indicate the allergen, such as "peanut butter" for milk.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

/// Sentinel id meaning "no allergies declared"
pub const NO_ALLERGIES_ID: &str = "none";

/// A catalog allergen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Allergen {
    pub id: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub exclusions: &'static [&'static str],
}

pub const ALLERGEN_CATALOG: &[Allergen] = &[
    Allergen {
        id: NO_ALLERGIES_ID,
        name: "None",
        keywords: &[],
        exclusions: &[],
    },
    Allergen {
        id: "milk",
        name: "Milk",
        keywords: &[
            "milk", "dairy", "lactose", "whey", "casein", "butter", "cream", "cheese", "yogurt",
            "ghee",
        ],
        exclusions: &[
            "peanut butter", "nut butter", "almond butter", "cashew butter", "cocoa butter",
            "cacao butter", "shea butter", "apple butter", "coconut butter", "coconut cream",
            "coconut milk", "cream of tartar", "almond milk", "oat milk", "soy milk", "rice milk",
        ],
    },
    Allergen {
        id: "eggs",
        name: "Eggs",
        keywords: &["egg", "eggs", "albumin", "mayonnaise"],
        exclusions: &[],
    },
    Allergen {
        id: "fish",
        name: "Fish",
        keywords: &["fish", "anchovy", "anchovies", "cod", "salmon", "tuna", "tilapia"],
        exclusions: &[],
    },
    Allergen {
        id: "shellfish",
        name: "Shellfish",
        keywords: &[
            "shellfish", "shrimp", "prawn", "prawns", "crab", "lobster", "clam", "clams",
            "mussel", "mussels", "oyster", "oysters", "scallop", "scallops",
        ],
        exclusions: &[],
    },
    Allergen {
        id: "tree_nuts",
        name: "Tree Nuts",
        keywords: &[
            "tree nut", "tree nuts", "almond", "almonds", "cashew", "cashews", "walnut",
            "walnuts", "pecan", "pecans", "pistachio", "pistachios", "hazelnut", "hazelnuts",
            "macadamia",
        ],
        exclusions: &[],
    },
    Allergen {
        id: "peanuts",
        name: "Peanuts",
        keywords: &["peanut", "peanuts", "groundnut", "groundnuts"],
        exclusions: &[],
    },
    Allergen {
        id: "wheat",
        name: "Wheat",
        keywords: &["wheat", "semolina", "durum", "spelt"],
        exclusions: &[],
    },
    Allergen {
        id: "soy",
        name: "Soy",
        keywords: &["soy", "soya", "soybean", "soybeans", "tofu", "edamame"],
        exclusions: &[],
    },
    Allergen {
        id: "sesame",
        name: "Sesame",
        keywords: &["sesame", "tahini"],
        exclusions: &[],
    },
    Allergen {
        id: "gluten",
        name: "Gluten",
        keywords: &["gluten", "wheat", "barley", "rye", "malt", "seitan"],
        exclusions: &[],
    },
];

/// Canonical form of an allergen id: trimmed, lowercase
pub fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

/// Look up a catalog allergen by id (case-insensitive)
pub fn find_allergen(id: &str) -> Option<&'static Allergen> {
    let id = normalize_id(id);
    ALLERGEN_CATALOG.iter().find(|a| a.id == id)
}

/// The set of allergens a user has declared
///
/// Ids are unique and drawn from the catalog. Selecting the "none" sentinel
/// clears every other allergen; selecting any allergen clears "none".
/// Decoding is lenient: null or a non-list is an empty selection, and
/// non-string elements are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<String>")]
pub struct AllergenSelection {
    ids: Vec<String>,
}

impl AllergenSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection by selecting each id in order
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for id in ids {
            selection.select(id.as_ref());
        }
        selection
    }

    /// Select an allergen; returns false for ids outside the catalog
    pub fn select(&mut self, id: &str) -> bool {
        let Some(allergen) = find_allergen(id) else {
            tracing::warn!("Ignoring unknown allergen id '{}'", id);
            return false;
        };

        if allergen.id == NO_ALLERGIES_ID {
            self.ids.clear();
        } else {
            self.ids.retain(|existing| existing != NO_ALLERGIES_ID);
        }

        if !self.contains(allergen.id) {
            self.ids.push(allergen.id.to_string());
        }
        true
    }

    /// Remove an allergen; returns whether it was selected
    pub fn deselect(&mut self, id: &str) -> bool {
        let id = normalize_id(id);
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    /// Flip an allergen; returns whether it is selected afterwards
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.deselect(id);
            false
        } else {
            self.select(id)
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        let id = normalize_id(id);
        self.ids.iter().any(|existing| *existing == id)
    }

    /// True when the user explicitly declared no allergies
    pub fn declares_none(&self) -> bool {
        self.contains(NO_ALLERGIES_ID)
    }

    /// True when there is nothing to screen for
    pub fn is_empty(&self) -> bool {
        self.ids.iter().all(|id| id == NO_ALLERGIES_ID)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

impl From<Vec<String>> for AllergenSelection {
    fn from(ids: Vec<String>) -> Self {
        Self::from_ids(ids)
    }
}

impl<'de> Deserialize<'de> for AllergenSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_ids(lenient::string_list(&value)))
    }
}

impl From<AllergenSelection> for Vec<String> {
    fn from(selection: AllergenSelection) -> Self {
        selection.ids
    }
}
