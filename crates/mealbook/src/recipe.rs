//! Recipe snapshot model
//!
//! A `RecipeSnapshot` is the captured copy of a recipe as the catalog returned
//! it. Favorites persist snapshots, so later edits on the catalog side never
//! reach an already favorited recipe.

use crate::config::recipe::MAX_INGREDIENTS;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Ingredient
// =============================================================================

/// One line of a recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name (never blank)
    pub name: String,
    /// Quantity, e.g. "3/4 cup"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, measure: Option<&str>) -> Self {
        Self {
            name: name.into(),
            measure: measure.and_then(non_blank),
        }
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.measure {
            Some(measure) => write!(f, "{measure} {}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Build an ingredient list from numbered (ingredient, measure) slots
///
/// Slots with a blank ingredient are skipped; blank measures become `None`.
/// At most `MAX_INGREDIENTS` entries are kept.
pub fn ingredients_from_pairs<I, S>(pairs: I) -> Vec<Ingredient>
where
    I: IntoIterator<Item = (Option<S>, Option<S>)>,
    S: AsRef<str>,
{
    pairs
        .into_iter()
        .filter_map(|(ingredient, measure)| {
            let name = ingredient.as_ref().and_then(|s| non_blank(s.as_ref()))?;
            Some(Ingredient {
                name,
                measure: measure.as_ref().and_then(|s| non_blank(s.as_ref())),
            })
        })
        .take(MAX_INGREDIENTS)
        .collect()
}

// =============================================================================
// RecipeSnapshot
// =============================================================================

/// A recipe as captured from the catalog
///
/// Identified by `id`; two snapshots with the same id are the same recipe
/// even if their other fields differ. Field names on the wire follow
/// TheMealDB so a stored favorite reads like an API record, and a raw API
/// record deserializes straight into a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRecipe")]
pub struct RecipeSnapshot {
    /// Catalog identifier
    #[serde(rename = "idMeal")]
    pub id: String,
    /// Display name
    #[serde(rename = "strMeal")]
    pub name: String,
    /// Category, e.g. "Chicken"
    #[serde(rename = "strCategory", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Region or cuisine, e.g. "Japanese"
    #[serde(rename = "strArea", skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Thumbnail image URL
    #[serde(rename = "strMealThumb", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Preparation instructions
    #[serde(rename = "strInstructions", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Free-form tags
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Video walkthrough URL
    #[serde(rename = "strYoutube", skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    /// Original recipe URL
    #[serde(rename = "strSource", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ingredients: Vec<Ingredient>,
}

/// Either a stored snapshot or a raw catalog record
///
/// Stored snapshots carry `tags` and `ingredients` lists; catalog records
/// carry a comma-separated `strTags` and numbered `strIngredientN` /
/// `strMeasureN` slots, collected in `rest`.
#[derive(Deserialize)]
struct WireRecipe {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal", default)]
    name: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(rename = "strTags", default)]
    tag_list: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    source: Option<String>,
    #[serde(default)]
    ingredients: Option<Vec<Ingredient>>,
    #[serde(flatten)]
    rest: HashMap<String, serde_json::Value>,
}

impl WireRecipe {
    fn slot(&self, name: &str, index: usize) -> Option<&str> {
        self.rest
            .get(&format!("{name}{index}"))
            .and_then(serde_json::Value::as_str)
    }
}

impl From<WireRecipe> for RecipeSnapshot {
    fn from(mut wire: WireRecipe) -> Self {
        // An explicit list wins over numbered slots
        let ingredients = match wire.ingredients.take() {
            Some(list) => list,
            None => ingredients_from_pairs(
                (1..=MAX_INGREDIENTS)
                    .map(|i| (wire.slot("strIngredient", i), wire.slot("strMeasure", i))),
            ),
        };

        let tags = match wire.tags {
            Some(tags) => tags,
            None => wire
                .tag_list
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        };

        RecipeSnapshot {
            id: wire.id,
            name: wire.name.unwrap_or_default(),
            category: wire.category.as_deref().and_then(non_blank),
            area: wire.area.as_deref().and_then(non_blank),
            thumbnail: wire.thumbnail.as_deref().and_then(non_blank),
            instructions: wire.instructions.as_deref().and_then(non_blank),
            tags,
            youtube: wire.youtube.as_deref().and_then(non_blank),
            source: wire.source.as_deref().and_then(non_blank),
            ingredients: Vec::new(),
        }
        .with_ingredients(ingredients)
    }
}

impl RecipeSnapshot {
    /// Create a snapshot with only an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            area: None,
            thumbnail: None,
            instructions: None,
            tags: Vec::new(),
            youtube: None,
            source: None,
            ingredients: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Set the ingredient list, keeping at most `MAX_INGREDIENTS` entries
    pub fn with_ingredients(mut self, mut ingredients: Vec<Ingredient>) -> Self {
        ingredients.truncate(MAX_INGREDIENTS);
        self.ingredients = ingredients;
        self
    }

    /// Ingredient list in recipe order
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// "Category · Area" line for list rows; empty when both are unknown
    pub fn subtitle(&self) -> String {
        match (self.category.as_deref(), self.area.as_deref()) {
            (Some(c), Some(a)) => format!("{c} · {a}"),
            (Some(c), None) => c.to_string(),
            (None, Some(a)) => a.to_string(),
            (None, None) => String::new(),
        }
    }
}
