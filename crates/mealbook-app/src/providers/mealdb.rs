//! TheMealDB API provider
//!
//! Implementation of `RecipeProvider` for TheMealDB
//! (<https://www.themealdb.com/api.php>).

use crate::config::providers::MEALDB_DEFAULT_SERVER;
use crate::error::Result;
use crate::network::HttpClient;
use mealbook::recipe::RecipeSnapshot;

use super::traits::RecipeProvider;
use super::types::Category;

use serde::Deserialize;

// =============================================================================
// Internal API response types (serde)
// =============================================================================

/// `{"meals": [...]}`; the API sends `null` instead of an empty array
///
/// Meal records deserialize straight into snapshots, which read the
/// numbered ingredient slots and comma-separated tags themselves.
#[derive(Debug, Deserialize)]
struct MealsEnvelope {
    #[serde(default)]
    meals: Option<Vec<RecipeSnapshot>>,
}

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Option<Vec<MdbCategory>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MdbCategory {
    id_category: String,
    str_category: String,
    #[serde(default)]
    str_category_thumb: Option<String>,
    #[serde(default)]
    str_category_description: Option<String>,
}

// =============================================================================
// Wire -> model conversion
// =============================================================================

/// Convert an empty string to None
fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl From<MdbCategory> for Category {
    fn from(c: MdbCategory) -> Self {
        Category::new(c.id_category, c.str_category)
            .with_thumbnail(non_empty(c.str_category_thumb))
            .with_description(non_empty(c.str_category_description))
    }
}

impl MealsEnvelope {
    fn into_recipes(self) -> Vec<RecipeSnapshot> {
        self.meals.unwrap_or_default()
    }
}

// =============================================================================
// MealDbProvider
// =============================================================================

/// TheMealDB API provider
///
/// Queries the free v1 endpoints of [TheMealDB](https://www.themealdb.com/),
/// a community recipe database.
pub struct MealDbProvider {
    client: HttpClient,
    base_url: String,
}

impl MealDbProvider {
    /// Create a provider using the default server
    pub fn new() -> Result<Self> {
        Self::with_base_url(MEALDB_DEFAULT_SERVER)
    }

    /// Create a provider with a custom base URL (for testing or mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url: String = base_url.into();
        Ok(Self {
            client: HttpClient::new()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a full API URL from an endpoint path
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn meals(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<RecipeSnapshot>> {
        let envelope: MealsEnvelope = self.client.get_json(&self.url(path), query)?;
        Ok(envelope.into_recipes())
    }
}

impl RecipeProvider for MealDbProvider {
    fn name(&self) -> &'static str {
        "TheMealDB"
    }

    fn id(&self) -> &'static str {
        "themealdb"
    }

    fn search(&self, query: &str) -> Result<Vec<RecipeSnapshot>> {
        self.meals("search.php", &[("s", query.trim())])
    }

    fn categories(&self) -> Result<Vec<Category>> {
        let envelope: CategoriesEnvelope = self.client.get_json(&self.url("categories.php"), &[])?;
        Ok(envelope
            .categories
            .unwrap_or_default()
            .into_iter()
            .map(Category::from)
            .collect())
    }

    fn by_category(&self, category: &str) -> Result<Vec<RecipeSnapshot>> {
        self.meals("filter.php", &[("c", category.trim())])
    }

    fn lookup(&self, id: &str) -> Result<Option<RecipeSnapshot>> {
        Ok(self.meals("lookup.php", &[("i", id.trim())])?.into_iter().next())
    }
}

// =============================================================================
// Tests
// =============================================================================
