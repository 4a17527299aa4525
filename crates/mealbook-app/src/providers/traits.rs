//! Recipe provider trait
//!
//! Defines the interface that all recipe catalogs must implement.

use crate::error::Result;
use mealbook::recipe::RecipeSnapshot;

use super::types::Category;

/// A source of recipe listings
///
/// Implementations provide search, browse, and lookup capabilities
/// for a specific recipe catalog service.
pub trait RecipeProvider: Send + Sync {
    /// Display name for the provider (e.g., "TheMealDB")
    fn name(&self) -> &'static str;

    /// Machine-readable identifier (e.g., "themealdb")
    fn id(&self) -> &'static str;

    /// Search recipes by name; an empty query returns the default listing
    fn search(&self, query: &str) -> Result<Vec<RecipeSnapshot>>;

    /// List recipe categories
    fn categories(&self) -> Result<Vec<Category>>;

    /// Recipes within a category
    ///
    /// Listings may be partial snapshots (id, name, thumbnail only).
    fn by_category(&self, category: &str) -> Result<Vec<RecipeSnapshot>>;

    /// Look up a single recipe with full details
    fn lookup(&self, id: &str) -> Result<Option<RecipeSnapshot>>;
}
