//! Common data types for persistence
//!
//! Sorting and filtering criteria for favorites views.

use mealbook::recipe::RecipeSnapshot;
use serde::{Deserialize, Serialize};

/// Sort criteria for favorites
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteSort {
    /// Order in which recipes were favorited
    #[default]
    Added,
    /// Alphabetical by name
    Name,
    /// Alphabetical by category, then name
    Category,
}

impl std::str::FromStr for FavoriteSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "added" => Ok(FavoriteSort::Added),
            "name" => Ok(FavoriteSort::Name),
            "category" => Ok(FavoriteSort::Category),
            other => Err(format!("unknown sort '{other}' (expected added, name or category)")),
        }
    }
}

/// Filter criteria for favorites
#[derive(Debug, Default, Clone)]
pub struct FavoriteFilter {
    /// Case-insensitive search in name
    pub search: Option<String>,
    /// Exact category (case-insensitive)
    pub category: Option<String>,
    /// Exact area (case-insensitive)
    pub area: Option<String>,
}

impl FavoriteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Check if a recipe matches this filter
    pub fn matches(&self, recipe: &RecipeSnapshot) -> bool {
        if let Some(ref search) = self.search {
            let search_lower = search.to_lowercase();
            if !recipe.name.to_lowercase().contains(&search_lower) {
                return false;
            }
        }

        if let Some(ref category) = self.category {
            if !same_text(recipe.category.as_deref(), category) {
                return false;
            }
        }

        if let Some(ref area) = self.area {
            if !same_text(recipe.area.as_deref(), area) {
                return false;
            }
        }

        true
    }
}

fn same_text(value: Option<&str>, wanted: &str) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case(wanted))
}
