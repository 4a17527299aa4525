//! Recipe catalog providers
//!
//! Providers for discovering recipes (TheMealDB).

pub mod mealdb;
pub mod traits;
pub mod types;

// Re-exports
pub use mealdb::MealDbProvider;
pub use traits::RecipeProvider;
pub use types::Category;
