//! Mealbook: recipe model
//!
//! Recipe snapshots, ingredient extraction, and the shared error type.
//!
//! ## Quick start
//!
//! ```
//! use mealbook::recipe::{Ingredient, RecipeSnapshot};
//!
//! let recipe = RecipeSnapshot::new("52772", "Teriyaki Chicken Casserole")
//!     .with_category("Chicken")
//!     .with_ingredients(vec![Ingredient::new("soy sauce", Some("3/4 cup"))]);
//! assert_eq!(recipe.ingredients().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod recipe;
