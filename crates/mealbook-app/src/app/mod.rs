//! Application session
//!
//! The object presentation surfaces hold: catalog queries annotated with
//! favorite state, and favorite toggling.

pub mod session;

pub use session::{HomeListing, RecipeCard, RecipeSession};
