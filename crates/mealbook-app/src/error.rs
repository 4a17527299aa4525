//! Error types for Mealbook app services
//!
//! Application-level errors that wrap core errors and add app-specific variants.

use mealbook::error::RecipeError;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] RecipeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Persisted slot exists but could not be read
    #[error("Failed to read '{key}': {message}")]
    StorageRead { key: String, message: String },

    /// Persisted slot could not be written
    #[error("Failed to write '{key}': {message}")]
    StorageWrite { key: String, message: String },

    /// Persisted slot was read but its contents are malformed
    #[error("Malformed data under '{key}': {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Engine(RecipeError::Network(e))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Engine(RecipeError::Io(e))
    }
}

/// Result type alias for Mealbook app services
pub type Result<T> = std::result::Result<T, AppError>;
