//! Configuration constants for mealbook app services

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "mealbook";
}

/// Provider-related configuration
pub mod providers {
    /// Default TheMealDB API server (free v1 key)
    pub const MEALDB_DEFAULT_SERVER: &str = "https://www.themealdb.com/api/json/v1/1";
}

/// Storage keys and file names
pub mod storage {
    /// Key of the persisted favorites collection
    pub const FAVORITES_KEY: &str = "favorites";

    /// Settings file name inside the config directory
    pub const SETTINGS_FILE: &str = "settings.json";
}
