//! Configuration constants for the mealbook core

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("Mealbook/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Read timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 30;
}

/// Recipe model limits
pub mod recipe {
    /// Maximum number of (ingredient, measure) pairs a recipe carries.
    /// TheMealDB numbers them `strIngredient1` through `strIngredient20`.
    pub const MAX_INGREDIENTS: usize = 20;
}
