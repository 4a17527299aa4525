//! Shared provider types
//!
//! Types used across all recipe providers.

/// A browsable recipe category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Provider-specific identifier
    pub id: String,
    /// Display name, also the value used to filter by category
    pub name: String,
    /// Category image URL
    pub thumbnail: Option<String>,
    /// Short description
    pub description: Option<String>,
}

impl Category {
    /// Create a new category
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: None,
            description: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}
