//! Application settings management
//!
//! User preferences and application state.

use crate::config::providers::MEALDB_DEFAULT_SERVER;
use crate::config::storage::SETTINGS_FILE;
use crate::data::storage;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file format version for migrations
const SETTINGS_VERSION: u32 = 1;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Recipe catalog server
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Category selected last time the category listing was opened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_category: Option<String>,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_api_base_url() -> String {
    MEALDB_DEFAULT_SERVER.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            api_base_url: default_api_base_url(),
            last_category: None,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        match storage::load_from::<Settings>(path)? {
            Some(settings) => Ok(settings),
            None => Ok(Self::default()),
        }
    }

    /// Load settings stored in `dir`
    pub fn load_in(dir: &Path) -> Result<Self> {
        Self::load_from(&dir.join(SETTINGS_FILE))
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_to(path, self)
    }

    /// Save settings into `dir`
    pub fn save_in(&self, dir: &Path) -> Result<()> {
        self.save_to(&dir.join(SETTINGS_FILE))
    }

    /// Remember the selected category; blank clears it
    pub fn set_last_category(&mut self, category: &str) {
        let category = category.trim();
        self.last_category = if category.is_empty() {
            None
        } else {
            Some(category.to_string())
        };
    }
}
