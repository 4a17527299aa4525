//! Storage layer for JSON persistence
//!
//! Provides consistent file I/O for all data types, and the key-value slot
//! abstraction the favorites store persists through.

use crate::config::app::NAME;
use crate::error::{AppError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Get the application config directory path
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(NAME))
        .ok_or_else(|| AppError::Config(
            "Could not determine config directory. HOME environment variable may not be set.".to_string()
        ))
}

/// Ensure the config directory exists, creating it if necessary
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir()?;
    create_dir_if_needed(&dir).map_err(AppError::Config)?;
    Ok(dir)
}

// =============================================================================
// Path-based functions (for testing and custom locations)
// =============================================================================

/// Create a directory if it doesn't exist
fn create_dir_if_needed(path: &Path) -> std::result::Result<(), String> {
    fs::create_dir_all(path).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => {
            format!("Permission denied: cannot create directory {:?}", path)
        }
        ErrorKind::NotFound => {
            format!("Cannot create directory {:?}: parent path does not exist", path)
        }
        _ => format!("Failed to create directory {:?}: {}", path, e),
    })
}

/// Read file contents; a missing file is `Ok(None)`
fn read_file(path: &Path) -> std::result::Result<Option<String>, String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(None),
            ErrorKind::PermissionDenied => {
                Err(format!("Permission denied: cannot read {:?}", path))
            }
            _ => Err(format!("Failed to read {:?}: {}", path, e)),
        },
    }
}

/// Write file contents, creating parent directories first
fn write_file(path: &Path, content: &str) -> std::result::Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_if_needed(parent)?;
        }
    }

    fs::write(path, content).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => {
            format!("Permission denied: cannot write to {:?}", path)
        }
        ErrorKind::NotFound => {
            format!("Cannot write to {:?}: parent directory does not exist", path)
        }
        ErrorKind::ReadOnlyFilesystem => {
            format!("Cannot write to {:?}: filesystem is read-only", path)
        }
        _ => format!("Failed to write to {:?}: {}", path, e),
    })
}

/// Load data from a JSON file at a specific path
///
/// Returns `None` if the file doesn't exist or is empty.
/// Returns an error if the file exists but can't be read or parsed.
pub fn load_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match read_file(path).map_err(AppError::Config)? {
        Some(c) => c,
        None => return Ok(None),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    let data = serde_json::from_str(&content).map_err(|e| {
        AppError::Config(format!("Failed to parse {:?}: {}", path, e))
    })?;

    Ok(Some(data))
}

/// Save data to a JSON file at a specific path
///
/// Creates parent directories if they don't exist.
pub fn save_to<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data).map_err(|e| {
        AppError::Config(format!("Failed to serialize data: {}", e))
    })?;

    write_file(path, &content).map_err(AppError::Config)
}

// =============================================================================
// Key-value slots
// =============================================================================

/// Durable whole-value storage addressed by key
///
/// Values are opaque strings; reads and writes always cover the complete
/// value. An absent key reads as `None`.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store files under `dir` (created on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let content = read_file(&self.path_for(key)).map_err(|message| AppError::StorageRead {
            key: key.to_string(),
            message,
        })?;

        // Empty file is treated as non-existent
        Ok(content.filter(|c| !c.trim().is_empty()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let to_write_error = |message| AppError::StorageWrite {
            key: key.to_string(),
            message,
        };

        // Write-then-rename so a crash mid-write leaves the old value intact
        write_file(&tmp, value).map_err(to_write_error)?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            to_write_error(format!("Failed to replace {:?}: {}", path, e))
        })
    }
}

/// In-process key-value store
///
/// Nothing survives the process; used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
