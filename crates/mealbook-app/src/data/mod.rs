//! Data persistence
//!
//! Handles favorites, settings and the storage they live in.

pub mod favorites;
pub mod settings;
pub mod storage;
pub mod types;
pub mod writer;

// Re-export common types
pub use favorites::{FavoritesStore, PersistMode, Toggle};
pub use settings::Settings;
pub use storage::{config_dir, ensure_config_dir, FileStore, KeyValueStore, MemoryStore};
pub use types::{FavoriteFilter, FavoriteSort};
pub use writer::PersistWorker;
