//! Favorites management
//!
//! The favorites collection: an ordered, id-unique list of recipe snapshots
//! held in memory and written back to a key-value slot after every change.

use crate::config::storage::FAVORITES_KEY;
use crate::data::storage::KeyValueStore;
use crate::data::types::{FavoriteFilter, FavoriteSort};
use crate::data::writer::PersistWorker;
use crate::error::{AppError, Result};
use mealbook::recipe::RecipeSnapshot;
use std::collections::HashSet;
use std::sync::Arc;

/// Where persistence writes run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// Write on the caller's thread before `toggle` returns
    Immediate,
    /// Hand writes to a background thread
    Background,
}

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

enum Persistence {
    Immediate(Arc<dyn KeyValueStore>),
    Background(PersistWorker),
}

/// Manages favorites in memory
///
/// Insertion order is the order shown to the user. The id index keeps
/// membership checks O(1) and is always in sync with `favorites`.
pub struct FavoritesStore {
    favorites: Vec<RecipeSnapshot>,
    ids: HashSet<String>,
    persistence: Persistence,
    /// Failures seen on this thread; the writer thread keeps its own count
    failures: u64,
}

impl FavoritesStore {
    /// Load favorites from `store`
    ///
    /// Never fails: a missing slot is an empty collection, and an unreadable
    /// or malformed slot is logged and also treated as empty.
    pub fn load(store: Arc<dyn KeyValueStore>, mode: PersistMode) -> Self {
        let favorites = match Self::read_collection(store.as_ref()) {
            Ok(favorites) => {
                tracing::info!(count = favorites.len(), "loaded favorites");
                favorites
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load favorites, starting empty");
                Vec::new()
            }
        };

        let persistence = match mode {
            PersistMode::Immediate => Persistence::Immediate(store),
            PersistMode::Background => match PersistWorker::spawn(Arc::clone(&store)) {
                Ok(worker) => Persistence::Background(worker),
                Err(e) => {
                    tracing::warn!(error = %e, "could not start writer thread, writing inline");
                    Persistence::Immediate(store)
                }
            },
        };

        let ids = favorites.iter().map(|f| f.id.clone()).collect();
        Self {
            favorites,
            ids,
            persistence,
            failures: 0,
        }
    }

    /// Read and parse the persisted collection
    ///
    /// Duplicate ids are collapsed, keeping the first occurrence.
    pub fn read_collection(store: &dyn KeyValueStore) -> Result<Vec<RecipeSnapshot>> {
        let Some(blob) = store.get(FAVORITES_KEY)? else {
            return Ok(Vec::new());
        };

        let parsed: Vec<RecipeSnapshot> =
            serde_json::from_str(&blob).map_err(|source| AppError::Deserialize {
                key: FAVORITES_KEY.to_string(),
                source,
            })?;

        let total = parsed.len();
        let mut seen = HashSet::with_capacity(total);
        let unique: Vec<RecipeSnapshot> = parsed
            .into_iter()
            .filter(|recipe| seen.insert(recipe.id.clone()))
            .collect();

        if unique.len() != total {
            tracing::warn!(
                dropped = total - unique.len(),
                "persisted favorites contained duplicate ids"
            );
        }

        Ok(unique)
    }

    /// Check if a recipe id is favorited
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Remove the recipe if it is a favorite, otherwise append it
    ///
    /// The in-memory collection reflects the change when this returns; the
    /// write to storage may still be in flight.
    pub fn toggle(&mut self, snapshot: RecipeSnapshot) -> Toggle {
        let outcome = if self.ids.remove(&snapshot.id) {
            self.favorites.retain(|f| f.id != snapshot.id);
            Toggle::Removed
        } else {
            self.ids.insert(snapshot.id.clone());
            self.favorites.push(snapshot);
            Toggle::Added
        };

        self.persist();
        outcome
    }

    /// Write the whole collection to storage
    fn persist(&mut self) {
        let value = match serde_json::to_string(&self.favorites) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize favorites");
                self.count_failure();
                return;
            }
        };

        match &self.persistence {
            Persistence::Immediate(store) => match store.set(FAVORITES_KEY, &value) {
                Ok(()) => tracing::debug!(count = self.favorites.len(), "persisted favorites"),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        "failed to persist favorites; change kept in memory only"
                    );
                    self.count_failure();
                }
            },
            Persistence::Background(worker) => worker.submit(FAVORITES_KEY, value),
        }
    }

    fn count_failure(&mut self) {
        self.failures += 1;
    }

    /// Block until queued writes have been attempted
    pub fn flush(&self) {
        if let Persistence::Background(worker) = &self.persistence {
            worker.flush();
        }
    }

    /// Number of persistence writes that failed in this session
    pub fn write_failures(&self) -> u64 {
        match &self.persistence {
            Persistence::Immediate(_) => self.failures,
            Persistence::Background(worker) => self.failures + worker.failures(),
        }
    }

    /// All favorites in the order they were added
    pub fn favorites(&self) -> &[RecipeSnapshot] {
        &self.favorites
    }

    /// Get a favorite by id
    pub fn get(&self, id: &str) -> Option<&RecipeSnapshot> {
        if !self.is_favorite(id) {
            return None;
        }
        self.favorites.iter().find(|f| f.id == id)
    }

    /// Get number of favorites
    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Get filtered favorites, in insertion order
    pub fn filtered(&self, filter: &FavoriteFilter) -> Vec<&RecipeSnapshot> {
        self.favorites.iter().filter(|f| filter.matches(f)).collect()
    }

    /// Get all favorites sorted
    pub fn sorted(&self, sort: FavoriteSort) -> Vec<&RecipeSnapshot> {
        self.query(&FavoriteFilter::default(), sort)
    }

    /// Get filtered and sorted favorites
    pub fn query(&self, filter: &FavoriteFilter, sort: FavoriteSort) -> Vec<&RecipeSnapshot> {
        let mut favorites = self.filtered(filter);

        match sort {
            FavoriteSort::Added => {}
            FavoriteSort::Name => {
                favorites.sort_by_key(|f| f.name.to_lowercase());
            }
            FavoriteSort::Category => {
                // Uncategorized recipes go last
                favorites.sort_by_key(|f| {
                    (
                        f.category.is_none(),
                        f.category.as_deref().unwrap_or_default().to_lowercase(),
                        f.name.to_lowercase(),
                    )
                });
            }
        }

        favorites
    }
}
