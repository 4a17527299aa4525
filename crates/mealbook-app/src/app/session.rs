//! Recipe browsing session
//!
//! Owns the favorites store and the catalog provider that presentation
//! surfaces query. Every list it hands out is annotated with favorite state
//! so views never have to cross-reference the store themselves.

use crate::data::favorites::{FavoritesStore, PersistMode, Toggle};
use crate::data::storage::KeyValueStore;
use crate::data::types::{FavoriteFilter, FavoriteSort};
use crate::error::{AppError, Result};
use crate::providers::{Category, RecipeProvider};
use mealbook::recipe::RecipeSnapshot;
use std::sync::Arc;

/// A recipe as shown in a list or detail view
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCard {
    pub snapshot: RecipeSnapshot,
    pub favorited: bool,
}

/// Which listing the home view shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeListing {
    /// Name search
    Search(String),
    /// All recipes in a category
    Category(String),
    /// Provider's default listing
    Default,
}

impl HomeListing {
    /// A non-blank search query wins over the selected category
    pub fn select(query: &str, category: Option<&str>) -> Self {
        let query = query.trim();
        if !query.is_empty() {
            return HomeListing::Search(query.to_string());
        }
        match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(category) => HomeListing::Category(category.to_string()),
            None => HomeListing::Default,
        }
    }
}

pub struct RecipeSession {
    provider: Box<dyn RecipeProvider>,
    favorites: FavoritesStore,
}

impl RecipeSession {
    pub fn new(provider: Box<dyn RecipeProvider>, favorites: FavoritesStore) -> Self {
        Self {
            provider,
            favorites,
        }
    }

    /// Load favorites from `store` and start a session over `provider`
    pub fn open(
        provider: Box<dyn RecipeProvider>,
        store: Arc<dyn KeyValueStore>,
        mode: PersistMode,
    ) -> Self {
        Self::new(provider, FavoritesStore::load(store, mode))
    }

    /// Read-only access to the favorites collection
    pub fn store(&self) -> &FavoritesStore {
        &self.favorites
    }

    fn card(&self, snapshot: RecipeSnapshot) -> RecipeCard {
        let favorited = self.favorites.is_favorite(&snapshot.id);
        RecipeCard {
            snapshot,
            favorited,
        }
    }

    fn cards(&self, recipes: Vec<RecipeSnapshot>) -> Vec<RecipeCard> {
        recipes.into_iter().map(|r| self.card(r)).collect()
    }

    /// Recipes for the home view
    pub fn home(&self, query: &str, category: Option<&str>) -> Result<Vec<RecipeCard>> {
        let listing = HomeListing::select(query, category);
        tracing::debug!(?listing, provider = self.provider.id(), "fetching home listing");

        let recipes = match &listing {
            HomeListing::Search(query) => self.provider.search(query)?,
            HomeListing::Category(category) => self.provider.by_category(category)?,
            HomeListing::Default => self.provider.search("")?,
        };
        Ok(self.cards(recipes))
    }

    /// Recipe categories
    pub fn categories(&self) -> Result<Vec<Category>> {
        self.provider.categories()
    }

    /// Full details of one recipe
    pub fn recipe(&self, id: &str) -> Result<RecipeCard> {
        let recipe = self
            .provider
            .lookup(id)?
            .ok_or_else(|| AppError::NotFound(format!("recipe {id}")))?;
        Ok(self.card(recipe))
    }

    /// Favorites in the order they were added
    pub fn favorites(&self) -> Vec<RecipeCard> {
        self.favorites_query(&FavoriteFilter::default(), FavoriteSort::Added)
    }

    /// Filtered and sorted favorites
    pub fn favorites_query(&self, filter: &FavoriteFilter, sort: FavoriteSort) -> Vec<RecipeCard> {
        self.favorites
            .query(filter, sort)
            .into_iter()
            .map(|snapshot| RecipeCard {
                snapshot: snapshot.clone(),
                favorited: true,
            })
            .collect()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Toggle a recipe the caller already holds
    pub fn toggle_favorite(&mut self, snapshot: RecipeSnapshot) -> Toggle {
        let id = snapshot.id.clone();
        let outcome = self.favorites.toggle(snapshot);
        tracing::info!(id = %id, ?outcome, "toggled favorite");
        outcome
    }

    /// Toggle a recipe by id
    ///
    /// Removing uses the stored snapshot and needs no network. Adding looks
    /// the recipe up first so the full snapshot is captured.
    pub fn toggle_by_id(&mut self, id: &str) -> Result<Toggle> {
        let snapshot = match self.favorites.get(id) {
            Some(stored) => stored.clone(),
            None => self.recipe(id)?.snapshot,
        };
        Ok(self.toggle_favorite(snapshot))
    }

    /// Block until pending favorites writes have been attempted
    pub fn flush(&self) {
        self.favorites.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::storage::MemoryStore;
    use mealbook::error::RecipeError;
    use std::sync::Mutex;

    /// A mock provider backed by a fixed recipe list
    struct MockProvider {
        recipes: Vec<RecipeSnapshot>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockProvider {
        fn new(calls: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                recipes: vec![
                    RecipeSnapshot::new("52772", "Teriyaki Chicken Casserole")
                        .with_category("Chicken")
                        .with_area("Japanese"),
                    RecipeSnapshot::new("52977", "Corba")
                        .with_category("Side")
                        .with_area("Turkish"),
                    RecipeSnapshot::new("52795", "Chicken Handi")
                        .with_category("Chicken")
                        .with_area("Indian"),
                ],
                calls,
            }
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl RecipeProvider for MockProvider {
        fn name(&self) -> &'static str {
            "Mock Provider"
        }

        fn id(&self) -> &'static str {
            "mock"
        }

        fn search(&self, query: &str) -> Result<Vec<RecipeSnapshot>> {
            self.record(format!("search:{query}"));
            let query_lower = query.to_lowercase();
            Ok(self
                .recipes
                .iter()
                .filter(|r| r.name.to_lowercase().contains(&query_lower))
                .cloned()
                .collect())
        }

        fn categories(&self) -> Result<Vec<Category>> {
            self.record("categories".to_string());
            Ok(vec![Category::new("2", "Chicken"), Category::new("8", "Side")])
        }

        fn by_category(&self, category: &str) -> Result<Vec<RecipeSnapshot>> {
            self.record(format!("category:{category}"));
            // Listings only carry id and name, like the real catalog
            Ok(self
                .recipes
                .iter()
                .filter(|r| r.category.as_deref() == Some(category))
                .map(|r| RecipeSnapshot::new(r.id.clone(), r.name.clone()))
                .collect())
        }

        fn lookup(&self, id: &str) -> Result<Option<RecipeSnapshot>> {
            self.record(format!("lookup:{id}"));
            Ok(self.recipes.iter().find(|r| r.id == id).cloned())
        }
    }

    /// A provider whose every call fails
    struct FailingProvider;

    impl RecipeProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "Failing Provider"
        }

        fn id(&self) -> &'static str {
            "failing"
        }

        fn search(&self, _query: &str) -> Result<Vec<RecipeSnapshot>> {
            Err(RecipeError::Api("service unavailable".to_string()).into())
        }

        fn categories(&self) -> Result<Vec<Category>> {
            Err(RecipeError::Api("service unavailable".to_string()).into())
        }

        fn by_category(&self, _category: &str) -> Result<Vec<RecipeSnapshot>> {
            Err(RecipeError::Api("service unavailable".to_string()).into())
        }

        fn lookup(&self, _id: &str) -> Result<Option<RecipeSnapshot>> {
            Err(RecipeError::Api("service unavailable".to_string()).into())
        }
    }

    fn session() -> (RecipeSession, Arc<Mutex<Vec<String>>>, Arc<MemoryStore>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let backend = Arc::new(MemoryStore::new());
        let session = RecipeSession::open(
            Box::new(MockProvider::new(calls.clone())),
            backend.clone(),
            PersistMode::Immediate,
        );
        (session, calls, backend)
    }

    fn last_call(calls: &Arc<Mutex<Vec<String>>>) -> String {
        calls.lock().unwrap().last().cloned().unwrap_or_default()
    }

    #[test]
    fn test_home_listing_selection() {
        assert_eq!(
            HomeListing::select("curry", Some("Chicken")),
            HomeListing::Search("curry".to_string())
        );
        assert_eq!(
            HomeListing::select("  ", Some("Chicken")),
            HomeListing::Category("Chicken".to_string())
        );
        assert_eq!(HomeListing::select("", Some(" ")), HomeListing::Default);
        assert_eq!(HomeListing::select("", None), HomeListing::Default);
    }

    #[test]
    fn test_home_search_wins_over_category() {
        let (session, calls, _) = session();

        let cards = session.home("corba", Some("Chicken")).unwrap();

        assert_eq!(last_call(&calls), "search:corba");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].snapshot.id, "52977");
    }

    #[test]
    fn test_home_category_listing() {
        let (session, calls, _) = session();

        let cards = session.home("", Some("Chicken")).unwrap();

        assert_eq!(last_call(&calls), "category:Chicken");
        let ids: Vec<_> = cards.iter().map(|c| c.snapshot.id.as_str()).collect();
        assert_eq!(ids, vec!["52772", "52795"]);
    }

    #[test]
    fn test_home_default_listing() {
        let (session, calls, _) = session();
        let cards = session.home("", None).unwrap();
        assert_eq!(last_call(&calls), "search:");
        assert_eq!(cards.len(), 3);
    }

    #[test]
    fn test_cards_reflect_favorites() {
        let (mut session, _, _) = session();
        session.toggle_favorite(RecipeSnapshot::new("52977", "Corba"));

        let cards = session.home("", None).unwrap();

        for card in cards {
            assert_eq!(card.favorited, card.snapshot.id == "52977");
        }
    }

    #[test]
    fn test_recipe_detail() {
        let (mut session, _, _) = session();

        let card = session.recipe("52772").unwrap();
        assert!(!card.favorited);
        assert_eq!(card.snapshot.area.as_deref(), Some("Japanese"));

        session.toggle_favorite(card.snapshot);
        assert!(session.recipe("52772").unwrap().favorited);
    }

    #[test]
    fn test_recipe_not_found() {
        let (session, _, _) = session();
        let err = session.recipe("1").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_toggle_by_id_adds_full_snapshot() {
        let (mut session, calls, _) = session();

        assert_eq!(session.toggle_by_id("52795").unwrap(), Toggle::Added);

        assert_eq!(last_call(&calls), "lookup:52795");
        let favorites = session.favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].snapshot.area.as_deref(), Some("Indian"));
        assert!(favorites[0].favorited);
    }

    #[test]
    fn test_toggle_by_id_removes_without_lookup() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = FavoritesStore::load(backend, PersistMode::Immediate);
        store.toggle(RecipeSnapshot::new("52772", "Teriyaki Chicken"));
        // Any lookup would fail
        let mut session = RecipeSession::new(Box::new(FailingProvider), store);

        assert_eq!(session.toggle_by_id("52772").unwrap(), Toggle::Removed);
        assert!(!session.is_favorite("52772"));
    }

    #[test]
    fn test_toggle_by_id_unknown_recipe() {
        let (mut session, _, _) = session();
        assert!(session.toggle_by_id("1").is_err());
        assert!(session.favorites().is_empty());
    }

    #[test]
    fn test_provider_errors_propagate() {
        let backend = Arc::new(MemoryStore::new());
        let session = RecipeSession::open(Box::new(FailingProvider), backend, PersistMode::Immediate);

        assert!(session.home("chicken", None).is_err());
        assert!(session.categories().is_err());
        assert!(session.recipe("52772").is_err());
        // Favorites stay usable offline
        assert!(session.favorites().is_empty());
    }

    #[test]
    fn test_favorites_query() {
        let (mut session, _, _) = session();
        session.toggle_by_id("52772").unwrap();
        session.toggle_by_id("52977").unwrap();
        session.toggle_by_id("52795").unwrap();

        let chicken = session.favorites_query(
            &FavoriteFilter::new().category("chicken"),
            FavoriteSort::Name,
        );
        let names: Vec<_> = chicken.iter().map(|c| c.snapshot.name.as_str()).collect();
        assert_eq!(names, vec!["Chicken Handi", "Teriyaki Chicken Casserole"]);
    }

    #[test]
    fn test_toggles_persist_across_sessions() {
        let (mut session, _, backend) = session();
        session.toggle_by_id("52977").unwrap();
        session.toggle_by_id("52772").unwrap();
        session.flush();
        drop(session);

        let reopened = RecipeSession::open(Box::new(FailingProvider), backend, PersistMode::Background);
        let ids: Vec<_> = reopened
            .favorites()
            .into_iter()
            .map(|c| c.snapshot.id)
            .collect();
        assert_eq!(ids, vec!["52977", "52772"]);
    }

    #[test]
    fn test_categories() {
        let (session, _, _) = session();
        let names: Vec<_> = session.categories().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Chicken", "Side"]);
    }
}
