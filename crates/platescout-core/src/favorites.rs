use chrono::Utc;

use crate::models::{RecipeSummary, SavedRecipe};
use crate::storage::FavoritesStorage;

/// Well-known storage key holding the serialized favorites collection
pub const FAVORITES_KEY: &str = "favorites";

/// Outcome of a toggle: the resulting collection plus which branch ran,
/// so callers can react (e.g. flash a heart) without re-querying membership
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub favorites: Vec<SavedRecipe>,
    pub added: bool,
}

/// Locally persisted, deduplicated collection of saved recipes.
///
/// Load-on-demand, write-on-mutation: every operation reads the whole
/// collection and mutating ones overwrite it whole. Recipe id is the sole
/// dedup key. Persistence trouble is never an error here - a missing or
/// unparseable value reads as empty, and a failed write is logged and
/// swallowed, because callers cannot distinguish "empty" from "unavailable"
/// and must behave identically either way.
///
/// Assumes a single writer; two processes over the same file are on their own.
pub struct FavoritesStore<S: FavoritesStorage> {
    storage: S,
    key: String,
}

impl<S: FavoritesStorage> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, FAVORITES_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The full persisted collection, in insertion order. Never errors.
    pub fn favorites(&self) -> Vec<SavedRecipe> {
        let bytes = match self.storage.read(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read favorites, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!(error = %e, "stored favorites did not parse, treating as empty");
                Vec::new()
            }
        }
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites().iter().any(|f| f.id == id)
    }

    /// Save a recipe. Idempotent: if the id is already present the collection
    /// comes back unchanged - no reorder, no timestamp refresh, no rewrite.
    pub fn add(&self, recipe: &RecipeSummary) -> Vec<SavedRecipe> {
        let mut favorites = self.favorites();

        if favorites.iter().any(|f| f.id == recipe.id) {
            return favorites;
        }

        favorites.push(SavedRecipe {
            id: recipe.id,
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
            saved_at: Utc::now(),
        });

        self.persist(&favorites);
        favorites
    }

    /// Drop any entry matching `id`. An absent id is a no-op, not an error.
    pub fn remove(&self, id: u64) -> Vec<SavedRecipe> {
        let mut favorites = self.favorites();
        favorites.retain(|f| f.id != id);
        self.persist(&favorites);
        favorites
    }

    /// Add or remove depending on current membership
    pub fn toggle(&self, recipe: &RecipeSummary) -> ToggleOutcome {
        if self.is_favorite(recipe.id) {
            ToggleOutcome {
                favorites: self.remove(recipe.id),
                added: false,
            }
        } else {
            ToggleOutcome {
                favorites: self.add(recipe),
                added: true,
            }
        }
    }

    fn persist(&self, favorites: &[SavedRecipe]) {
        let bytes = match serde_json::to_vec(favorites) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "could not serialize favorites, skipping write");
                return;
            }
        };

        if let Err(e) = self.storage.write(&self.key, &bytes) {
            tracing::warn!(error = %e, "could not persist favorites");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, MockFavoritesStorage, NullStorage};
    use chrono::{TimeZone, Utc};
    use std::io;

    fn recipe(id: u64) -> RecipeSummary {
        RecipeSummary {
            id,
            title: format!("Recipe {}", id),
            image: Some(format!("https://img.example/{}.jpg", id)),
            ready_in_minutes: Some(30),
            servings: Some(4),
        }
    }

    fn saved(id: u64) -> SavedRecipe {
        SavedRecipe {
            id,
            title: format!("Recipe {}", id),
            image: None,
            ready_in_minutes: Some(30),
            servings: Some(4),
            saved_at: Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_substrate_reads_as_empty_collection() {
        let store = FavoritesStore::new(MemoryStorage::new());
        assert!(store.favorites().is_empty());
        assert!(!store.is_favorite(1));
    }

    #[test]
    fn corrupt_data_reads_as_empty_collection() {
        let storage = MemoryStorage::seeded(FAVORITES_KEY, b"definitely not json");
        let store = FavoritesStore::new(storage);
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn add_then_read_round_trips() {
        let store = FavoritesStore::new(MemoryStorage::new());
        let favorites = store.add(&recipe(1));

        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, 1);
        assert_eq!(favorites[0].title, "Recipe 1");
        assert!(store.is_favorite(1));
    }

    #[test]
    fn add_is_idempotent_and_preserves_timestamp() {
        let store = FavoritesStore::new(MemoryStorage::new());
        let first = store.add(&recipe(1));
        let second = store.add(&recipe(1));

        assert_eq!(second.len(), 1);
        // The second call must not overwrite the original saved-at stamp
        assert_eq!(first[0].saved_at, second[0].saved_at);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let store = FavoritesStore::new(MemoryStorage::new());
        store.add(&recipe(3));
        store.add(&recipe(1));
        store.add(&recipe(2));

        let ids: Vec<u64> = store.favorites().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn remove_of_absent_id_is_a_noop() {
        let store = FavoritesStore::new(MemoryStorage::new());
        store.add(&recipe(1));

        let favorites = store.remove(2);
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, 1);
    }

    #[test]
    fn remove_of_absent_id_rewrites_collection_unchanged() {
        let seeded = serde_json::to_vec(&vec![saved(1)]).unwrap();
        let read_copy = seeded.clone();
        let expected = seeded.clone();

        let mut mock = MockFavoritesStorage::new();
        mock.expect_read()
            .returning(move |_| Ok(Some(read_copy.clone())));
        mock.expect_write()
            .withf(move |_, data| data == expected.as_slice())
            .times(1)
            .returning(|_, _| Ok(()));

        let store = FavoritesStore::new(mock);
        let favorites = store.remove(2);
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn toggle_twice_returns_to_original_state() {
        let store = FavoritesStore::new(MemoryStorage::new());

        let first = store.toggle(&recipe(7));
        assert!(first.added);
        assert_eq!(first.favorites.len(), 1);

        let second = store.toggle(&recipe(7));
        assert!(!second.added);
        assert!(second.favorites.is_empty());
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn no_two_entries_ever_share_an_id() {
        let store = FavoritesStore::new(MemoryStorage::new());
        store.add(&recipe(1));
        store.add(&recipe(2));
        store.add(&recipe(1));
        store.remove(2);
        store.add(&recipe(2));
        store.toggle(&recipe(3));
        store.add(&recipe(3));

        let favorites = store.favorites();
        let mut ids: Vec<u64> = favorites.iter().map(|f| f.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), favorites.len());
    }

    #[test]
    fn null_storage_behaves_like_an_empty_collection() {
        let store = FavoritesStore::new(NullStorage);

        assert!(store.favorites().is_empty());
        let favorites = store.add(&recipe(1));
        // The returned collection reflects the add even though nothing stuck
        assert_eq!(favorites.len(), 1);
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn read_errors_are_swallowed() {
        let mut mock = MockFavoritesStorage::new();
        mock.expect_read()
            .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope")));

        let store = FavoritesStore::new(mock);
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn write_errors_are_swallowed() {
        let mut mock = MockFavoritesStorage::new();
        mock.expect_read().returning(|_| Ok(None));
        mock.expect_write()
            .returning(|_, _| Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope")));

        let store = FavoritesStore::new(mock);
        let favorites = store.add(&recipe(1));
        assert_eq!(favorites.len(), 1);
    }
}
