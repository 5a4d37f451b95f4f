// Core business logic lives here - the brain of the operation
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod storage;

pub use catalog::Catalog;
pub use config::Config;
pub use error::Error;
pub use favorites::{FavoritesStore, ToggleOutcome, FAVORITES_KEY};
pub use models::{
    DietTag, Intolerance, Nutrient, RecipeDetail, RecipeSummary, SavedRecipe, SearchQuery,
};
pub use storage::{FavoritesStorage, FileStorage, MemoryStorage, NullStorage};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
