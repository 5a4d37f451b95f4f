// API client for the external recipe catalog
pub mod spoonacular;

// Re-export common types
pub use spoonacular::{
    SpoonacularClient, SpoonacularError, SpoonacularNutrient, SpoonacularRecipe,
    SpoonacularRecipeInfo,
};
