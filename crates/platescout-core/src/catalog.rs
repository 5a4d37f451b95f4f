// Catalog facade - bridges the wire-level API client with our models
use platescout_api::{SpoonacularClient, SpoonacularError, SpoonacularRecipe, SpoonacularRecipeInfo};

use crate::{
    models::{Nutrient, RecipeDetail, RecipeSummary, SearchQuery},
    Error, Result,
};

/// Wrapper around the Spoonacular client that speaks internal models.
///
/// All three operations share one failure shape: the upstream catalog is a
/// third-party black box, so the only local decision is "usable payload or
/// not". No retry, no timeout - resilience belongs to call sites.
pub struct Catalog {
    client: SpoonacularClient,
}

impl Catalog {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: SpoonacularClient::new(api_key),
        }
    }

    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        Self {
            client: SpoonacularClient::with_base_url(api_key, base_url),
        }
    }

    /// Search the catalog with free text plus the query's filters
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>> {
        let recipes = self
            .client
            .search_recipes(
                &query.query,
                query.diet_param(),
                query.intolerances_param().as_deref(),
                query.number,
            )
            .await
            .map_err(map_api_err)?;

        Ok(recipes.into_iter().map(wire_to_summary).collect())
    }

    /// An unfiltered random sample
    pub async fn random(&self, number: u32) -> Result<Vec<RecipeSummary>> {
        let recipes = self
            .client
            .random_recipes(number)
            .await
            .map_err(map_api_err)?;

        Ok(recipes.into_iter().map(wire_to_summary).collect())
    }

    /// Full detail plus nutrition for one recipe. Fetched fresh per call,
    /// never cached.
    pub async fn details(&self, id: u64) -> Result<RecipeDetail> {
        let info = self
            .client
            .recipe_information(id)
            .await
            .map_err(map_api_err)?;

        Ok(wire_to_detail(info))
    }
}

fn map_api_err(e: SpoonacularError) -> Error {
    match e {
        SpoonacularError::NotFound(id) => Error::NotFound(id),
        other => Error::ApiError(other.to_string()),
    }
}

/// Convert a wire recipe to our internal summary model
fn wire_to_summary(wire: SpoonacularRecipe) -> RecipeSummary {
    RecipeSummary {
        id: wire.id,
        title: wire.title,
        image: wire.image,
        ready_in_minutes: wire.ready_in_minutes,
        servings: wire.servings,
    }
}

/// Convert the wire information record to the explicit optional-field detail
fn wire_to_detail(wire: SpoonacularRecipeInfo) -> RecipeDetail {
    RecipeDetail {
        id: wire.id,
        title: wire.title,
        image: wire.image,
        ready_in_minutes: wire.ready_in_minutes,
        servings: wire.servings,
        summary: wire.summary,
        ingredients: wire
            .extended_ingredients
            .into_iter()
            .map(|i| i.original)
            .filter(|line| !line.is_empty())
            .collect(),
        instructions: wire.instructions,
        nutrients: wire
            .nutrition
            .map(|nutrition| {
                nutrition
                    .nutrients
                    .into_iter()
                    .map(|n| Nutrient {
                        name: n.name,
                        amount: n.amount,
                        unit: n.unit,
                    })
                    .collect()
            })
            .unwrap_or_default(),
        source_url: wire.source_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_wire_detail_maps_to_empty_collections() {
        let wire: SpoonacularRecipeInfo =
            serde_json::from_str(r#"{"id": 9, "title": "Plain Rice"}"#).unwrap();
        let detail = wire_to_detail(wire);

        assert_eq!(detail.id, 9);
        assert!(detail.ingredients.is_empty());
        assert!(detail.nutrients.is_empty());
        assert!(detail.source_url.is_none());
    }

    #[test]
    fn wire_detail_maps_ingredient_lines_and_nutrients() {
        let wire: SpoonacularRecipeInfo = serde_json::from_str(
            r#"{
                "id": 9,
                "title": "Plain Rice",
                "extendedIngredients": [{"original": "1 cup rice"}, {"original": ""}],
                "nutrition": {"nutrients": [{"name": "Calories", "amount": 206.0, "unit": "kcal"}]}
            }"#,
        )
        .unwrap();
        let detail = wire_to_detail(wire);

        assert_eq!(detail.ingredients, vec!["1 cup rice"]);
        assert_eq!(detail.nutrients.len(), 1);
        assert_eq!(detail.nutrients[0].name, "Calories");
    }

    #[tokio::test]
    async fn unreachable_catalog_maps_to_api_error() {
        let catalog = Catalog::with_base_url(None, "http://127.0.0.1:1".to_string());
        let result = catalog.random(1).await;
        assert!(matches!(result, Err(Error::ApiError(_))));
    }
}
