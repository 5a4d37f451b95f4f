use serde::{Deserialize, Serialize};
use thiserror::Error;

const SPOONACULAR_API_BASE: &str = "https://api.spoonacular.com";

#[derive(Error, Debug)]
pub enum SpoonacularError {
    #[error("API request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Daily quota exhausted")]
    QuotaExhausted,

    #[error("Recipe not found: {0}")]
    NotFound(u64),

    #[error("Authentication required - check your API key")]
    AuthRequired,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpoonacularError>;

/// Client for the Spoonacular recipe catalog.
///
/// Auth is a static API key passed as a query parameter. A missing or invalid
/// key surfaces as an error from the service (401), never a crash here.
pub struct SpoonacularClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl SpoonacularClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, SPOONACULAR_API_BASE.to_string())
    }

    /// For pointing at a mock server in tests
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("PlateScout/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Search recipes by free text plus optional diet/intolerance filters.
    ///
    /// `diet` and `intolerances` (pre-joined, comma-separated) are appended
    /// only when present - the service treats an empty filter parameter
    /// differently from an absent one.
    pub async fn search_recipes(
        &self,
        query: &str,
        diet: Option<&str>,
        intolerances: Option<&str>,
        number: u32,
    ) -> Result<Vec<SpoonacularRecipe>> {
        let url = format!("{}/recipes/complexSearch", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("query", query.to_string()),
            ("number", number.to_string()),
            ("addRecipeInformation", "true".to_string()),
            ("fillIngredients", "true".to_string()),
        ];
        if let Some(ref key) = self.api_key {
            params.push(("apiKey", key.clone()));
        }
        if let Some(diet) = diet {
            params.push(("diet", diet.to_string()));
        }
        if let Some(intolerances) = intolerances {
            params.push(("intolerances", intolerances.to_string()));
        }

        tracing::debug!(%url, query, "searching recipes");

        let response = self.client.get(&url).query(&params).send().await?;
        let response = check_status(response).await?;

        // A search with zero matches still returns 200 with an empty (or
        // absent) results field - that is not a failure.
        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.results)
    }

    /// Fetch an unfiltered random sample of recipes.
    pub async fn random_recipes(&self, number: u32) -> Result<Vec<SpoonacularRecipe>> {
        let url = format!("{}/recipes/random", self.base_url);

        let mut params: Vec<(&str, String)> = vec![("number", number.to_string())];
        if let Some(ref key) = self.api_key {
            params.push(("apiKey", key.clone()));
        }

        tracing::debug!(%url, number, "fetching random recipes");

        let response = self.client.get(&url).query(&params).send().await?;
        let response = check_status(response).await?;

        let parsed: RandomResponse = response.json().await?;
        Ok(parsed.recipes)
    }

    /// Full information plus nutrition for one recipe.
    pub async fn recipe_information(&self, id: u64) -> Result<SpoonacularRecipeInfo> {
        let url = format!("{}/recipes/{}/information", self.base_url, id);

        let mut params: Vec<(&str, String)> = vec![("includeNutrition", "true".to_string())];
        if let Some(ref key) = self.api_key {
            params.push(("apiKey", key.clone()));
        }

        tracing::debug!(%url, id, "fetching recipe information");

        let response = self.client.get(&url).query(&params).send().await?;

        if response.status() == 404 {
            return Err(SpoonacularError::NotFound(id));
        }

        let response = check_status(response).await?;

        let info: SpoonacularRecipeInfo = response.json().await?;
        Ok(info)
    }
}

/// Map non-success statuses onto the error enum.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();

    if status == 401 {
        return Err(SpoonacularError::AuthRequired);
    }

    // Spoonacular signals an exhausted daily quota with 402
    if status == 402 {
        return Err(SpoonacularError::QuotaExhausted);
    }

    if status == 429 {
        return Err(SpoonacularError::RateLimitExceeded);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SpoonacularError::RequestFailed {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

/// Recipe as it appears in search and random-sample responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpoonacularRecipe {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
}

/// Full recipe record from the information endpoint.
///
/// Everything past id/title is optional by design: the upstream schema is
/// third-party and partially populated, so decoding must tolerate any of
/// these fields going missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpoonacularRecipeInfo {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<SpoonacularIngredient>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub nutrition: Option<SpoonacularNutrition>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpoonacularIngredient {
    /// The display line, e.g. "2 cups flour, sifted"
    #[serde(default)]
    pub original: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoonacularNutrition {
    #[serde(default)]
    pub nutrients: Vec<SpoonacularNutrient>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoonacularNutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SpoonacularRecipe>,
}

#[derive(Debug, Deserialize)]
struct RandomResponse {
    #[serde(default)]
    recipes: Vec<SpoonacularRecipe>,
}
