use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Recipe summary - the unit stored in favorites and shown in list views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    /// Catalog identifier, the sole deduplication key
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
}

/// A favorited recipe: summary fields plus the moment it was saved.
///
/// `saved_at` is stamped inside the favorites store and never updated
/// afterwards. Optionals carry `#[serde(default)]` so entries written by an
/// older build keep parsing when fields are added later - there is no schema
/// versioning on the persisted collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    pub saved_at: DateTime<Utc>,
}

impl SavedRecipe {
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
        }
    }
}

/// Full recipe record, fetched on demand per view and never cached.
///
/// Everything past id/title is optional: the upstream catalog populates
/// these fields inconsistently, so the model makes that explicit instead of
/// passing an unvalidated third-party shape around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    /// Rich-text overview (may contain HTML markup from the catalog)
    pub summary: Option<String>,
    /// Ordered free-text ingredient lines
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub nutrients: Vec<Nutrient>,
    pub source_url: Option<String>,
}

impl RecipeDetail {
    pub fn to_summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// Diet tags understood by the catalog - fixed and closed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DietTag {
    GlutenFree,
    Ketogenic,
    Vegetarian,
    LactoVegetarian,
    OvoVegetarian,
    Vegan,
    Pescetarian,
    Paleo,
    Primal,
    LowFodmap,
    Whole30,
}

impl DietTag {
    /// The value the catalog expects in the `diet` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            DietTag::GlutenFree => "gluten-free",
            DietTag::Ketogenic => "ketogenic",
            DietTag::Vegetarian => "vegetarian",
            DietTag::LactoVegetarian => "lacto-vegetarian",
            DietTag::OvoVegetarian => "ovo-vegetarian",
            DietTag::Vegan => "vegan",
            DietTag::Pescetarian => "pescetarian",
            DietTag::Paleo => "paleo",
            DietTag::Primal => "primal",
            DietTag::LowFodmap => "low-fodmap",
            DietTag::Whole30 => "whole30",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            DietTag::GlutenFree => "Gluten Free",
            DietTag::Ketogenic => "Ketogenic",
            DietTag::Vegetarian => "Vegetarian",
            DietTag::LactoVegetarian => "Lacto-Vegetarian",
            DietTag::OvoVegetarian => "Ovo-Vegetarian",
            DietTag::Vegan => "Vegan",
            DietTag::Pescetarian => "Pescetarian",
            DietTag::Paleo => "Paleo",
            DietTag::Primal => "Primal",
            DietTag::LowFodmap => "Low FODMAP",
            DietTag::Whole30 => "Whole30",
        }
    }

    pub fn all() -> Vec<DietTag> {
        vec![
            DietTag::GlutenFree,
            DietTag::Ketogenic,
            DietTag::Vegetarian,
            DietTag::LactoVegetarian,
            DietTag::OvoVegetarian,
            DietTag::Vegan,
            DietTag::Pescetarian,
            DietTag::Paleo,
            DietTag::Primal,
            DietTag::LowFodmap,
            DietTag::Whole30,
        ]
    }
}

impl std::fmt::Display for DietTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DietTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        DietTag::all()
            .into_iter()
            .find(|tag| tag.as_str() == lower)
            .ok_or_else(|| format!("unknown diet '{}' (expected one of: {})", s, known_diets()))
    }
}

fn known_diets() -> String {
    DietTag::all()
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Intolerance tags understood by the catalog - fixed and closed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Intolerance {
    Dairy,
    Egg,
    Gluten,
    Grain,
    Peanut,
    Seafood,
    Sesame,
    Shellfish,
    Soy,
    Sulfite,
    TreeNut,
    Wheat,
}

impl Intolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intolerance::Dairy => "dairy",
            Intolerance::Egg => "egg",
            Intolerance::Gluten => "gluten",
            Intolerance::Grain => "grain",
            Intolerance::Peanut => "peanut",
            Intolerance::Seafood => "seafood",
            Intolerance::Sesame => "sesame",
            Intolerance::Shellfish => "shellfish",
            Intolerance::Soy => "soy",
            Intolerance::Sulfite => "sulfite",
            Intolerance::TreeNut => "tree-nut",
            Intolerance::Wheat => "wheat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intolerance::Dairy => "Dairy",
            Intolerance::Egg => "Egg",
            Intolerance::Gluten => "Gluten",
            Intolerance::Grain => "Grain",
            Intolerance::Peanut => "Peanut",
            Intolerance::Seafood => "Seafood",
            Intolerance::Sesame => "Sesame",
            Intolerance::Shellfish => "Shellfish",
            Intolerance::Soy => "Soy",
            Intolerance::Sulfite => "Sulfite",
            Intolerance::TreeNut => "Tree Nut",
            Intolerance::Wheat => "Wheat",
        }
    }

    pub fn all() -> Vec<Intolerance> {
        vec![
            Intolerance::Dairy,
            Intolerance::Egg,
            Intolerance::Gluten,
            Intolerance::Grain,
            Intolerance::Peanut,
            Intolerance::Seafood,
            Intolerance::Sesame,
            Intolerance::Shellfish,
            Intolerance::Soy,
            Intolerance::Sulfite,
            Intolerance::TreeNut,
            Intolerance::Wheat,
        ]
    }
}

impl std::fmt::Display for Intolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Intolerance {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Intolerance::all()
            .into_iter()
            .find(|tag| tag.as_str() == lower)
            .ok_or_else(|| {
                let known = Intolerance::all()
                    .iter()
                    .map(|i| i.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("unknown intolerance '{}' (expected one of: {})", s, known)
            })
    }
}

/// Search intent: free text plus structured filters
///
/// Transient, never persisted. An empty query string is a valid, if unusual,
/// search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub diet: Option<DietTag>,
    pub intolerances: Vec<Intolerance>,
    /// Result-count cap
    pub number: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            diet: None,
            intolerances: Vec::new(),
            number: 12,
        }
    }
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn diet(mut self, diet: DietTag) -> Self {
        self.diet = Some(diet);
        self
    }

    /// Add an intolerance, skipping duplicates
    pub fn intolerance(mut self, intolerance: Intolerance) -> Self {
        if !self.intolerances.contains(&intolerance) {
            self.intolerances.push(intolerance);
        }
        self
    }

    pub fn number(mut self, number: u32) -> Self {
        self.number = number;
        self
    }

    /// The `diet` request parameter, absent when no diet is selected
    pub fn diet_param(&self) -> Option<&'static str> {
        self.diet.map(|d| d.as_str())
    }

    /// The comma-joined `intolerances` request parameter, absent when the
    /// set is empty (the catalog treats an empty value as a filter, not as
    /// "no filter")
    pub fn intolerances_param(&self) -> Option<String> {
        if self.intolerances.is_empty() {
            return None;
        }
        Some(
            self.intolerances
                .iter()
                .map(|i| i.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_compose_into_request_params() {
        let query = SearchQuery::new("pasta")
            .diet(DietTag::Vegan)
            .intolerance(Intolerance::Gluten)
            .intolerance(Intolerance::Dairy);

        assert_eq!(query.query, "pasta");
        assert_eq!(query.diet_param(), Some("vegan"));
        assert_eq!(query.intolerances_param().as_deref(), Some("gluten,dairy"));
    }

    #[test]
    fn empty_filters_are_omitted_entirely() {
        let query = SearchQuery::new("pasta");
        assert_eq!(query.diet_param(), None);
        assert_eq!(query.intolerances_param(), None);
    }

    #[test]
    fn duplicate_intolerances_are_not_accumulated() {
        let query = SearchQuery::new("stew")
            .intolerance(Intolerance::Soy)
            .intolerance(Intolerance::Soy);
        assert_eq!(query.intolerances_param().as_deref(), Some("soy"));
    }

    #[test]
    fn diet_tags_round_trip_through_from_str() {
        for tag in DietTag::all() {
            assert_eq!(tag.as_str().parse::<DietTag>(), Ok(tag));
        }
        assert!("carnivore".parse::<DietTag>().is_err());
    }

    #[test]
    fn intolerances_round_trip_through_from_str() {
        for tag in Intolerance::all() {
            assert_eq!(tag.as_str().parse::<Intolerance>(), Ok(tag));
        }
        // Parsing is case-insensitive for CLI convenience
        assert_eq!("Tree-Nut".parse::<Intolerance>(), Ok(Intolerance::TreeNut));
    }

    #[test]
    fn serialized_tags_match_their_wire_values() {
        // The serde form and as_str must agree, including the awkward
        // cases: tree-nut, low-fodmap, whole30
        for tag in DietTag::all() {
            assert_eq!(serde_json::to_value(tag).unwrap(), tag.as_str());
        }
        for tag in Intolerance::all() {
            assert_eq!(serde_json::to_value(tag).unwrap(), tag.as_str());
        }
    }

    #[test]
    fn saved_recipe_tolerates_entries_missing_optional_fields() {
        let entry: SavedRecipe = serde_json::from_str(
            r#"{"id": 7, "title": "Toast", "savedAt": "2026-08-30T12:00:00Z"}"#,
        )
        .unwrap();
        assert!(entry.image.is_none());
        assert!(entry.ready_in_minutes.is_none());
    }
}
