use serde::Deserialize;

/// One hit from the ingredient search endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtendedIngredient {
    pub name: String,
}

/// The parts of the recipe information payload we use.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<ExtendedIngredient>,
}

/// Parameters of one ingredient search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub ingredients: Vec<String>,
    pub diet: Option<&'static str>,
    pub intolerances: Option<&'static str>,
    pub number: u32,
}

/// What the gateway hands back per recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: u64,
    pub name: String,
    pub ready_in_minutes: Option<u32>,
    pub ingredients: Vec<String>,
    pub instructions: String,
}
