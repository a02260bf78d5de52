use futures::future::try_join_all;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use crate::diet::{filter_ingredients, DietType};
use crate::error::AppError;
use crate::recipes::client::RecipeClient;
use crate::recipes::dto::{RecipeInformation, RecipeSummary, SearchQuery};

/// Filter the ingredients for `diet`, search, then fetch every hit's details concurrently.
///
/// Fails before any upstream call when filtering leaves nothing. Any upstream
/// failure fails the whole call; partial results are never returned.
pub async fn fetch_recipes<S: AsRef<str>>(
    client: &dyn RecipeClient,
    ingredients: &[S],
    diet: Option<DietType>,
    limit: u32,
) -> Result<Vec<RecipeSummary>, AppError> {
    let filtered = filter_ingredients(ingredients, diet);
    debug!(?filtered, diet = ?diet, "ingredients after diet filter");
    if filtered.is_empty() {
        return Err(AppError::NoValidIngredients);
    }

    let query = SearchQuery {
        ingredients: filtered,
        diet: diet.and_then(DietType::api_diet),
        intolerances: diet.and_then(DietType::api_intolerance),
        number: limit,
    };
    let hits = client.search(&query).await.map_err(AppError::Upstream)?;
    if hits.is_empty() {
        return Err(AppError::NoRecipes);
    }

    let details = try_join_all(hits.iter().map(|hit| client.information(hit.id)))
        .await
        .map_err(AppError::Upstream)?;

    info!(count = details.len(), "recipes fetched");
    Ok(details.into_iter().map(summarize).collect())
}

fn summarize(info: RecipeInformation) -> RecipeSummary {
    RecipeSummary {
        id: info.id,
        name: clean_recipe_name(&info.title),
        ready_in_minutes: info.ready_in_minutes,
        ingredients: info.extended_ingredients.into_iter().map(|i| i.name).collect(),
        instructions: info
            .instructions
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "No instructions provided.".into()),
    }
}

/// Strip the leading "How to Make " some titles carry.
pub fn clean_recipe_name(title: &str) -> String {
    lazy_static! {
        static ref HOW_TO: Regex = Regex::new(r"(?i)^how to make\s+").unwrap();
    }
    HOW_TO.replace(title.trim(), "").into_owned()
}

/// Render summaries as the preformatted text block served to the frontend.
pub fn render_summaries(recipes: &[RecipeSummary]) -> String {
    let blocks: Vec<String> = recipes
        .iter()
        .map(|r| {
            let minutes = r
                .ready_in_minutes
                .map(|m| format!("{m} minutes"))
                .unwrap_or_else(|| "unknown".into());
            format!(
                "Recipe Name: {}\nCooking Time: {}\nIngredients: {}\nInstructions: {}\n",
                r.name,
                minutes,
                r.ingredients.join(", "),
                r.instructions
            )
        })
        .collect();
    format!("<pre>{}</pre>", html_escape::encode_text(&blocks.join("\n\n")))
}
