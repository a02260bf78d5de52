use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Router,
};
use tracing::instrument;

use crate::{
    auth::extractors::CurrentSession,
    diet::DietType,
    error::AppError,
    preferences::services::{effective_diet, load_user},
    recipes::services::{fetch_recipes, render_summaries},
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/fetch-recipes/:ingredients", get(fetch_for_user_diet))
        .route("/fetch-recipes/:ingredients/:diet", get(fetch_for_diet))
}

/// GET /fetch-recipes/:ingredients, filtered by the user's saved diet.
#[instrument(skip(state, session))]
pub async fn fetch_for_user_diet(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(ingredients): Path<String>,
) -> Result<Html<String>, AppError> {
    let user = load_user(&state, session.user_id).await?;
    let diet = effective_diet(&state, &user).await?;
    respond(&state, &ingredients, diet).await
}

/// GET /fetch-recipes/:ingredients/:diet. An unrecognized diet filters nothing.
#[instrument(skip(state, session))]
pub async fn fetch_for_diet(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path((ingredients, diet)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    let diet = DietType::parse_optional(&diet).ok().flatten();
    respond(&state, &ingredients, diet).await
}

async fn respond(
    state: &AppState,
    ingredients: &str,
    diet: Option<DietType>,
) -> Result<Html<String>, AppError> {
    let list: Vec<&str> = ingredients.split(',').collect();
    let recipes = fetch_recipes(
        state.recipes.as_ref(),
        &list,
        diet,
        state.config.recipe_api.search_limit,
    )
    .await?;
    Ok(Html(render_summaries(&recipes)))
}
