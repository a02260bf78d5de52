use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    auth::{
        dto::MessageResponse,
        extractors::{CurrentSession, JsonBody},
    },
    diet::NOT_SET,
    error::AppError,
    preferences::services,
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietTypeBody {
    #[serde(default)]
    pub diet_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionResponse {
    pub restriction_name: String,
}

pub fn preference_routes() -> Router<AppState> {
    Router::new()
        .route("/api/user-preferences", get(get_preferences))
        .route("/api/save-preferences", post(save_preferences))
        .route("/api/user-restrictions", get(get_restrictions))
}

#[instrument(skip(state, session))]
pub async fn get_preferences(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<DietTypeBody>, AppError> {
    let user = services::load_user(&state, session.user_id).await?;
    let diet_type = user
        .diet()
        .map(|d| d.as_str().to_string())
        .unwrap_or_else(|| NOT_SET.to_string());
    Ok(Json(DietTypeBody { diet_type }))
}

#[instrument(skip(state, session))]
pub async fn save_preferences(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    JsonBody(body): JsonBody<DietTypeBody>,
) -> Result<Json<MessageResponse>, AppError> {
    services::save_diet(&state, &session, &body.diet_type).await?;
    Ok(Json(MessageResponse::new("Preferences saved successfully!")))
}

#[instrument(skip(state, session))]
pub async fn get_restrictions(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<RestrictionResponse>, AppError> {
    let user = services::load_user(&state, session.user_id).await?;
    let restriction_name = state
        .restrictions
        .find(user.id)
        .await?
        .map(|r| r.restriction_name)
        .unwrap_or_else(|| NOT_SET.to_string());
    Ok(Json(RestrictionResponse { restriction_name }))
}
