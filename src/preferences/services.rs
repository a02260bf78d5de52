use tracing::info;
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::diet::DietType;
use crate::error::AppError;
use crate::sessions::Session;
use crate::state::AppState;

pub async fn load_user(state: &AppState, user_id: Uuid) -> Result<User, AppError> {
    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User"))
}

/// The diet that applies to a user's searches: the restriction row wins over
/// the preference captured at signup.
pub async fn effective_diet(state: &AppState, user: &User) -> Result<Option<DietType>, AppError> {
    match state.restrictions.find(user.id).await? {
        Some(r) => Ok(DietType::parse_optional(&r.restriction_name).ok().flatten()),
        None => Ok(user.diet()),
    }
}

/// Record a new diet label for the session's user, everywhere it is kept.
pub async fn save_diet(
    state: &AppState,
    session: &Session,
    label: &str,
) -> Result<Option<DietType>, AppError> {
    let diet =
        DietType::parse_optional(label).map_err(|e| AppError::Validation(e.to_string()))?;
    let user = load_user(state, session.user_id).await?;

    let saved = state
        .restrictions
        .save_diet(user.id, diet)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    state
        .sessions
        .set_diet_type(&session.id, diet.map(DietType::as_str))
        .await?;

    info!(user_id = %user.id, diet = %saved.restriction_name, "diet preference saved");
    Ok(diet)
}
