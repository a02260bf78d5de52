use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid token or user already verified")]
    InvalidToken,

    #[error("No active session")]
    NoActiveSession,

    #[error("No valid ingredients were provided after filtering.")]
    NoValidIngredients,

    #[error("User not authenticated")]
    Unauthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not confirmed. Please check your inbox.")]
    EmailNotConfirmed,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("No recipes found.")]
    NoRecipes,

    #[error("Error sending confirmation email")]
    Mail(#[source] anyhow::Error),

    #[error("Error fetching recipes from API.")]
    Upstream(#[source] anyhow::Error),

    #[error("Server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::DuplicateUser
            | AppError::InvalidToken
            | AppError::NoActiveSession
            | AppError::NoValidIngredients => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::EmailNotConfirmed => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::NoRecipes => StatusCode::NOT_FOUND,
            AppError::Mail(_) | AppError::Upstream(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Mail(e) | AppError::Upstream(e) | AppError::Internal(e) => {
                error!(error = %format!("{e:#}"), %status, "request failed");
            }
            _ => {}
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
