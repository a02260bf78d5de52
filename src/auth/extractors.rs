use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::sessions::{self, Session};
use crate::state::AppState;

/// Extracts the session cookie and validates it, returning the live session.
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let id = sessions::session_id(&jar, &state.config.session)
            .ok_or(AppError::Unauthenticated)?;
        let session = sessions::resolve(state, &id).await?;
        Ok(CurrentSession(session))
    }
}

/// `axum::Json` whose rejections (bad syntax, missing fields, wrong content
/// type) answer 400 with the usual `{error}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
