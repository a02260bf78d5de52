use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{
            DashboardResponse, LoginRequest, LoginResponse, MessageResponse, PublicUser,
            SignupRequest,
        },
        extractors::{CurrentSession, JsonBody},
        services,
    },
    error::AppError,
    sessions,
    state::AppState,
};

const DASHBOARD_PATH: &str = "/dashboard";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/confirm/:token", get(confirm))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route(DASHBOARD_PATH, get(dashboard))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignupRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    services::signup(&state, payload).await?;
    Ok(Json(MessageResponse::new(
        "User registered successfully, please confirm your email",
    )))
}

#[instrument(skip(state, token))]
pub async fn confirm(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Redirect, AppError> {
    let outcome = services::confirm(&state, &token).await?;
    info!(?outcome, "confirmation link used");
    Ok(Redirect::to(&state.config.login_redirect_url))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let (user, session) = services::login(&state, payload).await?;
    let jar = jar.add(sessions::session_cookie(&state.config.session, &session));
    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".into(),
            user: PublicUser::from(&user),
            redirect_url: DASHBOARD_PATH.into(),
        }),
    ))
}

#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Result<Json<MessageResponse>, AppError>) {
    let cfg = &state.config.session;
    let id = sessions::session_id(&jar, cfg);
    let result = sessions::end(&state, id.as_deref())
        .await
        .map(|_| Json(MessageResponse::new("Logged out successfully")));
    // the client-side reference goes away whatever the server had
    (jar.remove(sessions::removal_cookie(cfg)), result)
}

#[instrument(skip(state, session))]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = state
        .users
        .find_by_id(session.user_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;
    Ok(Json(DashboardResponse {
        message: "Welcome to the dashboard!".into(),
        user: PublicUser::from(&user),
    }))
}
