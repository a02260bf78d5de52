//! Session lifecycle: created at login, validated on every authenticated
//! request, destroyed at logout or lazily once expired.

pub mod repo;

use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

use crate::auth::{password::generate_token, repo_types::User};
use crate::config::SessionConfig;
use crate::error::AppError;
use crate::state::AppState;

pub use repo::{PgSessionStore, Session, SessionStore};

/// Create and persist a fresh session for a user who just logged in.
pub async fn start(state: &AppState, user: &User) -> Result<Session, AppError> {
    let now = OffsetDateTime::now_utc();
    let session = Session {
        id: generate_token(),
        user_id: user.id,
        diet_type: user.diet().map(|d| d.as_str().to_string()),
        created_at: now,
        expires_at: now + time::Duration::hours(state.config.session.ttl_hours),
    };
    state.sessions.insert(session.clone()).await?;
    debug!(user_id = %user.id, expires_at = %session.expires_at, "session created");
    Ok(session)
}

/// Look up a live session. Expired sessions are deleted and reported as unauthenticated.
pub async fn resolve(state: &AppState, id: &str) -> Result<Session, AppError> {
    let session = state
        .sessions
        .find(id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    if session.is_expired_at(OffsetDateTime::now_utc()) {
        state.sessions.delete(id).await?;
        warn!(user_id = %session.user_id, "expired session rejected");
        return Err(AppError::Unauthenticated);
    }
    Ok(session)
}

/// Delete the session behind `id`. Missing or unknown ids are `NoActiveSession`.
pub async fn end(state: &AppState, id: Option<&str>) -> Result<(), AppError> {
    let id = id.ok_or(AppError::NoActiveSession)?;
    if !state.sessions.delete(id).await? {
        return Err(AppError::NoActiveSession);
    }
    Ok(())
}

pub fn session_id(jar: &CookieJar, cfg: &SessionConfig) -> Option<String> {
    jar.get(&cfg.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

pub fn session_cookie(cfg: &SessionConfig, session: &Session) -> Cookie<'static> {
    Cookie::build((cfg.cookie_name.clone(), session.id.clone()))
        .path("/")
        .http_only(true)
        .secure(cfg.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(cfg.ttl_hours))
        .build()
}

pub fn removal_cookie(cfg: &SessionConfig) -> Cookie<'static> {
    Cookie::build((cfg.cookie_name.clone(), "")).path("/").build()
}

/// Periodically delete sessions that expired without ever being touched again.
pub fn spawn_purge_task(state: AppState) -> tokio::task::JoinHandle<()> {
    let every = Duration::from_secs(state.config.session.purge_interval_secs.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match state.sessions.purge_expired(OffsetDateTime::now_utc()).await {
                Ok(0) => {}
                Ok(n) => info!(purged = n, "expired sessions purged"),
                Err(e) => error!(error = %e, "session purge failed"),
            }
        }
    })
}
