use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};

use crate::auth::dto::{LoginRequest, SignupRequest};
use crate::auth::password::{generate_token, hash_password, verify_password, DUMMY_HASH};
use crate::auth::repo_types::{NewUser, User};
use crate::diet::DietType;
use crate::error::AppError;
use crate::mail::confirmation_email;
use crate::sessions::{self, Session};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Outcome of presenting a confirmation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Verified,
    AlreadyVerified,
}

/// Create an unverified account and mail its confirmation link.
pub async fn signup(state: &AppState, req: SignupRequest) -> Result<User, AppError> {
    let email = normalize_email(&req.email);
    let full_name = req.full_name.trim().to_string();

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if full_name.is_empty() {
        return Err(AppError::Validation("Full name is required".into()));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::Validation("Password too short".into()));
    }
    let diet_preference = match req.food_preferences.as_ref().and_then(|p| p.label()) {
        Some(label) => DietType::parse_optional(label)
            .map_err(|e| AppError::Validation(e.to_string()))?,
        None => None,
    };

    if state.users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::DuplicateUser);
    }

    let password_hash = hash_password(&req.password)?;
    let token = generate_token();
    let user = state
        .users
        .create(NewUser {
            email,
            full_name,
            password_hash,
            verification_token: token.clone(),
            diet_preference,
        })
        .await?
        // lost a race with a concurrent signup for the same address
        .ok_or(AppError::DuplicateUser)?;

    let link = state.config.confirmation_link(&token);
    if let Err(e) = state
        .mailer
        .send(confirmation_email(&user.email, &user.full_name, &link))
        .await
    {
        // without the link the account could never be confirmed; free the address
        if let Err(cleanup) = state.users.delete_unverified(user.id).await {
            error!(user_id = %user.id, error = %cleanup, "failed to roll back unsent signup");
        }
        return Err(AppError::Mail(e));
    }

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Flip the user behind `token` to verified. Replaying a consumed token is a success.
pub async fn confirm(state: &AppState, token: &str) -> Result<Confirmation, AppError> {
    if let Some(user) = state.users.verify_by_token(token).await? {
        info!(user_id = %user.id, "email confirmed");
        return Ok(Confirmation::Verified);
    }
    if state.users.find_by_consumed_token(token).await?.is_some() {
        return Ok(Confirmation::AlreadyVerified);
    }
    warn!("unknown confirmation token");
    Err(AppError::InvalidToken)
}

/// Check credentials and open a session.
///
/// Unknown email and wrong password are indistinguishable to the caller. The
/// "not confirmed" answer is only given once the password has been proven.
pub async fn login(state: &AppState, req: LoginRequest) -> Result<(User, Session), AppError> {
    let email = normalize_email(&req.email);

    let Some(user) = state.users.find_by_email(&email).await? else {
        let _ = verify_password(&req.password, DUMMY_HASH);
        warn!(email = %email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    if !user.is_verified {
        warn!(user_id = %user.id, "login before email confirmation");
        return Err(AppError::EmailNotConfirmed);
    }

    let session = sessions::start(state, &user).await?;
    info!(user_id = %user.id, "user logged in");
    Ok((user, session))
}
