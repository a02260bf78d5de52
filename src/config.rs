use anyhow::Context;
use serde::Deserialize;

const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_hours: i64,
    pub cookie_secure: bool,
    pub purge_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub search_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Base URL the confirmation link in signup emails points at.
    pub public_base_url: String,
    /// Where a confirmed (or already confirmed) user is sent.
    pub login_redirect_url: String,
    pub cors_allowed_origins: Vec<String>,
    pub session: SessionConfig,
    pub mail: MailConfig,
    pub recipe_api: RecipeApiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let session = SessionConfig {
            cookie_name: std::env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "recette_session".into()),
            ttl_hours: session_ttl_hours(std::env::var("SESSION_TTL_HOURS").ok().as_deref())?,
            cookie_secure: parse_or("SESSION_COOKIE_SECURE", false),
            purge_interval_secs: parse_or("SESSION_PURGE_INTERVAL_SECS", 3600),
        };
        let mail = MailConfig {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
            smtp_username: std::env::var("SMTP_USERNAME").context("SMTP_USERNAME must be set")?,
            smtp_password: std::env::var("SMTP_PASSWORD").context("SMTP_PASSWORD must be set")?,
            from: std::env::var("MAIL_FROM").context("MAIL_FROM must be set")?,
        };
        let recipe_api = RecipeApiConfig {
            base_url: std::env::var("RECIPE_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.spoonacular.com".into()),
            api_key: std::env::var("RECIPE_API_KEY").context("RECIPE_API_KEY must be set")?,
            timeout_secs: parse_or("RECIPE_API_TIMEOUT_SECS", 10),
            search_limit: parse_or("RECIPE_SEARCH_LIMIT", 5),
        };
        Ok(Self {
            database_url,
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            login_redirect_url: std::env::var("LOGIN_REDIRECT_URL")
                .unwrap_or_else(|_| "http://localhost:3000/login".into()),
            cors_allowed_origins: split_list(
                &std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".into()),
            ),
            session,
            mail,
            recipe_api,
        })
    }

    pub fn confirmation_link(&self, token: &str) -> String {
        format!("{}/confirm/{}", self.public_base_url.trim_end_matches('/'), token)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Sessions must live at least an hour and at most a year.
fn session_ttl_hours(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_SESSION_TTL_HOURS);
    };
    let hours: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("SESSION_TTL_HOURS is not a whole number: {raw:?}"))?;
    anyhow::ensure!(
        (1..=MAX_SESSION_TTL_HOURS).contains(&hours),
        "SESSION_TTL_HOURS must be between 1 and {MAX_SESSION_TTL_HOURS}, got {hours}"
    );
    Ok(hours)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
