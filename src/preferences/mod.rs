pub mod handlers;
pub mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{PgRestrictionStore, RestrictionStore, UserRestriction};

pub fn router() -> Router<AppState> {
    handlers::preference_routes()
}
