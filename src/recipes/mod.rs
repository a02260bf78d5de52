pub mod client;
pub mod dto;
pub mod handlers;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use client::{RecipeClient, SpoonacularClient};

pub fn router() -> Router<AppState> {
    handlers::recipe_routes()
}
