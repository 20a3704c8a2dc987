//! HTTP REST API routes

mod admin_routes;
mod battle_routes;
mod character_routes;
mod error;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use error::ApiError;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Battle routes
        .route(
            "/api/battles",
            post(battle_routes::resolve_battle).get(battle_routes::battle_history),
        )
        // Character routes
        .route(
            "/api/characters",
            get(character_routes::list_characters).post(character_routes::create_character),
        )
        .route(
            "/api/characters/heroes",
            get(character_routes::list_heroes),
        )
        .route(
            "/api/characters/{id}",
            get(character_routes::get_character),
        )
        // Admin moderation routes
        .route(
            "/api/admin/characters/pending",
            get(admin_routes::list_pending),
        )
        .route(
            "/api/admin/characters/{id}/approve",
            post(admin_routes::approve_character),
        )
        .route(
            "/api/admin/characters/{id}",
            delete(admin_routes::delete_pending),
        )
}
