//! Route definitions
//!
//! All routes are mounted under /api.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, session, users};
use crate::state::AppState;

/// Create the main API router
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .merge(user_routes())
        .merge(session_routes())
}

/// Account routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(users::create_user).put(users::update_user))
}

/// Session routes
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(session::login))
        .route("/refresh", post(session::refresh))
        .route("/revoke", post(session::revoke))
}
