pub mod auth;
pub mod chat;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;

/// Builds the application router. Shared between the server binary and the
/// integration tests, which drive it with mock ports.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(rest::health_handler))
        .route("/signup", post(auth::signup_handler))
        .route("/login", post(auth::login_handler))
        .route("/profile/create", post(rest::create_profile_handler))
        .route("/profile/{user_id}", get(rest::get_profile_handler))
        .route("/macros/{user_id}", get(rest::get_macros_handler))
        .route("/chat", post(chat::chat_handler))
        .route("/progress/add", post(rest::add_progress_handler))
        .route("/progress/{user_id}", get(rest::get_progress_handler))
        .with_state(state)
}
