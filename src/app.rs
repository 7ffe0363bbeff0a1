use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/mood", post(handlers::submit_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/mood", post(handlers::submit_json))
        .route("/api/reload", post(handlers::reload))
        .with_state(state)
}
