pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::analysis::upload::MAX_REQUEST_BYTES;
use crate::rag::handlers::handle_chat;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analyses",
            post(handlers::handle_submit).layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
        )
        .route(
            "/api/v1/analyses/:id",
            get(handlers::handle_get_job).delete(handlers::handle_discard_job),
        )
        .route("/api/v1/highlight", post(handlers::handle_highlight))
        // Reference chat
        .route("/api/v1/chat", post(handle_chat))
        .with_state(state)
}
