//! Order API Module
//!
//! Every order route requires authentication; roles are checked per handler.

mod handler;

use axum::Router;
use axum::routing::{get, patch};

use super::require_auth;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api/orders", require_auth(routes(), state))
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/impact/stats", get(handler::impact_stats))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", patch(handler::update_status))
}
