//! Restaurant API Module

mod handler;

use axum::Router;
use axum::routing::{get, post};

use super::require_auth;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api/restaurants", routes(state))
}

fn routes(state: &AppState) -> Router<AppState> {
    // Public catalogue reads
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/pending", get(handler::list_pending))
        .route("/me", get(handler::get_mine))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .route("/{id}/approve", post(handler::approve))
        .route("/{id}/reject", post(handler::reject));

    read_routes.merge(require_auth(manage_routes, state))
}
