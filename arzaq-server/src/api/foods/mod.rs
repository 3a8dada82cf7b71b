//! Food listing API Module

mod handler;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};

use super::require_auth;
use super::upload::UPLOAD_BODY_LIMIT;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api/foods", routes(state))
}

fn routes(state: &AppState) -> Router<AppState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/me", get(handler::list_mine))
        .route(
            "/upload-image",
            post(handler::upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/{id}", put(handler::update).delete(handler::delete));

    read_routes.merge(require_auth(manage_routes, state))
}
