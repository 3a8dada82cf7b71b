//! Social feed API Module

mod handler;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};

use super::require_auth;
use super::upload::UPLOAD_BODY_LIMIT;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api/posts", require_auth(routes(), state))
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/upload-image",
            post(handler::upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/like", post(handler::toggle_like))
        .route("/{id}/comments", post(handler::add_comment))
        .route("/{id}/comments/{comment_id}", delete(handler::delete_comment))
}
