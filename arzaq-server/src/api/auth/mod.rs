//! Authentication API Module
//!
//! - `POST /api/auth/register`: password account (rate limited)
//! - `POST /api/auth/login`: password login (rate limited)
//! - `GET /api/auth/me`: current user
//! - `POST /api/auth/google/login`: sign in with a Google access token
//! - `POST /api/auth/google/register`: create an account from a Google access token

mod google;
mod handler;

use axum::routing::{get, post};
use axum::{Router, middleware};

use super::require_auth;
use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api/auth", routes(state))
}

fn routes(state: &AppState) -> Router<AppState> {
    let register = Router::new()
        .route("/register", post(handler::register))
        .route("/google/register", post(handler::google_register))
        .layer(middleware::from_fn_with_state(state.clone(), register_rate_limit));

    let login = Router::new()
        .route("/login", post(handler::login))
        .route("/google/login", post(handler::google_login))
        .layer(middleware::from_fn_with_state(state.clone(), login_rate_limit));

    let me = require_auth(Router::new().route("/me", get(handler::me)), state);

    register.merge(login).merge(me)
}
