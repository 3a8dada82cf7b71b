//! HTTP API

pub mod auth;
pub mod foods;
pub mod health;
pub mod orders;
pub mod posts;
pub mod restaurants;
mod upload;

use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::{Router, middleware};
use http::HeaderValue;
use shared::error::{AppError, ErrorCode};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyCors, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::auth_middleware;
use crate::state::AppState;

/// Handler result
pub type ApiResult<T> = Result<T, AppError>;

/// Build the application with every route, middleware and state attached
pub fn router(state: AppState) -> Router {
    let development = state.config.is_development();

    Router::new()
        .merge(health::router())
        .merge(auth::router(&state))
        .merge(restaurants::router(&state))
        .merge(foods::router(&state))
        .merge(orders::router(&state))
        .merge(posts::router(&state))
        .layer(cors_layer(&state.config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
            panic_response(panic, development)
        }))
        .with_state(state)
}

/// Layer requiring a valid bearer token
fn require_auth(
    router: Router<AppState>,
    state: &AppState,
) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AnyCors)
        .allow_headers(AnyCors)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, development: bool) -> Response {
    let reason = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(reason = %reason, "Handler panicked");

    let err = AppError::new(ErrorCode::InternalError);
    let err = if development {
        err.with_detail("panic", reason)
    } else {
        err
    };
    err.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_response_is_500() {
        let resp = panic_response(Box::new("boom"), false);
        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
