//! Bearer token middleware and role checks

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use super::jwt::verify_token;
use crate::state::AppState;

/// Authenticated caller, inserted into request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Middleware that extracts and verifies the JWT from the Authorization header
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let claims =
        verify_token(token, &state.config.jwt_secret).map_err(IntoResponse::into_response)?;
    let id = claims.user_id().map_err(IntoResponse::into_response)?;

    request.extensions_mut().insert(CurrentUser {
        id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Reject callers whose role is not in `roles`
pub fn authorize(user: &CurrentUser, roles: &[Role]) -> Result<(), AppError> {
    if roles.contains(&user.role) {
        return Ok(());
    }
    tracing::debug!(user_id = user.id, role = %user.role, "Role check failed");
    let code = if roles == [Role::Admin] {
        ErrorCode::AdminRequired
    } else {
        ErrorCode::RoleRequired
    };
    Err(AppError::with_message(code, "Not enough permissions"))
}
