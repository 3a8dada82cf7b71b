//! Authentication API Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use shared::error::{AppError, ErrorCode};
use shared::models::{GoogleAuthRequest, Role, Token, User, UserLogin, UserRegister};

use super::google::{require_email, verify_google_token};
use crate::api::ApiResult;
use crate::auth::{CurrentUser, create_token};
use crate::db::{self, UNIQUE_VIOLATION, is_constraint};
use crate::state::AppState;
use crate::util::{hash_password, normalize_email, verify_password};

const MIN_PASSWORD_LEN: usize = 8;

fn reject_admin_signup(role: Role) -> Result<(), AppError> {
    if role == Role::Admin {
        return Err(AppError::invalid_request("Admin accounts cannot be self-registered"));
    }
    Ok(())
}

fn issue_token(state: &AppState, user: &User) -> Result<Token, AppError> {
    let token = create_token(
        user.id,
        &user.email,
        user.role,
        &state.config.jwt_secret,
        state.config.access_token_expire_minutes,
    )
    .map_err(|e| state.internal(e))?;
    Ok(Token::bearer(token))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<UserRegister>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let email = normalize_email(&req.email);
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::with_message(ErrorCode::InvalidFormat, "Invalid email"));
    }
    if req.full_name.trim().is_empty() {
        return Err(AppError::with_message(ErrorCode::RequiredField, "Full name is required"));
    }
    reject_admin_signup(req.role)?;
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    if db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(|e| state.internal(e))?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::EmailAlreadyExists));
    }

    let hashed = hash_password(&req.password).map_err(|e| state.internal(e))?;

    let user = db::users::create(&state.pool, &email, req.full_name.trim(), &hashed, req.role)
        .await
        .map_err(|e| {
            if is_constraint(&e, UNIQUE_VIOLATION) {
                AppError::new(ErrorCode::EmailAlreadyExists)
            } else {
                state.internal(e)
            }
        })?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<UserLogin>,
) -> ApiResult<Json<Token>> {
    let email = normalize_email(&req.email);
    let user = db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(|e| state.internal(e))?;

    // Unknown email, Google-only account and wrong password look the same
    let Some(user) = user.filter(|u| {
        u.hashed_password
            .as_deref()
            .is_some_and(|hash| verify_password(&req.password, hash))
    }) else {
        tracing::debug!(email = %email, "Login rejected");
        return Err(AppError::invalid_credentials());
    };

    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    Ok(Json(issue_token(&state, &user)?))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<User>> {
    let user = db::users::find_by_id(&state.pool, current.id)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(user))
}

/// POST /api/auth/google/login
pub async fn google_login(
    State(state): State<AppState>,
    Json(req): Json<GoogleAuthRequest>,
) -> ApiResult<Json<Token>> {
    let info = verify_google_token(&state, &req.token).await?;
    let email = require_email(&info)?;

    let user = db::users::find_by_email_or_google_id(&state.pool, &email, &info.sub)
        .await
        .map_err(|e| state.internal(e))?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    if user.google_id.is_none() {
        db::users::link_google_id(&state.pool, user.id, &info.sub)
            .await
            .map_err(|e| state.internal(e))?;
        tracing::info!(user_id = user.id, "Linked Google account");
    }

    Ok(Json(issue_token(&state, &user)?))
}

/// POST /api/auth/google/register
pub async fn google_register(
    State(state): State<AppState>,
    Json(req): Json<GoogleAuthRequest>,
) -> ApiResult<(StatusCode, Json<Token>)> {
    reject_admin_signup(req.role)?;
    let info = verify_google_token(&state, &req.token).await?;
    let email = require_email(&info)?;

    if db::users::find_by_email_or_google_id(&state.pool, &email, &info.sub)
        .await
        .map_err(|e| state.internal(e))?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::OAuthAccountExists));
    }

    let full_name = info
        .name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| email.clone());

    let user = db::users::create_google(
        &state.pool,
        &email,
        &full_name,
        &info.sub,
        info.email_verified,
        req.role,
    )
    .await
    .map_err(|e| {
        if is_constraint(&e, UNIQUE_VIOLATION) {
            AppError::new(ErrorCode::OAuthAccountExists)
        } else {
            state.internal(e)
        }
    })?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered with Google");
    Ok((StatusCode::CREATED, Json(issue_token(&state, &user)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_signup_rejected() {
        let err = reject_admin_signup(Role::Admin).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert!(reject_admin_signup(Role::Client).is_ok());
        assert!(reject_admin_signup(Role::Restaurant).is_ok());
    }
}
