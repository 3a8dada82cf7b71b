//! Google access token verification via the userinfo endpoint

use shared::error::{AppError, ErrorCode};
use shared::models::GoogleUserInfo;

use crate::state::AppState;

/// Resolve a Google access token to the account it belongs to
pub async fn verify_google_token(state: &AppState, token: &str) -> Result<GoogleUserInfo, AppError> {
    let response = state
        .http
        .get(&state.config.google_userinfo_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Google userinfo request failed");
            AppError::new(ErrorCode::OAuthVerificationFailed)
        })?;

    if !response.status().is_success() {
        tracing::debug!(status = %response.status(), "Google rejected access token");
        return Err(AppError::new(ErrorCode::OAuthVerificationFailed));
    }

    let info: GoogleUserInfo = response.json().await.map_err(|e| {
        tracing::warn!(error = %e, "Malformed Google userinfo response");
        AppError::new(ErrorCode::OAuthVerificationFailed)
    })?;

    if info.sub.is_empty() {
        return Err(AppError::new(ErrorCode::OAuthVerificationFailed));
    }
    Ok(info)
}

/// Email of a verified Google account, normalized
pub fn require_email(info: &GoogleUserInfo) -> Result<String, AppError> {
    info.email
        .as_deref()
        .map(crate::util::normalize_email)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OAuthVerificationFailed,
                "Email not provided by Google",
            )
        })
}
