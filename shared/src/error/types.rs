//! Error type and the JSON error body

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned by every fallible operation in the service
///
/// Carries the numeric [`ErrorCode`], the message shown to the client and
/// optional structured details (the offending `food_id`, the stock left).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the default message for `code`
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// The caller is authenticated with the right role but does not own the
    /// restaurant, order, listing or post
    pub fn not_owner(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotResourceOwner, msg)
    }
}

/// Error body: `{code, message, details?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<AppError> for ApiResponse {
    fn from(err: AppError) -> Self {
        Self {
            code: err.code,
            message: err.message,
            details: err.details,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();

        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error occurred");
        }

        (status, axum::Json(ApiResponse::from(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_default_message() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.is_none());
        assert_eq!(err.to_string(), "Order not found");
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::new(ErrorCode::FoodOutOfStock)
            .with_detail("food_id", 12)
            .with_detail("available", 2);

        let details = err.details.unwrap();
        assert_eq!(details["food_id"], 12);
        assert_eq!(details["available"], 2);
    }

    #[test]
    fn test_not_owner_is_forbidden() {
        let err = AppError::not_owner("You can only view your own orders");
        assert_eq!(err.code, ErrorCode::NotResourceOwner);
        assert_eq!(err.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(err.message, "You can only view your own orders");
    }

    #[test]
    fn test_body_shape() {
        let body = ApiResponse::from(
            AppError::with_message(ErrorCode::OrderInvalidQuantity, "Quantity must be positive")
                .with_detail("food_id", 2),
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 4003);
        assert_eq!(json["message"], "Quantity must be positive");
        assert_eq!(json["details"]["food_id"], 2);

        let bare = serde_json::to_value(ApiResponse::from(AppError::token_expired())).unwrap();
        assert!(bare.get("details").is_none());
    }

    #[test]
    fn test_into_response_status() {
        let resp = AppError::invalid_credentials().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = AppError::new(ErrorCode::InternalError).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
