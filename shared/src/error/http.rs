//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::UserNotFound
            | Self::RestaurantNotFound
            | Self::OrderNotFound
            | Self::FoodNotFound
            | Self::PostNotFound
            | Self::CommentNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::EmailAlreadyExists
            | Self::OAuthAccountExists
            | Self::RestaurantAlreadyExists
            | Self::FoodHasOrders => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::OAuthVerificationFailed => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::RoleRequired
            | Self::AdminRequired
            | Self::NotResourceOwner => StatusCode::FORBIDDEN,

            // 429 Too Many Requests
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,

            // 500 Internal Server Error
            Self::InternalError
            | Self::ImageProcessingFailed
            | Self::FileStorageFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
