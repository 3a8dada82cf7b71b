//! Unified error codes for the Arzaq backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Restaurant errors
//! - 4xxx: Order errors
//! - 6xxx: Food listing errors (65xx: file upload)
//! - 7xxx: Social feed errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can match on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,
    /// A user with this email already exists
    EmailAlreadyExists = 1008,
    /// A user with this email or Google account already exists
    OAuthAccountExists = 1009,
    /// The OAuth provider rejected the token
    OAuthVerificationFailed = 1010,
    /// Password too short
    PasswordTooShort = 1011,
    /// User not found
    UserNotFound = 1012,
    /// Too many attempts from one client
    TooManyRequests = 1013,

    // ==================== 2xxx: Permission ====================
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Caller does not own the resource
    NotResourceOwner = 2004,

    // ==================== 3xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 3001,
    /// User already owns a restaurant
    RestaurantAlreadyExists = 3002,
    /// Restaurant is not awaiting a decision
    RestaurantNotPending = 3003,
    /// Restaurant has not been approved yet
    RestaurantNotApproved = 3004,
    /// Latitude/longitude out of range
    InvalidCoordinates = 3005,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no line items
    OrderEmpty = 4002,
    /// Requested line quantity is not positive
    OrderInvalidQuantity = 4003,

    // ==================== 6xxx: Food ====================
    /// Food item not found
    FoodNotFound = 6001,
    /// Food price is invalid
    FoodInvalidPrice = 6002,
    /// Not enough quantity left
    FoodOutOfStock = 6003,
    /// Food has expired
    FoodExpired = 6004,
    /// Food belongs to another restaurant
    FoodRestaurantMismatch = 6005,
    /// Listing quantity is negative
    FoodInvalidQuantity = 6006,
    /// Expiration date is not in the future
    FoodExpirationInPast = 6007,
    /// Listing is referenced by existing orders
    FoodHasOrders = 6008,

    // ==================== 65xx: File Upload ====================
    /// File exceeds the size limit
    FileTooLarge = 6501,
    /// File format not supported
    UnsupportedFileFormat = 6502,
    /// File could not be decoded as an image
    InvalidImageFile = 6503,
    /// No file provided
    NoFileProvided = 6504,
    /// Empty file provided
    EmptyFile = 6505,
    /// No filename provided
    NoFilename = 6506,
    /// Image processing failed
    ImageProcessingFailed = 6508,
    /// Storing the file failed
    FileStorageFailed = 6509,

    // ==================== 7xxx: Social ====================
    /// Post not found
    PostNotFound = 7001,
    /// Comment not found
    CommentNotFound = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Incorrect username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Inactive user",
            ErrorCode::EmailAlreadyExists => "User with this email already exists",
            ErrorCode::OAuthAccountExists => {
                "User with this email or Google account already exists"
            }
            ErrorCode::OAuthVerificationFailed => "Invalid Google token",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::UserNotFound => "User not found. Please register first.",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            // Permission
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::NotResourceOwner => "You do not own this resource",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::RestaurantAlreadyExists => "You already have a restaurant registered",
            ErrorCode::RestaurantNotPending => "Restaurant is not in pending status",
            ErrorCode::RestaurantNotApproved => "Restaurant must be approved to create food items",
            ErrorCode::InvalidCoordinates => "Coordinates are out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::OrderInvalidQuantity => "Quantity must be greater than zero",

            // Food
            ErrorCode::FoodNotFound => "Food item not found",
            ErrorCode::FoodInvalidPrice => "Food item has an invalid price",
            ErrorCode::FoodOutOfStock => "Not enough quantity",
            ErrorCode::FoodExpired => "Food item has expired",
            ErrorCode::FoodRestaurantMismatch => "Food item does not belong to this restaurant",
            ErrorCode::FoodInvalidQuantity => "Quantity must not be negative",
            ErrorCode::FoodExpirationInPast => "Expiration date must be in the future",
            ErrorCode::FoodHasOrders => "Food item has orders and cannot be deleted",

            // File Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::NoFilename => "No filename provided",
            ErrorCode::ImageProcessingFailed => "Image processing failed",
            ErrorCode::FileStorageFailed => "Failed to upload image",

            // Social
            ErrorCode::PostNotFound => "Post not found",
            ErrorCode::CommentNotFound => "Comment not found",

            // System
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),
            1008 => Ok(ErrorCode::EmailAlreadyExists),
            1009 => Ok(ErrorCode::OAuthAccountExists),
            1010 => Ok(ErrorCode::OAuthVerificationFailed),
            1011 => Ok(ErrorCode::PasswordTooShort),
            1012 => Ok(ErrorCode::UserNotFound),
            1013 => Ok(ErrorCode::TooManyRequests),

            // Permission
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::NotResourceOwner),

            // Restaurant
            3001 => Ok(ErrorCode::RestaurantNotFound),
            3002 => Ok(ErrorCode::RestaurantAlreadyExists),
            3003 => Ok(ErrorCode::RestaurantNotPending),
            3004 => Ok(ErrorCode::RestaurantNotApproved),
            3005 => Ok(ErrorCode::InvalidCoordinates),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::OrderInvalidQuantity),

            // Food
            6001 => Ok(ErrorCode::FoodNotFound),
            6002 => Ok(ErrorCode::FoodInvalidPrice),
            6003 => Ok(ErrorCode::FoodOutOfStock),
            6004 => Ok(ErrorCode::FoodExpired),
            6005 => Ok(ErrorCode::FoodRestaurantMismatch),
            6006 => Ok(ErrorCode::FoodInvalidQuantity),
            6007 => Ok(ErrorCode::FoodExpirationInPast),
            6008 => Ok(ErrorCode::FoodHasOrders),

            // File Upload
            6501 => Ok(ErrorCode::FileTooLarge),
            6502 => Ok(ErrorCode::UnsupportedFileFormat),
            6503 => Ok(ErrorCode::InvalidImageFile),
            6504 => Ok(ErrorCode::NoFileProvided),
            6505 => Ok(ErrorCode::EmptyFile),
            6506 => Ok(ErrorCode::NoFilename),
            6508 => Ok(ErrorCode::ImageProcessingFailed),
            6509 => Ok(ErrorCode::FileStorageFailed),

            // Social
            7001 => Ok(ErrorCode::PostNotFound),
            7002 => Ok(ErrorCode::CommentNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
