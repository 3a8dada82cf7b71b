//! Listing and location validation
//!
//! Pure predicates checked before any mutation. Each failure carries the
//! message returned to the client verbatim.

use chrono::{DateTime, Utc};

use crate::error::{AppError, ErrorCode};

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{} must be a finite number", field_name),
        ));
    }
    Ok(())
}

/// Discounted price must be positive and strictly below the original price.
pub fn validate_prices(price: f64, old_price: Option<f64>) -> Result<(), AppError> {
    require_finite(price, "price")?;
    if let Some(old) = old_price {
        require_finite(old, "old_price")?;
    }

    if price <= 0.0 || old_price.is_some_and(|old| old <= 0.0) {
        return Err(AppError::with_message(
            ErrorCode::FoodInvalidPrice,
            "Prices must be greater than zero",
        ));
    }

    if let Some(old) = old_price
        && price >= old
    {
        return Err(AppError::with_message(
            ErrorCode::FoodInvalidPrice,
            "Discounted price must be less than original price",
        ));
    }

    Ok(())
}

pub fn validate_expiration(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), AppError> {
    if expires_at <= now {
        return Err(AppError::new(ErrorCode::FoodExpirationInPast));
    }
    Ok(())
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::with_message(
            ErrorCode::InvalidCoordinates,
            "Latitude must be between -90 and 90",
        ));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::with_message(
            ErrorCode::InvalidCoordinates,
            "Longitude must be between -180 and 180",
        ));
    }
    Ok(())
}

/// Listing stock may be zero (sold out) but never negative
pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 0 {
        return Err(AppError::new(ErrorCode::FoodInvalidQuantity));
    }
    Ok(())
}

/// Whole-number discount percentage of `price` relative to `old_price`.
///
/// Returns `None` when the original price is missing or not positive.
pub fn discount_percent(price: f64, old_price: Option<f64>) -> Option<i32> {
    let old = old_price.filter(|old| *old > 0.0)?;
    Some(((1.0 - price / old) * 100.0).round() as i32)
}
