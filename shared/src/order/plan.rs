//! Line-by-line validation and pricing of a requested order

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{line_subtotal, to_f64};
use crate::error::{AppError, ErrorCode};
use crate::models::OrderItemCreate;

/// Food row as read (and locked) inside the order transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockSnapshot {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub expires_at: DateTime<Utc>,
}

/// One line of the order, priced at the food's current price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedLine {
    pub food_id: i64,
    pub quantity: i32,
    /// Unit price snapshot
    pub price: f64,
}

/// Everything the transaction needs to persist an order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlan {
    pub lines: Vec<PlannedLine>,
    pub total_amount: f64,
    /// Total quantity to take from each food, keyed and ordered by food id
    pub decrements: BTreeMap<i64, i32>,
}

/// Request-shape checks that need no stored state
pub fn validate_lines(items: &[OrderItemCreate]) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if let Some(item) = items.iter().find(|item| item.quantity <= 0) {
        return Err(AppError::new(ErrorCode::OrderInvalidQuantity)
            .with_detail("food_id", item.food_id));
    }
    Ok(())
}

/// Check every requested line against `stock` and price the order.
///
/// Lines are checked in request order; for each line: the food exists,
/// belongs to `restaurant_id`, has enough quantity left (after earlier
/// lines for the same food) and has not expired at `now`. The first
/// failing check is returned.
pub fn plan_order(
    restaurant_id: i64,
    items: &[OrderItemCreate],
    stock: &[StockSnapshot],
    now: DateTime<Utc>,
) -> Result<OrderPlan, AppError> {
    validate_lines(items)?;

    let foods: HashMap<i64, &StockSnapshot> = stock.iter().map(|f| (f.id, f)).collect();
    let mut decrements: BTreeMap<i64, i32> = BTreeMap::new();
    let mut lines = Vec::with_capacity(items.len());
    let mut total = Decimal::ZERO;

    for item in items {
        let food = foods.get(&item.food_id).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::FoodNotFound,
                format!("Food item {} not found", item.food_id),
            )
        })?;

        if food.restaurant_id != restaurant_id {
            return Err(AppError::with_message(
                ErrorCode::FoodRestaurantMismatch,
                format!("Food item {} does not belong to this restaurant", food.id),
            ));
        }

        let taken = decrements.get(&food.id).copied().unwrap_or(0);
        let available = food.quantity - taken;
        if available < item.quantity {
            return Err(AppError::with_message(
                ErrorCode::FoodOutOfStock,
                format!(
                    "Not enough quantity for {}. Available: {}",
                    food.name, available
                ),
            )
            .with_detail("food_id", food.id)
            .with_detail("available", available));
        }

        if food.expires_at <= now {
            return Err(AppError::with_message(
                ErrorCode::FoodExpired,
                format!("{} has expired", food.name),
            ));
        }

        total += line_subtotal(food.price, item.quantity);
        decrements.insert(food.id, taken + item.quantity);
        lines.push(PlannedLine {
            food_id: food.id,
            quantity: item.quantity,
            price: food.price,
        });
    }

    Ok(OrderPlan {
        lines,
        total_amount: to_f64(total),
        decrements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn food(id: i64, restaurant_id: i64, price: f64, quantity: i32) -> StockSnapshot {
        StockSnapshot {
            id,
            restaurant_id,
            name: format!("Food {}", id),
            price,
            quantity,
            expires_at: Utc::now() + Duration::days(1),
        }
    }

    fn line(food_id: i64, quantity: i32) -> OrderItemCreate {
        OrderItemCreate { food_id, quantity }
    }

    #[test]
    fn test_plan_single_line() {
        let stock = vec![food(1, 10, 500.0, 10)];
        let plan = plan_order(10, &[line(1, 3)], &stock, Utc::now()).unwrap();

        assert_eq!(plan.total_amount, 1500.0);
        assert_eq!(
            plan.lines,
            vec![PlannedLine {
                food_id: 1,
                quantity: 3,
                price: 500.0
            }]
        );
        assert_eq!(plan.decrements.get(&1), Some(&3));
    }

    #[test]
    fn test_plan_total_is_sum_of_subtotals() {
        let stock = vec![food(1, 10, 10.99, 10), food(2, 10, 0.1, 10)];
        let plan = plan_order(10, &[line(1, 3), line(2, 3)], &stock, Utc::now()).unwrap();
        assert_eq!(plan.total_amount, 33.27);
        assert_eq!(plan.lines.len(), 2);
    }

    #[test]
    fn test_empty_order() {
        let err = plan_order(10, &[], &[], Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_non_positive_quantity() {
        let stock = vec![food(1, 10, 5.0, 10)];
        let err = plan_order(10, &[line(1, 0)], &stock, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderInvalidQuantity);
        let err = plan_order(10, &[line(1, -2)], &stock, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderInvalidQuantity);
    }

    #[test]
    fn test_missing_food() {
        let stock = vec![food(1, 10, 5.0, 10)];
        let err = plan_order(10, &[line(1, 1), line(99, 1)], &stock, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FoodNotFound);
        assert_eq!(err.message, "Food item 99 not found");
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_food_of_other_restaurant() {
        let stock = vec![food(1, 11, 5.0, 10)];
        let err = plan_order(10, &[line(1, 1)], &stock, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FoodRestaurantMismatch);
        assert_eq!(err.message, "Food item 1 does not belong to this restaurant");
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_enough_quantity() {
        let stock = vec![food(1, 10, 500.0, 10)];
        let err = plan_order(10, &[line(1, 11)], &stock, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FoodOutOfStock);
        assert_eq!(err.message, "Not enough quantity for Food 1. Available: 10");
    }

    #[test]
    fn test_repeated_food_checks_remaining_stock() {
        let stock = vec![food(1, 10, 2.0, 5)];

        let plan = plan_order(10, &[line(1, 2), line(1, 3)], &stock, Utc::now()).unwrap();
        assert_eq!(plan.decrements.get(&1), Some(&5));
        assert_eq!(plan.total_amount, 10.0);

        let err = plan_order(10, &[line(1, 3), line(1, 3)], &stock, Utc::now()).unwrap_err();
        assert_eq!(err.message, "Not enough quantity for Food 1. Available: 2");
    }

    #[test]
    fn test_expired_food() {
        let now = Utc::now();
        let mut expired = food(1, 10, 5.0, 10);
        expired.expires_at = now;
        let err = plan_order(10, &[line(1, 1)], &[expired], now).unwrap_err();
        assert_eq!(err.code, ErrorCode::FoodExpired);
        assert_eq!(err.message, "Food 1 has expired");
    }

    #[test]
    fn test_quantity_checked_before_expiry() {
        let now = Utc::now();
        let mut expired = food(1, 10, 5.0, 1);
        expired.expires_at = now - Duration::hours(1);
        let err = plan_order(10, &[line(1, 2)], &[expired], now).unwrap_err();
        assert_eq!(err.code, ErrorCode::FoodOutOfStock);
    }
}
