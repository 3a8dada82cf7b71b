//! Orders and line items
//!
//! `place_order` is the only multi-statement write in the service. It locks
//! every referenced food row, prices the order from the locked snapshot and
//! decrements stock with a guarded UPDATE, all inside one transaction.

use std::collections::HashMap;

use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderCreate, OrderItem, OrderStatus, OrderWithItems};
use shared::order::{StockSnapshot, plan_order, validate_lines};
use sqlx::PgPool;

use crate::error::ServiceResult;

/// Validate, price and persist an order for `customer_id`.
///
/// Either the order, all of its items and every stock decrement are
/// committed together, or nothing is.
pub async fn place_order(
    pool: &PgPool,
    customer_id: i64,
    data: &OrderCreate,
) -> ServiceResult<OrderWithItems> {
    validate_lines(&data.items)?;

    let mut tx = pool.begin().await?;

    let restaurant: Option<(i64,)> = sqlx::query_as("SELECT id FROM restaurants WHERE id = $1")
        .bind(data.restaurant_id)
        .fetch_optional(&mut *tx)
        .await?;
    if restaurant.is_none() {
        return Err(AppError::with_message(ErrorCode::RestaurantNotFound, "Restaurant not found").into());
    }

    // Lock in id order so concurrent orders over the same foods cannot deadlock
    let mut food_ids: Vec<i64> = data.items.iter().map(|i| i.food_id).collect();
    food_ids.sort_unstable();
    food_ids.dedup();

    let stock: Vec<StockSnapshot> = sqlx::query_as(
        r#"
        SELECT id, restaurant_id, name, price, quantity, expires_at
        FROM foods
        WHERE id = ANY($1)
        ORDER BY id
        FOR UPDATE
        "#,
    )
    .bind(&food_ids)
    .fetch_all(&mut *tx)
    .await?;

    let plan = plan_order(data.restaurant_id, &data.items, &stock, Utc::now())?;

    for (&food_id, &quantity) in &plan.decrements {
        let result = sqlx::query(
            "UPDATE foods SET quantity = quantity - $1, updated_at = now()
             WHERE id = $2 AND quantity >= $1",
        )
        .bind(quantity)
        .bind(food_id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::new(ErrorCode::FoodOutOfStock)
                .with_detail("food_id", food_id)
                .into());
        }
    }

    let order: Order = sqlx::query_as(
        r#"
        INSERT INTO orders (customer_id, restaurant_id, status, total_amount, pickup_time)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(customer_id)
    .bind(data.restaurant_id)
    .bind(OrderStatus::Pending)
    .bind(plan.total_amount)
    .bind(data.pickup_time)
    .fetch_one(&mut *tx)
    .await?;

    let line_food_ids: Vec<i64> = plan.lines.iter().map(|l| l.food_id).collect();
    let quantities: Vec<i32> = plan.lines.iter().map(|l| l.quantity).collect();
    let prices: Vec<f64> = plan.lines.iter().map(|l| l.price).collect();

    let items: Vec<OrderItem> = sqlx::query_as(
        r#"
        INSERT INTO order_items (order_id, food_id, quantity, price)
        SELECT $1::bigint, * FROM UNNEST($2::bigint[], $3::integer[], $4::float8[])
        RETURNING *
        "#,
    )
    .bind(order.id)
    .bind(&line_food_ids)
    .bind(&quantities)
    .bind(&prices)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        order_id = order.id,
        customer_id,
        restaurant_id = order.restaurant_id,
        total_amount = order.total_amount,
        lines = items.len(),
        "Order placed"
    );

    Ok(OrderWithItems { order, items })
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<OrderWithItems>, sqlx::Error> {
    let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let Some(order) = order else {
        return Ok(None);
    };
    let items = sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id")
        .bind(order.id)
        .fetch_all(pool)
        .await?;
    Ok(Some(OrderWithItems { order, items }))
}

pub async fn list_for_customer(
    pool: &PgPool,
    customer_id: i64,
) -> Result<Vec<OrderWithItems>, sqlx::Error> {
    let orders: Vec<Order> =
        sqlx::query_as("SELECT * FROM orders WHERE customer_id = $1 ORDER BY created_at DESC, id DESC")
            .bind(customer_id)
            .fetch_all(pool)
            .await?;
    attach_items(pool, orders).await
}

pub async fn list_for_restaurant(
    pool: &PgPool,
    restaurant_id: i64,
) -> Result<Vec<OrderWithItems>, sqlx::Error> {
    let orders: Vec<Order> = sqlx::query_as(
        "SELECT * FROM orders WHERE restaurant_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    attach_items(pool, orders).await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<OrderWithItems>, sqlx::Error> {
    let orders: Vec<Order> = sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await?;
    attach_items(pool, orders).await
}

/// Set the status; `completed_at` is stamped when moving to COMPLETED
pub async fn update_status(
    pool: &PgPool,
    id: i64,
    status: OrderStatus,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE orders SET
            status = $2,
            updated_at = now(),
            completed_at = CASE WHEN $2 = 'completed'::order_status THEN now() ELSE completed_at END
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await
}

/// Total item quantity across the customer's completed orders
pub async fn meals_rescued(pool: &PgPool, customer_id: i64) -> Result<i64, sqlx::Error> {
    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(oi.quantity), 0)::BIGINT
        FROM order_items oi
        JOIN orders o ON o.id = oi.order_id
        WHERE o.customer_id = $1 AND o.status = 'completed'
        "#,
    )
    .bind(customer_id)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

async fn attach_items(
    pool: &PgPool,
    orders: Vec<Order>,
) -> Result<Vec<OrderWithItems>, sqlx::Error> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let rows: Vec<OrderItem> =
        sqlx::query_as("SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY id")
            .bind(&ids)
            .fetch_all(pool)
            .await?;

    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in rows {
        by_order.entry(item.order_id).or_default().push(item);
    }
    Ok(orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            OrderWithItems { order, items }
        })
        .collect())
}
