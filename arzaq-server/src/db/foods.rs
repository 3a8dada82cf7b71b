use chrono::{DateTime, Utc};
use shared::models::{Food, FoodCreate, FoodWithRestaurant};
use sqlx::{PgConnection, PgPool};

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Food>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM foods WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lock a listing for a read-modify-write; order placement waits on the same lock
pub async fn find_for_update(conn: &mut PgConnection, id: i64) -> Result<Option<Food>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM foods WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn create(
    pool: &PgPool,
    data: &FoodCreate,
    discount: Option<i32>,
) -> Result<Food, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO foods (
            restaurant_id, name, description, image,
            price, old_price, discount, quantity, expires_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(data.restaurant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.price)
    .bind(data.old_price)
    .bind(discount)
    .bind(data.quantity)
    .bind(data.expires_at)
    .fetch_one(pool)
    .await
}

/// Public catalogue: unexpired, in stock, approved restaurants only
pub async fn list_available(
    pool: &PgPool,
    restaurant_id: Option<i64>,
    search: Option<&str>,
    now: DateTime<Utc>,
    limit: i64,
    offset: i64,
) -> Result<Vec<FoodWithRestaurant>, sqlx::Error> {
    let pattern = search.map(|s| format!("%{}%", escape_like(s)));
    sqlx::query_as(
        r#"
        SELECT f.*, r.name AS restaurant_name, r.address AS restaurant_address
        FROM foods f
        JOIN restaurants r ON r.id = f.restaurant_id
        WHERE r.status = 'approved'
          AND f.expires_at > $1
          AND f.quantity > 0
          AND ($2::bigint IS NULL OR f.restaurant_id = $2)
          AND ($3::text IS NULL OR f.name ILIKE $3 OR f.description ILIKE $3)
        ORDER BY f.expires_at, f.id
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(now)
    .bind(restaurant_id)
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn list_by_restaurant(pool: &PgPool, restaurant_id: i64) -> Result<Vec<Food>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM foods WHERE restaurant_id = $1 ORDER BY created_at DESC")
        .bind(restaurant_id)
        .fetch_all(pool)
        .await
}

/// Write back every mutable column of a listing read with [`find_for_update`]
/// in the same transaction
pub async fn save(conn: &mut PgConnection, food: &Food) -> Result<Food, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE foods SET
            name = $2, description = $3, image = $4,
            price = $5, old_price = $6, discount = $7,
            quantity = $8, expires_at = $9, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(food.id)
    .bind(&food.name)
    .bind(&food.description)
    .bind(&food.image)
    .bind(food.price)
    .bind(food.old_price)
    .bind(food.discount)
    .bind(food.quantity)
    .bind(food.expires_at)
    .fetch_one(conn)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM foods WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Escape LIKE wildcards in user input
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plov"), "plov");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }
}
