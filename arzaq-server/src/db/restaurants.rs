use shared::models::{Restaurant, RestaurantCreate, RestaurantStatus, RestaurantUpdate};
use sqlx::PgPool;

/// Bounding box around a point, in degrees
#[derive(Debug, Clone, Copy)]
pub struct NearFilter {
    pub latitude: f64,
    pub longitude: f64,
    pub degrees: f64,
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_owner(pool: &PgPool, owner_id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurants WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_optional(pool)
        .await
}

/// Insert a PENDING restaurant. Returns `None` when the owner already has one.
pub async fn create(
    pool: &PgPool,
    owner_id: i64,
    data: &RestaurantCreate,
) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO restaurants (owner_id, name, address, phone, email, description, latitude, longitude)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (owner_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(owner_id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.description)
    .bind(data.latitude)
    .bind(data.longitude)
    .fetch_optional(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    status: RestaurantStatus,
    near: Option<NearFilter>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Restaurant>, sqlx::Error> {
    let (lat, lng, deg) = match near {
        Some(n) => (Some(n.latitude), Some(n.longitude), Some(n.degrees)),
        None => (None, None, None),
    };
    sqlx::query_as(
        r#"
        SELECT * FROM restaurants
        WHERE status = $1
          AND ($2::float8 IS NULL OR latitude BETWEEN $2 - $4 AND $2 + $4)
          AND ($3::float8 IS NULL OR longitude BETWEEN $3 - $4 AND $3 + $4)
        ORDER BY id
        LIMIT $5 OFFSET $6
        "#,
    )
    .bind(status)
    .bind(lat)
    .bind(lng)
    .bind(deg)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn list_pending(pool: &PgPool) -> Result<Vec<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurants WHERE status = 'pending' ORDER BY created_at")
        .fetch_all(pool)
        .await
}

/// Partial update restricted to the owner. Returns `None` when no row matched.
pub async fn update(
    pool: &PgPool,
    id: i64,
    owner_id: i64,
    data: &RestaurantUpdate,
) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE restaurants SET
            name = COALESCE($3, name),
            address = COALESCE($4, address),
            phone = COALESCE($5, phone),
            email = COALESCE($6, email),
            description = COALESCE($7, description),
            latitude = COALESCE($8, latitude),
            longitude = COALESCE($9, longitude),
            updated_at = now()
        WHERE id = $1 AND owner_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.description)
    .bind(data.latitude)
    .bind(data.longitude)
    .fetch_optional(pool)
    .await
}

/// PENDING → APPROVED. Returns `None` when the row is missing or already decided.
pub async fn approve(pool: &PgPool, id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE restaurants
         SET status = 'approved', approved_at = now(), updated_at = now()
         WHERE id = $1 AND status = 'pending'
         RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// PENDING → REJECTED with a reason. Returns `None` when the row is missing or already decided.
pub async fn reject(pool: &PgPool, id: i64, reason: &str) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE restaurants
         SET status = 'rejected', rejection_reason = $2, updated_at = now()
         WHERE id = $1 AND status = 'pending'
         RETURNING *",
    )
    .bind(id)
    .bind(reason)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM restaurants WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
