use shared::models::{Role, User};
use sqlx::PgPool;

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email_or_google_id(
    pool: &PgPool,
    email: &str,
    google_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = $1 OR google_id = $2 LIMIT 1")
        .bind(email)
        .bind(google_id)
        .fetch_optional(pool)
        .await
}

/// Insert a password account
pub async fn create(
    pool: &PgPool,
    email: &str,
    full_name: &str,
    hashed_password: &str,
    role: Role,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO users (email, full_name, hashed_password, role)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(email)
    .bind(full_name)
    .bind(hashed_password)
    .bind(role)
    .fetch_one(pool)
    .await
}

/// Insert a Google account (no password)
pub async fn create_google(
    pool: &PgPool,
    email: &str,
    full_name: &str,
    google_id: &str,
    is_verified: bool,
    role: Role,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO users (email, full_name, google_id, is_verified, role)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(email)
    .bind(full_name)
    .bind(google_id)
    .bind(is_verified)
    .bind(role)
    .fetch_one(pool)
    .await
}

pub async fn link_google_id(pool: &PgPool, id: i64, google_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET google_id = $1, updated_at = now() WHERE id = $2")
        .bind(google_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
