//! Database access layer

pub mod foods;
pub mod orders;
pub mod posts;
pub mod restaurants;
pub mod users;

/// Postgres SQLSTATE for foreign key violations
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres SQLSTATE for unique violations
pub const UNIQUE_VIOLATION: &str = "23505";

/// Whether `err` is a database error with the given SQLSTATE
pub fn is_constraint(err: &sqlx::Error, code: &str) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(code))
}
