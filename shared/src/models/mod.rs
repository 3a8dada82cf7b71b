//! Data models
//!
//! Shared between arzaq-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (Postgres BIGSERIAL).

pub mod food;
pub mod order;
pub mod post;
pub mod restaurant;
pub mod user;

// Re-exports
pub use food::*;
pub use order::*;
pub use post::*;
pub use restaurant::*;
pub use user::*;
