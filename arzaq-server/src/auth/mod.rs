//! Authentication and role checks
//!
//! Bearer tokens carry the user id and role, so the middleware resolves the
//! caller without touching the database.

pub mod jwt;
pub mod middleware;
pub mod rate_limit;

pub use jwt::{Claims, create_token, verify_token};
pub use middleware::{CurrentUser, auth_middleware, authorize};
