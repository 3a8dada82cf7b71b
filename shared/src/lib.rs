//! Shared types for the Arzaq backend
//!
//! Common types used by the server and its clients: the error system,
//! domain models, listing validation and the pure order-placement logic.

pub mod error;
pub mod models;
pub mod order;
pub mod validation;

// Re-exports
pub use error::{ApiResponse, AppError, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
