//! Order placement logic
//!
//! Pure parts of the order workflow, shared by the server transaction and
//! its tests:
//! - [`plan_order`]: checks requested lines against locked stock and prices
//!   the order
//! - [`impact_stats`]: derives a customer's impact summary

pub mod impact;
pub mod money;
pub mod plan;

// Re-exports
pub use impact::{CO2_GOAL, CO2_PER_MEAL_KG, MEALS_GOAL, impact_stats};
pub use plan::{OrderPlan, PlannedLine, StockSnapshot, plan_order, validate_lines};
