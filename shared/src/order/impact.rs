//! Customer impact statistics

use rust_decimal::prelude::*;

use crate::models::ImpactStats;

/// Kilograms of CO2 avoided per rescued meal
pub const CO2_PER_MEAL_KG: Decimal = Decimal::from_parts(18, 0, 0, false, 2);
pub const MEALS_GOAL: i64 = 30;
pub const CO2_GOAL: f64 = 10.0;

/// Build the impact summary from the number of meals in completed orders
pub fn impact_stats(meals_rescued: i64) -> ImpactStats {
    let co2 = (Decimal::from(meals_rescued) * CO2_PER_MEAL_KG)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);

    ImpactStats {
        meals_rescued,
        co2_saved: co2.to_f64().unwrap_or_default(),
        meals_goal: MEALS_GOAL,
        co2_goal: CO2_GOAL,
    }
}
