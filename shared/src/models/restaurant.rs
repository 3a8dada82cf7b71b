//! Restaurant Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Approval state. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "restaurant_status", rename_all = "lowercase"))]
pub enum RestaurantStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: RestaurantStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Update restaurant payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Rejection payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantReject {
    pub reason: String,
}

/// Listing filters for `GET /api/restaurants`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantQuery {
    pub status: Option<RestaurantStatus>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
