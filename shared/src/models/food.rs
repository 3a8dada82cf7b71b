//! Food Listing Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surplus food listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Food {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Hosted image URL
    pub image: Option<String>,
    /// Discounted price
    pub price: f64,
    /// Original price
    pub old_price: Option<f64>,
    /// Discount percentage
    pub discount: Option<i32>,
    pub quantity: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Food listing joined with its restaurant, as shown in the public catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FoodWithRestaurant {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub food: Food,
    pub restaurant_name: String,
    pub restaurant_address: String,
}

/// Create food payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCreate {
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: f64,
    pub old_price: Option<f64>,
    pub discount: Option<i32>,
    pub quantity: i32,
    pub expires_at: DateTime<Utc>,
}

/// Update food payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub old_price: Option<f64>,
    pub discount: Option<i32>,
    pub quantity: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl FoodUpdate {
    /// Apply the present fields onto an existing listing
    pub fn apply_to(self, food: &mut Food) {
        if let Some(name) = self.name {
            food.name = name;
        }
        if let Some(description) = self.description {
            food.description = Some(description);
        }
        if let Some(image) = self.image {
            food.image = Some(image);
        }
        if let Some(price) = self.price {
            food.price = price;
        }
        if let Some(old_price) = self.old_price {
            food.old_price = Some(old_price);
        }
        if let Some(discount) = self.discount {
            food.discount = Some(discount);
        }
        if let Some(quantity) = self.quantity {
            food.quantity = quantity;
        }
        if let Some(expires_at) = self.expires_at {
            food.expires_at = expires_at;
        }
    }
}

/// Listing filters for `GET /api/foods`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodQuery {
    pub restaurant_id: Option<i64>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
