//! arzaq-server: food-waste marketplace backend
//!
//! Restaurants list surplus food at a discount, customers reserve it for
//! pickup, and administrators vet restaurants. Order placement is the one
//! transactional workflow: stock is checked and decremented atomically with
//! the order insert.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod media;
pub mod state;
pub mod util;
