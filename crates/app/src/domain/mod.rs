//! Per-screen services

pub mod auth;
pub mod fleet;
pub mod products;
pub mod reports;
pub mod shifts;
pub mod supplies;
