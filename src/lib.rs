//! Waybill
//!
//! Waybill is the domain core of a logistics client: drivers bring supplies to
//! pick-up points, workers receive the products they carry, and administrators
//! schedule supplies, manage the fleet and export reports. Everything here is
//! pure; network and storage live in `waybill-app`.

pub mod fixtures;
pub mod fleet;
pub mod ids;
pub mod navigation;
pub mod prelude;
pub mod products;
pub mod render;
pub mod reports;
pub mod shifts;
pub mod supplies;
pub mod time;
pub mod users;
pub mod validation;
