//! Cars, pick-up points and staff

pub mod errors;
pub mod service;

pub use errors::FleetServiceError;
pub use service::*;
