//! Supplies

pub mod errors;
pub mod service;

pub use errors::SuppliesServiceError;
pub use service::*;
