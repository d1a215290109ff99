//! Working shifts

pub mod errors;
pub mod service;

pub use errors::ShiftsServiceError;
pub use service::*;
