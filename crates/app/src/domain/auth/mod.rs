//! Authentication

pub mod errors;
pub mod service;

pub use errors::AuthServiceError;
pub use service::*;
