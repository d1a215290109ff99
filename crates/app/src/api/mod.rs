//! Logistics backend API

mod client;
mod errors;
pub mod payloads;
mod service;

pub use client::HttpLogisticsApi;
pub use errors::ApiError;
pub use service::*;
