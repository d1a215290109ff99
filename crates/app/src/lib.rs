//! Waybill client services: backend API, session, local mirror and per-screen
//! services.

pub mod api;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod session;
pub mod storage;

#[cfg(test)]
mod test;
