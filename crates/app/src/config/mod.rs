//! Client configuration

use clap::Args;

use crate::config::{api::ApiConfig, observability::LoggingConfig, storage::StorageConfig};

pub mod api;
pub mod observability;
pub mod storage;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Backend connection settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local key/value mirror settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
