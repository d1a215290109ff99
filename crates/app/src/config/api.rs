//! Backend Config

use std::time::Duration;

use clap::Args;

/// Backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the logistics backend
    #[arg(long, env = "WAYBILL_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    /// Timeout for a single request, in seconds
    #[arg(long, env = "WAYBILL_REQUEST_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub request_timeout_seconds: u64,
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}
