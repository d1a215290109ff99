//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Local key/value mirror settings.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// JSON file holding the session, confirmed supplies and open shift
    #[arg(long, env = "WAYBILL_STORAGE_PATH", default_value = ".waybill/storage.json")]
    pub storage_path: PathBuf,
}
