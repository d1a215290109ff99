//! Key/value mirror
//!
//! A flat string store playing the part of browser local storage. Values are
//! JSON documents, re-parsed on every read.

use std::{io, path::PathBuf};

use async_trait::async_trait;
use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the signed-in session.
pub const SESSION_KEY: &str = "session";

/// Key holding the ids of supplies confirmed on this client.
pub const CONFIRMED_SUPPLIES_KEY: &str = "confirmedSupplies";

/// Key holding the start of the open working shift.
pub const CURRENT_SHIFT_START_KEY: &str = "currentShiftStart";

/// Errors raised by the key/value mirror.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage io error")]
    Io(#[from] io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("storage file {path} is corrupt")]
    CorruptFile {
        /// Backing file
        path: PathBuf,

        /// Parser failure
        #[source]
        source: serde_json::Error,
    },

    /// A stored value could not be parsed.
    #[error("stored value for {key} is corrupt")]
    CorruptValue {
        /// Key of the value
        key: String,

        /// Parser failure
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded.
    #[error("failed to encode value for {key}")]
    Encode {
        /// Key of the value
        key: String,

        /// Encoder failure
        #[source]
        source: serde_json::Error,
    },
}

/// Flat string storage.
#[automock]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and parse the JSON value stored under `key`.
///
/// # Errors
///
/// Returns [`StorageError::CorruptValue`] when the stored value is not valid for `T`.
pub async fn get_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::CorruptValue {
            key: key.to_string(),
            source,
        })
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] when the value cannot be encoded.
pub async fn set_json<T>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError>
where
    T: Serialize + Sync,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;

    store.set(key, raw).await
}
