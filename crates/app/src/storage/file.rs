//! File-backed store

use std::{
    collections::BTreeMap,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::storage::{KeyValueStore, StorageError};

/// Key/value store persisted as one JSON object in a file.
///
/// Every operation reads the file, so edits made by another process are picked
/// up. Writes replace the whole file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Use the file at `path`. The file and its directory are created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => return Err(error.into()),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| StorageError::CorruptFile {
            path: self.path.clone(),
            source,
        })
    }

    async fn write(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(values).map_err(io::Error::from)?;

        fs::write(&self.path, contents).await?;

        debug!(path = %self.path.display(), keys = values.len(), "storage file written");

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;

        Ok(self.read().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut values = self.read().await?;

        values.insert(key.to_string(), value);

        self.write(&values).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut values = self.read().await?;

        if values.remove(key).is_none() {
            return Ok(());
        }

        self.write(&values).await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn values_survive_a_new_store_instance() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("storage.json");

        FileStore::new(&path).set("session", "{}".to_string()).await?;

        let reopened = FileStore::new(&path);

        assert_eq!(reopened.get("session").await?.as_deref(), Some("{}"));
        assert_eq!(reopened.get("missing").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn remove_deletes_only_the_given_key() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path().join("storage.json"));

        store.set("a", "1".to_string()).await?;
        store.set("b", "2".to_string()).await?;
        store.remove("a").await?;
        store.remove("never-set").await?;

        assert_eq!(store.get("a").await?, None);
        assert_eq!(store.get("b").await?.as_deref(), Some("2"));

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("storage.json");

        std::fs::write(&path, "[1, 2")?;

        let result = FileStore::new(&path).get("session").await;

        assert!(
            matches!(result, Err(StorageError::CorruptFile { .. })),
            "unexpected result: {result:?}"
        );

        Ok(())
    }
}
