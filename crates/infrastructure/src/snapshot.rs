//! JSON snapshot files.
//!
//! A snapshot holds a whole collection as one pretty-printed JSON array.
//! Writes go to a sibling temporary file which is then renamed over the
//! snapshot, so readers never see a half-written file.

use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// A JSON array of `T` on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SnapshotFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file yields `None`.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn read(&self) -> Result<Option<Vec<T>>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        let items: Vec<T> = serde_json::from_slice(&bytes)?;
        debug!(count = items.len(), "Snapshot read");
        Ok(Some(items))
    }

    /// Replace the snapshot with `items`.
    #[instrument(skip(self, items), fields(path = %self.path.display(), count = items.len()))]
    pub async fn write(&self, items: &[T]) -> Result<()> {
        let json = serde_json::to_vec_pretty(items)?;
        let staging = self.staging_path();

        tokio::fs::write(&staging, json)
            .await
            .map_err(|e| Error::io(&staging, e))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| Error::io(&self.path, e))?;

        debug!("Snapshot written");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let file: SnapshotFile<String> = SnapshotFile::new(dir.path().join("absent.json"));

        assert!(file.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("names.json"));

        file.write(&["a".to_string(), "b".to_string()]).await.unwrap();

        assert_eq!(
            file.read().await.unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(!dir.path().join("names.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let file: SnapshotFile<String> = SnapshotFile::new(path);

        assert!(matches!(file.read().await, Err(Error::Serialization(_))));
    }
}
