//! Store implementations for the application ports.
//!
//! Both stores share [`Collection`]: an ordered in-memory vector, optionally
//! written through to a JSON snapshot after every change.

mod project_repository;
mod user_store;

pub use project_repository::*;
pub use user_store::*;

use crate::snapshot::SnapshotFile;
use crate::Result;
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Ordered collection with optional write-through persistence.
pub(crate) struct Collection<T> {
    items: RwLock<Vec<T>>,
    file: Option<SnapshotFile<T>>,
    // Serializes mutations so snapshots land in the order they were made.
    write_lock: tokio::sync::Mutex<()>,
}

impl<T> Collection<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync,
{
    pub(crate) fn in_memory(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            file: None,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Load `path`, or create it from `seed` if it does not exist.
    pub(crate) async fn open(path: PathBuf, seed: Vec<T>) -> Result<Self> {
        let file = SnapshotFile::new(path);

        let items = match file.read().await? {
            Some(items) => items,
            None => {
                file.write(&seed).await?;
                info!(path = %file.path().display(), count = seed.len(), "Seeded snapshot");
                seed
            }
        };

        Ok(Self {
            items: RwLock::new(items),
            file: Some(file),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.read().len()
    }

    pub(crate) fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.items.read().iter().find(|item| predicate(item)).cloned()
    }

    /// Apply `change` to a working copy. The copy replaces the collection
    /// only when `change` returns `Some` and the snapshot write succeeds, so a
    /// failed write leaves both memory and disk as they were.
    pub(crate) async fn mutate<R>(
        &self,
        change: impl FnOnce(&mut Vec<T>) -> Option<R>,
    ) -> Result<Option<R>> {
        let _ordered = self.write_lock.lock().await;

        let mut working = self.snapshot();
        let Some(outcome) = change(&mut working) else {
            return Ok(None);
        };

        if let Some(file) = &self.file {
            file.write(&working).await?;
        }

        *self.items.write() = working;
        Ok(Some(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_write_leaves_collection_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state");
        std::fs::create_dir(&state).unwrap();
        let collection = Collection::open(state.join("names.json"), vec!["a".to_string()])
            .await
            .unwrap();

        std::fs::remove_dir_all(&state).unwrap();
        let result = collection
            .mutate(|names| {
                names.push("b".to_string());
                Some(())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(collection.snapshot(), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_declined_change_is_discarded() {
        let collection = Collection::in_memory(vec![1, 2, 3]);

        let outcome = collection
            .mutate(|numbers| {
                numbers.clear();
                None::<()>
            })
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(collection.snapshot(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_successful_change_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.json");
        let collection = Collection::open(path.clone(), Vec::new()).await.unwrap();

        collection
            .mutate(|names| {
                names.push("a".to_string());
                Some(())
            })
            .await
            .unwrap();

        let reopened: Collection<String> = Collection::open(path, Vec::new()).await.unwrap();
        assert_eq!(reopened.snapshot(), vec!["a".to_string()]);
        assert_eq!(collection.len(), 1);
    }
}
