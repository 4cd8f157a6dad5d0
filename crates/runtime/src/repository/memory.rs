//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// In-memory implementation of SaveRepository.
#[derive(Default)]
pub struct InMemorySaveRepo {
    blobs: RwLock<BTreeMap<String, String>>,
}

impl InMemorySaveRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SaveRepository for InMemorySaveRepo {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let blobs = self.blobs.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(blobs.get(key).cloned())
    }

    async fn write(&self, key: &str, blob: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        blobs.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let blobs = self.blobs.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(blobs.keys().cloned().collect())
    }
}
