//! Repository contract for save blobs.

use async_trait::async_trait;

use super::error::Result;

/// Key-value store for serialized save records.
///
/// Keys are flat strings such as `save_slot_1`. Blobs are opaque to the
/// repository; the save manager owns their format.
#[async_trait]
pub trait SaveRepository: Send + Sync {
    /// Load the blob stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value.
    async fn write(&self, key: &str, blob: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// All stored keys, sorted.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.read(key).await?.is_some())
    }
}
