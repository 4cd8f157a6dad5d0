//! File-based SaveRepository implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// File-based implementation of SaveRepository.
///
/// Each key is stored as `{key}.json` under the base directory. Writes go to
/// a temporary file first and are moved into place with a rename.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    const EXTENSION: &'static str = "json";

    /// Create a new file-based repository, creating the directory if needed.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn blob_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RepositoryError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(format!("{key}.{}", Self::EXTENSION)))
    }
}

#[async_trait]
impl SaveRepository for FileSaveRepository {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(blob) => {
                tracing::debug!("Loaded {} from {}", key, path.display());
                Ok(Some(blob))
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn write(&self, key: &str, blob: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, blob).await?;

        // Atomic rename
        fs::rename(&temp_path, &path).await?;

        tracing::debug!("Saved {} to {}", key, path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Deleted {}", key);
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(key) = filename.strip_suffix(".json")
            {
                keys.push(key.to_string());
            }
        }

        keys.sort_unstable();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path().join("saves")).await.unwrap();

        assert_eq!(repo.read("save_slot_1").await.unwrap(), None);
        repo.write("save_slot_1", "{\"a\":1}").await.unwrap();
        repo.write("save_slot_2", "{}").await.unwrap();
        assert_eq!(
            repo.read("save_slot_1").await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert_eq!(repo.keys().await.unwrap(), vec!["save_slot_1", "save_slot_2"]);

        repo.remove("save_slot_1").await.unwrap();
        repo.remove("save_slot_1").await.unwrap();
        assert!(!repo.exists("save_slot_1").await.unwrap());
        assert!(!repo.base_dir().join("save_slot_1.json.tmp").exists());
    }

    #[tokio::test]
    async fn path_like_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).await.unwrap();
        assert!(matches!(
            repo.write("../escape", "{}").await,
            Err(RepositoryError::InvalidKey(_))
        ));
    }
}
