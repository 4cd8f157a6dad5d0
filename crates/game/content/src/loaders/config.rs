//! Game configuration and manifest loaders.

use std::path::Path;

use game_core::{ContentSnapshot, GameConfig};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys take their defaults, so a pack may override only a few.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config: GameConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

/// Pack-level metadata from `content.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentManifest {
    /// Version tag written into saves made against this pack.
    pub data_version: String,
}

impl Default for ContentManifest {
    fn default() -> Self {
        Self {
            data_version: ContentSnapshot::DEFAULT_DATA_VERSION.to_string(),
        }
    }
}

impl ContentManifest {
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse manifest TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_combat_rounds = 12\ncross_bonus = 5\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.max_combat_rounds, 12);
        assert_eq!(config.cross_bonus, 5);
        assert_eq!(config.default_potion_id, "small_potion");
        assert_eq!(config.wall_tile, 1);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_combat_rounds = \"many\"").unwrap();
        assert!(ConfigLoader::load(&path).is_err());
    }

    #[test]
    fn manifest_defaults_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.toml");
        std::fs::write(&path, "").unwrap();
        assert_eq!(ContentManifest::load(&path).unwrap().data_version, "0");

        std::fs::write(&path, "data_version = \"1.4\"").unwrap();
        assert_eq!(ContentManifest::load(&path).unwrap().data_version, "1.4");
    }
}
