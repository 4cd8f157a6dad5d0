//! Content factory for building the content snapshot from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::env::PlayerTemplate;
use game_core::{ContentSnapshot, GameConfig, LevelRow, MapLayout};
use tracing::info;

use crate::loaders::{
    BuffLoader, ConfigLoader, ContentManifest, Document, EquipmentLoader, ItemLoader, LevelLoader,
    LoadResult, MapLoader, MonsterLoader, PlayerLoader, find_document,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── content.toml        (optional: data_version)
/// ├── config.toml         (optional: GameConfig overrides)
/// ├── player.json         (or playerdata.json)
/// ├── levels.json         (or leveldata.json)
/// ├── monsters/*.json
/// ├── items/*.json
/// ├── equipments/*.json
/// ├── buffs/*.json
/// └── maps/*.json
/// ```
///
/// Any `.json` file may be `.ron` or `.toml` instead.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    const PLAYER_STEMS: [&'static str; 2] = ["player", "playerdata"];
    const LEVEL_STEMS: [&'static str; 2] = ["levels", "leveldata"];

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the pack manifest from `content.toml`, or defaults.
    pub fn load_manifest(&self) -> LoadResult<ContentManifest> {
        let path = self.data_dir.join("content.toml");
        if !path.is_file() {
            return Ok(ContentManifest::default());
        }
        ContentManifest::load(&path)
    }

    /// Load game configuration from `config.toml`, or defaults.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.is_file() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn load_player(&self) -> LoadResult<Option<PlayerTemplate>> {
        find_document(&self.data_dir, &Self::PLAYER_STEMS)
            .map(|path| PlayerLoader::load(&path))
            .transpose()
    }

    pub fn load_levels(&self) -> LoadResult<Vec<LevelRow>> {
        Ok(find_document(&self.data_dir, &Self::LEVEL_STEMS)
            .map(|path| LevelLoader::load(&path))
            .transpose()?
            .unwrap_or_default())
    }

    pub fn load_maps(&self) -> LoadResult<Vec<MapLayout>> {
        let maps = MapLoader::load_dir(&self.data_dir.join("maps"))?;
        Ok(maps.into_values().collect())
    }

    /// Loads everything and assembles the snapshot the engine reads from.
    pub fn build(&self) -> LoadResult<ContentSnapshot> {
        let manifest = self.load_manifest()?;
        let mut snapshot = ContentSnapshot::new()
            .with_config(self.load_config()?)
            .with_levels(self.load_levels()?)
            .with_data_version(manifest.data_version);

        if let Some(player) = self.load_player()? {
            snapshot = snapshot.with_player(player);
        }

        let monsters = MonsterLoader::load_dir(&self.data_dir.join("monsters"))
            .context("Failed to load monsters")?;
        let monsters = register(monsters, |m| m.id.as_str(), |key, m| {
            snapshot.insert_monster(key, m)
        });

        let items = ItemLoader::load_dir(&self.data_dir.join("items"))
            .context("Failed to load items")?;
        let items = register(items, |i| i.id.as_str(), |key, i| snapshot.insert_item(key, i));

        let equipments = EquipmentLoader::load_dir(&self.data_dir.join("equipments"))
            .context("Failed to load equipments")?;
        let equipments = register(equipments, |e| e.id.as_str(), |key, e| {
            snapshot.insert_equipment(key, e)
        });

        let buffs = BuffLoader::load_dir(&self.data_dir.join("buffs"))
            .context("Failed to load buffs")?;
        let buffs = register(buffs, |b| b.id.as_str(), |key, b| snapshot.insert_buff(key, b));

        let maps = self.load_maps().context("Failed to load maps")?;
        let floors = maps.len();
        for map in maps {
            snapshot.insert_map(map);
        }

        info!(
            dir = %self.data_dir.display(),
            monsters,
            items,
            equipments,
            buffs,
            floors,
            "content loaded"
        );
        Ok(snapshot)
    }
}

/// Registers each definition under its id and, when different, its file stem.
/// Returns the number of definitions.
fn register<T: Clone>(
    documents: Vec<Document<T>>,
    id_of: impl Fn(&T) -> &str,
    mut insert: impl FnMut(String, T),
) -> usize {
    let count = documents.len();
    for Document { stem, value } in documents {
        let id = id_of(&value).to_string();
        if !stem.is_empty() && stem != id {
            insert(stem, value.clone());
        }
        insert(id, value);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ContentOracle;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_builds_default_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = ContentFactory::new(dir.path()).build().unwrap();
        assert_eq!(snapshot.data_version(), "0");
        assert!(snapshot.floors().is_empty());
        assert!(snapshot.player().is_none());
        assert_eq!(snapshot.config(), &GameConfig::default());
    }

    #[test]
    fn definitions_are_aliased_by_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let monsters = dir.path().join("monsters");
        std::fs::create_dir(&monsters).unwrap();
        std::fs::write(
            monsters.join("monster_green_slime.json"),
            r#"{"id": "green_slime", "name": "Green Slime", "hp": 35, "attack": 18, "defense": 1}"#,
        )
        .unwrap();

        let snapshot = ContentFactory::new(dir.path()).build().unwrap();
        let by_id = snapshot.monster("green_slime").unwrap();
        let by_stem = snapshot.monster("monster_green_slime").unwrap();
        assert_eq!(by_id, by_stem);
    }
}
