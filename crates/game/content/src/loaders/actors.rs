//! Monster and player template loaders.

use std::path::Path;

use game_core::env::PlayerTemplate;
use game_core::state::{Buff, Character};
use serde::Deserialize;

use crate::loaders::{Document, LoadResult, load_documents, parse_document, usable_id};

/// Monster definition as authored.
///
/// `maxhp` defaults to `hp` and `name` to the id; unknown fields such as
/// `gold` or `assetId` are ignored.
#[derive(Debug, Clone, Deserialize)]
struct MonsterDocument {
    id: Option<String>,
    name: Option<String>,
    #[serde(default = "first_level")]
    level: u32,
    hp: i32,
    maxhp: Option<i32>,
    #[serde(default)]
    attack: i32,
    #[serde(default)]
    defense: i32,
    #[serde(default)]
    speed: i32,
    #[serde(default)]
    buffs: Vec<Buff>,
}

fn first_level() -> u32 {
    1
}

impl MonsterDocument {
    fn into_character(self) -> Option<Character> {
        let id = usable_id(self.id)?;
        let name = self.name.unwrap_or_else(|| id.clone());
        let mut character = Character::new(id, name).with_stats(
            self.maxhp.unwrap_or(self.hp),
            self.attack,
            self.defense,
            self.speed,
        );
        character.hp = self.hp;
        character.level = self.level;
        character.buffs = self.buffs;
        Some(character)
    }
}

/// Loader for the `monsters/` directory.
pub struct MonsterLoader;

impl MonsterLoader {
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<Document<Character>>> {
        load_documents(dir, MonsterDocument::into_character)
    }
}

/// Loader for the player template.
pub struct PlayerLoader;

impl PlayerLoader {
    pub fn load(path: &Path) -> LoadResult<PlayerTemplate> {
        parse_document(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monsters_fill_defaults_and_skip_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("monster_green_slime.json"),
            r#"{"id": "green_slime", "name": "Green Slime", "hp": 35, "attack": 18, "defense": 1, "gold": 1}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("bat.ron"),
            r#"(id: Some("bat"), hp: 20, maxhp: Some(25), attack: 5, speed: 20)"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), r#"{"hp": 3}"#).unwrap();

        let monsters = MonsterLoader::load_dir(dir.path()).unwrap();
        assert_eq!(monsters.len(), 2);

        let bat = &monsters[0];
        assert_eq!(bat.stem, "bat");
        assert_eq!(bat.value.name, "bat");
        assert_eq!((bat.value.hp, bat.value.maxhp), (20, 25));
        assert_eq!(bat.value.speed, 20);

        let slime = &monsters[1];
        assert_eq!(slime.stem, "monster_green_slime");
        assert_eq!(slime.value.id, "green_slime");
        assert_eq!((slime.value.hp, slime.value.maxhp), (35, 35));
        assert_eq!(slime.value.level, 1);
    }

    #[test]
    fn player_template_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");
        std::fs::write(
            &path,
            r#"{"id": "hero", "name": "Hero", "keys": {"yellow": 1}}"#,
        )
        .unwrap();

        let template = PlayerLoader::load(&path).unwrap();
        assert_eq!(template.id, "hero");
        assert_eq!(template.level, 1);
        assert_eq!(template.keys.yellow, 1);
        assert_eq!(template.hp, None);
    }
}
