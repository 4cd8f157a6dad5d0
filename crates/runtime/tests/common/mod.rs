//! Hand-built content shared by the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use game_core::env::PlayerTemplate;
use game_core::map::{Door, EntityKind, EntitySpec, Stair, StairTarget};
use game_core::state::{KeyColor, KeyRing};
use game_core::{Character, ContentOracle, ContentSnapshot, Item, LevelRow, MapLayout};

/// Floor 1, a single corridor:
///
/// ```text
/// (0,0) hero  (1,0) yellow key  (2,0) yellow door  (3,0) slime  (4,0) stair up
/// ```
pub fn corridor() -> MapLayout {
    MapLayout::from_codes(1, &[[0; 5], [1; 5]])
        .with_entity("start", EntitySpec::new(EntityKind::PlayerStart, "hero", 0, 0))
        .with_entity("key1", EntitySpec::new(EntityKind::Item, "yellow_key", 1, 0))
        .with_entity("door_1", EntitySpec::new(EntityKind::Door, "door_1", 2, 0))
        .with_entity("slime1", EntitySpec::new(EntityKind::Monster, "slime", 3, 0))
        .with_entity("up", EntitySpec::new(EntityKind::Stair, "up", 4, 0))
        .with_door(Door::new("door_1", KeyColor::Yellow))
        .with_stair(Stair {
            id: "up".into(),
            target: StairTarget { floor: 2, x: 1, y: 1 },
        })
}

pub fn landing() -> MapLayout {
    MapLayout::from_codes(2, &[[0; 3]; 3])
}

pub fn content() -> ContentSnapshot {
    ContentSnapshot::new()
        .with_map(corridor())
        .with_map(landing())
        .with_player(PlayerTemplate {
            id: "hero".into(),
            name: "Hero".into(),
            level: 1,
            exp: 0,
            hp: None,
            keys: KeyRing::default(),
        })
        .with_levels(vec![
            LevelRow {
                level: 1,
                exp_needed: 0,
                maxhp: 100,
                attack: 10,
                defense: 5,
                speed: 10,
            },
            LevelRow {
                level: 2,
                exp_needed: 10,
                maxhp: 150,
                attack: 15,
                defense: 8,
                speed: 11,
            },
        ])
        .with_monster(Character::new("slime", "Slime").with_stats(20, 6, 1, 5))
        .with_item(Item::key("yellow_key", "Yellow Key", KeyColor::Yellow))
        .with_data_version("1.0.0")
}

pub fn oracle() -> Arc<dyn ContentOracle> {
    Arc::new(content())
}
