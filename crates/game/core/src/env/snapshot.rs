//! In-memory content pack.
//!
//! [`ContentSnapshot`] is the one concrete [`ContentOracle`]: loaders fill it
//! from disk, tests build it by hand.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::content::{ContentOracle, LevelRow, LevelTable, PlayerTemplate};
use crate::config::GameConfig;
use crate::map::MapLayout;
use crate::state::{Buff, Character, Equipment, Item};

#[derive(Clone, Debug, Default)]
pub struct ContentSnapshot {
    maps: BTreeMap<i32, Arc<MapLayout>>,
    monsters: BTreeMap<String, Character>,
    items: BTreeMap<String, Item>,
    equipments: BTreeMap<String, Equipment>,
    buffs: BTreeMap<String, Buff>,
    player: Option<PlayerTemplate>,
    levels: LevelTable,
    config: GameConfig,
    data_version: String,
}

impl ContentSnapshot {
    pub const DEFAULT_DATA_VERSION: &'static str = "0";

    pub fn new() -> Self {
        Self {
            data_version: Self::DEFAULT_DATA_VERSION.to_string(),
            ..Self::default()
        }
    }

    pub fn with_map(mut self, map: MapLayout) -> Self {
        self.insert_map(map);
        self
    }

    pub fn with_monster(mut self, monster: Character) -> Self {
        self.insert_monster(monster.id.clone(), monster);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.insert_item(item.id.clone(), item);
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.insert_equipment(equipment.id.clone(), equipment);
        self
    }

    pub fn with_buff(mut self, buff: Buff) -> Self {
        self.insert_buff(buff.id.clone(), buff);
        self
    }

    pub fn with_player(mut self, player: PlayerTemplate) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_levels(mut self, rows: Vec<LevelRow>) -> Self {
        self.levels = LevelTable::new(rows);
        self
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_data_version(mut self, version: impl Into<String>) -> Self {
        self.data_version = version.into();
        self
    }

    /// Stores `map` under its own floor number, replacing any previous layout.
    pub fn insert_map(&mut self, map: MapLayout) {
        self.maps.insert(map.floor, Arc::new(map));
    }

    /// Registers a monster under `key`, which may be an id or a file alias.
    pub fn insert_monster(&mut self, key: impl Into<String>, monster: Character) {
        self.monsters.insert(key.into(), monster);
    }

    pub fn insert_item(&mut self, key: impl Into<String>, item: Item) {
        self.items.insert(key.into(), item);
    }

    pub fn insert_equipment(&mut self, key: impl Into<String>, equipment: Equipment) {
        self.equipments.insert(key.into(), equipment);
    }

    pub fn insert_buff(&mut self, key: impl Into<String>, buff: Buff) {
        self.buffs.insert(key.into(), buff);
    }

    pub fn monsters(&self) -> impl Iterator<Item = (&str, &Character)> {
        self.monsters.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.items.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn equipments(&self) -> impl Iterator<Item = (&str, &Equipment)> {
        self.equipments
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn buffs(&self) -> impl Iterator<Item = (&str, &Buff)> {
        self.buffs.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl ContentOracle for ContentSnapshot {
    fn map_layout(&self, floor: i32) -> Option<Arc<MapLayout>> {
        self.maps.get(&floor).cloned()
    }

    fn floors(&self) -> Vec<i32> {
        self.maps.keys().copied().collect()
    }

    fn monster(&self, id: &str) -> Option<&Character> {
        self.monsters.get(id)
    }

    fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    fn equipment(&self, id: &str) -> Option<&Equipment> {
        self.equipments.get(id)
    }

    fn buff(&self, id: &str) -> Option<&Buff> {
        self.buffs.get(id)
    }

    fn player(&self) -> Option<&PlayerTemplate> {
        self.player.as_ref()
    }

    fn levels(&self) -> &LevelTable {
        &self.levels
    }

    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn data_version(&self) -> &str {
        &self.data_version
    }
}
