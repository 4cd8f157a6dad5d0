//! Players, monsters and the buffs they carry.

use std::collections::BTreeMap;

use super::common::{Facing, Position, StatLine};
use super::equipment::{Equipment, EquipmentSlot};
use super::item::KeyRing;

/// When a buff gets a chance to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BuffTrigger {
    OnBattleStart,
    OnHpLessThanZero,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub id: String,
    pub name: String,
    /// Turns remaining, `-1` for permanent.
    pub duration: i32,
    /// Triggers remaining, `-1` for unlimited.
    pub charges: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggers: Vec<BuffTrigger>,
}

impl Buff {
    pub const PERMANENT: i32 = -1;
    pub const UNLIMITED: i32 = -1;

    pub fn has_charges(&self) -> bool {
        self.charges == Self::UNLIMITED || self.charges > 0
    }

    pub fn triggers_on(&self, trigger: BuffTrigger) -> bool {
        self.triggers.contains(&trigger)
    }

    /// Spends one charge. Returns true if the buff is now exhausted.
    pub fn consume_charge(&mut self) -> bool {
        if self.charges == Self::UNLIMITED {
            return false;
        }
        self.charges = (self.charges - 1).max(0);
        self.charges == 0
    }
}

/// Shared record for the player and monsters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
    pub hp: i32,
    pub maxhp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default, rename = "direction"))]
    pub facing: Facing,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: BTreeMap<EquipmentSlot, Equipment>,
    #[cfg_attr(feature = "serde", serde(default, rename = "backupEquipment"))]
    pub backup_equipment: Vec<Equipment>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub buffs: Vec<Buff>,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

impl Character {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level: 1,
            hp: 1,
            maxhp: 1,
            attack: 0,
            defense: 0,
            speed: 0,
            position: Position::ORIGIN,
            facing: Facing::Right,
            equipment: BTreeMap::new(),
            backup_equipment: Vec::new(),
            buffs: Vec::new(),
        }
    }

    /// Sets hp and maxhp together along with the combat stats.
    pub fn with_stats(mut self, maxhp: i32, attack: i32, defense: i32, speed: i32) -> Self {
        self.hp = maxhp;
        self.maxhp = maxhp;
        self.attack = attack;
        self.defense = defense;
        self.speed = speed;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Base stats with maxhp standing in for the hp channel.
    pub fn base_stats(&self) -> StatLine {
        StatLine::new(self.maxhp, self.attack, self.defense, self.speed)
    }

    /// Distinct equipped items, each counted once even if it spans slots.
    pub fn equipped_items(&self) -> impl Iterator<Item = &Equipment> {
        let mut seen: Vec<&str> = Vec::new();
        self.equipment.values().filter(move |item| {
            if seen.contains(&item.id.as_str()) {
                false
            } else {
                seen.push(item.id.as_str());
                true
            }
        })
    }

    pub fn buff(&self, id: &str) -> Option<&Buff> {
        self.buffs.iter().find(|buff| buff.id == id)
    }
}

/// The player character and its progression.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub character: Character,
    pub exp: u32,
    pub keys: KeyRing,
    #[cfg_attr(feature = "serde", serde(default, rename = "hasMonsterManual"))]
    pub has_monster_manual: bool,
    /// Consumables and trophies by content id, e.g. `"bomb"`.
    #[cfg_attr(feature = "serde", serde(default, rename = "specialItems"))]
    pub special_items: Vec<String>,
}

impl Player {
    pub fn new(character: Character) -> Self {
        Self {
            character,
            exp: 0,
            keys: KeyRing::default(),
            has_monster_manual: false,
            special_items: Vec::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.character.position
    }

    pub fn holds(&self, item: &str) -> bool {
        self.special_items.iter().any(|held| held == item)
    }

    /// Removes one instance of `item` from the inventory.
    pub fn take_item(&mut self, item: &str) -> bool {
        match self.special_items.iter().position(|held| held == item) {
            Some(index) => {
                self.special_items.remove(index);
                true
            }
            None => false,
        }
    }
}
