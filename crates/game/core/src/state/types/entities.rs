//! Canonical "what is on this tile" store.
//!
//! Every placed object lives in exactly one [`Placement`] keyed by its
//! placement key. Per-kind registries (monsters, items, equipment, doors,
//! stairs) are views over this single map, so removing a placement removes it
//! from every registry at once.

use std::collections::BTreeMap;

use super::character::Character;
use super::common::Position;
use super::equipment::Equipment;
use super::item::Item;
use crate::map::{Door, Stair};

/// Object stored at a placement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "data", rename_all = "snake_case")
)]
pub enum PlacedObject {
    /// Mirror of the player record; the player itself lives on `GameState`.
    #[cfg_attr(feature = "serde", serde(rename = "player_start"))]
    Player,
    Monster(Character),
    Item(Item),
    Equipment(Equipment),
    Door(Door),
    Stair(Stair),
    /// Authored kinds the engine does not interpret.
    Other { kind: String, id: String },
}

impl PlacedObject {
    pub fn kind_name(&self) -> &str {
        match self {
            PlacedObject::Player => "player_start",
            PlacedObject::Monster(_) => "monster",
            PlacedObject::Item(_) => "item",
            PlacedObject::Equipment(_) => "equipment",
            PlacedObject::Door(_) => "door",
            PlacedObject::Stair(_) => "stair",
            PlacedObject::Other { kind, .. } => kind,
        }
    }

    /// Content id of the placed object, if it has one.
    pub fn content_id(&self) -> Option<&str> {
        match self {
            PlacedObject::Player => None,
            PlacedObject::Monster(monster) => Some(&monster.id),
            PlacedObject::Item(item) => Some(&item.id),
            PlacedObject::Equipment(equipment) => Some(&equipment.id),
            PlacedObject::Door(door) => Some(&door.id),
            PlacedObject::Stair(stair) => Some(&stair.id),
            PlacedObject::Other { id, .. } => Some(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub position: Position,
    pub object: PlacedObject,
}

impl Placement {
    pub fn new(position: Position, object: PlacedObject) -> Self {
        Self { position, object }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    placements: BTreeMap<String, Placement>,
}

macro_rules! kind_view {
    ($all:ident, $one:ident, $one_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $all(&self) -> impl Iterator<Item = (&str, &$ty)> {
            self.placements
                .iter()
                .filter_map(|(key, placement)| match &placement.object {
                    PlacedObject::$variant(value) => Some((key.as_str(), value)),
                    _ => None,
                })
        }

        pub fn $one(&self, key: &str) -> Option<&$ty> {
            match &self.placements.get(key)?.object {
                PlacedObject::$variant(value) => Some(value),
                _ => None,
            }
        }

        pub fn $one_mut(&mut self, key: &str) -> Option<&mut $ty> {
            match &mut self.placements.get_mut(key)?.object {
                PlacedObject::$variant(value) => Some(value),
                _ => None,
            }
        }
    };
}

impl EntitiesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, placement: Placement) -> Option<Placement> {
        self.placements.insert(key.into(), placement)
    }

    pub fn remove(&mut self, key: &str) -> Option<Placement> {
        self.placements.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Placement> {
        self.placements.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Placement> {
        self.placements.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.placements.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Placement)> {
        self.placements
            .iter()
            .map(|(key, placement)| (key.as_str(), placement))
    }

    /// First non-player placement at `position`, in key order.
    pub fn occupant_at(&self, position: Position) -> Option<(&str, &Placement)> {
        self.iter().find(|(_, placement)| {
            placement.position == position && placement.object != PlacedObject::Player
        })
    }

    /// Keys of every placement mirroring the player.
    pub fn player_keys(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, placement)| placement.object == PlacedObject::Player)
            .map(|(key, _)| key)
    }

    kind_view!(monsters, monster, monster_mut, Monster, Character);
    kind_view!(items, item, item_mut, Item, Item);
    kind_view!(equipments, equipment, equipment_mut, Equipment, Equipment);
    kind_view!(doors, door, door_mut, Door, Door);
    kind_view!(stairs, stair, stair_mut, Stair, Stair);
}
