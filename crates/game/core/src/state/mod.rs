//! Authoritative game state representation.
//!
//! A [`GameState`] describes one floor: its layout, the player, every placed
//! object and the active interaction. States are values. The engine derives a
//! new one per action and never edits a snapshot it has handed out.
pub mod delta;
mod error;
mod initializer;
pub mod types;

use std::sync::Arc;

pub use delta::{PlayerFields, StateDelta};
pub use error::InitializationError;
pub use types::{
    Battle, BattleEndReason, BattleTurn, Buff, BuffTrigger, Character, EntitiesState, Equipment,
    EquipmentSlot, Facing, InteractionState, Item, ItemKind, KeyColor, KeyRing, PercentLine,
    PlacedObject, Placement, Player, Position, SlotSpec, SpecialKind, StatKind, StatLine,
    WeaponType,
};

use crate::map::{DoorCondition, MapLayout};

/// Canonical snapshot of one floor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    #[cfg_attr(feature = "serde", serde(rename = "currentFloor"))]
    pub floor: i32,
    /// Layout shared with the content pack and with every later snapshot.
    pub map: Arc<MapLayout>,
    /// Placement key mirroring the player in `entities`.
    #[cfg_attr(feature = "serde", serde(rename = "playerKey"))]
    pub player_key: String,
    pub player: Player,
    pub entities: EntitiesState,
    #[cfg_attr(feature = "serde", serde(rename = "interactionState"))]
    pub interaction: InteractionState,
}

/// Whether the player could open a door right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoorAccess {
    pub color: KeyColor,
    pub has_key: bool,
    /// False while the monster named by the door's condition is still on the floor.
    pub condition_met: bool,
}

impl DoorAccess {
    pub fn can_open(&self) -> bool {
        self.has_key && self.condition_met
    }
}

impl GameState {
    pub fn player_position(&self) -> Position {
        self.player.position()
    }

    /// Moves the player and its mirror placement together.
    pub fn set_player_position(&mut self, position: Position) {
        self.player.character.position = position;
        if let Some(mirror) = self.entities.get_mut(&self.player_key) {
            mirror.position = position;
        }
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.interaction.battle()
    }

    /// Removes a placement from every registry at once.
    pub fn remove_placement(&mut self, key: &str) -> Option<Placement> {
        if key == self.player_key {
            return None;
        }
        self.entities.remove(key)
    }

    /// Reports key and condition status for the door at placement `key`.
    pub fn door_access(&self, key: &str) -> Option<DoorAccess> {
        let door = self.entities.door(key)?;
        let condition_met = match &door.condition {
            Some(DoorCondition::DefeatMonster { monster_id }) => !self
                .entities
                .monsters()
                .any(|(_, monster)| &monster.id == monster_id),
            None => true,
        };
        Some(DoorAccess {
            color: door.color,
            has_key: self.player.keys.count(door.color) > 0,
            condition_met,
        })
    }

    /// SHA-256 over the canonical binary encoding of the state.
    ///
    /// Registries are ordered maps, so equal states always hash equally.
    #[cfg(feature = "serde")]
    pub fn compute_hash(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}
