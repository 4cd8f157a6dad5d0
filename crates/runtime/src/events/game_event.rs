//! Game events extracted from state transitions.
//!
//! Each event carries just enough data for a HUD or audio layer to react
//! without re-reading the full state.

use game_core::state::{KeyRing, StatLine};
use game_core::{BattleEndReason, BattleTurn, Facing, Position};
use serde::{Deserialize, Serialize};

use super::bus::Topic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    /// Hp of the player or the monster in battle changed.
    #[serde(rename_all = "camelCase")]
    HpChanged {
        entity: String,
        old: i32,
        new: i32,
        max: i32,
    },

    KeysChanged { keys: KeyRing },

    #[serde(rename_all = "camelCase")]
    BattleStarted { monster_id: String, turn: BattleTurn },

    #[serde(rename_all = "camelCase")]
    BattleEnded {
        winner_id: Option<String>,
        reason: BattleEndReason,
        player_hp: i32,
    },

    #[serde(rename_all = "camelCase")]
    PlayerLeveledUp { new_level: u32, stat_gains: StatLine },

    PlayerMoved { from: Position, to: Position },

    FacingChanged { facing: Facing },

    /// A placement left the floor (defeated, picked up, opened, bombed).
    EntityRemoved { key: String },

    /// Special-item inventory after the change.
    InventoryChanged { items: Vec<String> },

    EquipmentChanged,

    FloorChanged { floor: i32 },
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::HpChanged { .. }
            | GameEvent::BattleStarted { .. }
            | GameEvent::BattleEnded { .. } => Topic::Battle,
            GameEvent::KeysChanged { .. }
            | GameEvent::PlayerLeveledUp { .. }
            | GameEvent::PlayerMoved { .. }
            | GameEvent::FacingChanged { .. }
            | GameEvent::InventoryChanged { .. }
            | GameEvent::EquipmentChanged => Topic::Player,
            GameEvent::EntityRemoved { .. } | GameEvent::FloorChanged { .. } => Topic::World,
        }
    }
}
