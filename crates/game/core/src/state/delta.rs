//! Change metadata between two state snapshots.
//!
//! A [`StateDelta`] records *which* parts of the state an action touched
//! without copying values. Notification layers read the delta first and only
//! inspect the full snapshots for the parts that changed.

use bitflags::bitflags;

use super::{GameState, Player};
use crate::action::Action;

bitflags! {
    /// Tracks which parts of the [`Player`] changed during a transition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PlayerFields: u16 {
        const POSITION  = 1 << 0;
        const FACING    = 1 << 1;
        const HP        = 1 << 2;
        const STATS     = 1 << 3;
        const LEVEL     = 1 << 4;
        const EXP       = 1 << 5;
        const KEYS      = 1 << 6;
        const INVENTORY = 1 << 7;
        const EQUIPMENT = 1 << 8;
        const BUFFS     = 1 << 9;
        const FLAGS     = 1 << 10;
    }
}

impl PlayerFields {
    pub fn between(before: &Player, after: &Player) -> Self {
        let (b, a) = (&before.character, &after.character);
        let mut fields = Self::empty();
        fields.set(Self::POSITION, b.position != a.position);
        fields.set(Self::FACING, b.facing != a.facing);
        fields.set(Self::HP, b.hp != a.hp || b.maxhp != a.maxhp);
        fields.set(
            Self::STATS,
            (b.attack, b.defense, b.speed) != (a.attack, a.defense, a.speed),
        );
        fields.set(Self::LEVEL, b.level != a.level);
        fields.set(Self::EXP, before.exp != after.exp);
        fields.set(Self::KEYS, before.keys != after.keys);
        fields.set(Self::INVENTORY, before.special_items != after.special_items);
        fields.set(
            Self::EQUIPMENT,
            b.equipment != a.equipment || b.backup_equipment != a.backup_equipment,
        );
        fields.set(Self::BUFFS, b.buffs != a.buffs);
        fields.set(Self::FLAGS, before.has_monster_manual != after.has_monster_manual);
        fields
    }
}

/// Minimal description of an executed action's impact on the state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// The action that caused this transition.
    pub action: Action,
    /// True when the transition replaced the floor.
    pub floor_changed: bool,
    pub player: PlayerFields,
    /// Placement keys present before and absent after.
    pub removed: Vec<String>,
    /// Placement keys present on both sides with a different value.
    pub updated: Vec<String>,
    pub interaction_changed: bool,
}

impl StateDelta {
    pub fn from_states(action: Action, before: &GameState, after: &GameState) -> Self {
        let floor_changed = before.floor != after.floor || before.player_key != after.player_key;

        let (removed, updated) = if floor_changed {
            (Vec::new(), Vec::new())
        } else {
            let mut removed = Vec::new();
            let mut updated = Vec::new();
            for (key, placement) in before.entities.iter() {
                match after.entities.get(key) {
                    None => removed.push(key.to_string()),
                    Some(now) if key != before.player_key && now != placement => {
                        updated.push(key.to_string())
                    }
                    Some(_) => {}
                }
            }
            (removed, updated)
        };

        Self {
            action,
            floor_changed,
            player: PlayerFields::between(&before.player, &after.player),
            removed,
            updated,
            interaction_changed: before.interaction != after.interaction,
        }
    }

    /// Returns true if the action left the state untouched.
    pub fn is_empty(&self) -> bool {
        !self.floor_changed
            && self.player.is_empty()
            && self.removed.is_empty()
            && self.updated.is_empty()
            && !self.interaction_changed
    }
}
