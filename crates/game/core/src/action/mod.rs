//! Player-facing actions and the transitions that apply them.
//!
//! Every [`Action`] variant wraps a transition type implementing
//! [`ActionTransition`]. The engine drives each through
//! `pre_validate → apply → post_validate` on a private copy of the state.
//!
//! - [`movement`]: directional input, facing, encounter detection
//! - [`combat`]: battle start, attacks, battle end and rewards
//! - [`inventory`]: item pickup, bombs, potions
//! - [`equipment`]: ground equipment pickup
//! - [`interact`]: doors and stairs
pub mod combat;
pub mod equipment;
pub mod interact;
pub mod inventory;
pub mod movement;

pub use combat::{
    AttackAction, AttackOutcome, BattleReport, CombatError, EndBattleAction, StartBattleAction,
};
pub use equipment::{EquipmentError, PickUpEquipmentAction};
pub use interact::{ChangeFloorAction, DoorError, FloorError, OpenDoorAction};
pub use inventory::{ItemError, PickUpItemAction, UseBombAction, UsePotionAction};
pub use movement::{MoveAction, MoveError, MoveOutcome};

use crate::env::GameEnv;
use crate::state::{BattleTurn, GameState, Item};
use crate::stats::EquipmentDecision;

/// Defines how a concrete action variant changes the game state.
///
/// Implementors may override the validation hooks to surface pre- and
/// post-conditions around the mutation. Hooks receive read-only content via
/// [`GameEnv`] and must stay side-effect free.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action. Implementations may assume `pre_validate` passed.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Dispatchable action.
///
/// Serialized adjacently tagged, e.g. `{"type":"MOVE","payload":{"dx":1,"dy":0}}`.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Move(MoveAction),
    PickUpItem(PickUpItemAction),
    PickUpEquipment(PickUpEquipmentAction),
    OpenDoor(OpenDoorAction),
    StartBattle(StartBattleAction),
    Attack(AttackAction),
    EndBattle(EndBattleAction),
    UseBomb(UseBombAction),
    UsePotion,
    ChangeFloor(ChangeFloorAction),
}

impl Action {
    pub fn step(dx: i32, dy: i32) -> Self {
        Self::Move(MoveAction::new(dx, dy))
    }

    /// Wire name of the variant, e.g. `"PICK_UP_ITEM"`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Action-specific outcome returned alongside the new state.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResult {
    Move(MoveOutcome),
    PickUpItem(Item),
    PickUpEquipment(EquipmentDecision),
    OpenDoor,
    StartBattle(BattleTurn),
    Attack(AttackOutcome),
    EndBattle(BattleReport),
    UseBomb { removed: Vec<String> },
    UsePotion { healed: i32 },
    ChangeFloor { floor: i32 },
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::state::BattleEndReason;

    #[test]
    fn wire_format_is_adjacently_tagged() {
        let json = serde_json::to_value(Action::step(1, 0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "MOVE", "payload": {"dx": 1, "dy": 0}})
        );

        let json = serde_json::to_value(Action::PickUpItem(PickUpItemAction::new("key1"))).unwrap();
        assert_eq!(json["payload"]["itemId"], "key1");

        let json = serde_json::to_value(Action::UsePotion).unwrap();
        assert_eq!(json, serde_json::json!({"type": "USE_POTION"}));
    }

    #[test]
    fn end_battle_accepts_null_winner() {
        let action: Action = serde_json::from_str(
            r#"{"type":"END_BATTLE","payload":{"winnerId":null,"reason":"timeout"}}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::EndBattle(EndBattleAction::new(None, BattleEndReason::Timeout))
        );
        assert_eq!(action.name(), "END_BATTLE");
    }
}
