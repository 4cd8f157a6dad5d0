use tracing::debug;

use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, InteractionState};
use crate::stats::{EquipmentDecision, compare_equipment, swap_in};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentError {
    #[error("no equipment at placement '{0}'")]
    EquipmentNotFound(String),

    #[error("cannot pick up equipment during a battle")]
    BattleInProgress,
}

impl GameError for EquipmentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EquipmentError::EquipmentNotFound(_) => ErrorSeverity::Validation,
            EquipmentError::BattleInProgress => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EquipmentError::EquipmentNotFound(_) => "EQUIPMENT_NOT_FOUND",
            EquipmentError::BattleInProgress => "EQUIPMENT_BATTLE_IN_PROGRESS",
        }
    }
}

/// Resolves ground equipment against what the player wears.
///
/// An auto-equip moves displaced pieces into the backup list. Both a discard
/// and a swap prompt leave the player's loadout untouched. Either way the
/// ground piece is consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PickUpEquipmentAction {
    /// Placement key of the equipment.
    pub equipment_id: String,
}

impl PickUpEquipmentAction {
    pub fn new(equipment_id: impl Into<String>) -> Self {
        Self {
            equipment_id: equipment_id.into(),
        }
    }
}

impl ActionTransition for PickUpEquipmentAction {
    type Error = EquipmentError;
    type Result = EquipmentDecision;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.battle().is_some() {
            return Err(EquipmentError::BattleInProgress);
        }
        state
            .entities
            .equipment(&self.equipment_id)
            .map(|_| ())
            .ok_or_else(|| EquipmentError::EquipmentNotFound(self.equipment_id.clone()))
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<EquipmentDecision, EquipmentError> {
        let candidate = state
            .entities
            .equipment(&self.equipment_id)
            .cloned()
            .ok_or_else(|| EquipmentError::EquipmentNotFound(self.equipment_id.clone()))?;

        let character = &mut state.player.character;
        let decision = compare_equipment(character, &candidate);
        if let EquipmentDecision::AutoEquip { .. } = decision {
            let displaced = swap_in(character, &candidate);
            character.backup_equipment.extend(displaced);
        }

        state.remove_placement(&self.equipment_id);
        state.interaction = InteractionState::None;

        debug!(equipment = %candidate.id, decision = ?decision, "equipment resolved");
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::*;
    use crate::state::{
        Equipment, EquipmentSlot, PlacedObject, Placement, Position, StatLine, WeaponType,
    };

    fn drop_equipment(state: &mut GameState, key: &str, equipment: Equipment) {
        state.entities.insert(
            key,
            Placement::new(Position::new(3, 2), PlacedObject::Equipment(equipment)),
        );
    }

    fn sword(id: &str, attack: i32) -> Equipment {
        Equipment::new(id, "Sword", EquipmentSlot::RightHand)
            .with_weapon_type(WeaponType::OneHanded)
            .with_stat_mods(StatLine::new(0, attack, 0, 0))
    }

    #[test]
    fn upgrade_moves_old_piece_to_backup() {
        let content = content(room());
        let env = GameEnv::new(&content);
        let mut state = state(&content);
        drop_equipment(&mut state, "e1", sword("wood", 2));
        drop_equipment(&mut state, "e2", sword("iron", 6));

        PickUpEquipmentAction::new("e1").apply(&mut state, &env).unwrap();
        let decision = PickUpEquipmentAction::new("e2").apply(&mut state, &env).unwrap();

        assert!(matches!(decision, EquipmentDecision::AutoEquip { .. }));
        let character = &state.player.character;
        assert_eq!(character.equipment[&EquipmentSlot::RightHand].id, "iron");
        assert_eq!(character.backup_equipment.len(), 1);
        assert_eq!(character.backup_equipment[0].id, "wood");
        assert!(state.entities.equipments().next().is_none());
    }

    #[test]
    fn prompt_swap_discards_ground_piece() {
        let content = content(room());
        let env = GameEnv::new(&content);
        let mut state = state(&content);
        drop_equipment(&mut state, "e1", sword("dagger", 1));
        PickUpEquipmentAction::new("e1").apply(&mut state, &env).unwrap();

        drop_equipment(
            &mut state,
            "e2",
            Equipment::two_handed("greatsword", "Greatsword")
                .with_stat_mods(StatLine::new(0, 40, 0, 0)),
        );
        state.interaction = InteractionState::EquipmentPickup {
            equipment_id: "e2".into(),
        };
        let decision = PickUpEquipmentAction::new("e2").apply(&mut state, &env).unwrap();

        assert!(matches!(decision, EquipmentDecision::PromptSwap { .. }));
        assert_eq!(
            state.player.character.equipment[&EquipmentSlot::RightHand].id,
            "dagger"
        );
        assert!(!state.entities.contains("e2"));
        assert!(state.interaction.is_none());
    }

    #[test]
    fn missing_equipment_is_rejected() {
        let content = content(room());
        let env = GameEnv::new(&content);
        let state = state(&content);
        assert_eq!(
            PickUpEquipmentAction::new("nope").pre_validate(&state, &env),
            Err(EquipmentError::EquipmentNotFound("nope".into()))
        );
    }
}
