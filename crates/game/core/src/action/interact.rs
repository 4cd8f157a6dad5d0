use tracing::info;

use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, InitializationError, InteractionState};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorError {
    #[error("no door at placement '{0}'")]
    DoorNotFound(String),
}

impl GameError for DoorError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            DoorError::DoorNotFound(_) => "DOOR_NOT_FOUND",
        }
    }
}

/// Removes a door from the floor.
///
/// Key color and unlock conditions are not checked here; callers consult
/// [`GameState::door_access`] before dispatching.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OpenDoorAction {
    /// Placement key of the door.
    pub door_id: String,
}

impl OpenDoorAction {
    pub fn new(door_id: impl Into<String>) -> Self {
        Self {
            door_id: door_id.into(),
        }
    }
}

impl ActionTransition for OpenDoorAction {
    type Error = DoorError;
    type Result = ();

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state
            .entities
            .door(&self.door_id)
            .map(|_| ())
            .ok_or_else(|| DoorError::DoorNotFound(self.door_id.clone()))
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), DoorError> {
        state
            .remove_placement(&self.door_id)
            .map(|_| ())
            .ok_or_else(|| DoorError::DoorNotFound(self.door_id.clone()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloorError {
    #[error("no stair at placement '{0}'")]
    StairNotFound(String),

    #[error("cannot leave the floor during a battle")]
    BattleInProgress,

    #[error("target floor could not be built: {0}")]
    Initialization(#[from] InitializationError),
}

impl GameError for FloorError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            FloorError::StairNotFound(_) => ErrorSeverity::Validation,
            FloorError::BattleInProgress => ErrorSeverity::Recoverable,
            FloorError::Initialization(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            FloorError::StairNotFound(_) => "FLOOR_STAIR_NOT_FOUND",
            FloorError::BattleInProgress => "FLOOR_BATTLE_IN_PROGRESS",
            FloorError::Initialization(error) => error.error_code(),
        }
    }
}

/// Takes a stair: builds the target floor and carries the player over.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChangeFloorAction {
    /// Placement key of the stair.
    pub stair_id: String,
}

impl ChangeFloorAction {
    pub fn new(stair_id: impl Into<String>) -> Self {
        Self {
            stair_id: stair_id.into(),
        }
    }
}

impl ActionTransition for ChangeFloorAction {
    type Error = FloorError;
    /// Floor now active.
    type Result = i32;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.battle().is_some() {
            return Err(FloorError::BattleInProgress);
        }
        state
            .entities
            .stair(&self.stair_id)
            .map(|_| ())
            .ok_or_else(|| FloorError::StairNotFound(self.stair_id.clone()))
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<i32, FloorError> {
        let target = state
            .entities
            .stair(&self.stair_id)
            .map(|stair| stair.target)
            .ok_or_else(|| FloorError::StairNotFound(self.stair_id.clone()))?;

        let mut carried = state.player.clone();
        carried.character.position = target.position();

        let mut next = GameState::initialize(target.floor, Some(carried), env)?;
        next.set_player_position(target.position());
        next.interaction = InteractionState::None;

        info!(from = state.floor, to = target.floor, stair = %self.stair_id, "floor changed");
        *state = next;
        Ok(target.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Door, EntityKind, EntitySpec, MapLayout, Stair, StairTarget};
    use crate::state::fixtures::*;
    use crate::state::{KeyColor, PlacedObject, Placement, Position};

    fn two_floors() -> crate::env::ContentSnapshot {
        let first = room()
            .with_stair(Stair {
                id: "up".into(),
                target: StairTarget { floor: 2, x: 1, y: 0 },
            })
            .with_entity("up", EntitySpec::new(EntityKind::Stair, "up", 2, 3));
        let second = MapLayout::from_codes(2, &[[0, 0, 0]]);
        content(first).with_map(second)
    }

    #[test]
    fn door_opens_unconditionally() {
        let content = content(room());
        let env = GameEnv::new(&content);
        let mut state = state(&content);
        state.entities.insert(
            "door1",
            Placement::new(
                Position::new(0, 0),
                PlacedObject::Door(Door::new("door1", KeyColor::Red)),
            ),
        );

        let action = OpenDoorAction::new("door1");
        action.pre_validate(&state, &env).unwrap();
        action.apply(&mut state, &env).unwrap();
        assert!(state.entities.door("door1").is_none());
        assert_eq!(state.player.keys.red, 0);

        assert_eq!(
            action.pre_validate(&state, &env),
            Err(DoorError::DoorNotFound("door1".into()))
        );
    }

    #[test]
    fn stairs_carry_player_to_target() {
        let content = two_floors();
        let env = GameEnv::new(&content);
        let mut state = state(&content);
        state.player.exp = 7;
        state.interaction = InteractionState::FloorChange {
            stair_id: "up".into(),
        };

        let floor = ChangeFloorAction::new("up").apply(&mut state, &env).unwrap();

        assert_eq!(floor, 2);
        assert_eq!(state.floor, 2);
        assert_eq!(state.player.exp, 7);
        assert_eq!(state.player_position(), Position::new(1, 0));
        assert_eq!(state.player_key, "player");
        assert!(state.interaction.is_none());
    }

    #[test]
    fn missing_target_floor_is_fatal() {
        let first = room()
            .with_stair(Stair {
                id: "down".into(),
                target: StairTarget { floor: 9, x: 0, y: 0 },
            })
            .with_entity("down", EntitySpec::new(EntityKind::Stair, "down", 2, 3));
        let content = content(first);
        let env = GameEnv::new(&content);
        let mut state = state(&content);

        let error = ChangeFloorAction::new("down").apply(&mut state, &env).unwrap_err();
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
        assert_eq!(error.error_code(), "ORACLE_MAP_NOT_FOUND");
    }
}
