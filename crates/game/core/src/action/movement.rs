use crate::action::ActionTransition;
use crate::action::combat::begin_battle;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Facing, GameState, InteractionState, PlacedObject, Position};

use super::CombatError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("({dx}, {dy}) is not a unit step")]
    InvalidDirection { dx: i32, dy: i32 },

    #[error("cannot move while a battle is in progress")]
    BattleInProgress,

    #[error("destination {destination:?} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination:?} is a wall")]
    Wall { destination: Position },

    #[error("destination {destination:?} is blocked by a {kind}")]
    Blocked { destination: Position, kind: String },

    #[error("battle could not start: {0}")]
    Battle(#[from] CombatError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::InvalidDirection { .. } => ErrorSeverity::Validation,
            MoveError::Battle(error) => error.severity(),
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::InvalidDirection { .. } => "MOVE_INVALID_DIRECTION",
            MoveError::BattleInProgress => "MOVE_BATTLE_IN_PROGRESS",
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::Wall { .. } => "MOVE_WALL",
            MoveError::Blocked { .. } => "MOVE_BLOCKED",
            MoveError::Battle(error) => error.error_code(),
        }
    }
}

/// Unit step on the grid. Exactly one of `dx`, `dy` is non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub dx: i32,
    pub dy: i32,
}

impl MoveAction {
    pub const LEFT: Self = Self::new(-1, 0);
    pub const RIGHT: Self = Self::new(1, 0);
    pub const UP: Self = Self::new(0, -1);
    pub const DOWN: Self = Self::new(0, 1);

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// True if this input only turns a player currently facing `facing`.
    pub fn turns(&self, facing: Facing) -> bool {
        Facing::from_dx(self.dx).is_some_and(|wanted| wanted != facing)
    }

    fn is_unit_step(&self) -> bool {
        matches!((self.dx, self.dy), (-1 | 1, 0) | (0, -1 | 1))
    }
}

/// What a directional input did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Only the facing changed.
    Turned(Facing),
    /// The player stepped onto an empty tile.
    Moved(Position),
    /// The destination holds something to interact with; the interaction
    /// state now points at this placement key.
    Encounter(String),
}

enum Occupant {
    Item,
    Equipment,
    Monster,
    Stair,
    Solid(String),
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !self.is_unit_step() {
            return Err(MoveError::InvalidDirection {
                dx: self.dx,
                dy: self.dy,
            });
        }
        if state.battle().is_some() {
            return Err(MoveError::BattleInProgress);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<MoveOutcome, MoveError> {
        // Turn before walking.
        if self.turns(state.player.character.facing)
            && let Some(facing) = Facing::from_dx(self.dx)
        {
            state.player.character.facing = facing;
            return Ok(MoveOutcome::Turned(facing));
        }

        let origin = state.player_position();
        let destination = origin.offset(self.dx, self.dy);
        let tile = state
            .map
            .tile(destination)
            .ok_or(MoveError::OutOfBounds { destination })?;
        if tile.code() == Some(env.config().wall_tile) {
            return Err(MoveError::Wall { destination });
        }

        let occupant = state
            .entities
            .occupant_at(destination)
            .map(|(key, placement)| {
                let occupant = match &placement.object {
                    PlacedObject::Item(_) => Occupant::Item,
                    PlacedObject::Equipment(_) => Occupant::Equipment,
                    PlacedObject::Monster(_) => Occupant::Monster,
                    PlacedObject::Stair(_) => Occupant::Stair,
                    other => Occupant::Solid(other.kind_name().to_string()),
                };
                (key.to_string(), occupant)
            });

        let Some((key, occupant)) = occupant else {
            state.set_player_position(destination);
            if !state.interaction.is_none() {
                state.interaction = InteractionState::None;
            }
            return Ok(MoveOutcome::Moved(destination));
        };

        match occupant {
            Occupant::Item => {
                state.interaction = InteractionState::ItemPickup {
                    item_id: key.clone(),
                };
            }
            Occupant::Equipment => {
                state.interaction = InteractionState::EquipmentPickup {
                    equipment_id: key.clone(),
                };
            }
            Occupant::Stair => {
                state.interaction = InteractionState::FloorChange {
                    stair_id: key.clone(),
                };
            }
            Occupant::Monster => {
                if let Some(monster) = state.entities.monster_mut(&key)
                    && let Some(facing) = Facing::towards(monster.position, origin)
                {
                    monster.facing = facing;
                }
                begin_battle(state, &key)?;
            }
            Occupant::Solid(kind) => {
                return Err(MoveError::Blocked { destination, kind });
            }
        }

        Ok(MoveOutcome::Encounter(key))
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let destination = state.player_position();
        if state.map.tile(destination).is_none() {
            return Err(MoveError::OutOfBounds { destination });
        }
        Ok(())
    }
}
