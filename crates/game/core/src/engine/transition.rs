//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition, UsePotionAction};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action to its transition and wraps the result.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    let result = match action {
        Action::Move(transition) => ActionResult::Move(
            drive_transition(transition, state, env).map_err(ExecuteError::Move)?,
        ),
        Action::PickUpItem(transition) => ActionResult::PickUpItem(
            drive_transition(transition, state, env).map_err(ExecuteError::PickUpItem)?,
        ),
        Action::PickUpEquipment(transition) => ActionResult::PickUpEquipment(
            drive_transition(transition, state, env).map_err(ExecuteError::PickUpEquipment)?,
        ),
        Action::OpenDoor(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::OpenDoor)?;
            ActionResult::OpenDoor
        }
        Action::StartBattle(transition) => ActionResult::StartBattle(
            drive_transition(transition, state, env).map_err(ExecuteError::StartBattle)?,
        ),
        Action::Attack(transition) => ActionResult::Attack(
            drive_transition(transition, state, env).map_err(ExecuteError::Attack)?,
        ),
        Action::EndBattle(transition) => ActionResult::EndBattle(
            drive_transition(transition, state, env).map_err(ExecuteError::EndBattle)?,
        ),
        Action::UseBomb(transition) => ActionResult::UseBomb {
            removed: drive_transition(transition, state, env).map_err(ExecuteError::UseBomb)?,
        },
        Action::UsePotion => ActionResult::UsePotion {
            healed: drive_transition(&UsePotionAction, state, env)
                .map_err(ExecuteError::UsePotion)?,
        },
        Action::ChangeFloor(transition) => ActionResult::ChangeFloor {
            floor: drive_transition(transition, state, env).map_err(ExecuteError::ChangeFloor)?,
        },
    };
    Ok(result)
}
