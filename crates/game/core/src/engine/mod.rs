//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It never
//! mutates a state it is handed: each action runs against a private copy, so
//! callers keep every earlier snapshot intact for undo, replay or diffing.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use tracing::debug;

use crate::action::{Action, ActionResult};
use crate::env::GameEnv;
use crate::error::GameError;
use crate::state::{GameState, StateDelta};

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionOutcome {
    /// The state after the action.
    pub state: GameState,
    /// Which parts of the state changed.
    pub delta: StateDelta,
    /// Action-specific execution result.
    pub result: ActionResult,
}

/// Applies actions to states using read-only content from [`GameEnv`].
#[derive(Clone, Copy, Debug)]
pub struct GameEngine<'a> {
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    /// Executes `action` against a copy of `state`.
    ///
    /// Any failure leaves `state` untouched and is reported with the phase
    /// that produced it.
    pub fn execute(
        &self,
        state: &GameState,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let mut next = state.clone();
        let result = transition::execute_transition(action, &mut next, &self.env)?;
        let delta = StateDelta::from_states(action.clone(), state, &next);
        Ok(ExecutionOutcome {
            state: next,
            delta,
            result,
        })
    }

    /// Returns the next state, treating rejected actions as no-ops.
    ///
    /// Actions that are meaningless right now (walls, missing targets, wrong
    /// battle phase) yield an unchanged copy of `state`. Only internal and
    /// fatal failures, such as a stair whose target floor cannot be built,
    /// are returned as errors.
    pub fn reduce(&self, state: &GameState, action: &Action) -> Result<GameState, ExecuteError> {
        match self.execute(state, action) {
            Ok(outcome) => Ok(outcome.state),
            Err(error) if error.severity().is_rejection() => {
                debug!(
                    action = action.name(),
                    code = error.error_code(),
                    phase = error.phase().as_str(),
                    "action rejected: {error}"
                );
                Ok(state.clone())
            }
            Err(error) => Err(error),
        }
    }
}
