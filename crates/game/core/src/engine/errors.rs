//! Error types for the action execution pipeline.

use crate::action::{
    ActionTransition, AttackAction, ChangeFloorAction, EndBattleAction, MoveAction,
    OpenDoorAction, PickUpEquipmentAction, PickUpItemAction, StartBattleAction, UseBombAction,
    UsePotionAction,
};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(PhaseError<MoveAction>),

    #[error("pick up item action failed: {0}")]
    PickUpItem(PhaseError<PickUpItemAction>),

    #[error("pick up equipment action failed: {0}")]
    PickUpEquipment(PhaseError<PickUpEquipmentAction>),

    #[error("open door action failed: {0}")]
    OpenDoor(PhaseError<OpenDoorAction>),

    #[error("start battle action failed: {0}")]
    StartBattle(PhaseError<StartBattleAction>),

    #[error("attack action failed: {0}")]
    Attack(PhaseError<AttackAction>),

    #[error("end battle action failed: {0}")]
    EndBattle(PhaseError<EndBattleAction>),

    #[error("use bomb action failed: {0}")]
    UseBomb(PhaseError<UseBombAction>),

    #[error("use potion action failed: {0}")]
    UsePotion(PhaseError<UsePotionAction>),

    #[error("change floor action failed: {0}")]
    ChangeFloor(PhaseError<ChangeFloorAction>),
}

impl ExecuteError {
    fn inner(&self) -> (&dyn GameError, TransitionPhase) {
        match self {
            ExecuteError::Move(e) => parts(e),
            ExecuteError::PickUpItem(e) => parts(e),
            ExecuteError::PickUpEquipment(e) => parts(e),
            ExecuteError::OpenDoor(e) => parts(e),
            ExecuteError::StartBattle(e) => parts(e),
            ExecuteError::Attack(e) => parts(e),
            ExecuteError::EndBattle(e) => parts(e),
            ExecuteError::UseBomb(e) => parts(e),
            ExecuteError::UsePotion(e) => parts(e),
            ExecuteError::ChangeFloor(e) => parts(e),
        }
    }

    /// Pipeline stage that rejected the action.
    pub fn phase(&self) -> TransitionPhase {
        self.inner().1
    }
}

fn parts<E: GameError>(error: &TransitionPhaseError<E>) -> (&dyn GameError, TransitionPhase) {
    (&error.error, error.phase)
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        let (error, phase) = self.inner();
        match (error.severity(), phase) {
            // A broken post-condition means apply produced a bad state.
            (severity, TransitionPhase::PostValidate) if severity.is_rejection() => {
                ErrorSeverity::Internal
            }
            (severity, _) => severity,
        }
    }

    fn error_code(&self) -> &'static str {
        self.inner().0.error_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CombatError, MoveError};
    use crate::state::Position;

    #[test]
    fn severity_and_code_come_from_inner_error() {
        let error = ExecuteError::Move(TransitionPhaseError::new(
            TransitionPhase::Apply,
            MoveError::Wall {
                destination: Position::new(1, 0),
            },
        ));
        assert_eq!(error.severity(), ErrorSeverity::Recoverable);
        assert_eq!(error.error_code(), "MOVE_WALL");
        assert_eq!(
            error.to_string(),
            "move action failed: apply failed: destination Position { x: 1, y: 0 } is a wall"
        );
    }

    #[test]
    fn post_validate_failures_are_internal() {
        let error = ExecuteError::Attack(TransitionPhaseError::new(
            TransitionPhase::PostValidate,
            CombatError::NotInBattle,
        ));
        assert_eq!(error.severity(), ErrorSeverity::Internal);
        assert!(!error.severity().is_rejection());
    }
}
