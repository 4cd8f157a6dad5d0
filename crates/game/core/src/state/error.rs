//! Floor initialization errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};

/// Failure to build a floor's initial state.
///
/// Both variants abort floor entry; the caller falls back to a known-good
/// floor or gives up.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializationError {
    /// Map or definition lookup failed.
    #[error(transparent)]
    Content(#[from] OracleError),

    /// No `player_start` marker and no carried player.
    #[error("player could not be created or placed on floor {floor}")]
    PlayerNotPlaced { floor: i32 },
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            InitializationError::Content(error) => error.error_code(),
            InitializationError::PlayerNotPlaced { .. } => "INIT_PLAYER_NOT_PLACED",
        }
    }
}
