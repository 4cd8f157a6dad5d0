//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the engine, floor initialization and repositories so
//! clients can bubble them up with consistent context.
use thiserror::Error;

use game_core::{ExecuteError, InitializationError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to build the starting floor")]
    InitialState(#[source] InitializationError),

    /// An action failed for a reason other than being meaningless right now.
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("save record could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("save record could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("action provider failed: {0}")]
    Provider(String),
}
