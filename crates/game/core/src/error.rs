//! Common error infrastructure for game-core.
//!
//! Domain errors (`MoveError`, `CombatError`, ...) live next to the actions
//! that raise them. They share [`GameError`] so callers can decide uniformly
//! whether a failure is an ignorable rejection or something that must abort
//! the current floor.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the action is meaningless right now (wall, wrong phase)
/// - **Validation**: the action references something that does not exist
/// - **Internal**: state and content disagree in a way that indicates a bug
/// - **Fatal**: content required to build a floor is missing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the dispatcher should treat the error as a no-op.
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates a bug or broken content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
