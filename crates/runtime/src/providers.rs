//! Asynchronous abstraction for sourcing player intent.
//!
//! Sessions pull actions from an [`ActionProvider`], so the same loop can be
//! driven by keyboard input, a script or a test fixture.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use game_core::{Action, GameState};

use crate::{Result, RuntimeError};

/// Trait for providing actions based on the current game state.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Next action to dispatch, or `None` once the provider is exhausted.
    async fn provide_action(&self, state: &GameState) -> Result<Option<Action>>;
}

/// Replays a fixed list of actions in order.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    actions: Mutex<VecDeque<Action>>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
        }
    }

    /// Parses a string of arrow letters (`L`, `R`, `U`, `D`, any case) into
    /// single-step moves. Whitespace is ignored.
    pub fn from_moves(moves: &str) -> Result<Self> {
        let actions = moves
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c.to_ascii_uppercase() {
                'L' => Ok(Action::step(-1, 0)),
                'R' => Ok(Action::step(1, 0)),
                'U' => Ok(Action::step(0, -1)),
                'D' => Ok(Action::step(0, 1)),
                other => Err(RuntimeError::Provider(format!("unknown move '{other}'"))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(actions))
    }

    pub fn remaining(&self) -> usize {
        self.actions.lock().map(|queue| queue.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(&self, _state: &GameState) -> Result<Option<Action>> {
        let mut queue = self
            .actions
            .lock()
            .map_err(|_| RuntimeError::Provider("script queue poisoned".into()))?;
        Ok(queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_parse_case_insensitively() {
        let provider = ScriptedProvider::from_moves("Rr d\nLU").unwrap();
        assert_eq!(provider.remaining(), 5);
        let queue = provider.actions.lock().unwrap();
        assert_eq!(queue[0], Action::step(1, 0));
        assert_eq!(queue[2], Action::step(0, 1));
        assert_eq!(queue[4], Action::step(0, -1));
    }

    #[test]
    fn unknown_letters_are_rejected() {
        assert!(matches!(
            ScriptedProvider::from_moves("RX"),
            Err(RuntimeError::Provider(_))
        ));
    }
}
