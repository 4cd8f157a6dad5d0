//! Read-only content consumed by the rules.
//!
//! The [`ContentOracle`] trait exposes maps, definitions, the level table and
//! configuration. [`GameEnv`] bundles it so handlers can reach everything
//! they need without coupling to a concrete loader.
mod content;
mod error;
mod snapshot;

pub use content::{ContentOracle, LevelRow, LevelTable, PlayerTemplate};
pub use error::OracleError;
pub use snapshot::ContentSnapshot;

use crate::config::GameConfig;

/// Aggregates the read-only collaborators required by the action pipeline.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    content: &'a dyn ContentOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(content: &'a dyn ContentOracle) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &'a dyn ContentOracle {
        self.content
    }

    pub fn config(&self) -> &'a GameConfig {
        self.content.config()
    }

    pub fn levels(&self) -> &'a LevelTable {
        self.content.levels()
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("data_version", &self.content.data_version())
            .finish()
    }
}
