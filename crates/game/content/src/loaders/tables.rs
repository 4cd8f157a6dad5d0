//! Level table loader.

use std::path::Path;

use game_core::LevelRow;
use serde::Deserialize;

use crate::loaders::{LoadResult, parse_document};

/// Accepts a bare list of rows, or a `levels` table (the only shape TOML allows).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LevelDocument {
    Rows(Vec<LevelRow>),
    Table { levels: Vec<LevelRow> },
}

/// Loader for the leveling curve.
pub struct LevelLoader;

impl LevelLoader {
    /// Rows come back in file order; the level table sorts them.
    pub fn load(path: &Path) -> LoadResult<Vec<LevelRow>> {
        let document: LevelDocument = parse_document(path)?;
        Ok(match document {
            LevelDocument::Rows(rows) | LevelDocument::Table { levels: rows } => rows,
        })
    }
}
