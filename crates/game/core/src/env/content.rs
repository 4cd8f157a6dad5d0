use std::sync::Arc;

use crate::config::GameConfig;
use crate::map::MapLayout;
use crate::state::{Buff, Character, Equipment, Item, KeyRing};

/// Base player definition before a level row is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerTemplate {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "first_level"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exp: u32,
    /// Authored starting hp. Fresh players start at the level row's maxhp.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub keys: KeyRing,
}

#[cfg(feature = "serde")]
fn first_level() -> u32 {
    1
}

/// One row of the leveling curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelRow {
    pub level: u32,
    pub exp_needed: u32,
    #[cfg_attr(feature = "serde", serde(alias = "hp"))]
    pub maxhp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

/// Level rows sorted by level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<LevelRow>", into = "Vec<LevelRow>"))]
pub struct LevelTable {
    rows: Vec<LevelRow>,
}

impl LevelTable {
    pub fn new(mut rows: Vec<LevelRow>) -> Self {
        rows.sort_by_key(|row| row.level);
        Self { rows }
    }

    pub fn row(&self, level: u32) -> Option<&LevelRow> {
        self.rows.iter().find(|row| row.level == level)
    }

    pub fn rows(&self) -> &[LevelRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<LevelRow>> for LevelTable {
    fn from(rows: Vec<LevelRow>) -> Self {
        Self::new(rows)
    }
}

impl From<LevelTable> for Vec<LevelRow> {
    fn from(table: LevelTable) -> Self {
        table.rows
    }
}

/// Read-only access to authored game content.
///
/// Implementations are constructed once (after all loading has completed)
/// and injected wherever rules need definitions, so lookups are synchronous.
pub trait ContentOracle: Send + Sync {
    /// Normalized layout of `floor`.
    fn map_layout(&self, floor: i32) -> Option<Arc<MapLayout>>;

    /// Floors that have a layout, ascending.
    fn floors(&self) -> Vec<i32>;

    fn monster(&self, id: &str) -> Option<&Character>;

    fn item(&self, id: &str) -> Option<&Item>;

    fn equipment(&self, id: &str) -> Option<&Equipment>;

    fn buff(&self, id: &str) -> Option<&Buff>;

    fn player(&self) -> Option<&PlayerTemplate>;

    fn levels(&self) -> &LevelTable;

    fn config(&self) -> &GameConfig;

    /// Version tag of the content pack, recorded in saves.
    fn data_version(&self) -> &str;
}
