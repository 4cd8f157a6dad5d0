//! Content lookup errors.

use crate::error::{ErrorSeverity, GameError};

/// A definition the rules needed was not found in the content pack.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("map for floor {0} not found")]
    MapNotFound(i32),

    #[error("monster '{0}' not found")]
    MonsterNotFound(String),

    #[error("item '{0}' not found")]
    ItemNotFound(String),

    #[error("equipment '{0}' not found")]
    EquipmentNotFound(String),

    #[error("door '{0}' not defined on this floor")]
    DoorNotFound(String),

    #[error("stair '{0}' not defined on this floor")]
    StairNotFound(String),

    #[error("player data not available")]
    PlayerDataMissing,

    #[error("level {0} missing from level table")]
    LevelNotFound(u32),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MapNotFound(_) => "ORACLE_MAP_NOT_FOUND",
            MonsterNotFound(_) => "ORACLE_MONSTER_NOT_FOUND",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            EquipmentNotFound(_) => "ORACLE_EQUIPMENT_NOT_FOUND",
            DoorNotFound(_) => "ORACLE_DOOR_NOT_FOUND",
            StairNotFound(_) => "ORACLE_STAIR_NOT_FOUND",
            PlayerDataMissing => "ORACLE_PLAYER_DATA_MISSING",
            LevelNotFound(_) => "ORACLE_LEVEL_NOT_FOUND",
        }
    }
}
