//! Deterministic rules and data types for the tower dungeon crawler.
//!
//! `game-core` defines the canonical rules (actions, engine, floor state) and
//! exposes pure APIs reused by the runtime and offline tools. Every state
//! change flows through [`engine::GameEngine`]; content reaches the rules only
//! through the [`env::ContentOracle`] trait.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod map;
pub mod state;
pub mod stats;

pub use action::{
    Action, ActionResult, ActionTransition, AttackAction, ChangeFloorAction, EndBattleAction,
    MoveAction, OpenDoorAction, PickUpEquipmentAction, PickUpItemAction, StartBattleAction,
    UseBombAction, UsePotionAction,
};
pub use combat::{LevelUp, calculate_damage, next_battle_action};
pub use config::GameConfig;
pub use engine::{ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError};
pub use env::{ContentOracle, ContentSnapshot, GameEnv, LevelRow, LevelTable, OracleError};
pub use error::{ErrorSeverity, GameError};
pub use map::{MapLayout, NormalizeContext, RawMap, normalize_map_layout};
pub use state::{
    Battle, BattleEndReason, BattleTurn, Character, DoorAccess, EntitiesState, Equipment,
    EquipmentSlot, Facing, GameState, InitializationError, InteractionState, Item, PlacedObject,
    Placement, Player, Position, StateDelta,
};
pub use stats::{EquipmentDecision, FinalStats, calculate_final_stats, compare_equipment};
