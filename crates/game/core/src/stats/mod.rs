//! Stat calculation and equipment decisions.
//!
//! - [`bonus`]: flat and percent modifier stacking
//! - [`snapshot`]: final stats used by combat
//! - [`compare`]: auto-equip / auto-discard / prompt decisions
pub mod bonus;
pub mod compare;
pub mod snapshot;

pub use bonus::{EquipmentBonuses, MIN_STAT};
pub use compare::{EquipmentDecision, compare_equipment, swap_in};
pub use snapshot::{FinalStats, calculate_final_stats};
