//! Combat rules: damage, turn order, rewards and leveling.
//!
//! Battle state itself lives in [`crate::state::InteractionState::Battle`];
//! the transitions that drive it are in [`crate::action::combat`].
pub mod battle;
pub mod damage;
pub mod rewards;

pub use battle::{Opening, next_battle_action, opening_turn};
pub use damage::{MIN_DAMAGE, calculate_damage, damage_between};
pub use rewards::{LevelUp, apply_level_ups, experience_reward};
