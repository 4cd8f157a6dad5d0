mod character;
mod common;
mod entities;
mod equipment;
mod interaction;
mod item;

pub use character::{Buff, BuffTrigger, Character, Player};
pub use common::{Facing, PercentLine, Position, StatKind, StatLine};
pub use entities::{EntitiesState, PlacedObject, Placement};
pub use equipment::{Equipment, EquipmentSlot, SlotSpec, WeaponType};
pub use interaction::{Battle, BattleEndReason, BattleTurn, InteractionState};
pub use item::{Item, ItemKind, KeyColor, KeyRing, SpecialKind};
