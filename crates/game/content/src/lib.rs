//! Data-driven content for the tower.
//!
//! This crate reads authored content from a directory of JSON/RON/TOML files:
//! - Monster, item, equipment and buff definitions (one file each)
//! - Floor layouts (bare grids or structured layouts, normalized on load)
//! - The player template and the level table
//! - Game configuration (`config.toml`) and the pack manifest (`content.toml`)
//!
//! Everything is folded into a [`game_core::ContentSnapshot`], which the engine
//! consumes through the `ContentOracle` trait. Content never appears in game
//! state except as copies made when a floor is built.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BuffLoader, ConfigLoader, ContentFactory, ContentManifest, EquipmentLoader, ItemLoader,
    LevelLoader, LoadResult, MapLoader, MonsterLoader, PlayerLoader,
};
