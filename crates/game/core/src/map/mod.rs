//! Floor layouts and the normalizer that turns authored maps into them.
mod layout;
mod normalize;

pub use layout::{
    Door, DoorCondition, EntityKind, EntitySpec, MapLayout, Stair, StairTarget, Tile, TileAsset,
};
pub use normalize::{
    NormalizeContext, RawCell, RawLayout, RawMap, coerce_cell, normalize_map_layout,
};
