use std::collections::BTreeMap;

use crate::state::{Equipment, KeyColor, Position};

/// A single grid cell.
///
/// Numeric codes carry terrain (`1` is a wall by default); symbolic ids refer
/// to entries in the floor's tile-asset legend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Tile {
    Code(i64),
    Symbol(String),
}

impl Tile {
    pub fn code(&self) -> Option<i64> {
        match self {
            Tile::Code(code) => Some(*code),
            Tile::Symbol(_) => None,
        }
    }
}

impl From<i64> for Tile {
    fn from(code: i64) -> Self {
        Tile::Code(code)
    }
}

impl From<&str> for Tile {
    fn from(symbol: &str) -> Self {
        Tile::Symbol(symbol.to_string())
    }
}

/// Legend entry for a symbolic tile id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileAsset {
    #[cfg_attr(feature = "serde", serde(rename = "assetId"))]
    pub asset_id: String,
    #[cfg_attr(feature = "serde", serde(default, rename = "isEntity"))]
    pub is_entity: bool,
}

/// Discriminant of an authored entity placement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum EntityKind {
    PlayerStart,
    Monster,
    Item,
    Equipment,
    Door,
    Stair,
    /// Kinds the engine does not interpret. Kept verbatim.
    Other(String),
}

impl EntityKind {
    pub fn as_str(&self) -> &str {
        match self {
            EntityKind::PlayerStart => "player_start",
            EntityKind::Monster => "monster",
            EntityKind::Item => "item",
            EntityKind::Equipment => "equipment",
            EntityKind::Door => "door",
            EntityKind::Stair => "stair",
            EntityKind::Other(kind) => kind,
        }
    }
}

impl From<String> for EntityKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "player_start" => EntityKind::PlayerStart,
            "monster" => EntityKind::Monster,
            "item" => EntityKind::Item,
            "equipment" => EntityKind::Equipment,
            "door" => EntityKind::Door,
            "stair" => EntityKind::Stair,
            _ => EntityKind::Other(kind),
        }
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Authored placement of a content object on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySpec {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: EntityKind,
    /// Content id of the placed object.
    pub id: String,
    pub x: i32,
    pub y: i32,
}

impl EntitySpec {
    pub fn new(kind: EntityKind, id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            kind,
            id: id.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum DoorCondition {
    /// Opens once the monster with this content id has been defeated.
    DefeatMonster {
        #[cfg_attr(feature = "serde", serde(rename = "monsterId"))]
        monster_id: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub id: String,
    pub color: KeyColor,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub condition: Option<DoorCondition>,
}

impl Door {
    pub fn new(id: impl Into<String>, color: KeyColor) -> Self {
        Self {
            id: id.into(),
            color,
            condition: None,
        }
    }

    pub fn unlocked_by_defeating(mut self, monster_id: impl Into<String>) -> Self {
        self.condition = Some(DoorCondition::DefeatMonster {
            monster_id: monster_id.into(),
        });
        self
    }

    /// Content id of the monster whose defeat opens this door.
    pub fn required_defeat(&self) -> Option<&str> {
        match &self.condition {
            Some(DoorCondition::DefeatMonster { monster_id }) => Some(monster_id),
            None => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StairTarget {
    pub floor: i32,
    pub x: i32,
    pub y: i32,
}

impl StairTarget {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stair {
    pub id: String,
    pub target: StairTarget,
}

/// Canonical floor layout.
///
/// `layout[y][x]` gives the tile at `(x, y)`. Rows may be ragged; cells past
/// the end of a short row do not exist.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLayout {
    pub floor: i32,
    pub layout: Vec<Vec<Tile>>,
    #[cfg_attr(feature = "serde", serde(default, rename = "tileAssets"))]
    pub tile_assets: BTreeMap<String, TileAsset>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entities: BTreeMap<String, EntitySpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipments: BTreeMap<String, Equipment>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub doors: BTreeMap<String, Door>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stairs: BTreeMap<String, Stair>,
}

impl MapLayout {
    pub fn new(floor: i32, layout: Vec<Vec<Tile>>) -> Self {
        Self {
            floor,
            layout,
            ..Self::default()
        }
    }

    /// Builds a layout from numeric rows, mostly useful for fixtures.
    pub fn from_codes<const W: usize>(floor: i32, rows: &[[i64; W]]) -> Self {
        let layout = rows
            .iter()
            .map(|row| row.iter().copied().map(Tile::Code).collect())
            .collect();
        Self::new(floor, layout)
    }

    pub fn with_entity(mut self, key: impl Into<String>, spec: EntitySpec) -> Self {
        self.entities.insert(key.into(), spec);
        self
    }

    pub fn with_door(mut self, door: Door) -> Self {
        self.doors.insert(door.id.clone(), door);
        self
    }

    pub fn with_stair(mut self, stair: Stair) -> Self {
        self.stairs.insert(stair.id.clone(), stair);
        self
    }

    /// Width of the first row.
    pub fn width(&self) -> usize {
        self.layout.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.layout.len()
    }

    /// Tile at `position`, or `None` when outside the grid or in a ragged gap.
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        if x >= self.width() {
            return None;
        }
        self.layout.get(y)?.get(x)
    }

    pub fn is_wall(&self, position: Position, wall_code: i64) -> bool {
        self.tile(position).and_then(Tile::code) == Some(wall_code)
    }
}
