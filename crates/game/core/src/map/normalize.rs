//! Canonicalizes authored map representations.
//!
//! Editors have produced bare grids, layout objects with optional legends, and
//! grids whose numbers were written as strings. [`normalize_map_layout`] folds
//! all of them into one [`MapLayout`]. The input is only borrowed, so the
//! result never shares structure with the caller's data.

use std::collections::BTreeMap;

use super::layout::{Door, EntitySpec, MapLayout, Stair, Tile, TileAsset};
use crate::state::Equipment;

/// A grid cell exactly as it appeared in the source document.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawCell {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Structured layout with every part optional.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawLayout {
    pub floor: Option<i32>,
    pub layout: Option<Vec<Vec<RawCell>>>,
    #[cfg_attr(feature = "serde", serde(rename = "tileAssets"))]
    pub tile_assets: Option<BTreeMap<String, TileAsset>>,
    pub entities: Option<BTreeMap<String, EntitySpec>>,
    pub equipments: Option<BTreeMap<String, Equipment>>,
    pub doors: Option<BTreeMap<String, Door>>,
    pub stairs: Option<BTreeMap<String, Stair>>,
}

/// Either a bare grid or a structured layout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawMap {
    Grid(Vec<Vec<RawCell>>),
    Layout(RawLayout),
}

/// Fallback values used where the input leaves a part out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizeContext {
    pub floor: Option<i32>,
    pub tile_assets: Option<BTreeMap<String, TileAsset>>,
    pub entities: Option<BTreeMap<String, EntitySpec>>,
    pub equipments: Option<BTreeMap<String, Equipment>>,
    pub doors: Option<BTreeMap<String, Door>>,
    pub stairs: Option<BTreeMap<String, Stair>>,
}

impl NormalizeContext {
    pub const DEFAULT_FLOOR: i32 = 1;

    pub fn for_floor(floor: i32) -> Self {
        Self {
            floor: Some(floor),
            ..Self::default()
        }
    }
}

/// Produces the canonical layout for `input`, filling gaps from `context`.
///
/// A missing input yields an empty grid on the context floor (default 1).
pub fn normalize_map_layout(input: Option<&RawMap>, context: &NormalizeContext) -> MapLayout {
    let floor = context.floor.unwrap_or(NormalizeContext::DEFAULT_FLOOR);

    let (floor, grid, layout) = match input {
        None => (floor, None, None),
        Some(RawMap::Grid(grid)) => (floor, Some(grid), None),
        Some(RawMap::Layout(layout)) => (
            layout.floor.unwrap_or(floor),
            layout.layout.as_ref(),
            Some(layout),
        ),
    };

    MapLayout {
        floor,
        layout: grid.map(|rows| coerce_grid(rows)).unwrap_or_default(),
        tile_assets: pick(
            layout.and_then(|l| l.tile_assets.as_ref()),
            &context.tile_assets,
        ),
        entities: pick(layout.and_then(|l| l.entities.as_ref()), &context.entities),
        equipments: pick(
            layout.and_then(|l| l.equipments.as_ref()),
            &context.equipments,
        ),
        doors: pick(layout.and_then(|l| l.doors.as_ref()), &context.doors),
        stairs: pick(layout.and_then(|l| l.stairs.as_ref()), &context.stairs),
    }
}

fn pick<T: Clone>(
    own: Option<&BTreeMap<String, T>>,
    fallback: &Option<BTreeMap<String, T>>,
) -> BTreeMap<String, T> {
    own.or(fallback.as_ref()).cloned().unwrap_or_default()
}

fn coerce_grid(rows: &[Vec<RawCell>]) -> Vec<Vec<Tile>> {
    rows.iter()
        .map(|row| row.iter().map(coerce_cell).collect())
        .collect()
}

/// Converts a raw cell into a tile.
///
/// Strings that read as decimal numbers (optional sign, optional fraction,
/// surrounding whitespace ignored) become numeric codes when their value is
/// integral. Everything else is kept as a symbolic id, untrimmed.
pub fn coerce_cell(cell: &RawCell) -> Tile {
    match cell {
        RawCell::Integer(code) => Tile::Code(*code),
        RawCell::Float(value) => integral(*value)
            .map(Tile::Code)
            .unwrap_or_else(|| Tile::Symbol(value.to_string())),
        RawCell::Text(text) => parse_numeric(text.trim())
            .map(Tile::Code)
            .unwrap_or_else(|| Tile::Symbol(text.clone())),
    }
}

fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

fn parse_numeric(text: &str) -> Option<i64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) {
        return None;
    }
    if let Some(fraction) = fraction {
        if !all_digits(fraction) || fraction.bytes().any(|b| b != b'0') {
            return None;
        }
    }

    let magnitude: i64 = whole.parse().ok()?;
    Some(if text.starts_with('-') {
        -magnitude
    } else {
        magnitude
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::EntityKind;
    use crate::state::KeyColor;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    #[test]
    fn numeric_strings_become_codes() {
        assert_eq!(coerce_cell(&text("1")), Tile::Code(1));
        assert_eq!(coerce_cell(&text(" 0 ")), Tile::Code(0));
        assert_eq!(coerce_cell(&text("-2")), Tile::Code(-2));
        assert_eq!(coerce_cell(&text("+3")), Tile::Code(3));
        assert_eq!(coerce_cell(&text("4.0")), Tile::Code(4));
        assert_eq!(coerce_cell(&RawCell::Float(5.0)), Tile::Code(5));
    }

    #[test]
    fn fractional_values_stay_symbolic() {
        // Tiles carry integer codes only.
        assert_eq!(coerce_cell(&text("1.5")), Tile::Symbol("1.5".into()));
        assert_eq!(coerce_cell(&text(" -0.25 ")), Tile::Symbol(" -0.25 ".into()));
        assert_eq!(coerce_cell(&RawCell::Float(1.5)), Tile::Symbol("1.5".into()));
        assert_eq!(coerce_cell(&text("1.50")).code(), None);
    }

    #[test]
    fn symbolic_strings_are_preserved() {
        assert_eq!(coerce_cell(&text("grass")), Tile::Symbol("grass".into()));
        assert_eq!(coerce_cell(&text("")), Tile::Symbol(String::new()));
        assert_eq!(coerce_cell(&text("   ")), Tile::Symbol("   ".into()));
        assert_eq!(coerce_cell(&text("1a")), Tile::Symbol("1a".into()));
        assert_eq!(coerce_cell(&text("1.")), Tile::Symbol("1.".into()));
        assert_eq!(coerce_cell(&text("2.5")), Tile::Symbol("2.5".into()));
    }

    #[test]
    fn bare_grid_uses_context() {
        let grid = RawMap::Grid(vec![vec![RawCell::Integer(1), text("0")]]);
        let mut context = NormalizeContext::for_floor(3);
        context.doors = Some(BTreeMap::from([(
            "door_1".to_string(),
            Door::new("door_1", KeyColor::Yellow),
        )]));

        let map = normalize_map_layout(Some(&grid), &context);

        assert_eq!(map.floor, 3);
        assert_eq!(map.layout, vec![vec![Tile::Code(1), Tile::Code(0)]]);
        assert!(map.doors.contains_key("door_1"));
        assert!(map.entities.is_empty());
    }

    #[test]
    fn layout_fields_win_over_context() {
        let entities = BTreeMap::from([(
            "m1".to_string(),
            EntitySpec::new(EntityKind::Monster, "slime", 1, 1),
        )]);
        let raw = RawMap::Layout(RawLayout {
            floor: Some(7),
            layout: Some(vec![vec![text("wall_a")]]),
            entities: Some(entities),
            ..RawLayout::default()
        });
        let mut context = NormalizeContext::for_floor(2);
        context.entities = Some(BTreeMap::new());

        let map = normalize_map_layout(Some(&raw), &context);

        assert_eq!(map.floor, 7);
        assert_eq!(map.layout[0][0], Tile::Symbol("wall_a".into()));
        assert_eq!(map.entities.len(), 1);
    }

    #[test]
    fn missing_input_yields_empty_floor() {
        let map = normalize_map_layout(None, &NormalizeContext::default());
        assert_eq!(map.floor, 1);
        assert!(map.layout.is_empty());
    }

    #[test]
    fn output_does_not_alias_input() {
        let mut raw = RawLayout {
            layout: Some(vec![vec![RawCell::Integer(0)]]),
            ..RawLayout::default()
        };
        let map = normalize_map_layout(
            Some(&RawMap::Layout(raw.clone())),
            &NormalizeContext::default(),
        );

        raw.layout = Some(vec![vec![RawCell::Integer(1)]]);
        assert_eq!(map.layout, vec![vec![Tile::Code(0)]]);
    }
}
