//! Floor layout loader.
//!
//! Map files may be a bare grid or a structured layout. Both are run through
//! the normalizer; a file without a `floor` takes the number at the end of
//! its stem (`floor_3.json` is floor 3), or floor 1.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{MapLayout, NormalizeContext, RawMap, normalize_map_layout};
use tracing::warn;

use crate::loaders::{LoadResult, document_files, file_stem, parse_document};

/// Loader for the `maps/` directory.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<MapLayout> {
        let raw: RawMap = parse_document(path)?;
        let context = floor_from_stem(&file_stem(path))
            .map(NormalizeContext::for_floor)
            .unwrap_or_default();
        Ok(normalize_map_layout(Some(&raw), &context))
    }

    /// Loads every map, keyed by floor. A later file replaces an earlier one
    /// claiming the same floor.
    pub fn load_dir(dir: &Path) -> LoadResult<BTreeMap<i32, MapLayout>> {
        let mut maps = BTreeMap::new();
        for path in document_files(dir)? {
            let map = Self::load(&path)?;
            if maps.contains_key(&map.floor) {
                warn!(
                    floor = map.floor,
                    path = %path.display(),
                    "duplicate floor replaces earlier map"
                );
            }
            maps.insert(map.floor, map);
        }
        Ok(maps)
    }
}

fn floor_from_stem(stem: &str) -> Option<i32> {
    let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    stem[stem.len() - digits..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::map::{EntityKind, Tile};

    #[test]
    fn stem_numbers_become_floors() {
        assert_eq!(floor_from_stem("floor_3"), Some(3));
        assert_eq!(floor_from_stem("12"), Some(12));
        assert_eq!(floor_from_stem("lobby"), None);
    }

    #[test]
    fn grids_and_layouts_normalize() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("floor_2.json"),
            r#"[[1, "0", 1], [0, "grass", 0]]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("tower.json"),
            r#"{"floor": 5, "layout": [[0, 0]],
                "entities": {"start": {"type": "player_start", "id": "player", "x": 1, "y": 0}}}"#,
        )
        .unwrap();

        let maps = MapLoader::load_dir(dir.path()).unwrap();
        assert_eq!(maps.keys().copied().collect::<Vec<_>>(), vec![2, 5]);

        let grid = &maps[&2];
        assert_eq!(grid.layout[0][1], Tile::Code(0));
        assert_eq!(grid.layout[1][1], Tile::Symbol("grass".into()));

        let layout = &maps[&5];
        assert_eq!(layout.entities["start"].kind, EntityKind::PlayerStart);
    }

    #[test]
    fn ron_grids_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floor_4.ron");
        std::fs::write(&path, "[[0, 1], [1, 0]]").unwrap();
        let map = MapLoader::load(&path).unwrap();
        assert_eq!(map.floor, 4);
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 2);
    }
}
