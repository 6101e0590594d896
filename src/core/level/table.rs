use bevy::prelude::*;
use ron::extensions::Extensions;
use serde::Deserialize;
use std::collections::HashMap;
use std::{fs, path::Path};

use crate::core::config::LevelConfig;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}
impl From<Vec2Def> for Vec2 {
    fn from(v: Vec2Def) -> Self {
        Vec2::new(v.x, v.y)
    }
}

/// Tile grid the level is laid out on. World origin is the map's bottom-left corner.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapSpec {
    pub columns: u32,
    pub rows: u32,
    pub tile_size: Vec2Def,
}
impl Default for MapSpec {
    fn default() -> Self {
        Self {
            columns: 40,
            rows: 12,
            tile_size: Vec2Def { x: 64.0, y: 64.0 },
        }
    }
}
impl MapSpec {
    pub fn tile_size(&self) -> Vec2 {
        self.tile_size.into()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.columns as f32, self.rows as f32) * self.tile_size()
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corners(Vec2::ZERO, self.size())
    }

    /// Sling origin: half way to the map center on both axes.
    pub fn anchor(&self) -> Vec2 {
        self.bounds().center() * 0.5
    }
}

/// One block placed on the map (position is the block center, rotation in radians).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BlockPlacement {
    pub kind: String,
    pub position: Vec2Def,
    pub size: Vec2Def,
    #[serde(default)]
    pub rotation: f32,
}

/// Raw record stored under `Level_<n>`. `Birds` is optional here so a record
/// without it can be detected instead of failing the whole table.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct LevelRecord {
    #[serde(rename = "Birds", default)]
    pub birds: Option<Vec<String>>,
    #[serde(rename = "Map", default)]
    pub map: MapSpec,
    #[serde(rename = "Blocks", default)]
    pub blocks: Vec<BlockPlacement>,
}

/// Read-only access to level records by key.
pub trait LevelSource: Send + Sync + 'static {
    fn record(&self, key: &str) -> Option<&LevelRecord>;
    fn keys(&self) -> Vec<&str>;
}

/// In-memory level table keyed by `Level_<n>`.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct LevelTable {
    records: HashMap<String, LevelRecord>,
}

impl LevelTable {
    pub fn from_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, LevelRecord)>,
        K: Into<String>,
    {
        Self {
            records: records.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn from_ron_str(txt: &str) -> Result<Self, String> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(txt)
            .map_err(|e| format!("parse level table RON: {e}"))
    }

    pub fn from_json_str(txt: &str) -> Result<Self, String> {
        serde_json::from_str(txt).map_err(|e| format!("parse level table JSON: {e}"))
    }

    /// Load from disk; `.json` files go through serde_json, anything else is RON.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|e| format!("read levels {path:?}: {e}"))?;
        let table = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&txt),
            _ => Self::from_ron_str(&txt),
        }
        .map_err(|e| format!("{}: {e}", path.display()))?;
        if table.records.is_empty() {
            return Err(format!("level table {} is empty", path.display()));
        }
        Ok(table)
    }

    /// Embedded copy on wasm / `embedded_levels`, disk otherwise.
    pub fn load_configured(cfg: &LevelConfig) -> Result<Self, String> {
        if cfg!(any(target_arch = "wasm32", feature = "embedded_levels")) {
            Self::from_ron_str(super::embedded_levels::EMBEDDED_LEVEL_TABLE)
        } else {
            Self::load_from_file(&cfg.table_path)
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LevelSource for LevelTable {
    fn record(&self, key: &str) -> Option<&LevelRecord> {
        self.records.get(key)
    }

    fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.records.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Level source injected into the game at startup.
#[derive(Resource)]
pub struct LevelRepository(Box<dyn LevelSource>);

impl LevelRepository {
    pub fn new(source: impl LevelSource) -> Self {
        Self(Box::new(source))
    }

    pub fn source(&self) -> &dyn LevelSource {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"{
        "Level_1": (
            Birds: ["red", "blue"],
            Map: (columns: 10, rows: 5, tile_size: (x: 32.0, y: 32.0)),
            Blocks: [(kind: "wood", position: (x: 200.0, y: 64.0), size: (x: 20.0, y: 60.0))],
        ),
        "Level_2": (Map: (columns: 4)),
    }"#;

    #[test]
    fn parses_ron_table() {
        let t = LevelTable::from_ron_str(TABLE).unwrap();
        assert_eq!(t.len(), 2);
        let l1 = t.record("Level_1").unwrap();
        assert_eq!(l1.birds.as_deref().unwrap(), ["red", "blue"]);
        assert_eq!(l1.map.size(), Vec2::new(320.0, 160.0));
        assert_eq!(l1.blocks[0].rotation, 0.0);
        assert!(t.record("Level_2").unwrap().birds.is_none());
        assert_eq!(t.keys(), vec!["Level_1", "Level_2"]);
    }

    #[test]
    fn parses_json_table() {
        let t = LevelTable::from_json_str(r#"{"Level_1": {"Birds": ["yellow"]}}"#).unwrap();
        assert_eq!(t.record("Level_1").unwrap().birds.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn anchor_is_quarter_of_map() {
        let map = MapSpec {
            columns: 10,
            rows: 4,
            tile_size: Vec2Def { x: 40.0, y: 50.0 },
        };
        assert_eq!(map.anchor(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn load_from_file_picks_parser_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("levels.json");
        std::fs::write(&json, r#"{"Level_7": {"Birds": []}}"#).unwrap();
        assert!(LevelTable::load_from_file(&json).unwrap().record("Level_7").is_some());

        let empty = dir.path().join("empty.ron");
        std::fs::write(&empty, "{}").unwrap();
        assert!(LevelTable::load_from_file(&empty).is_err());
    }
}
