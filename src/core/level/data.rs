use crate::core::constants::level_key;

use super::table::{BlockPlacement, LevelSource, MapSpec};

/// Level contents needed to start play. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub index: u32,
    /// Bird identifiers in launch order.
    pub birds: Vec<String>,
    pub map: MapSpec,
    pub blocks: Vec<BlockPlacement>,
}

impl LevelData {
    /// `None` when `Level_<index>` is absent or has no `Birds` entry.
    pub fn load(source: &dyn LevelSource, index: u32) -> Option<Self> {
        let record = source.record(&level_key(index))?;
        let birds = record.birds.clone()?;
        Some(Self {
            index,
            birds,
            map: record.map.clone(),
            blocks: record.blocks.clone(),
        })
    }

    /// Whether the source holds a loadable level after `index`.
    pub fn has_next(source: &dyn LevelSource, index: u32) -> bool {
        Self::load(source, index + 1).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::table::{LevelRecord, LevelTable};

    fn table() -> LevelTable {
        LevelTable::from_records([
            (
                "Level_1",
                LevelRecord {
                    birds: Some(vec!["red".into(), "yellow".into()]),
                    ..Default::default()
                },
            ),
            ("Level_2", LevelRecord::default()),
        ])
    }

    #[test]
    fn loads_bird_list_in_order() {
        let data = LevelData::load(&table(), 1).unwrap();
        assert_eq!(data.index, 1);
        assert_eq!(data.birds, vec!["red".to_string(), "yellow".to_string()]);
    }

    #[test]
    fn missing_key_is_absent() {
        assert!(LevelData::load(&table(), 9).is_none());
    }

    #[test]
    fn record_without_birds_is_absent() {
        assert!(LevelData::load(&table(), 2).is_none());
        assert!(!LevelData::has_next(&table(), 1));
    }
}
