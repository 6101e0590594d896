//! Compile-time copy of the level table.
//!
//! wasm32 builds (and native builds with the `embedded_levels` feature) read levels
//! from this string instead of the filesystem. Disk builds keep it as the fallback
//! shipped with the binary.

pub const EMBEDDED_LEVEL_TABLE: &str = include_str!("../../../assets/levels/levels.ron");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::{LevelData, LevelSource, LevelTable};

    #[test]
    fn embedded_table_has_first_level() {
        let table = LevelTable::from_ron_str(EMBEDDED_LEVEL_TABLE).expect("embedded table parses");
        assert!(table.keys().contains(&"Level_1"));
        let data = LevelData::load(&table, 1).expect("Level_1 has birds");
        assert!(!data.birds.is_empty());
        assert!(!data.blocks.is_empty());
    }
}
