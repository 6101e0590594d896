pub mod data;
pub mod embedded_levels;
pub mod table;

pub use data::LevelData;
pub use table::{
    BlockPlacement, LevelRecord, LevelRepository, LevelSource, LevelTable, MapSpec, Vec2Def,
};
