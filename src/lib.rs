pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use app::game::{ConfigDiagnostics, GamePlugin};
pub use app::state::{AppState, CurrentLevel, SceneRequest};
pub use core::components::{Bird, BirdKind, Block, BlockKind};
pub use core::config::{config::GameConfig, config::WindowConfig};
pub use core::level::{LevelData, LevelRepository, LevelSource, LevelTable};
pub use gameplay::round::{Round, RoundState};
