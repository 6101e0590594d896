pub mod config;

pub use config::{
    CameraConfig, GameConfig, LevelConfig, PhysicsConfig, SlingConfig, WindowConfig,
};
