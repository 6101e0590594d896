use bevy::prelude::*;

/// High-level app lifecycle state.
/// MainMenu -> Gameplay -> MainMenu (on completion, missing level, or Escape)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Single play button.
    #[default]
    MainMenu,
    /// A level is loaded and rounds are running.
    Gameplay,
}

/// Scene hand-off message. Menu and game write it; the coordinator in
/// `app::game` is the only system that changes `AppState`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    Menu,
    Level,
}

impl SceneRequest {
    pub fn target(self) -> AppState {
        match self {
            SceneRequest::Menu => AppState::MainMenu,
            SceneRequest::Level => AppState::Gameplay,
        }
    }
}

/// Level index the next `Gameplay` entry loads.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentLevel(pub u32);

impl Default for CurrentLevel {
    fn default() -> Self {
        Self(1)
    }
}
