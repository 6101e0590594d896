//! Debug tooling: rapier wireframes and a state overlay.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
pub mod keys; // pub for testing
#[cfg(feature = "debug")]
mod overlay;

use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugState {
    pub overlay_visible: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    #[cfg(feature = "debug")]
    fn build(&self, app: &mut App) {
        use bevy_rapier2d::render::RapierDebugRenderPlugin;

        use crate::core::config::GameConfig;

        let enabled = app
            .world()
            .get_resource::<GameConfig>()
            .is_some_and(|c| c.rapier_debug);
        let wireframes = RapierDebugRenderPlugin {
            enabled,
            ..default()
        };
        app.add_plugins(wireframes)
            .init_resource::<DebugState>()
            .add_systems(Startup, overlay::debug_overlay_spawn)
            .add_systems(
                Update,
                (keys::debug_key_input_system, overlay::debug_overlay_update).chain(),
            );
    }

    #[cfg(not(feature = "debug"))]
    fn build(&self, _app: &mut App) {}
}
