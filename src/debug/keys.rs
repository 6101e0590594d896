use bevy::prelude::*;
use bevy_rapier2d::render::DebugRenderContext;

use super::DebugState;

/// F3 toggles collider wireframes, F4 the overlay.
pub fn debug_key_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<DebugState>,
    ctx: Option<ResMut<DebugRenderContext>>,
) {
    if keys.just_pressed(KeyCode::F3) {
        if let Some(mut c) = ctx {
            c.enabled = !c.enabled;
            info!(target: "debug", "rapier wireframe {}", if c.enabled { "on" } else { "off" });
        }
    }
    if keys.just_pressed(KeyCode::F4) {
        state.overlay_visible = !state.overlay_visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f4_toggles_overlay() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<DebugState>();
        app.add_systems(Update, debug_key_input_system);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::F4);
        app.update();
        assert!(app.world().resource::<DebugState>().overlay_visible);
    }

    #[test]
    fn f3_flips_wireframes() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<DebugState>();
        app.insert_resource(DebugRenderContext {
            enabled: false,
            ..default()
        });
        app.add_systems(Update, debug_key_input_system);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::F3);
        app.update();
        assert!(app.world().resource::<DebugRenderContext>().enabled);
        assert!(!app.world().resource::<DebugState>().overlay_visible);
    }
}
