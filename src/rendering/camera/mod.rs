pub mod camera;

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};

use self::camera::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CameraReturned>()
            .init_resource::<PanEnabled>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (advance_camera_return, apply_pan, apply_pinch)
                    .after(PrePhysicsSet)
                    .run_if(in_state(AppState::Gameplay)),
            )
            .add_systems(
                PostUpdate,
                apply_camera_constraints
                    .in_set(PostPhysicsAdjustSet)
                    .run_if(in_state(AppState::Gameplay)),
            );
    }
}
