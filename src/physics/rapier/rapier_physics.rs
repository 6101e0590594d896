use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;
use crate::core::system::system_order::PostPhysicsAdjustSet;

/// Rapier with the configured scale and gravity; post-step gameplay runs after writeback.
pub struct PhysicsSetupPlugin {
    pub pixels_per_meter: f32,
}

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            self.pixels_per_meter,
        ))
        .configure_sets(
            PostUpdate,
            PostPhysicsAdjustSet.after(PhysicsSet::Writeback),
        )
        .add_systems(Update, configure_gravity);
    }
}

/// Gravity comes from config; re-applied when config changes.
fn configure_gravity(
    game_cfg: Res<GameConfig>,
    mut rapier_cfg: Query<&mut RapierConfiguration>,
    mut applied: Local<bool>,
) {
    if *applied && !game_cfg.is_changed() {
        return;
    }
    let Ok(mut cfg) = rapier_cfg.single_mut() else {
        return;
    };
    cfg.gravity = game_cfg.physics.gravity;
    *applied = true;
    debug!(target: "config", "rapier gravity set to {:?}", cfg.gravity);
}
