pub mod blocks;
pub mod hud;
pub mod launch;
pub mod level;
pub mod round;
pub mod spawn;

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::physics::contact::dispatch_contacts;
use crate::physics::sling::enforce_sling_constraint;

use self::blocks::{apply_block_impacts, BlockImpact};
use self::level::{setup_level, teardown_level, LevelMap};
use self::round::{check_bird_resting, handle_pointer_events, on_camera_returned, Round};
use self::spawn::{spawn_next_bird, AnchorPoint, BirdQueue, LevelComplete, SpawnNextBird};

/// Game scene: level construction, round flow, birds and blocks.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnNextBird>()
            .add_event::<LevelComplete>()
            .add_event::<BlockImpact>()
            .init_resource::<Round>()
            .init_resource::<BirdQueue>()
            .init_resource::<AnchorPoint>()
            .init_resource::<LevelMap>()
            .add_systems(OnEnter(AppState::Gameplay), (setup_level, hud::spawn_hud))
            .add_systems(OnExit(AppState::Gameplay), teardown_level)
            .add_systems(
                Update,
                (
                    handle_pointer_events,
                    enforce_sling_constraint,
                    on_camera_returned,
                    spawn_next_bird,
                    hud::update_hud,
                )
                    .chain()
                    .in_set(PrePhysicsSet)
                    .run_if(in_state(AppState::Gameplay)),
            )
            .add_systems(
                PostUpdate,
                (dispatch_contacts, apply_block_impacts, check_bird_resting)
                    .chain()
                    .in_set(PostPhysicsAdjustSet)
                    .run_if(in_state(AppState::Gameplay)),
            );
    }
}
