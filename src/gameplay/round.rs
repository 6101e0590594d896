//! Round state machine: one bird's aim, launch and settle cycle.
//!
//! `Ready -> Flying -> Finished -> Animating -> Ready`. Transitions are methods on
//! [`Round`] so the ordering rules live in one place; the systems in this module
//! only translate pointer events and physics state into those calls.
use bevy::prelude::*;
use bevy_rapier2d::prelude::{ExternalImpulse, RigidBody, Sleeping, Velocity};

use crate::core::components::Bird;
use crate::core::config::{GameConfig, PhysicsConfig};
use crate::gameplay::launch::launch_impulse;
use crate::gameplay::spawn::{AnchorPoint, SpawnNextBird};
use crate::interaction::input::pointer::{PointerEvent, PointerPhase};
use crate::physics::sling::SlingConstraint;
use crate::rendering::camera::camera::{
    default_view, CameraReturn, CameraReturned, GameCamera, PanEnabled,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundState {
    #[default]
    Ready,
    Flying,
    Finished,
    Animating,
}

/// What a touch-begin means in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchBegan {
    /// `Ready`: try to grab the bird under the pointer.
    TryGrab,
    /// `Finished -> Animating`: glide the camera home.
    StartCameraReturn,
    /// `Flying` / `Animating`: nothing happens.
    Ignored,
}

#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct Round {
    state: RoundState,
}

impl Round {
    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn touch_began(&mut self) -> TouchBegan {
        match self.state {
            RoundState::Ready => TouchBegan::TryGrab,
            RoundState::Finished => {
                self.set(RoundState::Animating);
                TouchBegan::StartCameraReturn
            }
            RoundState::Flying | RoundState::Animating => TouchBegan::Ignored,
        }
    }

    /// `Ready -> Flying`.
    pub fn launch(&mut self) -> bool {
        self.advance(RoundState::Ready, RoundState::Flying)
    }

    /// `Flying -> Finished`.
    pub fn settle(&mut self) -> bool {
        self.advance(RoundState::Flying, RoundState::Finished)
    }

    /// A new bird was placed at the anchor. Valid at level start (`Ready`) and
    /// after the camera returned (`Animating`).
    pub fn bird_spawned(&mut self) -> bool {
        match self.state {
            RoundState::Ready => true,
            RoundState::Animating => {
                self.set(RoundState::Ready);
                true
            }
            other => {
                warn!(target: "round", "bird spawned while {:?}; state kept", other);
                false
            }
        }
    }

    fn advance(&mut self, from: RoundState, to: RoundState) -> bool {
        if self.state != from {
            return false;
        }
        self.set(to);
        true
    }

    fn set(&mut self, to: RoundState) {
        debug!(target: "round", "{:?} -> {:?}", self.state, to);
        self.state = to;
    }
}

/// Asleep, or both speeds below the configured thresholds this frame.
pub fn is_resting(velocity: &Velocity, sleeping: Option<&Sleeping>, cfg: &PhysicsConfig) -> bool {
    if sleeping.is_some_and(|s| s.sleeping) {
        return true;
    }
    velocity.linvel.length() <= cfg.rest_linear_speed
        && velocity.angvel.abs() <= cfg.rest_angular_speed
}

/// Counts consecutive calm frames. Sleep settles at once; speed alone has to
/// stay under the thresholds for `rest_frames` frames.
pub fn track_rest(
    calm_frames: &mut u32,
    velocity: &Velocity,
    sleeping: Option<&Sleeping>,
    cfg: &PhysicsConfig,
) -> bool {
    if sleeping.is_some_and(|s| s.sleeping) {
        return true;
    }
    if is_resting(velocity, None, cfg) {
        *calm_frames += 1;
    } else {
        *calm_frames = 0;
    }
    *calm_frames >= cfg.rest_frames.max(1)
}

/// Applies touch begin/move/end events in arrival order.
#[allow(clippy::too_many_arguments)]
pub fn handle_pointer_events(
    mut commands: Commands,
    mut pointer: EventReader<PointerEvent>,
    mut round: ResMut<Round>,
    mut pan: ResMut<PanEnabled>,
    anchor: Res<AnchorPoint>,
    cfg: Res<GameConfig>,
    windows: Query<&Window>,
    mut birds: Query<(Entity, &mut Bird, &mut Transform, Option<&SlingConstraint>), Without<GameCamera>>,
    mut cameras: Query<(Entity, &Transform, &mut GameCamera)>,
) {
    for ev in pointer.read() {
        match ev.phase {
            PointerPhase::Began => match round.touch_began() {
                TouchBegan::TryGrab => {
                    let Ok((_, mut bird, mut tf, sling)) = birds.single_mut() else {
                        continue;
                    };
                    if !bird.interactive || !bird.contains(tf.translation.truncate(), ev.world) {
                        continue;
                    }
                    pan.0 = false;
                    bird.grabbed = true;
                    place(&mut tf, ev.world, sling);
                }
                TouchBegan::StartCameraReturn => {
                    let Ok((cam_entity, cam_tf, cam)) = cameras.single() else {
                        continue;
                    };
                    let viewport = windows
                        .iter()
                        .next()
                        .map(|w| w.size())
                        .unwrap_or(Vec2::new(cfg.window.width, cfg.window.height));
                    let home = default_view(cam.bounds, viewport);
                    info!(target: "round", "returning camera to {:?}", home);
                    commands.entity(cam_entity).insert(CameraReturn::new(
                        cam_tf.translation.truncate(),
                        cam_tf.scale.y,
                        home,
                        1.0,
                        cfg.camera.return_duration,
                    ));
                }
                TouchBegan::Ignored => {}
            },
            PointerPhase::Moved => {
                if let Ok((_, bird, mut tf, sling)) = birds.single_mut() {
                    if bird.grabbed {
                        place(&mut tf, ev.world, sling);
                    }
                }
            }
            PointerPhase::Cancelled => {
                if let Ok((_, mut bird, mut tf, sling)) = birds.single_mut() {
                    if bird.grabbed {
                        bird.grabbed = false;
                        pan.0 = true;
                        place(&mut tf, anchor.0, sling);
                        debug!(target: "round", "grab cancelled by pinch");
                    }
                }
            }
            PointerPhase::Ended => {
                let Ok((entity, mut bird, tf, _)) = birds.single_mut() else {
                    continue;
                };
                if !bird.grabbed {
                    continue;
                }
                if let Ok((_, _, mut cam)) = cameras.single_mut() {
                    let bounds = cam.bounds;
                    cam.set_constraints(bounds, Some(entity));
                }
                bird.grabbed = false;
                bird.flying = true;
                bird.interactive = false;
                round.launch();
                let pull = launch_impulse(anchor.0, tf.translation.truncate());
                info!(target: "round", "launch {:?} pull={:?}", bird.kind, pull);
                commands
                    .entity(entity)
                    .remove::<SlingConstraint>()
                    .insert((
                        RigidBody::Dynamic,
                        ExternalImpulse {
                            impulse: pull * cfg.physics.impulse_scale,
                            torque_impulse: 0.0,
                        },
                    ));
            }
        }
    }
}

fn place(tf: &mut Transform, world: Vec2, sling: Option<&SlingConstraint>) {
    let pos = sling.map_or(world, |s| s.constrain(world));
    tf.translation.x = pos.x;
    tf.translation.y = pos.y;
}

/// Post-step: a grounded bird that stopped moving ends the round.
pub fn check_bird_resting(
    mut commands: Commands,
    mut round: ResMut<Round>,
    cfg: Res<GameConfig>,
    mut birds: Query<(Entity, &mut Bird, &Velocity, Option<&Sleeping>)>,
    mut cameras: Query<&mut GameCamera>,
) {
    if round.state() != RoundState::Flying {
        return;
    }
    let Ok((entity, mut bird, vel, sleeping)) = birds.single_mut() else {
        return;
    };
    if bird.flying {
        bird.calm_frames = 0;
        return;
    }
    if !track_rest(&mut bird.calm_frames, vel, sleeping, &cfg.physics) {
        return;
    }
    if let Ok(mut cam) = cameras.single_mut() {
        let bounds = cam.bounds;
        cam.set_constraints(bounds, None);
    }
    commands.entity(entity).despawn();
    round.settle();
    info!(target: "round", "{:?} bird came to rest", bird.kind);
}

/// Camera is home: panning comes back and the next bird is requested.
pub fn on_camera_returned(
    mut returned: EventReader<CameraReturned>,
    mut pan: ResMut<PanEnabled>,
    mut spawn: EventWriter<SpawnNextBird>,
) {
    for _ in returned.read() {
        pan.0 = true;
        spawn.write(SpawnNextBird);
    }
}
