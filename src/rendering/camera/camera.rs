use bevy::prelude::*;

use crate::core::components::Bird;
use crate::core::config::GameConfig;
use crate::interaction::input::pointer::{PanGesture, PinchGesture};

/// World camera. `bounds` is the map rect the view must stay inside; `follow`
/// tracks a flying bird.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GameCamera {
    pub bounds: Rect,
    pub follow: Option<Entity>,
}

impl Default for GameCamera {
    fn default() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, 1280.0, 720.0),
            follow: None,
        }
    }
}

impl GameCamera {
    pub fn set_constraints(&mut self, bounds: Rect, follow: Option<Entity>) {
        self.bounds = bounds;
        self.follow = follow;
    }
}

/// Pan gestures move the camera only while this is set.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanEnabled(pub bool);

impl Default for PanEnabled {
    fn default() -> Self {
        Self(true)
    }
}

/// Timed glide back to the default view.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CameraReturn {
    pub from_pos: Vec2,
    pub from_scale: f32,
    pub to_pos: Vec2,
    pub to_scale: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl CameraReturn {
    pub fn new(from_pos: Vec2, from_scale: f32, to_pos: Vec2, to_scale: f32, duration: f32) -> Self {
        Self {
            from_pos,
            from_scale,
            to_pos,
            to_scale,
            duration,
            elapsed: 0.0,
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ease_in_out((self.elapsed / self.duration).clamp(0.0, 1.0))
    }

    pub fn sample(&self) -> (Vec2, f32) {
        let t = self.progress();
        (
            self.from_pos.lerp(self.to_pos, t),
            self.from_scale + (self.to_scale - self.from_scale) * t,
        )
    }

    pub fn finished(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }
}

/// Sent once when a [`CameraReturn`] completes.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct CameraReturned;

pub fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Keeps a view of half size `half_view` centered at `pos` inside `bounds`.
/// An axis where the view is larger than the map is centered instead.
pub fn clamp_to_bounds(pos: Vec2, half_view: Vec2, bounds: Rect) -> Vec2 {
    let axis = |p: f32, half: f32, min: f32, max: f32| {
        if max - min <= half * 2.0 {
            (min + max) * 0.5
        } else {
            p.clamp(min + half, max - half)
        }
    };
    Vec2::new(
        axis(pos.x, half_view.x, bounds.min.x, bounds.max.x),
        axis(pos.y, half_view.y, bounds.min.y, bounds.max.y),
    )
}

/// Unzoomed view anchored at the map's bottom-left.
pub fn default_view(bounds: Rect, viewport: Vec2) -> Vec2 {
    let half = viewport * 0.5;
    clamp_to_bounds(bounds.min + half, half, bounds)
}

/// Largest zoom-out that still fits the map width on screen.
pub fn max_zoom(map_width: f32, viewport_width: f32) -> f32 {
    if viewport_width <= 0.0 {
        return 1.0;
    }
    map_width / viewport_width
}

/// Screen point (origin top-left, y down) to world for a camera at
/// `cam_pos` with uniform `scale`.
pub fn screen_to_world(screen: Vec2, viewport: Vec2, cam_pos: Vec2, scale: f32) -> Vec2 {
    let centered = Vec2::new(screen.x - viewport.x * 0.5, viewport.y * 0.5 - screen.y);
    cam_pos + centered * scale
}

/// Camera position after rescaling so the world point under `screen` stays put.
pub fn zoom_about(screen: Vec2, viewport: Vec2, cam_pos: Vec2, scale: f32, new_scale: f32) -> Vec2 {
    let focus = screen_to_world(screen, viewport, cam_pos, scale);
    let centered = Vec2::new(screen.x - viewport.x * 0.5, viewport.y * 0.5 - screen.y);
    focus - centered * new_scale
}

fn viewport_size(windows: &Query<&Window>, cfg: &GameConfig) -> Vec2 {
    windows
        .iter()
        .next()
        .map(|w| w.size())
        .unwrap_or(Vec2::new(cfg.window.width, cfg.window.height))
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Name::new("GameCamera"), Camera2d, GameCamera::default()));
}

pub fn advance_camera_return(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Transform, &mut CameraReturn)>,
    mut done: EventWriter<CameraReturned>,
) {
    let dt = time.delta_secs();
    for (entity, mut tf, mut ret) in &mut q {
        ret.elapsed += dt;
        let (pos, scale) = ret.sample();
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
        tf.scale = Vec3::new(scale, scale, 1.0);
        if ret.finished() {
            commands.entity(entity).remove::<CameraReturn>();
            debug!(target: "camera", "return finished at {:?}", pos);
            done.write(CameraReturned);
        }
    }
}

/// Drag pans the view: screen delta scaled by zoom, y flipped.
pub fn apply_pan(
    mut gestures: EventReader<PanGesture>,
    pan: Res<PanEnabled>,
    mut q: Query<(&mut Transform, &GameCamera), Without<CameraReturn>>,
) {
    if !pan.0 {
        gestures.clear();
        return;
    }
    let Ok((mut tf, cam)) = q.single_mut() else {
        gestures.clear();
        return;
    };
    if cam.follow.is_some() {
        gestures.clear();
        return;
    }
    for g in gestures.read() {
        let scale = tf.scale.x;
        tf.translation.x -= g.translation.x * scale;
        tf.translation.y += g.translation.y * scale;
    }
}

/// Pinch zoom. A step is rejected if it leaves `(min_zoom, max_zoom)`.
pub fn apply_pinch(
    mut gestures: EventReader<PinchGesture>,
    cfg: Res<GameConfig>,
    windows: Query<&Window>,
    mut q: Query<(&mut Transform, &GameCamera), Without<CameraReturn>>,
) {
    let Ok((mut tf, cam)) = q.single_mut() else {
        gestures.clear();
        return;
    };
    let viewport = viewport_size(&windows, &cfg);
    let max = max_zoom(cam.bounds.width(), viewport.x);
    for g in gestures.read() {
        if g.scale <= 0.0 {
            continue;
        }
        let scale = tf.scale.x;
        let next = scale / g.scale;
        if next <= cfg.camera.min_zoom || next >= max {
            trace!(target: "camera", "zoom {next:.3} outside ({:.3}, {max:.3})", cfg.camera.min_zoom);
            continue;
        }
        let pos = zoom_about(g.location, viewport, tf.translation.truncate(), scale, next);
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
        tf.scale = Vec3::new(next, next, 1.0);
    }
}

/// Follow target first, then keep the view inside the map.
pub fn apply_camera_constraints(
    cfg: Res<GameConfig>,
    windows: Query<&Window>,
    targets: Query<&Transform, (With<Bird>, Without<GameCamera>)>,
    mut q: Query<(&mut Transform, &mut GameCamera)>,
) {
    let Ok((mut tf, mut cam)) = q.single_mut() else {
        return;
    };
    let mut pos = tf.translation.truncate();
    if let Some(target) = cam.follow {
        match targets.get(target) {
            Ok(t) => pos = t.translation.truncate(),
            Err(_) => cam.follow = None,
        }
    }
    let half_view = viewport_size(&windows, &cfg) * 0.5 * tf.scale.x;
    let clamped = clamp_to_bounds(pos, half_view, cam.bounds);
    tf.translation.x = clamped.x;
    tf.translation.y = clamped.y;
}
