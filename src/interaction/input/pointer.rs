use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use smallvec::SmallVec;

use crate::core::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Began,
    Moved,
    Ended,
    /// The press was taken over by a pinch; nothing is launched.
    Cancelled,
}

/// Single-pointer touch stream: first active touch, or left mouse button.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub world: Vec2,
    pub screen: Vec2,
}

/// Screen-space drag delta since the previous frame (y down).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PanGesture {
    pub translation: Vec2,
}

/// Relative pinch: `scale > 1` spreads the fingers (zoom in).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PinchGesture {
    pub scale: f32,
    pub location: Vec2,
}

/// One frame of raw pointer input, already merged from touch and mouse.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub began: bool,
    pub ended: bool,
    /// Active touches this frame.
    pub touches: usize,
    /// `None` when the cursor is outside the window or no camera maps it.
    pub position: Option<(Vec2, Vec2)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutput {
    Pointer(PointerEvent),
    Pan(PanGesture),
}

/// Press state carried between frames. `last` is the last known
/// (screen, world) position of the held pointer.
#[derive(Default, Debug)]
pub struct PointerTracker {
    pressed: bool,
    last: Option<(Vec2, Vec2)>,
    pinch_distance: Option<f32>,
}

impl PointerTracker {
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// A release always ends the press, at the last known position if the
    /// pointer is no longer over the window. A second finger cancels it.
    pub fn advance(&mut self, sample: PointerSample) -> SmallVec<[PointerOutput; 3]> {
        let mut out = SmallVec::new();
        if sample.touches >= 2 {
            if self.pressed {
                if let Some((screen, world)) = self.last {
                    out.push(PointerOutput::Pointer(PointerEvent {
                        phase: PointerPhase::Cancelled,
                        world,
                        screen,
                    }));
                }
                self.release();
            }
            return out;
        }

        if sample.began && !self.pressed {
            if let Some((screen, world)) = sample.position {
                self.pressed = true;
                self.last = Some((screen, world));
                out.push(PointerOutput::Pointer(PointerEvent {
                    phase: PointerPhase::Began,
                    world,
                    screen,
                }));
            }
        } else if self.pressed {
            if let Some((screen, world)) = sample.position {
                if let Some((last, _)) = self.last.filter(|(last, _)| *last != screen) {
                    out.push(PointerOutput::Pan(PanGesture {
                        translation: screen - last,
                    }));
                    out.push(PointerOutput::Pointer(PointerEvent {
                        phase: PointerPhase::Moved,
                        world,
                        screen,
                    }));
                }
                self.last = Some((screen, world));
            }
        }

        if sample.ended && self.pressed {
            if let Some((screen, world)) = sample.position.or(self.last) {
                out.push(PointerOutput::Pointer(PointerEvent {
                    phase: PointerPhase::Ended,
                    world,
                    screen,
                }));
            }
            self.release();
        }
        out
    }

    fn release(&mut self) {
        self.pressed = false;
        self.last = None;
    }
}

pub fn pinch_scale(previous: f32, current: f32) -> Option<f32> {
    if previous <= f32::EPSILON || current <= f32::EPSILON {
        return None;
    }
    Some(current / previous)
}

/// Wheel notches as a pinch factor around the cursor.
pub fn wheel_scale(ev: &MouseWheel, step: f32) -> f32 {
    let notches = match ev.unit {
        MouseScrollUnit::Line => ev.y,
        MouseScrollUnit::Pixel => ev.y / 100.0,
    };
    (1.0 + notches * step).max(0.1)
}

fn screen_to_world(camera_q: &Query<(&Camera, &GlobalTransform)>, screen: Vec2) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen).ok()
}

#[allow(clippy::too_many_arguments)]
pub fn collect_pointer_input(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut wheel: EventReader<MouseWheel>,
    cfg: Res<GameConfig>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut tracker: Local<PointerTracker>,
    mut pointer: EventWriter<PointerEvent>,
    mut pan: EventWriter<PanGesture>,
    mut pinch: EventWriter<PinchGesture>,
) {
    let Ok(window) = windows.single() else {
        wheel.clear();
        return;
    };

    let cursor = window.cursor_position();
    for ev in wheel.read() {
        let location = cursor.unwrap_or(window.size() * 0.5);
        pinch.write(PinchGesture {
            scale: wheel_scale(ev, cfg.camera.wheel_zoom_step),
            location,
        });
    }

    let active: Vec<Vec2> = touches.iter().map(|t| t.position()).collect();
    if active.len() >= 2 {
        let (a, b) = (active[0], active[1]);
        let dist = a.distance(b);
        if let Some(scale) = tracker.pinch_distance.and_then(|prev| pinch_scale(prev, dist)) {
            pinch.write(PinchGesture {
                scale,
                location: (a + b) * 0.5,
            });
        }
        tracker.pinch_distance = Some(dist);
    } else {
        tracker.pinch_distance = None;
    }

    let released_touch = touches.iter_just_released().next().map(|t| t.position());
    let screen = active.first().copied().or(released_touch).or(cursor);
    let sample = PointerSample {
        began: buttons.just_pressed(MouseButton::Left) || touches.any_just_pressed(),
        ended: buttons.just_released(MouseButton::Left) || released_touch.is_some(),
        touches: active.len(),
        position: screen.and_then(|s| screen_to_world(&camera_q, s).map(|w| (s, w))),
    };
    for output in tracker.advance(sample) {
        match output {
            PointerOutput::Pointer(ev) => {
                pointer.write(ev);
            }
            PointerOutput::Pan(ev) => {
                pan.write(ev);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinch_ratio() {
        assert_eq!(pinch_scale(100.0, 150.0), Some(1.5));
        assert_eq!(pinch_scale(0.0, 10.0), None);
    }

    #[test]
    fn wheel_up_zooms_in() {
        let ev = MouseWheel {
            unit: MouseScrollUnit::Line,
            x: 0.0,
            y: 1.0,
            window: Entity::PLACEHOLDER,
        };
        assert!(wheel_scale(&ev, 0.1) > 1.0);
        let down = MouseWheel { y: -2.0, ..ev };
        assert!((wheel_scale(&down, 0.1) - 0.8).abs() < 1e-6);
    }

    fn at(x: f32, y: f32) -> Option<(Vec2, Vec2)> {
        Some((Vec2::new(x, y), Vec2::new(x, -y)))
    }

    fn phases(out: &[PointerOutput]) -> Vec<PointerPhase> {
        out.iter()
            .filter_map(|o| match o {
                PointerOutput::Pointer(ev) => Some(ev.phase),
                PointerOutput::Pan(_) => None,
            })
            .collect()
    }

    #[test]
    fn release_outside_window_still_ends_press() {
        let mut t = PointerTracker::default();
        t.advance(PointerSample {
            began: true,
            position: at(10.0, 10.0),
            ..default()
        });
        t.advance(PointerSample {
            position: at(30.0, 10.0),
            ..default()
        });
        // Cursor left the window.
        assert!(t.advance(PointerSample::default()).is_empty());
        let out = t.advance(PointerSample {
            ended: true,
            ..default()
        });
        assert_eq!(
            out.as_slice(),
            &[PointerOutput::Pointer(PointerEvent {
                phase: PointerPhase::Ended,
                world: Vec2::new(30.0, -10.0),
                screen: Vec2::new(30.0, 10.0),
            })]
        );
        assert!(!t.pressed());

        // The next click starts a fresh press instead of a move.
        let out = t.advance(PointerSample {
            began: true,
            position: at(500.0, 200.0),
            ..default()
        });
        assert_eq!(phases(&out), vec![PointerPhase::Began]);
    }

    #[test]
    fn drag_emits_pan_and_move() {
        let mut t = PointerTracker::default();
        t.advance(PointerSample {
            began: true,
            touches: 1,
            position: at(10.0, 10.0),
            ..default()
        });
        let out = t.advance(PointerSample {
            touches: 1,
            position: at(14.0, 7.0),
            ..default()
        });
        assert_eq!(
            out[0],
            PointerOutput::Pan(PanGesture {
                translation: Vec2::new(4.0, -3.0)
            })
        );
        assert_eq!(phases(&out), vec![PointerPhase::Moved]);
        // Same position: nothing new.
        assert!(t
            .advance(PointerSample {
                touches: 1,
                position: at(14.0, 7.0),
                ..default()
            })
            .is_empty());
    }

    #[test]
    fn second_finger_cancels_press() {
        let mut t = PointerTracker::default();
        t.advance(PointerSample {
            began: true,
            touches: 1,
            position: at(10.0, 10.0),
            ..default()
        });
        let out = t.advance(PointerSample {
            began: true,
            touches: 2,
            position: at(10.0, 10.0),
            ..default()
        });
        assert_eq!(phases(&out), vec![PointerPhase::Cancelled]);
        assert!(!t.pressed());
        // Lifting the second finger does not launch anything.
        let out = t.advance(PointerSample {
            ended: true,
            touches: 1,
            position: at(10.0, 10.0),
            ..default()
        });
        assert!(out.is_empty());
    }
}
