use bevy::prelude::*;

use crate::core::components::Bird;

/// Keeps a bird within `[min, max]` of the anchor until launch removes it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SlingConstraint {
    pub anchor: Vec2,
    pub min: f32,
    pub max: f32,
}

impl SlingConstraint {
    /// Range `[0, multiplier * bird_width]`.
    pub fn for_bird(anchor: Vec2, bird_width: f32, multiplier: f32) -> Self {
        Self {
            anchor,
            min: 0.0,
            max: bird_width * multiplier,
        }
    }

    pub fn constrain(&self, pos: Vec2) -> Vec2 {
        let offset = pos - self.anchor;
        let dist = offset.length();
        if dist > self.max {
            self.anchor + offset / dist * self.max
        } else if dist < self.min && dist > f32::EPSILON {
            self.anchor + offset / dist * self.min
        } else {
            pos
        }
    }
}

/// Clamp constrained birds every frame, whatever moved them.
pub fn enforce_sling_constraint(mut q: Query<(&SlingConstraint, &mut Transform), With<Bird>>) {
    for (sling, mut tf) in &mut q {
        let pos = tf.translation.truncate();
        let clamped = sling.constrain(pos);
        if clamped != pos {
            tf.translation.x = clamped.x;
            tf.translation.y = clamped.y;
        }
    }
}
