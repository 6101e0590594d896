pub mod pointer;

use bevy::input::InputSystem;
use bevy::prelude::*;

use self::pointer::{collect_pointer_input, PanGesture, PinchGesture, PointerEvent};

pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerEvent>()
            .add_event::<PanGesture>()
            .add_event::<PinchGesture>()
            .add_systems(PreUpdate, collect_pointer_input.after(InputSystem));
    }
}
