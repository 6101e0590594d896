use bevy::prelude::*;

use super::DebugState;
use crate::gameplay::round::Round;
use crate::gameplay::spawn::BirdQueue;
use crate::rendering::camera::camera::GameCamera;

#[derive(Component)]
pub(crate) struct DebugOverlayText;

pub fn debug_overlay_spawn(mut commands: Commands) {
    commands.spawn((
        Text::new(String::new()),
        TextFont {
            font_size: 13.0,
            ..Default::default()
        },
        TextColor(Color::srgb(0.75, 0.85, 0.95)),
        bevy::ui::Node {
            position_type: bevy::ui::PositionType::Absolute,
            bottom: Val::Px(4.0),
            left: Val::Px(6.0),
            ..Default::default()
        },
        Visibility::Hidden,
        DebugOverlayText,
    ));
}

pub(crate) fn debug_overlay_update(
    state: Res<DebugState>,
    round: Option<Res<Round>>,
    queue: Option<Res<BirdQueue>>,
    cameras: Query<(&Transform, &GameCamera)>,
    mut q_text: Query<(&mut Text, &mut Visibility), With<DebugOverlayText>>,
) {
    let Ok((mut text, mut vis)) = q_text.single_mut() else {
        return;
    };
    vis.set_if_neq(if state.overlay_visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    });
    if !state.overlay_visible {
        return;
    }
    let mut s = String::new();
    if let Some(r) = round {
        s.push_str(&format!("round={:?} ", r.state()));
    }
    if let Some(q) = queue {
        s.push_str(&format!("queue={} ", q.len()));
    }
    if let Ok((tf, cam)) = cameras.single() {
        s.push_str(&format!(
            "cam=({:.0},{:.0}) scale={:.2} follow={:?}",
            tf.translation.x, tf.translation.y, tf.scale.x, cam.follow
        ));
    }
    if text.as_str() != s {
        *text = Text::new(s);
    }
}
