use bevy::prelude::*;

use crate::core::components::LevelEntity;
use crate::core::constants::ZLayer;
use crate::gameplay::level::LevelMap;
use crate::gameplay::round::{Round, RoundState};
use crate::gameplay::spawn::BirdQueue;

#[derive(Component)]
pub struct HudText;

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Hud"),
            LevelEntity,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
            GlobalZIndex(ZLayer::HUD_BACKGROUND as i32),
        ))
        .with_children(|p| {
            p.spawn((
                HudText,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                GlobalZIndex(ZLayer::HUD_LABEL as i32),
            ));
        });
}

pub fn hud_line(level: u32, birds_left: usize, state: RoundState) -> String {
    let hint = match state {
        RoundState::Ready => "drag the bird and release",
        RoundState::Flying => "...",
        RoundState::Finished => "tap to continue",
        RoundState::Animating => "",
    };
    format!("Level {level}  Birds left: {birds_left}  {hint}")
}

pub fn update_hud(
    round: Res<Round>,
    queue: Res<BirdQueue>,
    map: Res<LevelMap>,
    mut q: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut text) = q.single_mut() else {
        return;
    };
    let line = hud_line(map.index, queue.len(), round.state());
    if text.as_str() != line {
        *text = Text::new(line);
    }
}
