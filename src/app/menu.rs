use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::state::{AppState, CurrentLevel, SceneRequest};

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::MainMenu), spawn_menu_ui)
            .add_systems(
                Update,
                (handle_play_button, handle_menu_keys).run_if(in_state(AppState::MainMenu)),
            )
            .add_systems(OnExit(AppState::MainMenu), despawn_menu_ui);
    }
}

#[derive(Component)]
struct MenuUiRoot;

#[derive(Component)]
pub struct PlayButton;

const BUTTON_IDLE: Color = Color::srgb(0.85, 0.35, 0.2);
const BUTTON_HOVER: Color = Color::srgb(0.95, 0.45, 0.28);

fn spawn_menu_ui(mut commands: Commands, current: Res<CurrentLevel>) {
    info!(target: "menu", "=== MAIN MENU === (next: Level_{})", current.0);
    commands
        .spawn((
            MenuUiRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.55, 0.78, 0.95)),
        ))
        .with_children(|p| {
            p.spawn((
                Text::new("Birds"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            p.spawn((
                PlayButton,
                Button,
                Node {
                    padding: UiRect::axes(Val::Px(32.0), Val::Px(12.0)),
                    ..default()
                },
                BackgroundColor(BUTTON_IDLE),
            ))
            .with_children(|b| {
                b.spawn((
                    Text::new(format!("Play level {}", current.0)),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
        });
}

fn handle_play_button(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<PlayButton>)>,
    mut requests: EventWriter<SceneRequest>,
) {
    for (interaction, mut bg) in &mut q {
        match interaction {
            Interaction::Pressed => {
                info!(target: "menu", "play pressed");
                requests.write(SceneRequest::Level);
            }
            Interaction::Hovered => bg.0 = BUTTON_HOVER,
            Interaction::None => bg.0 = BUTTON_IDLE,
        }
    }
}

fn handle_menu_keys(keys: Res<ButtonInput<KeyCode>>, mut requests: EventWriter<SceneRequest>) {
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::Space]) {
        requests.write(SceneRequest::Level);
    }
}

fn despawn_menu_ui(mut commands: Commands, q_root: Query<Entity, With<MenuUiRoot>>) {
    for e in &q_root {
        commands.entity(e).despawn();
    }
}
