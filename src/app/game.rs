// This file is part of Birds.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::app::menu::MenuPlugin;
use crate::app::state::{AppState, CurrentLevel, SceneRequest};
use crate::core::config::GameConfig;
use crate::core::level::{LevelData, LevelRepository};
use crate::core::system::system_order::PrePhysicsSet;
use crate::debug::DebugPlugin;
use crate::gameplay::spawn::LevelComplete;
use crate::gameplay::GameplayPlugin;
use crate::interaction::input::PointerPlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;

/// What startup config loading found; logged once.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConfigDiagnostics {
    pub used: Vec<String>,
    pub errors: Vec<String>,
}

/// Everything except windowing: `DefaultPlugins` (or `MinimalPlugins` plus
/// states in tests) must be added first, and a `LevelRepository` inserted.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<CurrentLevel>()
            .init_resource::<ConfigDiagnostics>();
        let pixels_per_meter = app.world().resource::<GameConfig>().physics.pixels_per_meter;

        app.init_state::<AppState>()
            .add_event::<SceneRequest>()
            .add_plugins((
                PhysicsSetupPlugin { pixels_per_meter },
                CameraPlugin,
                PointerPlugin,
                GameplayPlugin,
                MenuPlugin,
                DebugPlugin,
                ConfigHotReloadPlugin,
            ))
            .add_systems(Startup, log_config_diagnostics)
            .add_systems(
                Update,
                (
                    (handle_level_complete, escape_to_menu)
                        .after(PrePhysicsSet)
                        .run_if(in_state(AppState::Gameplay)),
                    route_scene_requests,
                )
                    .chain(),
            );
    }
}

/// Only system that changes `AppState`. The last request of the frame wins.
pub fn route_scene_requests(
    mut requests: EventReader<SceneRequest>,
    state: Res<State<AppState>>,
    mut next: ResMut<NextState<AppState>>,
) {
    let Some(req) = requests.read().last().copied() else {
        return;
    };
    let target = req.target();
    if *state.get() == target {
        return;
    }
    info!(target: "menu", "scene {:?} -> {:?}", state.get(), target);
    next.set(target);
}

/// Queue ran dry: advance to the next level if there is one, then show the menu.
pub fn handle_level_complete(
    mut complete: EventReader<LevelComplete>,
    repo: Res<LevelRepository>,
    mut current: ResMut<CurrentLevel>,
    mut requests: EventWriter<SceneRequest>,
) {
    if complete.read().count() == 0 {
        return;
    }
    if LevelData::has_next(repo.source(), current.0) {
        current.0 += 1;
        info!(target: "level", "level complete; next is Level_{}", current.0);
    } else {
        info!(target: "level", "level complete; no further levels");
    }
    requests.write(SceneRequest::Menu);
}

fn escape_to_menu(keys: Res<ButtonInput<KeyCode>>, mut requests: EventWriter<SceneRequest>) {
    if keys.just_pressed(KeyCode::Escape) {
        requests.write(SceneRequest::Menu);
    }
}

fn log_config_diagnostics(cfg: Res<GameConfig>, diag: Res<ConfigDiagnostics>) {
    for path in &diag.used {
        info!(target: "config", "config layer loaded: {path}");
    }
    for e in &diag.errors {
        warn!(target: "config", "config issue: {e}");
    }
    for w in cfg.validate() {
        warn!(target: "config", "config warning: {w}");
    }
}
