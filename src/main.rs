use std::path::PathBuf;

use anyhow::{anyhow, Result};
use bevy::prelude::*;
use clap::Parser;

use birds::interaction::session::config_hot_reload::ConfigReloadSettings;
use birds::{ConfigDiagnostics, CurrentLevel, GameConfig, GamePlugin, LevelRepository, LevelTable};

#[derive(Parser, Debug)]
#[command(name = "birds", about = "Slingshot physics game")]
struct Args {
    /// Level index to start at (overrides config).
    #[arg(long)]
    level: Option<u32>,
    /// Base config file; `game.local.ron` next to it is layered on top.
    #[arg(long, default_value = "assets/config/game.ron")]
    config: PathBuf,
}

fn main() -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let args = Args::parse();
    let local = args.config.with_file_name("game.local.ron");
    let layers = if local.exists() {
        vec![args.config.clone(), local]
    } else {
        vec![args.config.clone()]
    };
    let (cfg, used, errors) = GameConfig::load_layered(&layers);
    let levels = LevelTable::load_configured(&cfg.level).map_err(|e| anyhow!(e))?;
    let start = args.level.unwrap_or(cfg.level.start_index);

    App::new()
        .insert_resource(cfg.clone())
        .insert_resource(ConfigDiagnostics { used, errors })
        .insert_resource(ConfigReloadSettings {
            paths: layers,
            ..default()
        })
        .insert_resource(LevelRepository::new(levels))
        .insert_resource(CurrentLevel(start))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .run();
    Ok(())
}
