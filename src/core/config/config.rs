use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Birds".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: Vec2,
    pub pixels_per_meter: f32,
    /// Multiplier turning the sling pull vector (world units) into a rapier impulse.
    pub impulse_scale: f32,
    /// Below both thresholds (or asleep) a body counts as resting.
    pub rest_linear_speed: f32,
    pub rest_angular_speed: f32,
    /// Frames both speeds must stay under the thresholds (sleep counts at once).
    pub rest_frames: u32,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -980.0),
            pixels_per_meter: 100.0,
            impulse_scale: 2.5,
            rest_linear_speed: 4.0,
            rest_angular_speed: 0.1,
            rest_frames: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SlingConfig {
    /// Max pull distance as a multiple of the bird width.
    pub range_multiplier: f32,
    /// Bird height as a fraction of the tile height.
    pub bird_tile_fraction: f32,
}
impl Default for SlingConfig {
    fn default() -> Self {
        Self {
            range_multiplier: 3.0,
            bird_tile_fraction: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Seconds for the camera to glide back after a bird settles.
    pub return_duration: f32,
    pub min_zoom: f32,
    /// Pinch scale delta applied per mouse wheel line.
    pub wheel_zoom_step: f32,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            return_duration: 2.0,
            min_zoom: 0.5,
            wheel_zoom_step: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LevelConfig {
    pub table_path: String,
    pub start_index: u32,
}
impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            table_path: "assets/levels/levels.ron".into(),
            start_index: 1,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub sling: SlingConfig,
    pub camera: CameraConfig,
    pub level: LevelConfig,
    pub rapier_debug: bool,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            physics: Default::default(),
            sling: Default::default(),
            camera: Default::default(),
            level: Default::default(),
            rapier_debug: false,
        }
    }
}

impl GameConfig {
    /// Merge RON files in order (later maps override earlier keys, recursively).
    /// Missing or broken layers are reported, never fatal.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            },
            None => (GameConfig::default(), used, errors),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.physics.gravity.y > 0.0 {
            w.push(format!(
                "physics.gravity.y is positive ({}); birds will fall upward",
                self.physics.gravity.y
            ));
        }
        if self.physics.pixels_per_meter <= 0.0 {
            w.push("physics.pixels_per_meter must be > 0".into());
        }
        if self.physics.impulse_scale <= 0.0 {
            w.push(format!(
                "physics.impulse_scale {} must be > 0 or launches do nothing",
                self.physics.impulse_scale
            ));
        }
        if self.physics.rest_linear_speed < 0.0 || self.physics.rest_angular_speed < 0.0 {
            w.push("physics rest thresholds must be >= 0".into());
        }
        if self.sling.range_multiplier <= 0.0 {
            w.push("sling.range_multiplier must be > 0".into());
        }
        if !(0.05..=4.0).contains(&self.sling.bird_tile_fraction) {
            w.push(format!(
                "sling.bird_tile_fraction {} outside 0.05..4",
                self.sling.bird_tile_fraction
            ));
        }
        if self.camera.return_duration < 0.0 {
            w.push("camera.return_duration negative -> treated as instant".into());
        }
        if self.camera.min_zoom <= 0.0 {
            w.push("camera.min_zoom must be > 0".into());
        }
        if self.level.start_index == 0 {
            w.push("level.start_index is 0; level tables start at Level_1".into());
        }
        w
    }
}
