use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::app::state::{CurrentLevel, SceneRequest};
use crate::core::components::{Anchor, LevelEntity};
use crate::core::constants::{PhysicsCategory, ZLayer};
use crate::core::level::{LevelData, LevelRepository, MapSpec};
use crate::gameplay::blocks::block_bundle;
use crate::gameplay::round::Round;
use crate::gameplay::spawn::{AnchorPoint, BirdQueue, SpawnNextBird};
use crate::rendering::camera::camera::{CameraReturn, GameCamera, PanEnabled};

const EDGE_THICKNESS: f32 = 40.0;

/// Geometry of the loaded level.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LevelMap {
    pub index: u32,
    pub bounds: Rect,
    pub tile_size: Vec2,
}

impl Default for LevelMap {
    fn default() -> Self {
        let spec = MapSpec::default();
        Self {
            index: 0,
            bounds: spec.bounds(),
            tile_size: spec.tile_size(),
        }
    }
}

/// Playable physics area: the whole map minus the bottom tile row.
pub fn physics_rect(map: &MapSpec) -> Rect {
    let size = map.size();
    Rect::new(0.0, map.tile_size().y, size.x, size.y)
}

/// Four fixed walls hugging `rect` from the outside, as (center, half extents).
pub fn edge_walls(rect: Rect, thickness: f32) -> [(Vec2, Vec2); 4] {
    let c = rect.center();
    let half = rect.half_size();
    let t = thickness * 0.5;
    [
        (Vec2::new(c.x, rect.min.y - t), Vec2::new(half.x + thickness, t)),
        (Vec2::new(c.x, rect.max.y + t), Vec2::new(half.x + thickness, t)),
        (Vec2::new(rect.min.x - t, c.y), Vec2::new(t, half.y)),
        (Vec2::new(rect.max.x + t, c.y), Vec2::new(t, half.y)),
    ]
}

/// Builds the world for `CurrentLevel` and queues its birds.
/// A missing level sends the player back to the menu.
pub fn setup_level(
    mut commands: Commands,
    repo: Res<LevelRepository>,
    current: Res<CurrentLevel>,
    mut requests: EventWriter<SceneRequest>,
    mut spawn: EventWriter<SpawnNextBird>,
    mut cameras: Query<(Entity, &mut Transform, &mut GameCamera)>,
) {
    let Some(data) = LevelData::load(repo.source(), current.0) else {
        error!(target: "level", "Level_{} missing or has no bird list", current.0);
        requests.write(SceneRequest::Menu);
        return;
    };
    let bounds = data.map.bounds();
    let tile = data.map.tile_size();
    let anchor = data.map.anchor();

    commands.spawn((
        Name::new("Background"),
        LevelEntity,
        Sprite::from_color(Color::srgb(0.55, 0.78, 0.95), bounds.size()),
        Transform::from_translation(bounds.center().extend(ZLayer::BACKGROUND)),
    ));
    commands.spawn((
        Name::new("Ground"),
        LevelEntity,
        Sprite::from_color(Color::srgb(0.36, 0.58, 0.24), Vec2::new(bounds.width(), tile.y)),
        Transform::from_translation(Vec3::new(bounds.center().x, tile.y * 0.5, ZLayer::OBSTACLES)),
    ));

    let edge = PhysicsCategory::edge();
    for (i, (center, half)) in edge_walls(physics_rect(&data.map), EDGE_THICKNESS)
        .into_iter()
        .enumerate()
    {
        commands.spawn((
            Name::new(format!("Edge{i}")),
            LevelEntity,
            edge,
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(half.x, half.y),
            edge.collision_groups(),
            edge.active_events(),
        ));
    }

    let mut blocks = 0usize;
    for placement in &data.blocks {
        if let Some(bundle) = block_bundle(placement) {
            commands.spawn(bundle);
            blocks += 1;
        }
    }

    commands.spawn((
        Name::new("Anchor"),
        Anchor,
        LevelEntity,
        Sprite::from_color(Color::srgb(0.35, 0.22, 0.1), Vec2::new(tile.x * 0.25, (anchor.y - tile.y).max(1.0))),
        Transform::from_translation(Vec3::new(anchor.x, (anchor.y + tile.y) * 0.5, ZLayer::OBSTACLES)),
    ));

    if let Ok((cam_entity, mut tf, mut cam)) = cameras.single_mut() {
        cam.set_constraints(bounds, None);
        tf.scale = Vec3::ONE;
        commands.entity(cam_entity).remove::<CameraReturn>();
    }

    info!(
        target: "level",
        "Level_{} loaded: birds={} blocks={} map={}x{}",
        data.index,
        data.birds.len(),
        blocks,
        bounds.width(),
        bounds.height()
    );

    commands.insert_resource(LevelMap {
        index: data.index,
        bounds,
        tile_size: tile,
    });
    commands.insert_resource(AnchorPoint(anchor));
    commands.insert_resource(BirdQueue::from_ids(&data.birds));
    commands.insert_resource(Round::default());
    commands.insert_resource(PanEnabled(true));
    spawn.write(SpawnNextBird);
}

pub fn teardown_level(mut commands: Commands, q: Query<Entity, With<LevelEntity>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
