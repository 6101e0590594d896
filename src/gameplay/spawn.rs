use std::collections::VecDeque;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Bird, BirdKind, LevelEntity};
use crate::core::config::GameConfig;
use crate::core::constants::{PhysicsCategory, ZLayer};
use crate::gameplay::level::LevelMap;
use crate::gameplay::round::Round;
use crate::physics::sling::SlingConstraint;

/// Birds still to launch this level, front first.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct BirdQueue(pub VecDeque<BirdKind>);

impl BirdQueue {
    /// Unknown identifiers are skipped with a warning.
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Self {
        let mut q = VecDeque::with_capacity(ids.len());
        for id in ids {
            match BirdKind::from_id(id.as_ref()) {
                Some(kind) => q.push_back(kind),
                None => warn!(target: "level", "unknown bird type '{}' skipped", id.as_ref()),
            }
        }
        Self(q)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// World position of the sling for the current level.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct AnchorPoint(pub Vec2);

/// Request to place the next queued bird at the anchor.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SpawnNextBird;

/// The queue ran dry when a bird was requested.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelComplete;

pub fn spawn_next_bird(
    mut commands: Commands,
    mut requests: EventReader<SpawnNextBird>,
    mut queue: ResMut<BirdQueue>,
    mut round: ResMut<Round>,
    mut complete: EventWriter<LevelComplete>,
    anchor: Res<AnchorPoint>,
    map: Res<LevelMap>,
    cfg: Res<GameConfig>,
) {
    for _ in requests.read() {
        let Some(kind) = queue.0.pop_front() else {
            info!(target: "level", "bird queue empty; level complete");
            complete.write(LevelComplete);
            continue;
        };
        let side = map.tile_size.y * cfg.sling.bird_tile_fraction;
        let size = Vec2::splat(side);
        let category = PhysicsCategory::bird();
        commands.spawn((
            Name::new(format!("Bird:{}", kind.id())),
            Bird::new(kind, size),
            LevelEntity,
            category,
            Sprite::from_color(kind.color(), size),
            Transform::from_translation(anchor.0.extend(ZLayer::BIRDS)),
            // Held in place until launch switches it to Dynamic.
            RigidBody::KinematicPositionBased,
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
            category.collision_groups(),
            category.active_events(),
            Velocity::zero(),
            Sleeping::default(),
            SlingConstraint::for_bird(anchor.0, size.x, cfg.sling.range_multiplier),
        ));
        round.bird_spawned();
        info!(target: "level", "spawned {:?} bird ({} left)", kind, queue.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_skips_unknown_ids() {
        let q = BirdQueue::from_ids(&["red", "purple", "yellow"]);
        assert_eq!(q.0, VecDeque::from([BirdKind::Red, BirdKind::Yellow]));
    }
}
