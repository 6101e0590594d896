use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Block, BlockCondition, BlockKind, LevelEntity};
use crate::core::constants::{PhysicsCategory, ZLayer};
use crate::core::level::BlockPlacement;

/// Collision damage delivered to one block.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockImpact {
    pub block: Entity,
    pub force: i32,
}

/// Dynamic block body built from a level placement. `None` for unknown kinds.
pub fn block_bundle(placement: &BlockPlacement) -> Option<impl Bundle> {
    let Some(kind) = BlockKind::from_id(&placement.kind) else {
        warn!(target: "level", "unknown block type '{}' skipped", placement.kind);
        return None;
    };
    let size: Vec2 = placement.size.into();
    let pos: Vec2 = placement.position.into();
    let category = PhysicsCategory::block();
    Some((
        Name::new(format!("Block:{}", placement.kind)),
        Block::new(kind),
        LevelEntity,
        category,
        Sprite::from_color(kind.color(), size),
        Transform::from_translation(pos.extend(ZLayer::OBSTACLES))
            .with_rotation(Quat::from_rotation_z(placement.rotation)),
        RigidBody::Dynamic,
        Collider::cuboid(size.x * 0.5, size.y * 0.5),
        category.collision_groups(),
        category.active_events(),
        Velocity::zero(),
    ))
}

pub fn apply_block_impacts(
    mut commands: Commands,
    mut impacts: EventReader<BlockImpact>,
    mut blocks: Query<(&mut Block, &mut Sprite)>,
) {
    for ev in impacts.read() {
        let Ok((mut block, mut sprite)) = blocks.get_mut(ev.block) else {
            continue;
        };
        let before = block.condition;
        if before == BlockCondition::Destroyed {
            continue;
        }
        match block.impact(ev.force) {
            BlockCondition::Destroyed => {
                debug!(target: "contact", "{:?} block destroyed", block.kind);
                commands.entity(ev.block).despawn();
            }
            BlockCondition::Damaged if before != BlockCondition::Damaged => {
                sprite.color = block.kind.damaged_color();
            }
            _ => {}
        }
    }
}
