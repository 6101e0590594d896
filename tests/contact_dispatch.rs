use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::{CollisionEvent, ContactForceEvent};
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

use birds::core::components::{Bird, BirdKind, Block, BlockKind};
use birds::core::constants::{PhysicsCategories, PhysicsCategory};
use birds::gameplay::blocks::{apply_block_impacts, BlockImpact};
use birds::physics::contact::dispatch_contacts;

fn contact_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_event::<CollisionEvent>()
        .add_event::<ContactForceEvent>()
        .add_event::<BlockImpact>()
        .add_systems(Update, (dispatch_contacts, apply_block_impacts).chain());
    app
}

fn flying_bird(app: &mut App) -> Entity {
    let mut bird = Bird::new(BirdKind::Red, Vec2::splat(64.0));
    bird.flying = true;
    app.world_mut().spawn((bird, PhysicsCategory::bird())).id()
}

fn block(app: &mut App, kind: BlockKind) -> Entity {
    app.world_mut()
        .spawn((
            Block::new(kind),
            PhysicsCategory::block(),
            Sprite::from_color(kind.color(), Vec2::splat(32.0)),
        ))
        .id()
}

/// App advancing a fixed `step` per update, already past the zero-delta first frame.
fn stepped_app(step: Duration) -> App {
    let mut app = contact_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app.update();
    app
}

fn force(app: &mut App, collider1: Entity, collider2: Entity, magnitude: f32) {
    app.world_mut().send_event(ContactForceEvent {
        collider1,
        collider2,
        total_force: Vec2::ZERO,
        total_force_magnitude: magnitude,
        max_force_direction: Vec2::ZERO,
        max_force_magnitude: magnitude,
    });
}

fn impacts(app: &App) -> Vec<BlockImpact> {
    app.world()
        .resource::<Events<BlockImpact>>()
        .iter_current_update_events()
        .copied()
        .collect()
}

#[test]
fn bird_hitting_block_grounds_bird_and_impacts_block() {
    let mut app = contact_app();
    let bird = flying_bird(&mut app);
    let wood = block(&mut app, BlockKind::Wood);

    app.world_mut()
        .send_event(CollisionEvent::Started(wood, bird, CollisionEventFlags::empty()));
    app.update();

    assert!(!app.world().get::<Bird>(bird).unwrap().flying);
    // No force event this frame: zero impulse, block untouched.
    assert_eq!(impacts(&app), vec![BlockImpact { block: wood, force: 0 }]);
    assert_eq!(app.world().get::<Block>(wood).unwrap().health, 200);
}

#[test]
fn bird_touching_edge_only_grounds() {
    let mut app = contact_app();
    let bird = flying_bird(&mut app);
    let edge = app.world_mut().spawn(PhysicsCategory::edge()).id();

    app.world_mut()
        .send_event(CollisionEvent::Started(edge, bird, CollisionEventFlags::empty()));
    app.update();

    assert!(!app.world().get::<Bird>(bird).unwrap().flying);
    assert!(impacts(&app).is_empty());
}

#[test]
fn stacked_blocks_both_take_the_hit() {
    let mut app = contact_app();
    let a = block(&mut app, BlockKind::Glass);
    let b = block(&mut app, BlockKind::Stone);

    app.world_mut()
        .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
    app.update();

    let hits = impacts(&app);
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.force == hits[0].force));
    assert!(hits.iter().any(|h| h.block == a) && hits.iter().any(|h| h.block == b));
}

#[test]
fn stopped_contacts_and_untagged_bodies_are_ignored() {
    let mut app = contact_app();
    let bird = flying_bird(&mut app);
    let stray = app.world_mut().spawn_empty().id();
    let wood = block(&mut app, BlockKind::Wood);

    app.world_mut()
        .send_event(CollisionEvent::Stopped(wood, bird, CollisionEventFlags::empty()));
    app.world_mut()
        .send_event(CollisionEvent::Started(stray, bird, CollisionEventFlags::empty()));
    app.update();

    assert!(app.world().get::<Bird>(bird).unwrap().flying);
    assert!(impacts(&app).is_empty());
}

#[test]
fn force_events_in_either_order_sum_into_bird_block_impact() {
    let step = Duration::from_millis(10);
    let mut app = stepped_app(step);
    let bird = flying_bird(&mut app);
    let wood = block(&mut app, BlockKind::Wood);

    app.world_mut()
        .send_event(CollisionEvent::Started(bird, wood, CollisionEventFlags::empty()));
    force(&mut app, wood, bird, 700.0);
    force(&mut app, bird, wood, 570.0);
    app.update();

    let expected = ((700.0f32 + 570.0) * step.as_secs_f32()) as i32;
    assert_eq!(impacts(&app), vec![BlockImpact { block: wood, force: expected }]);
}

#[test]
fn block_block_impact_uses_pair_force() {
    let step = Duration::from_millis(10);
    let mut app = stepped_app(step);
    let a = block(&mut app, BlockKind::Glass);
    let b = block(&mut app, BlockKind::Stone);
    let unrelated = block(&mut app, BlockKind::Wood);

    app.world_mut()
        .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
    force(&mut app, b, a, 2_550.0);
    // Another pair's force does not leak into this contact.
    force(&mut app, a, unrelated, 9_000.0);
    app.update();

    let expected = (2_550.0f32 * step.as_secs_f32()) as i32;
    let hits = impacts(&app);
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.force == expected));
}

#[test]
fn long_frame_is_capped_to_one_physics_step() {
    let mut app = stepped_app(Duration::from_millis(100));
    let bird = flying_bird(&mut app);
    let wood = block(&mut app, BlockKind::Wood);

    app.world_mut()
        .send_event(CollisionEvent::Started(wood, bird, CollisionEventFlags::empty()));
    force(&mut app, bird, wood, 1_000.0);
    app.update();

    let expected = (1_000.0f32 * (1.0 / 60.0)) as i32;
    assert_eq!(impacts(&app), vec![BlockImpact { block: wood, force: expected }]);
}

fn silent_block(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Block::new(BlockKind::Wood),
            PhysicsCategory {
                contact_mask: PhysicsCategories::NONE,
                ..PhysicsCategory::block()
            },
        ))
        .id()
}

#[test]
fn pair_outside_both_contact_masks_is_not_dispatched() {
    let mut app = contact_app();
    let bird = flying_bird(&mut app);
    let a = silent_block(&mut app);
    let b = silent_block(&mut app);

    app.world_mut()
        .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
    app.update();
    assert!(impacts(&app).is_empty());

    // The bird's contact mask still names blocks, so that pair is reported.
    app.world_mut()
        .send_event(CollisionEvent::Started(a, bird, CollisionEventFlags::empty()));
    app.update();
    assert_eq!(impacts(&app), vec![BlockImpact { block: a, force: 0 }]);
    assert!(!app.world().get::<Bird>(bird).unwrap().flying);
}
