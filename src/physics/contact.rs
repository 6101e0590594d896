//! Contact begin dispatch.
//!
//! Every collision start is reduced to a sorted category pair and resolved into
//! a small list of [`ContactEffect`]s. [`dispatch_contacts`] feeds rapier's
//! events through [`resolve_contact`] and applies the effects.
use std::collections::HashMap;

use bevy::prelude::*;
use bevy_rapier2d::prelude::{CollisionEvent, ContactForceEvent};
use smallvec::SmallVec;

use crate::core::components::Bird;
use crate::core::constants::{PhysicsCategories, PhysicsCategory};
use crate::gameplay::blocks::BlockImpact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    BirdBlock,
    BlockEdge,
    BlockBlock,
    BirdEdge,
    Other,
}

/// Category pair to reaction, independent of body order.
pub fn classify(a: u32, b: u32) -> ContactKind {
    const BIRD: u32 = PhysicsCategories::BIRD;
    const BLOCK: u32 = PhysicsCategories::BLOCK;
    const EDGE: u32 = PhysicsCategories::EDGE;
    match (a.min(b), a.max(b)) {
        (EDGE, BIRD) => ContactKind::BirdEdge,
        (EDGE, BLOCK) => ContactKind::BlockEdge,
        (BIRD, BLOCK) => ContactKind::BirdBlock,
        (BLOCK, BLOCK) => ContactKind::BlockBlock,
        _ => ContactKind::Other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactBody {
    pub entity: Entity,
    pub category: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: ContactBody,
    pub b: ContactBody,
    pub impulse: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEffect {
    Impact { block: Entity, force: i32 },
    Grounded { bird: Entity },
}

pub fn resolve_contact(contact: &Contact) -> SmallVec<[ContactEffect; 2]> {
    let mut out = SmallVec::new();
    let force = contact.impulse as i32;
    let pick = |category: u32, first: &ContactBody, second: &ContactBody| {
        if first.category == category {
            Some(first.entity)
        } else if second.category == category {
            Some(second.entity)
        } else {
            None
        }
    };
    let block = pick(PhysicsCategories::BLOCK, &contact.b, &contact.a);
    let bird = pick(PhysicsCategories::BIRD, &contact.a, &contact.b);

    match classify(contact.a.category, contact.b.category) {
        ContactKind::BirdBlock | ContactKind::BlockEdge => {
            if let Some(block) = block {
                out.push(ContactEffect::Impact { block, force });
            }
            if let Some(bird) = bird {
                out.push(ContactEffect::Grounded { bird });
            }
        }
        ContactKind::BlockBlock => {
            out.push(ContactEffect::Impact {
                block: contact.a.entity,
                force,
            });
            out.push(ContactEffect::Impact {
                block: contact.b.entity,
                force,
            });
        }
        ContactKind::BirdEdge => {
            if let Some(bird) = bird {
                out.push(ContactEffect::Grounded { bird });
            }
        }
        ContactKind::Other => {}
    }
    out
}

fn pair_key(a: Entity, b: Entity) -> (Entity, Entity) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Upper bound of one physics step.
const MAX_STEP_SECS: f32 = 1.0 / 60.0;

pub fn dispatch_contacts(
    mut collisions: EventReader<CollisionEvent>,
    mut forces: EventReader<ContactForceEvent>,
    time: Res<Time>,
    categories: Query<&PhysicsCategory>,
    mut birds: Query<&mut Bird>,
    mut impacts: EventWriter<BlockImpact>,
) {
    let step = time.delta_secs().min(MAX_STEP_SECS);
    let mut magnitudes: HashMap<(Entity, Entity), f32> = HashMap::new();
    for ev in forces.read() {
        *magnitudes
            .entry(pair_key(ev.collider1, ev.collider2))
            .or_default() += ev.total_force_magnitude;
    }

    for ev in collisions.read() {
        let &CollisionEvent::Started(e1, e2, _) = ev else {
            continue;
        };
        let (Ok(c1), Ok(c2)) = (categories.get(e1), categories.get(e2)) else {
            continue;
        };
        if !c1.reports_contact_with(c2) {
            continue;
        }
        let impulse = magnitudes
            .get(&pair_key(e1, e2))
            .map_or(0.0, |m| m * step);
        let contact = Contact {
            a: ContactBody {
                entity: e1,
                category: c1.category,
            },
            b: ContactBody {
                entity: e2,
                category: c2.category,
            },
            impulse,
        };
        for effect in resolve_contact(&contact) {
            match effect {
                ContactEffect::Impact { block, force } => {
                    trace!(target: "contact", "impact {:?} force={}", block, force);
                    impacts.write(BlockImpact { block, force });
                }
                ContactEffect::Grounded { bird } => {
                    if let Ok(mut b) = birds.get_mut(bird) {
                        if b.flying {
                            debug!(target: "contact", "{:?} bird grounded", b.kind);
                        }
                        b.flying = false;
                    }
                }
            }
        }
    }
}
