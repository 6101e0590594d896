//! Shared constants: draw order layers, physics categories and level table keys.
use bevy::prelude::*;
use bevy_rapier2d::prelude::{ActiveEvents, CollisionGroups, Group};

/// Z translation per draw layer.
pub struct ZLayer;
impl ZLayer {
    pub const BACKGROUND: f32 = 0.0;
    pub const OBSTACLES: f32 = 1.0;
    /// Birds sit just above obstacles so a grabbed bird is never hidden behind a block.
    pub const BIRDS: f32 = 2.0;
    pub const HUD_BACKGROUND: f32 = 10.0;
    pub const HUD_LABEL: f32 = 11.0;
}

/// Collision category bits. `NONE` and `ALL` are sentinels, the rest are single distinct bits.
pub struct PhysicsCategories;
impl PhysicsCategories {
    pub const NONE: u32 = 0;
    pub const ALL: u32 = u32::MAX;
    pub const EDGE: u32 = 0x1;
    pub const BIRD: u32 = 0x1 << 1;
    pub const BLOCK: u32 = 0x1 << 2;
}

/// Category tag carried by every collidable game entity (same entity as its collider).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsCategory {
    /// Bit identifying this body.
    pub category: u32,
    /// Bodies this one physically collides with.
    pub collision_mask: u32,
    /// Bodies this one reports contacts with.
    pub contact_mask: u32,
}

impl PhysicsCategory {
    pub const fn edge() -> Self {
        Self {
            category: PhysicsCategories::EDGE,
            collision_mask: PhysicsCategories::ALL,
            contact_mask: PhysicsCategories::BIRD | PhysicsCategories::BLOCK,
        }
    }

    pub const fn bird() -> Self {
        Self {
            category: PhysicsCategories::BIRD,
            collision_mask: PhysicsCategories::BLOCK | PhysicsCategories::EDGE,
            contact_mask: PhysicsCategories::ALL,
        }
    }

    pub const fn block() -> Self {
        Self {
            category: PhysicsCategories::BLOCK,
            collision_mask: PhysicsCategories::ALL,
            contact_mask: PhysicsCategories::ALL,
        }
    }

    /// Rapier filter equivalent. Rapier only pairs two colliders when each one's
    /// membership passes the other's filter, so the bird's narrower mask wins.
    pub fn collision_groups(&self) -> CollisionGroups {
        CollisionGroups::new(
            Group::from_bits_truncate(self.category),
            Group::from_bits_truncate(self.collision_mask),
        )
    }

    /// Whether a contact between the two bodies is reported. Either side's
    /// contact mask naming the other is enough.
    pub fn reports_contact_with(&self, other: &PhysicsCategory) -> bool {
        self.contact_mask & other.category != PhysicsCategories::NONE
            || other.contact_mask & self.category != PhysicsCategories::NONE
    }

    /// Rapier event flags for this body. A body that reports nothing raises no events.
    pub fn active_events(&self) -> ActiveEvents {
        if self.contact_mask == PhysicsCategories::NONE {
            ActiveEvents::empty()
        } else {
            ActiveEvents::COLLISION_EVENTS | ActiveEvents::CONTACT_FORCE_EVENTS
        }
    }
}

/// Level table key for a level index (`Level_<n>`).
pub fn level_key(index: u32) -> String {
    format!("Level_{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_distinct_single_bits() {
        let bits = [
            PhysicsCategories::EDGE,
            PhysicsCategories::BIRD,
            PhysicsCategories::BLOCK,
        ];
        for (i, a) in bits.iter().enumerate() {
            assert_eq!(a.count_ones(), 1);
            for b in bits.iter().skip(i + 1) {
                assert_eq!(a & b, PhysicsCategories::NONE);
            }
        }
    }

    #[test]
    fn level_key_format() {
        assert_eq!(level_key(3), "Level_3");
    }

    #[test]
    fn bird_does_not_collide_with_bird() {
        let g = PhysicsCategory::bird().collision_groups();
        assert!(!g.filters.contains(Group::from_bits_truncate(PhysicsCategories::BIRD)));
        assert!(g.filters.contains(Group::from_bits_truncate(PhysicsCategories::BLOCK)));
    }

    #[test]
    fn edges_report_only_moving_bodies() {
        let edge = PhysicsCategory::edge();
        assert!(!edge.reports_contact_with(&PhysicsCategory::edge()));
        assert!(edge.reports_contact_with(&PhysicsCategory::bird()));
        assert!(PhysicsCategory::block().reports_contact_with(&edge));
    }

    #[test]
    fn silent_body_raises_no_events() {
        let silent = PhysicsCategory {
            contact_mask: PhysicsCategories::NONE,
            ..PhysicsCategory::block()
        };
        assert_eq!(silent.active_events(), ActiveEvents::empty());
        assert!(!silent.reports_contact_with(&PhysicsCategory::edge()));
        assert!(PhysicsCategory::bird()
            .active_events()
            .contains(ActiveEvents::CONTACT_FORCE_EVENTS));
    }
}
