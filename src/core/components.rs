use bevy::prelude::*;

/// Bird variants a level can queue. Identifiers match the level table strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BirdKind {
    Red,
    Blue,
    Yellow,
}

impl BirdKind {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "red" => Some(Self::Red),
            "blue" => Some(Self::Blue),
            "yellow" => Some(Self::Yellow),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Red => Color::srgb(0.85, 0.15, 0.12),
            Self::Blue => Color::srgb(0.2, 0.45, 0.9),
            Self::Yellow => Color::srgb(0.95, 0.8, 0.15),
        }
    }
}

/// The bird currently owned by the round (at most one exists at a time).
#[derive(Component, Debug, Clone)]
pub struct Bird {
    pub kind: BirdKind,
    pub size: Vec2,
    /// Held by the pointer.
    pub grabbed: bool,
    /// Launched and not yet touched anything. Cleared by contacts.
    pub flying: bool,
    /// False once launched; the pointer can no longer pick it up.
    pub interactive: bool,
    /// Consecutive post-contact frames spent under the rest thresholds.
    pub calm_frames: u32,
}

impl Bird {
    pub fn new(kind: BirdKind, size: Vec2) -> Self {
        Self {
            kind,
            size,
            grabbed: false,
            flying: false,
            interactive: true,
            calm_frames: 0,
        }
    }

    /// Axis-aligned hit test around the bird's current center.
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let d = (point - center).abs();
        d.x <= self.size.x * 0.5 && d.y <= self.size.y * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Wood,
    Stone,
    Glass,
}

impl BlockKind {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "wood" => Some(Self::Wood),
            "stone" => Some(Self::Stone),
            "glass" => Some(Self::Glass),
            _ => None,
        }
    }

    pub fn health(self) -> i32 {
        match self {
            Self::Wood => 200,
            Self::Stone => 500,
            Self::Glass => 50,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Wood => Color::srgb(0.62, 0.42, 0.22),
            Self::Stone => Color::srgb(0.55, 0.56, 0.6),
            Self::Glass => Color::srgba(0.65, 0.85, 0.95, 0.8),
        }
    }

    /// Sprite tint once the block is below its damage threshold.
    pub fn damaged_color(self) -> Color {
        match self {
            Self::Wood => Color::srgb(0.4, 0.26, 0.12),
            Self::Stone => Color::srgb(0.35, 0.35, 0.38),
            Self::Glass => Color::srgba(0.5, 0.65, 0.75, 0.6),
        }
    }
}

/// What an impact did to a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCondition {
    Intact,
    Damaged,
    Destroyed,
}

#[derive(Component, Debug, Clone)]
pub struct Block {
    pub kind: BlockKind,
    pub health: i32,
    pub damage_threshold: i32,
    pub condition: BlockCondition,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        let health = kind.health();
        Self {
            kind,
            health,
            damage_threshold: health / 2,
            condition: BlockCondition::Intact,
        }
    }

    /// Apply a collision of `force` and return the resulting condition.
    /// A destroyed block ignores further impacts.
    pub fn impact(&mut self, force: i32) -> BlockCondition {
        if self.condition == BlockCondition::Destroyed {
            return self.condition;
        }
        self.health -= force;
        self.condition = if self.health < 1 {
            BlockCondition::Destroyed
        } else if self.health < self.damage_threshold {
            BlockCondition::Damaged
        } else {
            self.condition
        };
        self.condition
    }
}

/// Sling origin marker.
#[derive(Component)]
pub struct Anchor;

/// Everything spawned for a level; despawned when gameplay ends.
#[derive(Component)]
pub struct LevelEntity;
