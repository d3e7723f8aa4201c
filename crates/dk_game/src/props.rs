//! Level furniture and the simpler actors: platforms, ladders, barrels, the
//! boss, and the hammer/blaster pickups.

use dk_core::geometry::Aabb;

use crate::collision::Transition;
use crate::config::SpriteSize;
use crate::entity::{Entity, EntityKind};
use crate::physics::GravityBody;

pub const BARREL_GRAVITY: f32 = 0.4;
pub const LADDER_GRAVITY: f32 = 0.25;
pub const DONKEY_GRAVITY: f32 = 0.4;
pub const DONKEY_MAX_HEALTH: u32 = 5;

/// Static walkable surface. Never changes after creation.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    aabb: Aabb,
}

impl Platform {
    pub fn new(x: f32, y: f32, size: SpriteSize) -> Self {
        Self {
            aabb: Aabb::new(x, y, size.width, size.height),
        }
    }
}

impl Entity for Platform {
    fn kind(&self) -> EntityKind {
        EntityKind::Platform
    }

    fn bounds(&self) -> Aabb {
        self.aabb
    }

    fn apply(&mut self, _transition: Transition) {}
}

/// Ladders settle onto platforms under gravity but otherwise never react.
#[derive(Debug, Clone)]
pub struct Ladder {
    pub body: GravityBody,
}

impl Ladder {
    pub fn new(x: f32, y: f32, size: SpriteSize) -> Self {
        Self {
            body: GravityBody::new(Aabb::new(x, y, size.width, size.height), LADDER_GRAVITY),
        }
    }

    pub fn update(&mut self, platforms: &[Platform]) {
        self.body.step(platforms);
    }
}

impl Entity for Ladder {
    fn kind(&self) -> EntityKind {
        EntityKind::Ladder
    }

    fn bounds(&self) -> Aabb {
        self.body.aabb
    }

    fn apply(&mut self, _transition: Transition) {}
}

#[derive(Debug, Clone)]
pub struct Barrel {
    pub body: GravityBody,
    destroyed: bool,
}

impl Barrel {
    pub fn new(x: f32, y: f32, size: SpriteSize) -> Self {
        Self {
            body: GravityBody::new(Aabb::new(x, y, size.width, size.height), BARREL_GRAVITY),
            destroyed: false,
        }
    }

    pub fn update(&mut self, platforms: &[Platform]) {
        if !self.destroyed {
            self.body.step(platforms);
        }
    }

    #[allow(dead_code)]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Entity for Barrel {
    fn kind(&self) -> EntityKind {
        EntityKind::Barrel
    }

    fn bounds(&self) -> Aabb {
        self.body.aabb
    }

    fn is_active(&self) -> bool {
        !self.destroyed
    }

    fn apply(&mut self, transition: Transition) {
        if transition == Transition::Deactivate && !self.destroyed {
            self.destroyed = true;
            log::debug!("Barrel smashed");
        }
    }
}

/// The boss. Falls onto its platform and loses health to bullets.
#[derive(Debug, Clone)]
pub struct Donkey {
    pub body: GravityBody,
    health: u32,
}

impl Donkey {
    pub fn new(x: f32, y: f32, size: SpriteSize) -> Self {
        Self {
            body: GravityBody::new(Aabb::new(x, y, size.width, size.height), DONKEY_GRAVITY),
            health: DONKEY_MAX_HEALTH,
        }
    }

    pub fn update(&mut self, platforms: &[Platform]) {
        self.body.step(platforms);
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

impl Entity for Donkey {
    fn kind(&self) -> EntityKind {
        EntityKind::Donkey
    }

    fn bounds(&self) -> Aabb {
        self.body.aabb
    }

    fn apply(&mut self, transition: Transition) {
        if let Transition::Damage(points) = transition {
            self.health = self.health.saturating_sub(points);
            log::debug!("Donkey hit, health {}", self.health);
            if self.health == 0 {
                log::debug!("Donkey defeated");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Hammer,
    Blaster,
}

/// A collectable item. Goes from uncollected to collected exactly once.
#[derive(Debug, Clone)]
pub struct Pickup {
    pub kind: PickupKind,
    aabb: Aabb,
    collected: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, x: f32, y: f32, size: SpriteSize) -> Self {
        Self {
            kind,
            aabb: Aabb::new(x, y, size.width, size.height),
            collected: false,
        }
    }

    #[allow(dead_code)]
    pub fn is_collected(&self) -> bool {
        self.collected
    }
}

impl Entity for Pickup {
    fn kind(&self) -> EntityKind {
        match self.kind {
            PickupKind::Hammer => EntityKind::Hammer,
            PickupKind::Blaster => EntityKind::Blaster,
        }
    }

    fn bounds(&self) -> Aabb {
        self.aabb
    }

    fn is_active(&self) -> bool {
        !self.collected
    }

    fn apply(&mut self, transition: Transition) {
        if transition == Transition::Collect && !self.collected {
            self.collected = true;
            log::debug!("{:?} collected", self.kind);
        }
    }
}
