//! Straight-line projectiles: bananas thrown by intelligent monkeys and
//! bullets fired from the player's blaster.
//!
//! Both travel horizontally at a fixed speed and switch off for good once they
//! have covered their range or hit something the collision table says stops
//! them. An inactive projectile never moves again.

use dk_core::geometry::Aabb;

use crate::collision::Transition;
use crate::config::SpriteSize;
use crate::entity::{Entity, EntityKind, Facing};

pub const BANANA_SPEED: f32 = 1.8;
pub const BULLET_SPEED: f32 = 3.0;
pub const MAX_TRAVEL: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    Banana,
    Bullet,
}

impl ProjectileKind {
    pub fn speed(self) -> f32 {
        match self {
            ProjectileKind::Banana => BANANA_SPEED,
            ProjectileKind::Bullet => BULLET_SPEED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub heading: Facing,
    aabb: Aabb,
    travelled: f32,
    active: bool,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, x: f32, y: f32, heading: Facing, size: SpriteSize) -> Self {
        Self {
            kind,
            heading,
            aabb: Aabb::new(x, y, size.width, size.height),
            travelled: 0.0,
            active: true,
        }
    }

    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        let speed = self.kind.speed();
        self.aabb.center_x += self.heading.sign() * speed;
        self.travelled += speed;
        if self.travelled >= MAX_TRAVEL {
            self.active = false;
        }
    }

    #[allow(dead_code)]
    pub fn travelled(&self) -> f32 {
        self.travelled
    }
}

impl Entity for Projectile {
    fn kind(&self) -> EntityKind {
        match self.kind {
            ProjectileKind::Banana => EntityKind::Banana,
            ProjectileKind::Bullet => EntityKind::Bullet,
        }
    }

    fn bounds(&self) -> Aabb {
        self.aabb
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn apply(&mut self, transition: Transition) {
        if transition == Transition::Deactivate && self.active {
            self.active = false;
            log::debug!("{:?} stopped after {:.1} units", self.kind, self.travelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet(heading: Facing) -> Projectile {
        Projectile::new(
            ProjectileKind::Bullet,
            400.0,
            100.0,
            heading,
            SpriteSize::new(16.0, 8.0),
        )
    }

    #[test]
    fn bullet_expires_after_exactly_one_hundred_steps() {
        let mut shot = bullet(Facing::Right);
        for _ in 0..99 {
            shot.update();
        }
        assert!(shot.is_active());
        shot.update();
        assert!(!shot.is_active());
        assert_eq!(shot.travelled(), MAX_TRAVEL);
        assert_eq!(shot.bounds().center_x, 700.0);

        shot.update();
        assert_eq!(shot.bounds().center_x, 700.0);
    }

    #[test]
    fn banana_travels_toward_heading() {
        let mut banana = Projectile::new(
            ProjectileKind::Banana,
            400.0,
            100.0,
            Facing::Left,
            SpriteSize::new(20.0, 16.0),
        );
        banana.update();
        assert!((banana.bounds().center_x - (400.0 - BANANA_SPEED)).abs() < 1e-4);
        assert_eq!(banana.kind(), EntityKind::Banana);
    }

    #[test]
    fn deactivation_is_permanent() {
        let mut shot = bullet(Facing::Left);
        shot.apply(Transition::Deactivate);
        assert!(!shot.is_active());
        let x = shot.bounds().center_x;
        shot.update();
        assert_eq!(shot.bounds().center_x, x);
        shot.apply(Transition::Unchanged);
        assert!(!shot.is_active());
    }
}
