//! Monkey patrol AI.
//!
//! A monkey walks back and forth along a route: an ordered list of segment
//! lengths. After covering the current segment it turns around and moves on to
//! the next one, wrapping to the first after the last. It also turns around
//! early when it reaches the screen edge or the edge of the platform it is
//! standing on; an early turn restarts the current segment.
//!
//! Edges are tested against the side of the box facing the direction of
//! travel, and only while heading toward that edge. A monkey that has already
//! crossed an edge and is walking back keeps going instead of turning again
//! every frame.
//!
//! Gravity runs before the lateral step every frame. The intelligent variant
//! also throws a banana on a fixed timer.

use dk_core::geometry::Aabb;
use dk_core::time::seconds_to_frames;

use crate::collision::Transition;
use crate::config::SpriteSize;
use crate::entity::{Entity, EntityKind, Facing, SimContext};
use crate::physics::{resting_platform, GravityBody};
use crate::projectile::{Projectile, ProjectileKind};
use crate::props::Platform;

pub const MONKEY_GRAVITY: f32 = 0.4;
pub const MONKEY_SPEED: f32 = 0.5;
pub const SHOOT_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolBehavior {
    Normal,
    /// `cooldown` counts frames since the last banana.
    Intelligent { cooldown: u64 },
}

impl PatrolBehavior {
    pub fn intelligent() -> Self {
        PatrolBehavior::Intelligent { cooldown: 0 }
    }
}

#[derive(Debug, Clone)]
pub struct Monkey {
    pub body: GravityBody,
    pub facing: Facing,
    pub behavior: PatrolBehavior,
    route: Vec<u32>,
    route_index: usize,
    distance: f32,
    alive: bool,
}

impl Monkey {
    pub fn new(
        x: f32,
        y: f32,
        facing: Facing,
        route: Vec<u32>,
        behavior: PatrolBehavior,
        size: SpriteSize,
    ) -> Self {
        Self {
            body: GravityBody::new(Aabb::new(x, y, size.width, size.height), MONKEY_GRAVITY),
            facing,
            behavior,
            route,
            route_index: 0,
            distance: 0.0,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[allow(dead_code)]
    pub fn route_index(&self) -> usize {
        self.route_index
    }

    #[allow(dead_code)]
    pub fn distance_travelled(&self) -> f32 {
        self.distance
    }

    /// Advance one frame. Returns true when an intelligent monkey wants to
    /// throw a banana this frame.
    pub fn update(&mut self, ctx: &SimContext, platforms: &[Platform]) -> bool {
        if !self.alive {
            return false;
        }
        self.body.step(platforms);
        self.patrol(ctx, platforms);
        self.tick_shooter()
    }

    pub fn throw_banana(&self, size: SpriteSize) -> Projectile {
        let center = self.body.aabb.center();
        Projectile::new(ProjectileKind::Banana, center.x, center.y, self.facing, size)
    }

    fn patrol(&mut self, ctx: &SimContext, platforms: &[Platform]) {
        if self.route.is_empty() {
            return;
        }

        let aabb = self.body.aabb;
        let heading_left = self.facing == Facing::Left;

        // Edge checks only fire when moving toward the edge, otherwise a
        // monkey that overshot would flip back and forth in place.
        let at_screen_edge = (heading_left && aabb.left() <= 0.0)
            || (!heading_left && aabb.right() >= ctx.screen_width);
        if at_screen_edge {
            self.reverse();
            return;
        }

        if let Some(platform) = resting_platform(&aabb, platforms) {
            let surface = platform.bounds();
            let at_platform_edge = (heading_left && aabb.left() <= surface.left())
                || (!heading_left && aabb.right() >= surface.right());
            if at_platform_edge {
                self.reverse();
                return;
            }
        }

        self.body.aabb.center_x += self.facing.sign() * MONKEY_SPEED;
        self.distance += MONKEY_SPEED;
        if self.distance >= self.route[self.route_index] as f32 {
            self.distance = 0.0;
            self.route_index = (self.route_index + 1) % self.route.len();
            self.facing = self.facing.flipped();
        }
    }

    fn reverse(&mut self) {
        self.facing = self.facing.flipped();
        self.distance = 0.0;
        self.body.aabb.center_x += self.facing.sign() * MONKEY_SPEED;
    }

    fn tick_shooter(&mut self) -> bool {
        match &mut self.behavior {
            PatrolBehavior::Normal => false,
            PatrolBehavior::Intelligent { cooldown } => {
                *cooldown += 1;
                if *cooldown >= seconds_to_frames(SHOOT_INTERVAL_SECS) {
                    *cooldown = 0;
                    true
                } else {
                    false
                }
            }
        }
    }
}

impl Entity for Monkey {
    fn kind(&self) -> EntityKind {
        EntityKind::Monkey
    }

    fn bounds(&self) -> Aabb {
        self.body.aabb
    }

    fn is_active(&self) -> bool {
        self.alive
    }

    fn apply(&mut self, transition: Transition) {
        if transition == Transition::Deactivate && self.alive {
            self.alive = false;
            log::debug!("Monkey defeated");
        }
    }
}
