//! Vertical physics shared by everything that falls: barrels, ladders, the
//! boss and the monkeys. The player has its own landing rule (see `player`).
//!
//! One step is: accumulate gravity (clamped to terminal velocity), integrate
//! `y`, then snap onto the first platform the box now overlaps. Platform order
//! is the tie-break. With no platforms the body free-falls forever; keeping it
//! on screen is not this module's job.

use dk_core::geometry::{edges_touch, Aabb};

use crate::entity::Entity;
use crate::props::Platform;

/// Fastest downward speed gravity can produce, in units per frame.
pub const TERMINAL_VELOCITY: f32 = 10.0;

#[derive(Debug, Clone, Copy)]
pub struct GravityBody {
    pub aabb: Aabb,
    pub velocity_y: f32,
    pub gravity: f32,
}

impl GravityBody {
    pub fn new(aabb: Aabb, gravity: f32) -> Self {
        Self {
            aabb,
            velocity_y: 0.0,
            gravity,
        }
    }

    /// Advance one frame. Returns the index of the platform landed on, if any.
    pub fn step(&mut self, platforms: &[Platform]) -> Option<usize> {
        self.velocity_y = (self.velocity_y + self.gravity).min(TERMINAL_VELOCITY);
        self.aabb.center_y += self.velocity_y;

        for (index, platform) in platforms.iter().enumerate() {
            let surface = platform.bounds();
            if self.aabb.intersects(&surface) {
                self.aabb.set_bottom(surface.top());
                self.velocity_y = 0.0;
                return Some(index);
            }
        }
        None
    }
}

/// The first platform `aabb` is standing on: bottom edge on the platform's top
/// edge (within [`dk_core::geometry::EDGE_EPSILON`]) with horizontal overlap.
pub fn resting_platform<'a>(aabb: &Aabb, platforms: &'a [Platform]) -> Option<&'a Platform> {
    platforms.iter().find(|platform| {
        let surface = platform.bounds();
        edges_touch(aabb.bottom(), surface.top())
            && aabb.left() < surface.right()
            && aabb.right() > surface.left()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpriteSize;

    fn platform(x: f32, y: f32) -> Platform {
        Platform::new(x, y, SpriteSize::new(200.0, 20.0))
    }

    #[test]
    fn free_fall_velocity_is_monotonic_and_clamped() {
        let mut body = GravityBody::new(Aabb::new(100.0, 0.0, 20.0, 20.0), 0.4);
        let mut last = body.velocity_y;
        for _ in 0..200 {
            assert!(body.step(&[]).is_none());
            assert!(body.velocity_y >= last);
            assert!(body.velocity_y <= TERMINAL_VELOCITY);
            last = body.velocity_y;
        }
        assert_eq!(body.velocity_y, TERMINAL_VELOCITY);
    }

    #[test]
    fn landing_snaps_bottom_to_platform_top() {
        let floor = platform(100.0, 110.0);
        let mut body = GravityBody::new(Aabb::new(100.0, 80.0, 20.0, 20.0), 0.4);
        let mut landed = None;
        for _ in 0..60 {
            landed = body.step(std::slice::from_ref(&floor));
            if landed.is_some() {
                break;
            }
        }
        assert_eq!(landed, Some(0));
        assert_eq!(body.aabb.bottom(), floor.bounds().top());
        assert_eq!(body.velocity_y, 0.0);
    }

    #[test]
    fn resting_body_stays_put() {
        let floor = platform(100.0, 110.0);
        let mut body = GravityBody::new(Aabb::new(100.0, 0.0, 20.0, 20.0), 0.4);
        body.aabb.set_bottom(floor.bounds().top());
        for _ in 0..30 {
            body.step(std::slice::from_ref(&floor));
            assert_eq!(body.aabb.bottom(), floor.bounds().top());
            assert_eq!(body.velocity_y, 0.0);
        }
    }

    #[test]
    fn first_matching_platform_wins() {
        let upper = platform(100.0, 110.0);
        let lower = platform(100.0, 112.0);
        let mut body = GravityBody::new(Aabb::new(100.0, 0.0, 20.0, 20.0), 0.4);
        body.aabb.set_bottom(lower.bounds().top() + 0.5);
        let landed = body.step(&[lower, upper]);
        assert_eq!(landed, Some(0));
        assert_eq!(body.aabb.bottom(), lower.bounds().top());
    }

    #[test]
    fn resting_platform_requires_touching_edges() {
        let floor = platform(100.0, 110.0);
        let mut aabb = Aabb::new(100.0, 0.0, 20.0, 20.0);
        aabb.set_bottom(floor.bounds().top());
        assert!(resting_platform(&aabb, std::slice::from_ref(&floor)).is_some());

        aabb.set_bottom(floor.bounds().top() - 1.0);
        assert!(resting_platform(&aabb, std::slice::from_ref(&floor)).is_none());
    }
}
