//! Draw-call boundary between the simulation and whatever displays it.
//!
//! The level emits one [`SpriteQuad`] per visible entity per frame into a
//! [`RenderSink`]. The headless runner uses [`LogSink`], which only traces the
//! calls and keeps per-frame counts.

use std::collections::HashMap;

use dk_core::geometry::Aabb;
use glam::Vec2;

use crate::entity::{Equipment, Facing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Platform,
    Ladder,
    Barrel,
    Donkey,
    Hammer,
    Blaster,
    Monkey(Facing),
    Banana(Facing),
    Bullet(Facing),
    Mario { equipment: Equipment, facing: Facing },
}

/// One sprite, centred at `center` and stretched to `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteQuad {
    pub sprite: SpriteId,
    pub center: Vec2,
    pub size: Vec2,
}

impl SpriteQuad {
    pub fn from_bounds(sprite: SpriteId, bounds: Aabb) -> Self {
        Self {
            sprite,
            center: bounds.center(),
            size: Vec2::new(bounds.width(), bounds.height()),
        }
    }
}

pub trait RenderSink {
    fn begin_frame(&mut self) {}

    fn draw(&mut self, quad: &SpriteQuad);

    fn end_frame(&mut self) {}
}

/// Collects quads in submission order. Useful when the caller wants to inspect
/// a frame after the fact.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct DrawList {
    pub quads: Vec<SpriteQuad>,
}

impl RenderSink for DrawList {
    fn begin_frame(&mut self) {
        self.quads.clear();
    }

    fn draw(&mut self, quad: &SpriteQuad) {
        self.quads.push(*quad);
    }
}

/// Sink that writes every draw call to the `trace` log.
#[derive(Debug, Default)]
pub struct LogSink {
    frame: u64,
    sprite_count: usize,
    per_sprite: HashMap<SpriteId, usize>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprites drawn during the last completed frame.
    pub fn sprite_count(&self) -> usize {
        self.sprite_count
    }

    #[allow(dead_code)]
    pub fn count_of(&self, sprite: SpriteId) -> usize {
        self.per_sprite.get(&sprite).copied().unwrap_or(0)
    }
}

impl RenderSink for LogSink {
    fn begin_frame(&mut self) {
        self.frame += 1;
        self.sprite_count = 0;
        self.per_sprite.clear();
    }

    fn draw(&mut self, quad: &SpriteQuad) {
        log::trace!(
            "frame {} draw {:?} at ({:.1}, {:.1}) size {}x{}",
            self.frame,
            quad.sprite,
            quad.center.x,
            quad.center.y,
            quad.size.x,
            quad.size.y
        );
        self.sprite_count += 1;
        *self.per_sprite.entry(quad.sprite).or_insert(0) += 1;
    }

    fn end_frame(&mut self) {
        log::trace!("frame {}: {} sprites", self.frame, self.sprite_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_from_bounds_keeps_center_and_size() {
        let quad = SpriteQuad::from_bounds(SpriteId::Barrel, Aabb::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(quad.center, Vec2::new(10.0, 20.0));
        assert_eq!(quad.size, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn log_sink_counts_reset_each_frame() {
        let mut sink = LogSink::new();
        let quad = SpriteQuad::from_bounds(SpriteId::Ladder, Aabb::new(0.0, 0.0, 1.0, 1.0));

        sink.begin_frame();
        sink.draw(&quad);
        sink.draw(&quad);
        sink.end_frame();
        assert_eq!(sink.sprite_count(), 2);
        assert_eq!(sink.count_of(SpriteId::Ladder), 2);

        sink.begin_frame();
        sink.end_frame();
        assert_eq!(sink.sprite_count(), 0);
        assert_eq!(sink.count_of(SpriteId::Ladder), 0);
    }
}
