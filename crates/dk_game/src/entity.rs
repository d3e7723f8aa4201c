//! Shared entity vocabulary: what kind of thing something is, which way it
//! faces, what the player carries, and the trait every simulated object
//! implements so the collision dispatcher can treat them uniformly.

use dk_core::geometry::Aabb;
use serde::Deserialize;

use crate::collision::Transition;

/// Screen dimensions consulted by the controllers for boundary checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimContext {
    pub screen_width: f32,
    pub screen_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Platform,
    Ladder,
    Barrel,
    Donkey,
    Hammer,
    Blaster,
    Monkey,
    Banana,
    Bullet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Mutually exclusive power-up carried by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Equipment {
    #[default]
    None,
    Hammer,
    Blaster,
}

pub trait Entity {
    fn kind(&self) -> EntityKind;

    fn bounds(&self) -> Aabb;

    /// Whether the entity still takes part in collisions.
    fn is_active(&self) -> bool {
        true
    }

    /// Apply the state change the collision table decided on.
    fn apply(&mut self, transition: Transition);

    fn collides_with(&self, other: &dyn Entity) -> bool {
        self.is_active() && other.is_active() && self.bounds().intersects(&other.bounds())
    }
}
