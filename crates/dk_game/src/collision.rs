//! Collision dispatch: a table keyed on the pair of entity kinds.
//!
//! Detecting *that* two entities touch is a bounding-box test; deciding *what
//! happens* is a pure lookup here. The table returns a [`Reaction`] describing
//! the transition each side should undergo, and [`resolve`] applies it. Keeping
//! the decision pure means the level loop can read the reaction afterwards to
//! do its own bookkeeping (score, game over) without re-deriving it.
//!
//! Entries are written from one side only. A lookup for `(b, a)` falls back to
//! the `(a, b)` entry with the two transitions swapped.

use crate::entity::{Entity, EntityKind, Equipment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    /// One-way switch to inactive: projectile spent, barrel smashed, enemy defeated.
    Deactivate,
    /// Lose this many health points.
    Damage(u32),
    /// Pickup taken out of play.
    Collect,
    /// Player equips an item.
    Equip(Equipment),
    /// Player is killed.
    Kill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaction {
    pub first: Transition,
    pub second: Transition,
}

impl Reaction {
    pub const NONE: Reaction = Reaction::new(Transition::Unchanged, Transition::Unchanged);

    pub const fn new(first: Transition, second: Transition) -> Self {
        Self { first, second }
    }

    pub fn swapped(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }

    #[cfg(test)]
    pub fn is_none(&self) -> bool {
        *self == Reaction::NONE
    }

    pub fn kills_player(&self) -> bool {
        self.first == Transition::Kill || self.second == Transition::Kill
    }
}

/// Look up the reaction for a contact between `first` and `second`.
/// `equipment` is what the player is carrying at the time of contact.
pub fn react(first: EntityKind, second: EntityKind, equipment: Equipment) -> Reaction {
    if let Some(reaction) = lookup(first, second, equipment) {
        return reaction;
    }
    lookup(second, first, equipment)
        .map(Reaction::swapped)
        .unwrap_or(Reaction::NONE)
}

fn lookup(first: EntityKind, second: EntityKind, equipment: Equipment) -> Option<Reaction> {
    use EntityKind::*;
    use Transition::*;

    let hammer = equipment == Equipment::Hammer;
    let reaction = match (first, second) {
        (Bullet, Monkey) => Reaction::new(Deactivate, Deactivate),
        (Bullet, Donkey) => Reaction::new(Deactivate, Damage(1)),
        (Bullet, Platform) => Reaction::new(Deactivate, Unchanged),
        (Banana, Player) => Reaction::new(Deactivate, Kill),
        (Barrel, Player) if hammer => Reaction::new(Deactivate, Unchanged),
        (Barrel, Player) => Reaction::new(Unchanged, Kill),
        (Monkey, Player) if hammer => Reaction::new(Deactivate, Unchanged),
        (Monkey, Player) => Reaction::new(Unchanged, Kill),
        (Donkey, Player) if hammer => Reaction::NONE,
        (Donkey, Player) => Reaction::new(Unchanged, Kill),
        (Hammer, Player) => Reaction::new(Collect, Equip(Equipment::Hammer)),
        (Blaster, Player) => Reaction::new(Collect, Equip(Equipment::Blaster)),
        _ => return None,
    };
    Some(reaction)
}

/// Test two entities for contact and, if they touch, apply the table's
/// reaction to both. Returns the reaction that was applied.
pub fn resolve(
    first: &mut dyn Entity,
    second: &mut dyn Entity,
    equipment: Equipment,
) -> Option<Reaction> {
    if !first.collides_with(&*second) {
        return None;
    }
    let reaction = react(first.kind(), second.kind(), equipment);
    first.apply(reaction.first);
    second.apply(reaction.second);
    Some(reaction)
}
