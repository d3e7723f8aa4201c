//! Input state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` returns true every frame the key
//!   is physically down. Used for walking and climbing.
//!
//! - **Edge-triggered (just_pressed / just_released):** These are true only during
//!   the frame the transition happened and are cleared by `end_frame()`, which the
//!   runner calls once the simulation frame has consumed them. Jumping and firing
//!   read these so holding the key does not repeat the action.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Fire,
    Escape,
}

impl Key {
    pub const ALL: &'static [Key] = &[
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Jump,
        Key::Fire,
        Key::Escape,
    ];
}

#[derive(Debug, Clone)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    /// Bring the held set in line with `keys`, generating press and release
    /// edges for every key whose state changed.
    pub fn apply_held(&mut self, keys: &[Key]) {
        for &key in Key::ALL {
            if keys.contains(&key) {
                self.key_down(key);
            } else {
                self.key_up(key);
            }
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        assert!(input.is_held(Key::Left));
        assert!(input.is_just_pressed(Key::Left));
    }

    #[test]
    fn test_key_up_clears_held_sets_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_up(Key::Left);
        assert!(!input.is_held(Key::Left));
        assert!(input.is_just_released(Key::Left));
    }

    #[test]
    fn test_key_down_repeat_does_not_retrigger_after_end_frame() {
        let mut input = InputState::new();
        input.key_down(Key::Jump);
        input.end_frame();
        // Auto-repeat delivers another key_down while the key is still held;
        // the jump edge must not fire again.
        input.key_down(Key::Jump);
        assert!(input.is_held(Key::Jump));
        assert!(!input.is_just_pressed(Key::Jump));
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::Fire);
        assert!(!input.is_just_released(Key::Fire));
        assert!(!input.is_held(Key::Fire));
    }

    #[test]
    fn test_end_frame_clears_transient_state() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.key_down(Key::Jump);
        input.end_frame();
        assert!(!input.is_just_pressed(Key::Right));
        assert!(!input.is_just_pressed(Key::Jump));
        // Held state should persist across frames.
        assert!(input.is_held(Key::Right));
        assert!(input.is_held(Key::Jump));
    }

    #[test]
    fn test_apply_held_generates_edges_only_on_change() {
        let mut input = InputState::new();
        input.apply_held(&[Key::Right, Key::Fire]);
        assert!(input.is_just_pressed(Key::Fire));
        input.end_frame();

        input.apply_held(&[Key::Right, Key::Fire]);
        assert!(input.is_held(Key::Fire));
        assert!(!input.is_just_pressed(Key::Fire));
        input.end_frame();

        input.apply_held(&[Key::Right]);
        assert!(input.is_just_released(Key::Fire));
        assert!(input.is_held(Key::Right));
        assert!(!input.is_just_released(Key::Right));
    }

    #[test]
    fn test_default_state_is_empty() {
        let input = InputState::default();
        for &key in Key::ALL {
            assert!(!input.is_held(key));
            assert!(!input.is_just_pressed(key));
            assert!(!input.is_just_released(key));
        }
    }
}
