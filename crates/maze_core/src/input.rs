//! Keyboard state with held and edge-triggered queries.
//!
//! Held keys steer the player every fixed step. Edge-triggered presses
//! (`is_just_pressed`) drive one-shot actions such as regenerating the maze;
//! they stay visible until `end_frame()`, which the main loop calls once per
//! frame after handling them.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
    Q,
    E,
    N,
    R,
    Escape,
    F3,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|key| self.is_held(*key))
    }

    /// -1, 0 or 1 depending on which side of the axis is held. Both sides cancel out.
    pub fn axis(&self, negative: &[Key], positive: &[Key]) -> f32 {
        let mut value = 0.0;
        if self.any_held(negative) {
            value -= 1.0;
        }
        if self.any_held(positive) {
            value += 1.0;
        }
        value
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}
