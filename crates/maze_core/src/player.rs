//! Player agent: a line segment steered through the maze.
//!
//! The base model never changes after construction. Position and heading are
//! plain mutable state; the world-space hitbox is derived on demand.

use glam::Vec2;

use crate::geometry::{rotate_about_origin, Segment};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    model: Segment,
    pub offset: Vec2,
    pub angle: f32,
}

impl Player {
    /// `model` must be centered at the origin; it is rotated about that point.
    ///
    /// # Panics
    ///
    /// Panics if `model` collapses to a single point.
    pub fn new(model: Segment, start: Vec2) -> Self {
        assert!(
            !model.is_degenerate(),
            "player model needs two distinct endpoints, got {:?}",
            model.p1
        );
        log::debug!("Player created at ({:.3}, {:.3})", start.x, start.y);
        Self {
            model,
            offset: start,
            angle: 0.0,
        }
    }

    pub fn model(&self) -> &Segment {
        &self.model
    }

    /// World-space hitbox: the model rotated by `angle`, then moved by `offset`.
    pub fn hitbox(&self) -> Segment {
        Segment::new(
            rotate_about_origin(self.model.p1, self.angle) + self.offset,
            rotate_about_origin(self.model.p2, self.angle) + self.offset,
        )
    }

    pub fn translate(&mut self, displacement: Vec2) {
        self.offset += displacement;
    }

    pub fn turn(&mut self, delta: f32) {
        self.angle += delta;
    }

    pub fn reset(&mut self, start: Vec2) {
        self.offset = start;
        self.angle = 0.0;
    }
}
