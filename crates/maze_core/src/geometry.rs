//! Line segment primitive shared by the maze walls and the player hitbox.
//!
//! All coordinates live in normalized device space, where the playable canvas
//! spans `[-1, 1]` on both axes. Angles are radians, counter-clockwise.

use glam::{Mat2, Vec2};

/// Finite 2D line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Segment {
    pub const fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Horizontal segment of the given length centered at the origin.
    pub fn horizontal(length: f32) -> Self {
        let half = length / 2.0;
        Self::new(Vec2::new(-half, 0.0), Vec2::new(half, 0.0))
    }

    /// Translate both endpoints by `displacement`.
    pub fn move_by(&mut self, displacement: Vec2) {
        self.p1 += displacement;
        self.p2 += displacement;
    }

    /// Rotate both endpoints about the segment's own center.
    pub fn rotate(&mut self, angle: f32) {
        let pivot = self.center();
        self.move_by(-pivot);
        self.p1 = rotate_about_origin(self.p1, angle);
        self.p2 = rotate_about_origin(self.p2, angle);
        self.move_by(pivot);
    }

    pub fn moved(mut self, displacement: Vec2) -> Self {
        self.move_by(displacement);
        self
    }

    pub fn rotated(mut self, angle: f32) -> Self {
        self.rotate(angle);
        self
    }

    pub fn center(&self) -> Vec2 {
        (self.p1 + self.p2) / 2.0
    }

    /// Signed angle of `p1` as seen from the segment's center.
    pub fn angle(&self) -> f32 {
        let centered = self.p1 - self.center();
        centered.y.atan2(centered.x)
    }

    pub fn length(&self) -> f32 {
        self.p1.distance(self.p2)
    }

    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p2.x
    }

    /// Slope `m` of the supporting line `y = m·x + b`. `None` for vertical segments.
    pub fn slope(&self) -> Option<f32> {
        if self.is_vertical() {
            return None;
        }
        Some((self.p2.y - self.p1.y) / (self.p2.x - self.p1.x))
    }

    /// Intercept `b` of the supporting line `y = m·x + b`. `None` for vertical segments.
    pub fn intercept(&self) -> Option<f32> {
        self.slope().map(|m| self.p1.y - self.p1.x * m)
    }

    /// Endpoint with the smaller x; ties resolve to `p1`.
    pub fn leftmost(&self) -> Vec2 {
        if self.p1.x <= self.p2.x {
            self.p1
        } else {
            self.p2
        }
    }

    /// Endpoint with the larger x; ties resolve to `p2`.
    pub fn rightmost(&self) -> Vec2 {
        if self.p1.x > self.p2.x {
            self.p1
        } else {
            self.p2
        }
    }

    pub fn min_y(&self) -> f32 {
        self.p1.y.min(self.p2.y)
    }

    pub fn max_y(&self) -> f32 {
        self.p1.y.max(self.p2.y)
    }
}

/// Counter-clockwise rotation of `v` about the origin.
pub fn rotate_about_origin(v: Vec2, angle: f32) -> Vec2 {
    Mat2::from_angle(angle) * v
}
