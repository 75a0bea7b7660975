//! Row/column maze indexing mapped onto normalized device coordinates.
//!
//! The canvas spans `[-1, 1]` on both axes, so a grid of `n` rows has tiles of
//! edge `2/n`. Cell `(0, 0)` sits at the bottom-left corner of the canvas.

use glam::Vec2;

use crate::geometry::Segment;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    tile_size: f32,
    row_count: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        let grid = Self {
            tile_size: 2.0 / size as f32,
            row_count: size,
        };
        log::trace!(
            "Grid created: {} rows, tile size {}",
            grid.row_count,
            grid.tile_size
        );
        grid
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Canonical wall/player model: one tile long, horizontal, centered at the origin.
    pub fn sample_segment(&self) -> Segment {
        Segment::horizontal(self.tile_size)
    }

    /// Center of the tile at `(column_index, row_index)`.
    ///
    /// The column index drives the y axis and the row index the x axis, so
    /// iterating rows in the inner loop sweeps the canvas left to right.
    pub fn tile_center(&self, column_index: usize, row_index: usize) -> Vec2 {
        let corner = Vec2::new(
            row_index as f32 * self.tile_size,
            column_index as f32 * self.tile_size,
        );
        corner + Vec2::splat(self.tile_size / 2.0) - Vec2::ONE
    }

    /// Player spawn point: the center of the bottom-left tile.
    pub fn start_position(&self) -> Vec2 {
        self.tile_center(0, 0)
    }

    /// Center of the top-right tile, the maze exit.
    pub fn exit_position(&self) -> Vec2 {
        let last = self.row_count.saturating_sub(1);
        self.tile_center(last, last)
    }

    /// Tile containing `point`, or `None` when the point is off-canvas.
    pub fn tile_at(&self, point: Vec2) -> Option<(usize, usize)> {
        if !point.is_finite() {
            return None;
        }
        let shifted = (point + Vec2::ONE) / self.tile_size;
        if shifted.x < 0.0 || shifted.y < 0.0 {
            return None;
        }
        let row_index = shifted.x.floor() as usize;
        let column_index = shifted.y.floor() as usize;
        if row_index >= self.row_count || column_index >= self.row_count {
            return None;
        }
        Some((column_index, row_index))
    }
}
