//! Procedural maze: one randomly rotated wall segment per grid tile.
//!
//! Generation is fully determined by `(size, seed)`. The two corner tiles are
//! the entrance and the exit; their walls are pushed off the canvas so the
//! player can get in and out.

use std::f32::consts::PI;
use std::fmt;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision;
use crate::geometry::Segment;
use crate::grid::Grid;

/// Displacement applied to the entrance and exit walls, outside the `[-1, 1]` canvas.
pub const OPENING_OFFSET: Vec2 = Vec2::new(2.0, 2.0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    SizeTooSmall { size: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeTooSmall { size } => {
                write!(f, "maze size must be greater than 1 (got {size})")
            }
        }
    }
}

impl std::error::Error for MazeError {}

/// Per-wall transform used for instanced rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallInstance {
    pub center: Vec2,
    pub rotation: f32,
}

#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    seed: u64,
    segments: Vec<Segment>,
    rotations: Vec<f32>,
}

impl Maze {
    pub fn generate(size: usize, seed: u64) -> Result<Self, MazeError> {
        if size < 2 {
            return Err(MazeError::SizeTooSmall { size });
        }

        let grid = Grid::new(size);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut segments = Vec::with_capacity(size * size);
        let mut rotations = Vec::with_capacity(size * size);
        let last = size - 1;

        for column_index in 0..size {
            for row_index in 0..size {
                let angle = rng.gen::<f32>() * PI;
                let mut translation = grid.tile_center(column_index, row_index);
                if is_opening(column_index, row_index, last) {
                    translation += OPENING_OFFSET;
                }

                let mut segment = grid.sample_segment();
                segment.rotate(angle);
                segment.move_by(translation);
                log::trace!(
                    "Wall ({column_index}, {row_index}): angle {angle:.4}, {:?} -> {:?}",
                    segment.p1,
                    segment.p2
                );

                segments.push(segment);
                rotations.push(angle);
            }
        }

        log::debug!(
            "Generated {}x{} maze (seed {}): {} walls",
            size,
            size,
            seed,
            segments.len()
        );

        Ok(Self {
            grid,
            seed,
            segments,
            rotations,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.row_count()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Raw rotation drawn for each wall, in the same order as [`Maze::segments`].
    pub fn rotations(&self) -> &[f32] {
        &self.rotations
    }

    pub fn instances(&self) -> impl Iterator<Item = WallInstance> + '_ {
        self.segments
            .iter()
            .zip(&self.rotations)
            .map(|(segment, &rotation)| WallInstance {
                center: segment.center(),
                rotation,
            })
    }

    pub fn start_position(&self) -> Vec2 {
        self.grid.start_position()
    }

    pub fn exit_position(&self) -> Vec2 {
        self.grid.exit_position()
    }

    /// True when `point` lies inside the exit tile.
    pub fn is_exit_reached(&self, point: Vec2) -> bool {
        let last = self.size() - 1;
        self.grid.tile_at(point) == Some((last, last))
    }

    /// Orientation-based collision between `player` and every wall.
    pub fn check_collisions(&self, player: &Segment) -> bool {
        collision::any_collide(player, &self.segments)
    }

    /// Same query through the slope/projection test.
    pub fn collides_by_projection(&self, other: &Segment) -> bool {
        self.segments
            .iter()
            .any(|segment| collision::collides_by_projection(segment, other))
    }
}

fn is_opening(column_index: usize, row_index: usize, last: usize) -> bool {
    (column_index == 0 && row_index == 0) || (column_index == last && row_index == last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_canvas(p: Vec2) -> bool {
        const SLACK: f32 = 1e-5;
        p.x.abs() <= 1.0 + SLACK && p.y.abs() <= 1.0 + SLACK
    }

    #[test]
    fn rejects_size_below_two() {
        assert_eq!(
            Maze::generate(1, 0).unwrap_err(),
            MazeError::SizeTooSmall { size: 1 }
        );
        assert!(Maze::generate(0, 0).is_err());
        assert!(Maze::generate(2, 0).is_ok());
    }

    #[test]
    fn same_size_and_seed_produce_identical_mazes() {
        let a = Maze::generate(5, 42).expect("valid size");
        let b = Maze::generate(5, 42).expect("valid size");
        assert_eq!(a.segments().len(), b.segments().len());
        for (lhs, rhs) in a.segments().iter().zip(b.segments()) {
            assert_eq!(lhs.p1.x.to_bits(), rhs.p1.x.to_bits());
            assert_eq!(lhs.p1.y.to_bits(), rhs.p1.y.to_bits());
            assert_eq!(lhs.p2.x.to_bits(), rhs.p2.x.to_bits());
            assert_eq!(lhs.p2.y.to_bits(), rhs.p2.y.to_bits());
        }
        assert_eq!(a.rotations(), b.rotations());
    }

    #[test]
    fn different_seeds_produce_different_mazes() {
        let a = Maze::generate(5, 1).expect("valid size");
        let b = Maze::generate(5, 2).expect("valid size");
        assert_ne!(a.rotations(), b.rotations());
    }

    #[test]
    fn has_one_wall_per_tile_with_corners_off_canvas() {
        for size in [2usize, 3, 5, 8] {
            let maze = Maze::generate(size, 9).expect("valid size");
            assert_eq!(maze.segments().len(), size * size);
            assert_eq!(maze.rotations().len(), size * size);

            let first = maze.segments()[0];
            let last = maze.segments()[size * size - 1];
            for corner in [first, last] {
                assert!(!on_canvas(corner.p1) && !on_canvas(corner.p2));
            }
            for wall in &maze.segments()[1..size * size - 1] {
                assert!(on_canvas(wall.p1) && on_canvas(wall.p2), "{wall:?}");
            }
        }
    }

    #[test]
    fn rotations_are_in_half_turn_range() {
        let maze = Maze::generate(10, 3).expect("valid size");
        for &rotation in maze.rotations() {
            assert!((0.0..PI).contains(&rotation));
        }
    }

    #[test]
    fn walls_are_centered_on_their_tiles() {
        let maze = Maze::generate(4, 11).expect("valid size");
        let grid = *maze.grid();
        for column in 0..4 {
            for row in 0..4 {
                let index = column * 4 + row;
                let mut expected = grid.tile_center(column, row);
                if index == 0 || index == 15 {
                    expected += OPENING_OFFSET;
                }
                let center = maze.segments()[index].center();
                assert!((center - expected).length() < 1e-5);
                let length = maze.segments()[index].length();
                assert!((length - grid.tile_size()).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn instances_pair_centers_with_rotations() {
        let maze = Maze::generate(3, 5).expect("valid size");
        let instances: Vec<_> = maze.instances().collect();
        assert_eq!(instances.len(), 9);
        for (instance, (segment, &rotation)) in instances
            .iter()
            .zip(maze.segments().iter().zip(maze.rotations()))
        {
            assert_eq!(instance.center, segment.center());
            assert_eq!(instance.rotation, rotation);
        }
    }

    #[test]
    fn start_tile_is_free_of_walls() {
        let maze = Maze::generate(5, 42).expect("valid size");
        let probe = maze.grid().sample_segment().moved(maze.start_position());
        // The only wall that could touch the full start tile is its own, which is removed.
        let shrunk = Segment::new(
            probe.center() + (probe.p1 - probe.center()) * 0.1,
            probe.center() + (probe.p2 - probe.center()) * 0.1,
        );
        assert!(!maze.check_collisions(&shrunk));
    }

    #[test]
    fn exit_is_detected_in_last_tile_only() {
        let maze = Maze::generate(5, 42).expect("valid size");
        assert!(maze.is_exit_reached(maze.exit_position()));
        assert!(!maze.is_exit_reached(maze.start_position()));
        assert!(!maze.is_exit_reached(Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn collision_paths_agree_on_a_crossing_probe() {
        let maze = Maze::generate(10, 42).expect("valid size");
        let (wall, _) = maze
            .segments()
            .iter()
            .zip(maze.rotations())
            .skip(1)
            .find(|(_, rotation)| (0.3..1.2).contains(*rotation))
            .expect("a moderately tilted wall");
        // A short probe perpendicular to the wall through its center.
        let half = (wall.p2 - wall.p1).perp().normalize() * 0.02;
        let probe = Segment::new(wall.center() - half, wall.center() + half);
        assert!(maze.check_collisions(&probe));
        assert!(maze.collides_by_projection(&probe));
    }

    #[test]
    fn error_message_names_the_size() {
        let err = MazeError::SizeTooSmall { size: 1 };
        assert!(err.to_string().contains("got 1"));
    }
}
