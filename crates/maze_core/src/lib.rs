//! Geometry, maze generation and player state for the line maze.
//!
//! This crate is free of GPU and windowing concerns; the render and game
//! crates consume the same segment data for drawing and collision.

pub mod collision;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod maze;
pub mod player;
pub mod time;

pub use collision::{any_collide, collides, collides_by_projection, intersection_point};
pub use geometry::Segment;
pub use grid::Grid;
pub use maze::{Maze, MazeError, WallInstance};
pub use player::Player;
