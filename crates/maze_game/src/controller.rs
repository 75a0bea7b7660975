use glam::Vec2;
use maze_core::input::{InputState, Key};
use maze_core::{Maze, Player};

use crate::config::GameConfig;

/// Movement intent for one fixed step. Each axis is in `-1..=1`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    pub move_x: f32,
    pub move_y: f32,
    /// Positive turns counter-clockwise.
    pub turn: f32,
}

impl ControllerInput {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            move_x: input.axis(&[Key::Left, Key::A], &[Key::Right, Key::D]),
            move_y: input.axis(&[Key::Down, Key::S], &[Key::Up, Key::W]),
            turn: input.axis(&[Key::E], &[Key::Q]),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// NDC units per second.
    pub speed: f32,
    /// Radians per second.
    pub turn_speed: f32,
    /// Undo any step that moves a clear hitbox into a wall.
    pub solid_walls: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed: 0.6,
            turn_speed: 0.6,
            solid_walls: false,
        }
    }
}

impl From<&GameConfig> for ControllerConfig {
    fn from(config: &GameConfig) -> Self {
        Self {
            speed: config.player_speed,
            turn_speed: config.turn_speed,
            solid_walls: config.solid_walls,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// The attempted pose touched a wall.
    pub colliding: bool,
    /// The step was undone because of `solid_walls`. A pose that already
    /// overlapped a wall is never blocked, so the player can back out.
    pub blocked: bool,
    pub reached_exit: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct PlayerController {
    pub player: Player,
    pub config: ControllerConfig,
    last_outcome: StepOutcome,
}

impl PlayerController {
    pub fn new(maze: &Maze, config: ControllerConfig) -> Self {
        Self {
            player: spawn_player(maze),
            config,
            last_outcome: StepOutcome::default(),
        }
    }

    pub fn step(&mut self, input: ControllerInput, dt: f32, maze: &Maze) -> StepOutcome {
        let previous = self.player;
        let was_colliding = maze.check_collisions(&previous.hitbox());

        let direction = Vec2::new(
            input.move_x.clamp(-1.0, 1.0),
            input.move_y.clamp(-1.0, 1.0),
        );
        self.player.translate(direction * self.config.speed * dt);
        self.player
            .turn(input.turn.clamp(-1.0, 1.0) * self.config.turn_speed * dt);

        let colliding = maze.check_collisions(&self.player.hitbox());
        let blocked = self.config.solid_walls && colliding && !was_colliding;
        if blocked {
            self.player = previous;
        }

        let reached_exit = maze.is_exit_reached(self.player.offset);
        self.last_outcome = StepOutcome {
            colliding,
            blocked,
            reached_exit,
        };
        self.last_outcome
    }

    pub fn last_outcome(&self) -> StepOutcome {
        self.last_outcome
    }

    /// Put the player back on the start tile of `maze`.
    pub fn respawn(&mut self, maze: &Maze) {
        if *self.player.model() == maze.grid().sample_segment() {
            self.player.reset(maze.start_position());
        } else {
            // Tile size changed, so the model has to be rebuilt.
            self.player = spawn_player(maze);
        }
        self.last_outcome = StepOutcome::default();
    }
}

fn spawn_player(maze: &Maze) -> Player {
    Player::new(maze.grid().sample_segment(), maze.start_position())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn right() -> ControllerInput {
        ControllerInput {
            move_x: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn default_speed_covers_point_six_units_per_second() {
        let maze = Maze::generate(5, 0).expect("valid size");
        let mut controller = PlayerController::new(&maze, ControllerConfig::default());
        let start = controller.player.offset;
        for _ in 0..60 {
            controller.step(
                ControllerInput {
                    move_y: 1.0,
                    ..Default::default()
                },
                DT,
                &maze,
            );
        }
        let travelled = controller.player.offset - start;
        assert!(travelled.x.abs() < 1e-6);
        assert!((travelled.y - 0.6).abs() < 1e-4);
    }

    #[test]
    fn turn_sign_matches_keys() {
        let mut input = InputState::new();
        input.key_down(Key::Q);
        assert_eq!(ControllerInput::from_input(&input).turn, 1.0);
        input.key_up(Key::Q);
        input.key_down(Key::E);
        assert_eq!(ControllerInput::from_input(&input).turn, -1.0);
    }

    #[test]
    fn arrows_and_wasd_map_to_the_same_axes() {
        let mut arrows = InputState::new();
        arrows.key_down(Key::Up);
        arrows.key_down(Key::Left);
        let mut wasd = InputState::new();
        wasd.key_down(Key::W);
        wasd.key_down(Key::A);
        let expected = ControllerInput {
            move_x: -1.0,
            move_y: 1.0,
            turn: 0.0,
        };
        assert_eq!(ControllerInput::from_input(&arrows), expected);
        assert_eq!(ControllerInput::from_input(&wasd), expected);
    }

    #[test]
    fn free_walls_report_collision_without_blocking() {
        let maze = Maze::generate(5, 0).expect("valid size");
        let mut controller = PlayerController::new(&maze, ControllerConfig::default());
        let mut saw_collision = false;
        for _ in 0..600 {
            let outcome = controller.step(right(), DT, &maze);
            assert!(!outcome.blocked);
            saw_collision |= outcome.colliding;
        }
        assert!(saw_collision, "sweeping the bottom row should hit a wall");
    }

    #[test]
    fn solid_walls_undo_colliding_steps() {
        let maze = Maze::generate(5, 0).expect("valid size");
        let config = ControllerConfig {
            solid_walls: true,
            ..ControllerConfig::default()
        };
        let mut controller = PlayerController::new(&maze, config);
        let mut blocked_steps = 0;
        for _ in 0..600 {
            let before = controller.player;
            let outcome = controller.step(right(), DT, &maze);
            if outcome.blocked {
                assert_eq!(controller.player, before);
                blocked_steps += 1;
            }
        }
        assert!(blocked_steps > 0);
        // The neighbouring wall crosses the bottom row at its tile center.
        assert!(controller.player.offset.x < -0.4);
    }

    #[test]
    fn reaching_the_exit_tile_is_reported() {
        let maze = Maze::generate(5, 0).expect("valid size");
        let mut controller = PlayerController::new(&maze, ControllerConfig::default());
        controller.player.offset = maze.exit_position();
        let outcome = controller.step(ControllerInput::default(), DT, &maze);
        assert!(outcome.reached_exit);
        assert_eq!(controller.last_outcome(), outcome);
    }

    #[test]
    fn respawn_returns_to_start() {
        let maze = Maze::generate(4, 3).expect("valid size");
        let mut controller = PlayerController::new(&maze, ControllerConfig::default());
        controller.step(right(), DT, &maze);
        controller.respawn(&maze);
        assert_eq!(controller.player.offset, maze.start_position());
        assert_eq!(controller.player.angle, 0.0);
        assert_eq!(controller.last_outcome(), StepOutcome::default());
    }

    #[test]
    fn config_values_flow_into_controller() {
        let game = GameConfig {
            player_speed: 1.5,
            turn_speed: 0.2,
            solid_walls: true,
            ..GameConfig::default()
        };
        let config = ControllerConfig::from(&game);
        assert_eq!(config.speed, 1.5);
        assert_eq!(config.turn_speed, 0.2);
        assert!(config.solid_walls);
    }

    #[test]
    fn solid_walls_let_an_overlapping_player_move_away() {
        let maze = Maze::generate(5, 0).expect("valid size");
        let mut controller = PlayerController::new(&maze, ControllerConfig::default());
        // Walk onto a wall while walls are passable.
        controller.player.offset = maze.segments()[1].center();
        let outcome = controller.step(ControllerInput::default(), DT, &maze);
        assert!(outcome.colliding);

        // Walls turn solid mid-game, e.g. through a config reload.
        controller.config.solid_walls = true;
        let before = controller.player.offset;
        let outcome = controller.step(
            ControllerInput {
                move_y: 1.0,
                ..Default::default()
            },
            DT,
            &maze,
        );
        assert!(!outcome.blocked);
        assert!(controller.player.offset.y > before.y);
    }
}
