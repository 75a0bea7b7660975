//! Game state that does not touch the GPU: the current maze, the player
//! controller, pause state and the settings they were built from.
//!
//! The main loop calls [`Session::begin_frame`] once per redraw for one-shot
//! keys, then [`Session::run_steps`] to drain the fixed-step accumulator.
//! Renderers compare [`Session::maze_revision`] to know when to re-upload walls.

use maze_core::input::{InputState, Key};
use maze_core::time::TimeState;
use maze_core::{Maze, MazeError};
use maze_devtools::{OverlayActions, OverlayStats};

use crate::config::GameConfig;
use crate::controller::{ControllerConfig, ControllerInput, PlayerController, StepOutcome};

/// Requests the session cannot fulfil itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCommands {
    pub quit: bool,
    pub toggle_overlay: bool,
}

pub struct Session {
    config: GameConfig,
    maze: Maze,
    maze_revision: u64,
    pub controller: PlayerController,
    paused: bool,
    single_step_requested: bool,
    exits_reached: u32,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, MazeError> {
        let maze = Maze::generate(config.maze_size, config.seed)?;
        let controller = PlayerController::new(&maze, ControllerConfig::from(&config));
        log::info!(
            "Maze ready: {}x{} (seed {}), {} walls",
            maze.size(),
            maze.size(),
            maze.seed(),
            maze.segments().len()
        );
        Ok(Self {
            config,
            maze,
            maze_revision: 0,
            controller,
            paused: false,
            single_step_requested: false,
            exits_reached: 0,
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Bumped every time the maze is replaced.
    pub fn maze_revision(&self) -> u64 {
        self.maze_revision
    }

    pub fn regenerate(&mut self, size: usize, seed: u64, reason: &str) {
        match Maze::generate(size, seed) {
            Ok(maze) => {
                self.maze = maze;
                self.maze_revision += 1;
                self.controller.respawn(&self.maze);
                log::info!(
                    "Maze regenerated ({reason}): {}x{} seed {}",
                    size,
                    size,
                    seed
                );
            }
            Err(err) => {
                log::error!("Maze regeneration failed ({reason}): {err}");
            }
        }
    }

    /// Same size, next seed.
    pub fn next_maze(&mut self, reason: &str) {
        let next_seed = self.maze.seed().wrapping_add(1);
        self.regenerate(self.maze.size(), next_seed, reason);
    }

    /// Adopt a freshly loaded config; rebuilds the maze only when size or seed moved.
    pub fn apply_config(&mut self, candidate: GameConfig, reason: &str) {
        let maze_changed = self.config.maze_changed(&candidate);
        self.controller.config = ControllerConfig::from(&candidate);
        self.config = candidate;
        if maze_changed {
            self.regenerate(self.config.maze_size, self.config.seed, reason);
        }
        log::info!("Config reloaded ({reason}): version {}", self.config.version);
    }

    /// Edge-triggered keys. Call once per frame, before [`Session::run_steps`].
    pub fn begin_frame(&mut self, input: &InputState) -> FrameCommands {
        let commands = FrameCommands {
            quit: input.is_just_pressed(Key::Escape),
            toggle_overlay: input.is_just_pressed(Key::F3),
        };
        if input.is_just_pressed(Key::N) {
            self.next_maze("manual trigger (N)");
        } else if input.is_just_pressed(Key::R) {
            self.controller.respawn(&self.maze);
            log::info!("Player reset to start");
        }
        commands
    }

    pub fn apply_overlay_actions(&mut self, actions: &OverlayActions) {
        if actions.regenerate {
            self.next_maze("overlay");
        }
        if actions.reset_player {
            self.controller.respawn(&self.maze);
        }
        if actions.toggle_pause {
            self.paused = !self.paused;
            log::info!(
                "Simulation {}",
                if self.paused { "PAUSED" } else { "RESUMED" }
            );
        }
        if actions.single_step {
            self.single_step_requested = true;
        }
    }

    /// Drain the accumulator into controller steps. While paused, time that
    /// builds up is thrown away so resuming does not replay it.
    pub fn run_steps(&mut self, time: &mut TimeState, input: &InputState) {
        let dt = time.fixed_dt as f32;
        if self.paused {
            if self.single_step_requested {
                self.single_step_requested = false;
                time.force_step();
                self.step(input, dt);
            }
            time.discard_backlog();
            return;
        }
        while time.should_step() {
            self.step(input, dt);
        }
    }

    fn step(&mut self, input: &InputState, dt: f32) {
        let outcome = self
            .controller
            .step(ControllerInput::from_input(input), dt, &self.maze);
        self.handle_outcome(outcome);
    }

    fn handle_outcome(&mut self, outcome: StepOutcome) {
        if outcome.blocked {
            log::trace!("Step blocked by wall");
        }
        if outcome.reached_exit {
            self.exits_reached += 1;
            log::info!(
                "Exit reached ({} so far), building the next maze",
                self.exits_reached
            );
            self.next_maze("exit reached");
        }
    }

    pub fn overlay_stats(&self) -> OverlayStats {
        let player = &self.controller.player;
        OverlayStats {
            maze_size: self.maze.size(),
            seed: self.maze.seed(),
            wall_count: self.maze.segments().len(),
            player_position: (player.offset.x, player.offset.y),
            player_angle: player.angle,
            colliding: self.controller.last_outcome().colliding,
            exits_reached: self.exits_reached,
            solid_walls: self.controller.config.solid_walls,
            paused: self.paused,
        }
    }
}
