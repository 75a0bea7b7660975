//! Line maze -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. All simulation runs
//! inside `RedrawRequested` on a fixed timestep (see `TimeState`):
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed accumulator
//!   2. One-shot keys and config reload, once per frame (`Session::begin_frame`)
//!   3. `Session::run_steps` -- controller steps while `should_step()`
//!   4. Stream the player pose and collision color to the GPU
//!   5. Draw background, maze, player, then composite the egui overlay
//!
//! `assets/config/game.json` is watched via mtime polling and reloaded at
//! frame boundaries. A size or seed change regenerates the maze.

mod config;
mod controller;
#[cfg(test)]
mod replay;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use config::{load_config_from_path, load_config_or_default, BackgroundConfig, ConfigWatcher};
use maze_core::input::{InputState, Key};
use maze_core::time::TimeState;
use maze_devtools::DebugOverlay;
use maze_platform::PlatformConfig;
use maze_render::{
    BackgroundAnimation, BackgroundParams, Camera2D, CameraBinding, Drawable, GpuContext,
    LinePipeline, MazeDrawable, PlayerDrawable,
};
use session::Session;

const CONFIG_PATH: &str = "assets/config/game.json";
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.157,
    g: 0.157,
    b: 0.157,
    a: 1.0,
};

struct GameState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    camera: Camera2D,
    camera_binding: CameraBinding,
    line_pipeline: LinePipeline,
    debug_overlay: DebugOverlay,
    config_watcher: ConfigWatcher,
    session: Session,

    background: BackgroundAnimation,
    maze_drawable: MazeDrawable,
    /// `Session::maze_revision` the wall buffers were built from.
    drawn_maze_revision: u64,
    player_drawable: PlayerDrawable,
}

impl GameState {
    fn new(window: Arc<Window>) -> Self {
        let gpu = GpuContext::new(window.clone());
        let debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        let config_path = PathBuf::from(CONFIG_PATH);
        let config = load_config_or_default(&config_path).unwrap_or_else(|err| {
            panic!(
                "Failed to load initial config '{}': {}",
                config_path.display(),
                err
            );
        });
        let config_watcher = ConfigWatcher::new(config_path);
        let background_params = background_params(&config.background);
        let session = Session::new(config)
            .unwrap_or_else(|err| panic!("Failed to generate initial maze: {err}"));

        let camera = Camera2D::new(gpu.size.0, gpu.size.1);
        let camera_binding = CameraBinding::new(&gpu.device, &camera);
        let line_pipeline =
            LinePipeline::new(&gpu.device, gpu.surface_format, &camera_binding.layout);
        let background =
            BackgroundAnimation::new(&gpu.device, gpu.surface_format, background_params);
        let maze_drawable = MazeDrawable::new(
            &gpu.device,
            &line_pipeline,
            &camera_binding,
            session.maze(),
        );
        let player_drawable = PlayerDrawable::new(
            &gpu.device,
            &line_pipeline,
            &camera_binding,
            &session.controller.player,
        );

        Self {
            window,
            gpu,
            time: TimeState::new(),
            input: InputState::new(),
            camera,
            camera_binding,
            line_pipeline,
            debug_overlay,
            config_watcher,
            drawn_maze_revision: session.maze_revision(),
            session,
            background,
            maze_drawable,
            player_drawable,
        }
    }

    fn reload_config(&mut self, reason: &str) {
        match load_config_from_path(self.config_watcher.path()) {
            Ok(candidate) => {
                self.background.params = background_params(&candidate.background);
                self.session.apply_config(candidate, reason);
            }
            Err(err) => {
                log::error!("Config reload failed ({reason}): {err}");
            }
        }
    }

    /// Re-upload wall instances if the session swapped mazes since the last frame.
    fn sync_maze_drawable(&mut self) {
        if self.drawn_maze_revision == self.session.maze_revision() {
            return;
        }
        self.maze_drawable = MazeDrawable::new(
            &self.gpu.device,
            &self.line_pipeline,
            &self.camera_binding,
            self.session.maze(),
        );
        self.drawn_maze_revision = self.session.maze_revision();
    }
}

struct App {
    config: PlatformConfig,
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig::default(),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = maze_platform::create_window(event_loop, &self.config)
            .unwrap_or_else(|err| panic!("Failed to create window: {err}"));
        self.state = Some(GameState::new(window));
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    state.camera.viewport = (w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(game_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(game_key),
                            ElementState::Released => state.input.key_up(game_key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.is_minimized() {
                    return;
                }

                // One-shot keys and config reload happen once per frame, at the
                // boundary before any fixed step runs.
                state.time.begin_frame();
                let commands = state.session.begin_frame(&state.input);
                if commands.quit {
                    event_loop.exit();
                    return;
                }
                if commands.toggle_overlay {
                    state.debug_overlay.toggle();
                }
                if state.config_watcher.should_reload() {
                    state.reload_config("file watcher");
                }

                state.session.run_steps(&mut state.time, &state.input);
                state.input.end_frame();

                // Render phase reads finalized simulation state from this frame.
                state.camera_binding.update(&state.gpu.queue, &state.camera);
                state.background.update(
                    &state.gpu.queue,
                    state.gpu.size,
                    state.time.elapsed as f32,
                );
                state.player_drawable.update(
                    &state.gpu.queue,
                    &state.session.controller.player,
                    state.session.controller.last_outcome().colliding,
                );

                let stats = state.session.overlay_stats();
                let (egui_primitives, egui_textures_delta, overlay_actions) =
                    state
                        .debug_overlay
                        .prepare(&state.window, &state.time, &stats);
                // Applied now, visible from the next frame's steps.
                state.session.apply_overlay_actions(&overlay_actions);
                state.sync_maze_drawable();

                let Some(mut frame) = state.gpu.begin_frame(CLEAR_COLOR) else {
                    return;
                };

                frame.draw_scene(&[
                    &state.background as &dyn Drawable,
                    &state.maze_drawable,
                    &state.player_drawable,
                ]);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [state.gpu.size.0, state.gpu.size.1],
                    pixels_per_point: state.window.scale_factor() as f32,
                };
                state.debug_overlay.upload(
                    &state.gpu.device,
                    &state.gpu.queue,
                    frame.encoder(),
                    &egui_primitives,
                    &egui_textures_delta,
                    &screen_descriptor,
                );
                {
                    let mut overlay_pass = frame.overlay_pass();
                    state
                        .debug_overlay
                        .paint(&mut overlay_pass, &egui_primitives, &screen_descriptor);
                }
                state.debug_overlay.cleanup(&egui_textures_delta);

                frame.present(&state.gpu.queue);
            }

            _ => {}
        }
    }
}

fn background_params(config: &BackgroundConfig) -> BackgroundParams {
    BackgroundParams {
        speed: config.speed,
        intensity: config.intensity,
        scale: config.scale,
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyQ => Some(Key::Q),
        KeyCode::KeyE => Some(Key::E),
        KeyCode::KeyN => Some(Key::N),
        KeyCode::KeyR => Some(Key::R),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Line maze starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_and_turn_keys_are_mapped() {
        assert_eq!(map_key(KeyCode::ArrowUp), Some(Key::Up));
        assert_eq!(map_key(KeyCode::KeyQ), Some(Key::Q));
        assert_eq!(map_key(KeyCode::KeyE), Some(Key::E));
        assert_eq!(map_key(KeyCode::Space), None);
    }

    #[test]
    fn background_params_follow_config() {
        let params = background_params(&BackgroundConfig {
            speed: 0.1,
            intensity: 0.2,
            scale: 3.0,
        });
        assert_eq!(params.speed, 0.1);
        assert_eq!(params.intensity, 0.2);
        assert_eq!(params.scale, 3.0);
    }
}
