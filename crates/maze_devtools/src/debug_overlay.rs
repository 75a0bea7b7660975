//! Debug overlay rendered via egui on top of the maze.
//!
//! egui needs a `RenderPass<'static>` for painting while `begin_render_pass`
//! borrows the encoder, so a frame goes through four calls:
//!
//!   1. `prepare()` -- run the UI, tessellate, collect button actions
//!   2. `upload()`  -- push textures and buffers (borrows the encoder)
//!   3. `paint()`   -- draw into a pass created with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui released
//!
//! Event handling stays active while the window is hidden (F3 toggles it).

use maze_core::time::TimeState;
use winit::window::Window;

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub maze_size: usize,
    pub seed: u64,
    pub wall_count: usize,
    pub player_position: (f32, f32),
    /// Heading in radians.
    pub player_angle: f32,
    pub colliding: bool,
    pub exits_reached: u32,
    pub solid_walls: bool,
    pub paused: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayActions {
    pub regenerate: bool,
    pub reset_player: bool,
    pub toggle_pause: bool,
    /// Advance one fixed step while paused.
    pub single_step: bool,
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
        }
    }

    /// Returns true when egui consumed the event.
    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        self.visible && response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
        stats: &OverlayStats,
    ) -> (
        Vec<egui::ClippedPrimitive>,
        egui::TexturesDelta,
        OverlayActions,
    ) {
        let mut actions = OverlayActions::default();
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if !self.visible {
                return;
            }
            egui::Window::new("Maze")
                .default_pos([10.0, 10.0])
                .show(ctx, |ui| {
                    ui.label(format!("FPS: {:.1}", time.smoothed_fps));
                    ui.label(format!("Frame time: {:.2} ms", time.smoothed_frame_time_ms));
                    ui.label(format!("Fixed steps: {}", time.fixed_step_count));

                    ui.separator();
                    ui.label(format!(
                        "Maze: {}x{} seed {} ({} walls)",
                        stats.maze_size, stats.maze_size, stats.seed, stats.wall_count
                    ));
                    ui.label(format!(
                        "Player: ({:.3}, {:.3}) {:.1}\u{b0}",
                        stats.player_position.0,
                        stats.player_position.1,
                        stats.player_angle.to_degrees()
                    ));
                    ui.label(collision_label(stats.colliding));
                    ui.label(format!("Exits reached: {}", stats.exits_reached));
                    if stats.solid_walls {
                        ui.label("Solid walls");
                    }

                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button("New maze").clicked() {
                            actions.regenerate = true;
                        }
                        if ui.button("Reset player").clicked() {
                            actions.reset_player = true;
                        }
                    });
                    ui.horizontal(|ui| {
                        let pause_label = if stats.paused { "Resume" } else { "Pause" };
                        if ui.button(pause_label).clicked() {
                            actions.toggle_pause = true;
                        }
                        if stats.paused && ui.button("Step").clicked() {
                            actions.single_step = true;
                        }
                    });
                });
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta, actions)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

fn collision_label(colliding: bool) -> &'static str {
    if colliding {
        "Collision: HIT"
    } else {
        "Collision: clear"
    }
}
