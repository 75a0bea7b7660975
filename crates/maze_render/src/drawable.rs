//! Drawables own their GPU buffers for their whole lifetime and record draw
//! commands into a render pass handed to them by the caller.

use std::sync::Arc;

use wgpu::util::DeviceExt;

use maze_core::{Maze, Player, Segment};

use crate::camera::CameraBinding;
use crate::pipeline::{LinePipeline, PipelineBuilder};
use crate::vertex::{segment_vertices, LineInstance};

pub const WALL_COLORS: [[f32; 4]; 2] = [[0.824, 0.106, 0.106, 1.0], [0.859, 0.816, 0.816, 1.0]];
pub const PLAYER_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
pub const PLAYER_HIT_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

pub trait Drawable {
    fn label(&self) -> &'static str;

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>);
}

/// Every maze wall as one instance of the shared sample segment.
pub struct MazeDrawable {
    vertex_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    pipeline: Arc<wgpu::RenderPipeline>,
    camera_bind_group: Arc<wgpu::BindGroup>,
}

impl MazeDrawable {
    pub fn new(
        device: &wgpu::Device,
        pipeline: &LinePipeline,
        camera: &CameraBinding,
        maze: &Maze,
    ) -> Self {
        let vertices = segment_vertices(&maze.grid().sample_segment(), WALL_COLORS);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Maze Model Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instances: Vec<LineInstance> = maze.instances().map(LineInstance::from).collect();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Maze Instance Buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });
        log::debug!("Uploaded {} maze wall instances", instances.len());

        Self {
            vertex_buffer,
            instance_buffer,
            instance_count: instances.len() as u32,
            pipeline: Arc::clone(&pipeline.render_pipeline),
            camera_bind_group: Arc::clone(&camera.bind_group),
        }
    }
}

impl Drawable for MazeDrawable {
    fn label(&self) -> &'static str {
        "maze"
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &*self.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.draw(0..2, 0..self.instance_count);
    }
}

/// The player model drawn as a single instance at its current pose.
pub struct PlayerDrawable {
    vertex_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    model: Segment,
    pipeline: Arc<wgpu::RenderPipeline>,
    camera_bind_group: Arc<wgpu::BindGroup>,
}

impl PlayerDrawable {
    pub fn new(
        device: &wgpu::Device,
        pipeline: &LinePipeline,
        camera: &CameraBinding,
        player: &Player,
    ) -> Self {
        let model = *player.model();
        let vertices = segment_vertices(&model, [PLAYER_COLOR; 2]);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Player Model Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Player Instance Buffer"),
            contents: bytemuck::cast_slice(&[player_instance(player)]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            vertex_buffer,
            instance_buffer,
            model,
            pipeline: Arc::clone(&pipeline.render_pipeline),
            camera_bind_group: Arc::clone(&camera.bind_group),
        }
    }

    /// Stream the player's pose and collision color to the GPU.
    pub fn update(&self, queue: &wgpu::Queue, player: &Player, colliding: bool) {
        let color = if colliding {
            PLAYER_HIT_COLOR
        } else {
            PLAYER_COLOR
        };
        let vertices = segment_vertices(&self.model, [color; 2]);
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&[player_instance(player)]),
        );
    }
}

impl Drawable for PlayerDrawable {
    fn label(&self) -> &'static str {
        "player"
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &*self.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.draw(0..2, 0..1);
    }
}

fn player_instance(player: &Player) -> LineInstance {
    LineInstance {
        center: player.offset.to_array(),
        rotation: player.angle,
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BackgroundUniform {
    pub resolution: [f32; 2],
    pub time: f32,
    pub speed: f32,
    pub intensity: f32,
    pub scale: f32,
    pub _pad: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundParams {
    pub speed: f32,
    pub intensity: f32,
    pub scale: f32,
}

impl Default for BackgroundParams {
    fn default() -> Self {
        Self {
            speed: 0.5,
            intensity: 1.0,
            scale: 1.0,
        }
    }
}

impl BackgroundParams {
    pub fn uniform(&self, resolution: (u32, u32), time: f32) -> BackgroundUniform {
        BackgroundUniform {
            resolution: [resolution.0.max(1) as f32, resolution.1.max(1) as f32],
            time,
            speed: self.speed,
            intensity: self.intensity,
            scale: self.scale,
            _pad: [0.0; 2],
        }
    }
}

/// Full-screen animated shader drawn behind the maze.
pub struct BackgroundAnimation {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pub params: BackgroundParams,
}

impl BackgroundAnimation {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        params: BackgroundParams,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Background Uniform Buffer"),
            contents: bytemuck::cast_slice(&[params.uniform((1, 1), 0.0)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Background Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Background Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline = PipelineBuilder::new(
            device,
            surface_format,
            "Background Pipeline",
            include_str!("shaders/background.wgsl"),
        )
        .with_bind_group_layout(&layout)
        .with_topology(wgpu::PrimitiveTopology::TriangleStrip)
        .build();

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            params,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, resolution: (u32, u32), time: f32) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.params.uniform(resolution, time)]),
        );
    }
}

impl Drawable for BackgroundAnimation {
    fn label(&self) -> &'static str {
        "background"
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..4, 0..1);
    }
}
