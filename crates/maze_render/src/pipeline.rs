//! Render pipeline construction shared by the line and background passes.

use std::sync::Arc;

/// Fluent builder over `wgpu::RenderPipelineDescriptor` with the defaults this
/// game needs: `vs_main`/`fs_main` entry points, alpha blending, no culling,
/// no depth.
pub struct PipelineBuilder<'a> {
    device: &'a wgpu::Device,
    surface_format: wgpu::TextureFormat,
    label: &'a str,
    shader_source: &'a str,
    vertex_buffers: Vec<wgpu::VertexBufferLayout<'a>>,
    bind_group_layouts: Vec<&'a wgpu::BindGroupLayout>,
    topology: wgpu::PrimitiveTopology,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        surface_format: wgpu::TextureFormat,
        label: &'a str,
        shader_source: &'a str,
    ) -> Self {
        Self {
            device,
            surface_format,
            label,
            shader_source,
            vertex_buffers: Vec::new(),
            bind_group_layouts: Vec::new(),
            topology: wgpu::PrimitiveTopology::TriangleList,
        }
    }

    pub fn with_vertex_buffer(mut self, layout: wgpu::VertexBufferLayout<'a>) -> Self {
        self.vertex_buffers.push(layout);
        self
    }

    pub fn with_bind_group_layout(mut self, layout: &'a wgpu::BindGroupLayout) -> Self {
        self.bind_group_layouts.push(layout);
        self
    }

    pub fn with_topology(mut self, topology: wgpu::PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    pub fn build(self) -> wgpu::RenderPipeline {
        log::debug!("Building render pipeline '{}'", self.label);
        let shader = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(self.label),
                source: wgpu::ShaderSource::Wgsl(self.shader_source.into()),
            });

        let layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(self.label),
                bind_group_layouts: &self.bind_group_layouts,
                push_constant_ranges: &[],
            });

        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(self.label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &self.vertex_buffers,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: self.topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }
}

/// Pipeline for instanced line segments: maze walls and the player.
pub struct LinePipeline {
    pub render_pipeline: Arc<wgpu::RenderPipeline>,
}

impl LinePipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let render_pipeline = PipelineBuilder::new(
            device,
            surface_format,
            "Line Pipeline",
            include_str!("shaders/line.wgsl"),
        )
        .with_vertex_buffer(crate::LineVertex::layout())
        .with_vertex_buffer(crate::LineInstance::layout())
        .with_bind_group_layout(camera_layout)
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .build();
        Self {
            render_pipeline: Arc::new(render_pipeline),
        }
    }
}
