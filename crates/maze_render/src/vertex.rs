#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(LineVertex, position) as wgpu::BufferAddress,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // color
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(LineVertex, color) as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Per-instance transform: rotate the model segment, then move it to `center`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineInstance {
    pub center: [f32; 2],
    pub rotation: f32,
}

impl LineInstance {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // center
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(LineInstance, center) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // rotation
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(LineInstance, rotation) as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

impl From<maze_core::WallInstance> for LineInstance {
    fn from(instance: maze_core::WallInstance) -> Self {
        Self {
            center: instance.center.to_array(),
            rotation: instance.rotation,
        }
    }
}

/// Two vertices for a model segment, one color per endpoint.
pub fn segment_vertices(segment: &maze_core::Segment, colors: [[f32; 4]; 2]) -> [LineVertex; 2] {
    [
        LineVertex {
            position: segment.p1.to_array(),
            color: colors[0],
        },
        LineVertex {
            position: segment.p2.to_array(),
            color: colors[1],
        },
    ]
}
