pub mod camera;
pub mod drawable;
pub mod gpu_context;
pub mod pipeline;
pub mod vertex;

pub use camera::{Camera2D, CameraBinding, CameraUniform};
pub use drawable::{BackgroundAnimation, BackgroundParams, Drawable, MazeDrawable, PlayerDrawable};
pub use gpu_context::{Frame, GpuContext};
pub use pipeline::{LinePipeline, PipelineBuilder};
pub use vertex::{LineInstance, LineVertex};
