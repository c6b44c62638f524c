mod buffers;
mod canvas;
mod context;
mod present;
mod render;

pub use buffers::SketchBuffers;
pub use canvas::Canvas;
pub use context::GpuContext;
pub use present::PresentPipeline;
pub use render::CanvasPipeline;
