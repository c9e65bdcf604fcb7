//! Shatter Render - wgpu renderer for the shattering text mesh
//!
//! One mesh, one pipeline: the vertex shader pushes each vertex along either a
//! fixed fall vector or its normal, scaled by the per-frame amplitude and the
//! vertex's displacement attribute. The fragment shader applies a single
//! directional light plus ambient to the per-face color.

mod camera;
mod context;
mod error;
mod gpu;
mod gpu_mesh;
mod headless;
mod pipeline;
mod renderer;

pub use camera::Camera;
pub use context::RenderContext;
pub use error::RenderError;
pub use gpu_mesh::GpuTextMesh;
pub use headless::HeadlessContext;
pub use pipeline::{FrameUniforms, ShaderSettings, ShatterPipeline, ShatterVertex};
pub use renderer::ShatterRenderer;
