//! Rendering boundary: the scene-set renderer, the opaque
//! render-object capability, and renderer statistics.

/// Render-object capability and per-frame draw parameters.
pub mod object;
/// Scene-set renderer.
pub mod renderer;
/// Read-only statistics snapshot.
pub mod stats;

pub use object::{DrawParams, RenderObject, RenderObjectId};
pub use renderer::Renderer;
pub use stats::RendererStats;
