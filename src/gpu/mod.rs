//! GPU context acquisition and the resources it owns.

/// wgpu context acquisition with primary/fallback adapter selection.
pub mod context;

pub use context::{ContextAttributes, RenderContext, RenderContextError};
