//! Read-only renderer statistics.

/// Snapshot of renderer counters, for observability.
///
/// Regenerated on every [`Renderer::stats`](super::Renderer::stats)
/// call, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RendererStats {
    /// Render objects currently in the scene set.
    pub render_object_count: usize,
    /// Cumulative object draws issued since creation.
    pub draw_call_count: u64,
    /// Frames drawn since creation.
    pub frame_count: u64,
}
