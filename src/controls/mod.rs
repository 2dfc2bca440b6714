//! Camera controls: translate input events into camera motion,
//! decoupled from rendering.

/// Trackball orbit/pan/zoom controller.
pub mod trackball;

pub use trackball::TrackballControls;
