//! Camera state: projection parameters, viewport, and derived matrices.
//!
//! Input semantics live in [`crate::controls`]; the camera itself is
//! independent of how it is moved.

/// Core camera struct and the GPU uniform snapshot.
pub mod core;
/// Device-pixel viewport rectangle.
pub mod viewport;

pub use self::core::{Camera, CameraError, CameraUniform};
pub use viewport::Viewport;
