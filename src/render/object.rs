//! The opaque render-object capability.

use std::fmt;

use glam::{Mat4, Vec3};

use crate::camera::{Camera, CameraUniform, Viewport};

/// Identity of a render object within the scene set.
///
/// Assigned by the external scene-construction subsystem that builds
/// the object; the renderer only compares ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderObjectId(u64);

impl RenderObjectId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RenderObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-frame draw parameters handed to every render object.
///
/// Snapshotted from the camera at the start of each renderer draw, so
/// all objects in one frame observe identical matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    /// View matrix.
    pub view: Mat4,
    /// Projection matrix.
    pub projection: Mat4,
    /// Combined view-projection matrix.
    pub view_projection: Mat4,
    /// Camera world-space position.
    pub eye: Vec3,
    /// Target viewport in device pixels.
    pub viewport: Viewport,
    /// GPU-layout camera block for direct uniform upload.
    pub uniform: CameraUniform,
}

impl DrawParams {
    /// Snapshot the camera's current matrices and the given viewport.
    #[must_use]
    pub fn from_camera(camera: &Camera, viewport: Viewport) -> Self {
        Self {
            view: camera.view(),
            projection: camera.projection(),
            view_projection: camera.view_projection(),
            eye: camera.position,
            viewport,
            uniform: CameraUniform::from_camera(camera),
        }
    }
}

/// A GPU-resident drawable, opaque to the viewer.
///
/// Objects are produced by an external scene-construction subsystem
/// and transferred into the renderer with
/// [`Renderer::add`](super::Renderer::add); from then on the renderer
/// is the sole owner. The renderer depends only on this capability
/// set and never introspects an object's geometry or resources.
pub trait RenderObject {
    /// The object's identity within the scene set.
    fn id(&self) -> RenderObjectId;

    /// Bind GPU state and record this object's draw commands for one
    /// frame. Invoked once per renderer draw, in insertion order.
    fn bind_for_draw(&mut self, params: &DrawParams);

    /// Release all GPU resources owned by this object. The renderer
    /// calls this exactly once, on remove, clear, or dispose.
    fn release(&mut self);
}
