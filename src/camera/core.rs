//! Perspective camera: projection parameters, viewport, and derived
//! matrices.

use std::fmt;

use glam::{Mat4, Vec3};

use super::viewport::Viewport;
use crate::options::CameraOptions;

/// Camera misconfiguration detected at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraError {
    /// Clip planes violate `0 < near < far`.
    InvalidClipPlanes {
        /// Rejected near plane distance.
        near: f32,
        /// Rejected far plane distance.
        far: f32,
    },
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidClipPlanes { near, far } => write!(
                f,
                "invalid clip planes: near {near} / far {far} \
                 (required: 0 < near < far)"
            ),
        }
    }
}

impl std::error::Error for CameraError {}

/// Perspective camera defined by eye position, target, and projection
/// parameters.
///
/// The viewport is a copy written in by the owning viewer on resize;
/// the camera never reads dimensions from any other source. Derived
/// matrices are recomputed only by [`update`](Self::update), which is a
/// pure function of the current state.
pub struct Camera {
    /// Eye (camera) position in world space. Mutated by the controls.
    pub position: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    near: f32,
    far: f32,
    fovy: f32,
    viewport: Viewport,
    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
}

impl Camera {
    /// Build a camera from options.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidClipPlanes`] when `near <= 0`,
    /// `far <= 0`, or `near >= far`; no camera state is created in
    /// that case.
    pub fn new(options: &CameraOptions) -> Result<Self, CameraError> {
        if options.near <= 0.0
            || options.far <= 0.0
            || options.near >= options.far
        {
            return Err(CameraError::InvalidClipPlanes {
                near: options.near,
                far: options.far,
            });
        }

        let mut camera = Self {
            position: options.position,
            target: options.target,
            up: Vec3::Y,
            near: options.near,
            far: options.far,
            fovy: options.fovy,
            viewport: Viewport::default(),
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
        };
        camera.update();
        Ok(camera)
    }

    /// Recompute the derived view/projection matrices from the current
    /// position, target, up vector, and viewport.
    ///
    /// Idempotent: calling twice with no state change produces
    /// identical matrices.
    pub fn update(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        self.projection = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.viewport.aspect(),
            self.near,
            self.far,
        );
        self.view_projection = self.projection * self.view;
    }

    /// Near clip plane distance.
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip plane distance.
    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    /// The camera's viewport copy.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Overwrite the viewport copy. Called by the owning viewer on
    /// resize; takes effect at the next [`update`](Self::update).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// View matrix as of the last [`update`](Self::update).
    #[must_use]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Projection matrix as of the last [`update`](Self::update).
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Combined view-projection matrix as of the last
    /// [`update`](Self::update).
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }
}

/// GPU uniform block holding the camera matrices and metadata, laid
/// out for direct upload by render objects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl CameraUniform {
    /// Snapshot the given camera's current matrices.
    #[must_use]
    pub fn from_camera(camera: &Camera) -> Self {
        let forward = (camera.target - camera.position).normalize_or_zero();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: camera.position.to_array(),
            aspect: camera.viewport().aspect(),
            forward: forward.to_array(),
            fovy: camera.fovy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(near: f32, far: f32) -> CameraOptions {
        CameraOptions {
            near,
            far,
            ..CameraOptions::default()
        }
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let err = Camera::new(&options(10.0, 1.0));
        assert_eq!(
            err.err(),
            Some(CameraError::InvalidClipPlanes {
                near: 10.0,
                far: 1.0
            })
        );
    }

    #[test]
    fn rejects_non_positive_clip_planes() {
        assert!(Camera::new(&options(0.0, 10.0)).is_err());
        assert!(Camera::new(&options(-1.0, 10.0)).is_err());
        assert!(Camera::new(&options(1.0, -10.0)).is_err());
    }

    #[test]
    fn accepts_valid_clip_planes() {
        let camera = Camera::new(&options(1.0, 10.0)).unwrap();
        assert!(camera.near() < camera.far());
    }

    #[test]
    fn update_is_idempotent() {
        let mut camera = Camera::new(&CameraOptions::default()).unwrap();
        camera.set_viewport(Viewport::from_surface(800, 600));
        camera.update();
        let first = camera.view_projection();
        camera.update();
        assert_eq!(camera.view_projection(), first);
    }

    #[test]
    fn update_tracks_position_change() {
        let mut camera = Camera::new(&CameraOptions::default()).unwrap();
        camera.set_viewport(Viewport::from_surface(800, 600));
        camera.update();
        let before = camera.view_projection();
        camera.position = Vec3::new(0.0, 0.0, 25.0);
        camera.update();
        assert_ne!(camera.view_projection(), before);
    }

    #[test]
    fn uniform_snapshot_matches_camera() {
        let mut camera = Camera::new(&CameraOptions::default()).unwrap();
        camera.set_viewport(Viewport::from_surface(1600, 1000));
        camera.update();
        let uniform = CameraUniform::from_camera(&camera);
        assert_eq!(
            uniform.view_proj,
            camera.view_projection().to_cols_array_2d()
        );
        assert_eq!(uniform.aspect, 1.6);
        // Default camera looks from +Z toward the origin.
        assert_eq!(uniform.forward, [0.0, 0.0, -1.0]);
    }
}
