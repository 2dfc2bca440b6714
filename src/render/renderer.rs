//! Scene-set owner: holds the drawable objects and issues their draws.

use crate::camera::{Camera, Viewport};

use super::object::{DrawParams, RenderObject, RenderObjectId};
use super::stats::RendererStats;

/// Owns the set of drawable scene objects and draws them with the
/// camera's current matrices.
///
/// GPU encoding lives inside the objects themselves (external
/// collaborators behind the [`RenderObject`] capability); the renderer
/// guarantees set membership, draw ordering, exactly-once release,
/// and the viewport copy.
pub struct Renderer {
    objects: Vec<Box<dyn RenderObject>>,
    viewport: Viewport,
    draw_calls: u64,
    frames: u64,
    disposed: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with an empty scene set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            viewport: Viewport::default(),
            draw_calls: 0,
            frames: 0,
            disposed: false,
        }
    }

    /// Transfer ownership of a render object into the scene set.
    ///
    /// Callers must not add an object whose id is already present.
    pub fn add(&mut self, object: Box<dyn RenderObject>) {
        debug_assert!(!self.disposed, "renderer add after dispose");
        debug_assert!(
            !self.contains(object.id()),
            "render object {} added twice",
            object.id()
        );
        self.objects.push(object);
    }

    /// Remove and release the object with the given id.
    ///
    /// Removing an id that is not present is a silent no-op: the call
    /// returns `false` and the scene set is untouched. (The
    /// command-driven call path can race a `clear()` issued elsewhere,
    /// so absence is not an error here.)
    pub fn remove(&mut self, id: RenderObjectId) -> bool {
        debug_assert!(!self.disposed, "renderer remove after dispose");
        let Some(index) =
            self.objects.iter().position(|object| object.id() == id)
        else {
            log::debug!("remove of absent render object {id}");
            return false;
        };
        let mut object = self.objects.remove(index);
        object.release();
        true
    }

    /// Remove and release every object in the scene set.
    pub fn clear(&mut self) {
        debug_assert!(!self.disposed, "renderer clear after dispose");
        for object in &mut self.objects {
            object.release();
        }
        self.objects.clear();
    }

    /// Whether an object with the given id is in the scene set.
    #[must_use]
    pub fn contains(&self, id: RenderObjectId) -> bool {
        self.objects.iter().any(|object| object.id() == id)
    }

    /// Draw exactly the current scene set using the camera's current
    /// matrices, in insertion order.
    pub fn draw(&mut self, camera: &Camera) {
        debug_assert!(!self.disposed, "renderer draw after dispose");
        let params = DrawParams::from_camera(camera, self.viewport);
        for object in &mut self.objects {
            object.bind_for_draw(&params);
            self.draw_calls += 1;
        }
        self.frames += 1;
    }

    /// The renderer's viewport copy.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Overwrite the viewport copy. Called by the owning viewer on
    /// resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Fresh statistics snapshot.
    #[must_use]
    pub fn stats(&self) -> RendererStats {
        RendererStats {
            render_object_count: self.objects.len(),
            draw_call_count: self.draw_calls,
            frame_count: self.frames,
        }
    }

    /// Release every render object exactly once and retire the
    /// renderer. Calling any other method afterwards is a precondition
    /// violation.
    pub fn dispose(&mut self) {
        debug_assert!(!self.disposed, "renderer disposed twice");
        if self.disposed {
            return;
        }
        self.clear();
        self.disposed = true;
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
