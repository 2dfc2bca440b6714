//! The viewer: single owner of the render loop and top-level lifecycle.
//!
//! A [`Viewer`] wires the input observer, trackball controls, camera,
//! and renderer together and owns the frame-scheduling policy: draws
//! run at most once per scheduled frame callback, coalesced through
//! [`request_draw`](Viewer::request_draw), or continuously through
//! [`animate`](Viewer::animate).
//!
//! ```no_run
//! # use molview::frame::CountingScheduler;
//! # use molview::options::ViewerOptions;
//! # use molview::viewer::{RenderSurface, Viewer};
//! # struct Offscreen;
//! # impl RenderSurface for Offscreen {
//! #     fn container_size(&self) -> (u32, u32) { (640, 480) }
//! #     fn configure(&mut self, _w: u32, _h: u32) {}
//! # }
//! let mut viewer = Viewer::new(
//!     Box::new(Offscreen),
//!     Box::new(CountingScheduler::new()),
//!     &ViewerOptions::default(),
//! )?;
//! viewer.request_draw();
//! # Ok::<(), molview::MolviewError>(())
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crate::camera::Camera;
use crate::camera::Viewport;
use crate::controls::TrackballControls;
use crate::error::MolviewError;
use crate::frame::FrameScheduler;
use crate::input::{InputEvent, InputObserver};
use crate::options::ViewerOptions;
use crate::render::{RenderObject, RenderObjectId, Renderer, RendererStats};
use crate::util::FrameTiming;

/// The drawing surface and the container whose pixel size it adopts.
///
/// The windowed host backs this with a wgpu surface on a winit window;
/// offscreen embedders and tests provide their own measurements.
pub trait RenderSurface {
    /// Current container size in device pixels.
    fn container_size(&self) -> (u32, u32);

    /// Resize the drawing surface's pixel dimensions. Called by the
    /// viewer with clamped (never zero) dimensions.
    fn configure(&mut self, width: u32, height: u32);
}

/// Interactive viewer over a render-object scene set.
///
/// Exclusively owns its input observer, camera, controls, and
/// renderer. All methods run on one logical thread; scheduling is
/// cooperative through the injected [`FrameScheduler`].
///
/// After [`dispose`](Self::dispose), calling any other method is a
/// precondition violation (loud in debug builds, undefined otherwise).
pub struct Viewer {
    input: InputObserver,
    camera: Camera,
    controls: TrackballControls,
    renderer: Renderer,
    scheduler: Box<dyn FrameScheduler>,
    surface: Box<dyn RenderSurface>,
    frame_timing: FrameTiming,
    /// At-most-one-pending-frame gate for [`request_draw`](Self::request_draw).
    draw_pending: bool,
    /// Set once [`animate`](Self::animate) starts the continuous loop.
    continuous: bool,
    /// Latched by resize events; applied before the next executed draw.
    resize_requested: Rc<Cell<bool>>,
    disposed: bool,
}

impl Viewer {
    /// Build a viewer over the given surface and frame scheduler.
    ///
    /// Performs the initial [`handle_resize`](Self::handle_resize)
    /// before returning, so all viewport copies start synchronized.
    ///
    /// # Errors
    ///
    /// Returns [`MolviewError::Camera`] when the camera options are
    /// invalid; no viewer state exists in that case.
    pub fn new(
        surface: Box<dyn RenderSurface>,
        scheduler: Box<dyn FrameScheduler>,
        options: &ViewerOptions,
    ) -> Result<Self, MolviewError> {
        let mut input = InputObserver::new();
        let camera = Camera::new(&options.camera)?;
        let controls =
            TrackballControls::new(&mut input, &camera, options.controls);

        let resize_requested = Rc::new(Cell::new(false));
        {
            let latch = Rc::clone(&resize_requested);
            let _ = input.resize.subscribe(move |_| latch.set(true));
        }

        let mut viewer = Self {
            input,
            camera,
            controls,
            renderer: Renderer::new(),
            scheduler,
            surface,
            frame_timing: FrameTiming::new(),
            draw_pending: false,
            continuous: false,
            resize_requested,
            disposed: false,
        };
        viewer.handle_resize();
        Ok(viewer)
    }

    /// Feed one raw input event to the observer streams.
    ///
    /// Pointer and wheel events accumulate in the controls; a resize
    /// event additionally latches a viewport recomputation that is
    /// applied before the next executed draw.
    pub fn handle_input(&mut self, event: InputEvent) {
        debug_assert!(!self.disposed, "input on a disposed viewer");
        self.input.notify(event);
    }

    /// Transfer ownership of a render object into the scene.
    ///
    /// Callers must not add an object whose id is already present.
    pub fn add(&mut self, object: Box<dyn RenderObject>) {
        debug_assert!(!self.disposed, "add on a disposed viewer");
        self.renderer.add(object);
    }

    /// Remove and release a previously added object.
    ///
    /// Removing an id that is not present is a silent no-op returning
    /// `false`.
    pub fn remove(&mut self, id: RenderObjectId) -> bool {
        debug_assert!(!self.disposed, "remove on a disposed viewer");
        self.renderer.remove(id)
    }

    /// Remove and release all render objects.
    pub fn clear(&mut self) {
        debug_assert!(!self.disposed, "clear on a disposed viewer");
        self.renderer.clear();
    }

    /// Synchronously execute one frame.
    ///
    /// Resets the pending-draw gate, applies any latched resize, then
    /// runs strictly controls-update → camera-update → renderer-draw.
    /// Always executes fully.
    pub fn draw(&mut self) {
        debug_assert!(!self.disposed, "draw on a disposed viewer");
        self.draw_pending = false;
        if self.resize_requested.replace(false) {
            self.handle_resize();
        }
        self.controls.update(&mut self.camera);
        self.camera.update();
        self.renderer.draw(&self.camera);
        self.frame_timing.end_frame();
    }

    /// Request one draw at the next frame callback.
    ///
    /// Idempotent while a draw is pending: repeated calls before the
    /// scheduled frame executes collapse into a single future
    /// [`draw`](Self::draw). The pending gate resets only when that
    /// draw actually executes.
    pub fn request_draw(&mut self) {
        debug_assert!(!self.disposed, "request_draw on a disposed viewer");
        if self.draw_pending {
            return;
        }
        self.draw_pending = true;
        self.scheduler.schedule_frame();
    }

    /// Draw now and keep drawing on every future frame callback.
    ///
    /// There is no built-in stop: the sequence is unbounded until the
    /// caller stops delivering frames and calls
    /// [`dispose`](Self::dispose).
    pub fn animate(&mut self) {
        debug_assert!(!self.disposed, "animate on a disposed viewer");
        self.continuous = true;
        self.draw();
        self.scheduler.schedule_frame();
    }

    /// The host-delivered frame callback.
    ///
    /// Executes the scheduled draw; in continuous mode it also
    /// reschedules itself.
    pub fn on_frame(&mut self) {
        debug_assert!(!self.disposed, "frame callback on a disposed viewer");
        if self.continuous {
            self.animate();
        } else {
            self.draw();
        }
    }

    /// Recompute the drawing-surface dimensions from the container and
    /// propagate the viewport to renderer, camera, and controls.
    ///
    /// Called once at construction and again for every host resize
    /// signal. A zero-area container clamps to 1×1.
    pub fn handle_resize(&mut self) {
        debug_assert!(!self.disposed, "resize on a disposed viewer");
        let (width, height) = self.surface.container_size();
        let viewport = Viewport::from_surface(width, height);
        self.surface.configure(viewport.width, viewport.height);
        self.renderer.set_viewport(viewport);
        self.camera.set_viewport(viewport);
        self.controls.set_viewport(viewport);
        log::debug!(
            "viewport resized to {}x{}",
            viewport.width,
            viewport.height
        );
    }

    /// Recenter the camera so a bounding sphere fills the view.
    pub fn fit_to_sphere(&mut self, center: glam::Vec3, radius: f32) {
        debug_assert!(!self.disposed, "fit_to_sphere on a disposed viewer");
        self.controls
            .fit_to_sphere(&mut self.camera, center, radius);
    }

    /// Current renderer statistics (regenerated per call).
    #[must_use]
    pub fn stats(&self) -> RendererStats {
        self.renderer.stats()
    }

    /// Smoothed frames per second over recent executed draws.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Whether a requested draw is still waiting for its frame
    /// callback.
    #[must_use]
    pub fn is_draw_pending(&self) -> bool {
        self.draw_pending
    }

    /// Read access to the camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Read access to the controls.
    #[must_use]
    pub fn controls(&self) -> &TrackballControls {
        &self.controls
    }

    /// Release input subscriptions, controls resources, and renderer
    /// GPU resources, in that order, each exactly once.
    ///
    /// After this call no other viewer method may be invoked; debug
    /// builds assert on violations.
    pub fn dispose(&mut self) {
        debug_assert!(!self.disposed, "viewer disposed twice");
        if self.disposed {
            return;
        }
        self.input.dispose();
        self.controls.dispose();
        self.renderer.dispose();
        self.disposed = true;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::frame::CountingScheduler;
    use crate::input::{PointerEvent, WheelEvent};
    use crate::render::DrawParams;

    /// Surface double whose container size tests can change at will.
    struct SharedSurface {
        size: Rc<Cell<(u32, u32)>>,
        configured: Rc<RefCell<Vec<(u32, u32)>>>,
    }

    impl RenderSurface for SharedSurface {
        fn container_size(&self) -> (u32, u32) {
            self.size.get()
        }

        fn configure(&mut self, width: u32, height: u32) {
            self.configured.borrow_mut().push((width, height));
        }
    }

    /// Render-object double recording draws, releases, and the last
    /// draw parameters it observed.
    struct Probe {
        id: RenderObjectId,
        draws: Rc<Cell<u32>>,
        releases: Rc<Cell<u32>>,
        last_params: Rc<RefCell<Option<DrawParams>>>,
    }

    impl RenderObject for Probe {
        fn id(&self) -> RenderObjectId {
            self.id
        }

        fn bind_for_draw(&mut self, params: &DrawParams) {
            self.draws.set(self.draws.get() + 1);
            *self.last_params.borrow_mut() = Some(*params);
        }

        fn release(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    struct ProbeHandles {
        draws: Rc<Cell<u32>>,
        releases: Rc<Cell<u32>>,
        last_params: Rc<RefCell<Option<DrawParams>>>,
    }

    fn probe(id: u64) -> (Box<dyn RenderObject>, ProbeHandles) {
        let handles = ProbeHandles {
            draws: Rc::new(Cell::new(0)),
            releases: Rc::new(Cell::new(0)),
            last_params: Rc::new(RefCell::new(None)),
        };
        let object = Probe {
            id: RenderObjectId::new(id),
            draws: Rc::clone(&handles.draws),
            releases: Rc::clone(&handles.releases),
            last_params: Rc::clone(&handles.last_params),
        };
        (Box::new(object), handles)
    }

    struct Fixture {
        viewer: Viewer,
        size: Rc<Cell<(u32, u32)>>,
        frames: crate::frame::FrameCounter,
    }

    fn fixture(width: u32, height: u32) -> Fixture {
        let size = Rc::new(Cell::new((width, height)));
        let surface = SharedSurface {
            size: Rc::clone(&size),
            configured: Rc::new(RefCell::new(Vec::new())),
        };
        let scheduler = CountingScheduler::new();
        let frames = scheduler.counter();
        let viewer = Viewer::new(
            Box::new(surface),
            Box::new(scheduler),
            &ViewerOptions::default(),
        )
        .unwrap();
        Fixture {
            viewer,
            size,
            frames,
        }
    }

    #[test]
    fn request_draw_coalesces_into_one_scheduled_frame() {
        let mut fx = fixture(800, 600);
        let (object, handles) = probe(1);
        fx.viewer.add(object);

        fx.viewer.request_draw();
        fx.viewer.request_draw();
        fx.viewer.request_draw();
        assert_eq!(fx.frames.count(), 1);
        assert!(fx.viewer.is_draw_pending());

        // The host delivers the single scheduled frame.
        fx.viewer.on_frame();
        assert_eq!(handles.draws.get(), 1);
        assert!(!fx.viewer.is_draw_pending());

        // A new request schedules again.
        fx.viewer.request_draw();
        assert_eq!(fx.frames.count(), 2);
    }

    #[test]
    fn animate_draws_and_reschedules_unbounded() {
        let mut fx = fixture(800, 600);
        let (object, handles) = probe(1);
        fx.viewer.add(object);

        fx.viewer.animate();
        assert_eq!(handles.draws.get(), 1);
        assert_eq!(fx.frames.count(), 1);

        for expected in 2..=5 {
            fx.viewer.on_frame();
            assert_eq!(handles.draws.get(), expected);
            assert_eq!(fx.frames.count(), u64::from(expected));
        }
    }

    #[test]
    fn frame_runs_controls_then_camera_then_renderer() {
        let mut fx = fixture(800, 600);
        let (object, handles) = probe(1);
        fx.viewer.add(object);
        let initial_position = fx.viewer.camera().position;

        // Zoom input accumulated between frames...
        fx.viewer
            .handle_input(InputEvent::Wheel(WheelEvent { delta: 2.0 }));
        fx.viewer.request_draw();
        fx.viewer.on_frame();

        // ...moved the camera (controls ran first), and the renderer
        // observed the matrices the camera derived afterwards.
        let moved_position = fx.viewer.camera().position;
        assert_ne!(moved_position, initial_position);
        let params = handles.last_params.borrow().unwrap();
        assert_eq!(
            params.view_projection,
            fx.viewer.camera().view_projection()
        );
        assert_eq!(params.eye, moved_position);
    }

    #[test]
    fn resize_synchronizes_all_three_viewport_copies() {
        let mut fx = fixture(800, 600);
        let expected = Viewport::from_surface(800, 600);
        assert_eq!(fx.viewer.renderer.viewport(), expected);
        assert_eq!(fx.viewer.camera().viewport(), expected);
        assert_eq!(fx.viewer.controls().viewport(), expected);

        fx.size.set((1024, 768));
        fx.viewer.handle_resize();
        let expected = Viewport::from_surface(1024, 768);
        assert_eq!(fx.viewer.renderer.viewport(), expected);
        assert_eq!(fx.viewer.camera().viewport(), expected);
        assert_eq!(fx.viewer.controls().viewport(), expected);
    }

    #[test]
    fn latched_resize_applies_before_the_next_draw() {
        let mut fx = fixture(800, 600);
        let (object, handles) = probe(1);
        fx.viewer.add(object);

        fx.size.set((400, 300));
        fx.viewer.handle_input(InputEvent::Resize);
        // Not yet applied: resize waits for the frame boundary.
        assert_eq!(
            fx.viewer.camera().viewport(),
            Viewport::from_surface(800, 600)
        );

        fx.viewer.draw();
        let expected = Viewport::from_surface(400, 300);
        assert_eq!(fx.viewer.camera().viewport(), expected);
        let params = handles.last_params.borrow().unwrap();
        assert_eq!(params.viewport, expected);
    }

    #[test]
    fn zero_area_container_clamps_without_panicking() {
        let mut fx = fixture(640, 480);
        fx.size.set((0, 0));
        fx.viewer.handle_resize();
        let expected = Viewport::new(0, 0, 1, 1);
        assert_eq!(fx.viewer.camera().viewport(), expected);
        fx.viewer.draw();
    }

    #[test]
    fn mouse_drag_orbits_during_animation() {
        let mut fx = fixture(800, 600);
        fx.viewer.animate();
        let before = fx.viewer.camera().position;

        fx.viewer
            .handle_input(InputEvent::Pointer(PointerEvent::Moved {
                x: 0.0,
                y: 0.0,
            }));
        fx.viewer
            .handle_input(InputEvent::Pointer(PointerEvent::Button {
                button: crate::input::PointerButton::Primary,
                pressed: true,
            }));
        fx.viewer
            .handle_input(InputEvent::Pointer(PointerEvent::Moved {
                x: 25.0,
                y: 0.0,
            }));
        fx.viewer.on_frame();

        assert_ne!(fx.viewer.camera().position, before);
    }

    #[test]
    fn clear_empties_the_scene_and_releases_each_object_once() {
        let mut fx = fixture(800, 600);
        let mut release_counters = Vec::new();
        for id in [1, 2, 3] {
            let (object, handles) = probe(id);
            fx.viewer.add(object);
            release_counters.push(handles.releases);
        }

        fx.viewer.clear();
        assert_eq!(fx.viewer.stats().render_object_count, 0);
        for releases in &release_counters {
            assert_eq!(releases.get(), 1);
        }
    }

    #[test]
    fn add_then_remove_leaves_scene_empty() {
        let mut fx = fixture(800, 600);
        let (object, handles) = probe(9);
        let id = object.id();
        fx.viewer.add(object);

        assert!(fx.viewer.remove(id));
        assert_eq!(handles.releases.get(), 1);
        assert_eq!(fx.viewer.stats().render_object_count, 0);
        // Removing again: silent no-op.
        assert!(!fx.viewer.remove(id));
    }

    #[test]
    fn dispose_tears_down_input_controls_renderer_once_each() {
        let mut fx = fixture(800, 600);
        let (object, handles) = probe(1);
        fx.viewer.add(object);

        fx.viewer.dispose();
        assert!(fx.viewer.input.is_disposed());
        assert!(fx.viewer.input.pointer.is_empty());
        assert!(fx.viewer.input.resize.is_empty());
        assert!(fx.viewer.controls.is_disposed());
        assert!(fx.viewer.renderer.is_disposed());
        assert_eq!(handles.releases.get(), 1);
    }

    #[test]
    fn stats_proxy_reflects_renderer_counters() {
        let mut fx = fixture(800, 600);
        let (a, _ha) = probe(1);
        let (b, _hb) = probe(2);
        fx.viewer.add(a);
        fx.viewer.add(b);

        fx.viewer.draw();
        let stats = fx.viewer.stats();
        assert_eq!(stats.render_object_count, 2);
        assert_eq!(stats.frame_count, 1);
        assert_eq!(stats.draw_call_count, 2);
    }
}
