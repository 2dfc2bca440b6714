//! Standalone viewer window backed by winit.
//!
//! The host owns the platform pieces the core viewer abstracts over:
//! the window (container), the wgpu surface, and the frame clock
//! (`Window::request_redraw` ↔ `RedrawRequested`).
//!
//! ```no_run
//! # use molview::host::WindowViewer;
//! WindowViewer::builder()
//!     .with_title("molview")
//!     .build()
//!     .run()?;
//! # Ok::<(), molview::MolviewError>(())
//! ```

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::error::MolviewError;
use crate::frame::FrameScheduler;
use crate::gpu::{ContextAttributes, RenderContext};
use crate::input::{InputEvent, PointerButton, PointerEvent, WheelEvent};
use crate::options::ViewerOptions;
use crate::viewer::{RenderSurface, Viewer};

// ── Surface and scheduler ────────────────────────────────────────────────

/// A winit window paired with the wgpu context drawn into it.
///
/// Context acquisition happens at construction and is fatal on
/// failure: no partially usable surface is returned.
pub struct WindowSurface {
    window: Arc<Window>,
    context: RenderContext,
}

impl WindowSurface {
    /// Acquire a GPU context for `window`.
    ///
    /// # Errors
    ///
    /// Returns [`MolviewError::Context`] when no compatible adapter or
    /// device can be obtained.
    pub fn new(
        window: Arc<Window>,
        attributes: ContextAttributes,
    ) -> Result<Self, MolviewError> {
        let inner = window.inner_size();
        let context = pollster::block_on(RenderContext::new(
            Arc::clone(&window),
            (inner.width, inner.height),
            attributes,
        ))?;
        Ok(Self { window, context })
    }

    /// The underlying GPU context, for the scene-construction side.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }
}

impl RenderSurface for WindowSurface {
    fn container_size(&self) -> (u32, u32) {
        let inner = self.window.inner_size();
        (inner.width, inner.height)
    }

    fn configure(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }
}

/// Maps frame requests onto the window's redraw mechanism.
pub struct WindowScheduler {
    window: Arc<Window>,
}

impl WindowScheduler {
    /// Schedule frames through `window`.
    #[must_use]
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl FrameScheduler for WindowScheduler {
    fn schedule_frame(&mut self) {
        self.window.request_redraw();
    }
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`WindowViewer`].
pub struct WindowViewerBuilder {
    title: String,
    options: Option<ViewerOptions>,
}

impl WindowViewerBuilder {
    fn new() -> Self {
        Self {
            title: "molview".into(),
            options: None,
        }
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Override the default viewer options.
    #[must_use]
    pub fn with_options(mut self, options: ViewerOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Consume the builder and produce a [`WindowViewer`].
    #[must_use]
    pub fn build(self) -> WindowViewer {
        WindowViewer {
            title: self.title,
            options: self.options.unwrap_or_default(),
        }
    }
}

// ── WindowViewer ─────────────────────────────────────────────────────────

/// A standalone window running a [`Viewer`] in continuous animation.
///
/// Construct via [`WindowViewer::builder`], then call
/// [`run`](Self::run) to enter the event loop.
pub struct WindowViewer {
    title: String,
    options: ViewerOptions,
}

impl WindowViewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> WindowViewerBuilder {
        WindowViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window
    /// is closed.
    ///
    /// # Errors
    ///
    /// Returns [`MolviewError::Host`] when the event loop cannot be
    /// created or fails while running.
    pub fn run(self) -> Result<(), MolviewError> {
        let event_loop =
            EventLoop::new().map_err(|e| MolviewError::Host(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = WindowApp {
            window: None,
            viewer: None,
            title: self.title,
            options: self.options,
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| MolviewError::Host(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct WindowApp {
    window: Option<Arc<Window>>,
    viewer: Option<Viewer>,
    title: String,
    options: ViewerOptions,
}

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = match WindowSurface::new(
            Arc::clone(&window),
            ContextAttributes::default(),
        ) {
            Ok(s) => s,
            Err(e) => {
                log::error!("failed to acquire GPU context: {e}");
                event_loop.exit();
                return;
            }
        };
        let scheduler = WindowScheduler::new(Arc::clone(&window));

        let mut viewer = match Viewer::new(
            Box::new(surface),
            Box::new(scheduler),
            &self.options,
        ) {
            Ok(v) => v,
            Err(e) => {
                log::error!("failed to initialize viewer: {e}");
                event_loop.exit();
                return;
            }
        };

        viewer.animate();
        self.window = Some(window);
        self.viewer = Some(viewer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            // Dispose before exiting so no further callback can touch
            // freed resources.
            if let Some(mut viewer) = self.viewer.take() {
                viewer.dispose();
            }
            event_loop.exit();
            return;
        }

        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        match event {
            WindowEvent::RedrawRequested => viewer.on_frame(),

            WindowEvent::Resized(_) => {
                viewer.handle_input(InputEvent::Resize);
            }

            WindowEvent::CursorMoved { position, .. } => {
                viewer.handle_input(InputEvent::Pointer(
                    PointerEvent::Moved {
                        x: position.x as f32,
                        y: position.y as f32,
                    },
                ));
            }

            WindowEvent::MouseInput { button, state, .. } => {
                viewer.handle_input(InputEvent::Pointer(
                    PointerEvent::Button {
                        button: PointerButton::from(button),
                        pressed: state == ElementState::Pressed,
                    },
                ));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                viewer.handle_input(InputEvent::Wheel(WheelEvent { delta }));
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                viewer.handle_input(InputEvent::Pointer(
                    PointerEvent::Modifiers {
                        shift: modifiers.state().shift_key(),
                    },
                ));
            }

            _ => (),
        }
    }
}
