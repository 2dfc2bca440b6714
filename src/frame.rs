//! Frame scheduling: the injectable "run on next frame" primitive.

use std::cell::Cell;
use std::rc::Rc;

/// Host-provided "next animation frame" primitive.
///
/// The viewer never busy-loops or blocks: every `schedule_frame` call
/// asks the host to deliver exactly one
/// [`Viewer::on_frame`](crate::viewer::Viewer::on_frame) callback at
/// its next frame boundary. The windowed host maps this onto
/// `Window::request_redraw`; tests use [`CountingScheduler`] and pump
/// frames by hand.
pub trait FrameScheduler {
    /// Request one frame callback.
    fn schedule_frame(&mut self);
}

/// Cloneable view of how many frames a [`CountingScheduler`] was asked
/// to schedule.
#[derive(Debug, Clone, Default)]
pub struct FrameCounter(Rc<Cell<u64>>);

impl FrameCounter {
    /// Total `schedule_frame` calls observed so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.0.get()
    }
}

/// Deterministic scheduler with no frame clock.
///
/// Records every request in a shared [`FrameCounter`]; the embedder
/// (or test) decides when to deliver the corresponding
/// [`Viewer::on_frame`](crate::viewer::Viewer::on_frame) calls.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    counter: FrameCounter,
}

impl CountingScheduler {
    /// Create a scheduler with a zeroed counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle onto the request counter, valid after the scheduler is
    /// handed to a viewer.
    #[must_use]
    pub fn counter(&self) -> FrameCounter {
        self.counter.clone()
    }
}

impl FrameScheduler for CountingScheduler {
    fn schedule_frame(&mut self) {
        self.counter.0.set(self.counter.0.get() + 1);
    }
}
