//! Converts raw device events into subscribable event streams.

use super::event::{InputEvent, PointerEvent, ResizeEvent, WheelEvent};
use super::subject::Subject;

/// Observable input streams for one viewer session.
///
/// The host feeds raw events through [`notify`](Self::notify); each
/// event is delivered on exactly one of the three streams, in handler
/// registration order. Consumers subscribe to the streams they care
/// about (the controls take pointer + wheel, the viewer takes resize).
pub struct InputObserver {
    /// Pointer movement, buttons, and modifiers.
    pub pointer: Subject<PointerEvent>,
    /// Scroll wheel motion.
    pub wheel: Subject<WheelEvent>,
    /// Container resize notifications.
    pub resize: Subject<ResizeEvent>,
    disposed: bool,
}

impl Default for InputObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl InputObserver {
    /// Create an observer with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pointer: Subject::new(),
            wheel: Subject::new(),
            resize: Subject::new(),
            disposed: false,
        }
    }

    /// Route one raw event onto its stream.
    ///
    /// Events arriving after [`dispose`](Self::dispose) are dropped.
    pub fn notify(&mut self, event: InputEvent) {
        debug_assert!(
            !self.disposed,
            "input observer notified after dispose"
        );
        if self.disposed {
            return;
        }
        match event {
            InputEvent::Pointer(e) => self.pointer.emit(&e),
            InputEvent::Wheel(e) => self.wheel.emit(&e),
            InputEvent::Resize => self.resize.emit(&ResizeEvent),
        }
    }

    /// Drop every subscription on every stream.
    pub fn dispose(&mut self) {
        self.pointer.clear();
        self.wheel.clear();
        self.resize.clear();
        self.disposed = true;
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn routes_events_to_their_stream() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut input = InputObserver::new();
        {
            let seen = Rc::clone(&seen);
            let _ = input
                .pointer
                .subscribe(move |_| seen.borrow_mut().push("pointer"));
        }
        {
            let seen = Rc::clone(&seen);
            let _ = input
                .wheel
                .subscribe(move |_| seen.borrow_mut().push("wheel"));
        }
        {
            let seen = Rc::clone(&seen);
            let _ = input
                .resize
                .subscribe(move |_| seen.borrow_mut().push("resize"));
        }

        input.notify(InputEvent::Wheel(WheelEvent { delta: 1.0 }));
        input.notify(InputEvent::Pointer(PointerEvent::Moved {
            x: 1.0,
            y: 2.0,
        }));
        input.notify(InputEvent::Resize);

        assert_eq!(*seen.borrow(), vec!["wheel", "pointer", "resize"]);
    }

    #[test]
    fn dispose_clears_all_streams() {
        let mut input = InputObserver::new();
        let _ = input.pointer.subscribe(|_| {});
        let _ = input.wheel.subscribe(|_| {});
        let _ = input.resize.subscribe(|_| {});
        input.dispose();
        assert!(input.pointer.is_empty());
        assert!(input.wheel.is_empty());
        assert!(input.resize.is_empty());
        assert!(input.is_disposed());
    }
}
