//! Input handling: event types, the observable event streams, and the
//! subscription primitive they are built on.

/// Platform-agnostic input events.
pub mod event;
/// Subscribable event streams.
pub mod observer;
/// Observer-registration subject.
pub mod subject;

pub use event::{
    InputEvent, PointerButton, PointerEvent, ResizeEvent, WheelEvent,
};
pub use observer::InputObserver;
pub use subject::{Delivery, Subject, SubscriptionHandle};
