/// Platform-agnostic input events.
///
/// These are fed into an [`InputObserver`](super::InputObserver), which
/// routes each event onto its pointer, wheel, or resize stream.
///
/// # Example
///
/// ```ignore
/// viewer.handle_input(InputEvent::Pointer(PointerEvent::Moved {
///     x: 100.0,
///     y: 200.0,
/// }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A pointer (mouse/touch) event.
    Pointer(PointerEvent),
    /// A scroll wheel event.
    Wheel(WheelEvent),
    /// The host container changed size. Carries no dimensions:
    /// observers re-measure the container themselves.
    Resize,
}

/// Pointer movement, button, and modifier changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to an absolute screen position.
    Moved {
        /// Horizontal position in device pixels.
        x: f32,
        /// Vertical position in device pixels.
        y: f32,
    },
    /// Pointer button pressed or released.
    Button {
        /// Which button changed.
        button: PointerButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Modifier key state changed.
    Modifiers {
        /// Whether the shift key is held.
        shift: bool,
    },
}

/// Scroll wheel motion (positive = zoom in).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Scroll amount (positive = zoom in, negative = zoom out).
    pub delta: f32,
}

/// Marker delivered on the resize stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent;

/// Platform-agnostic pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (left) button, used for orbit drags.
    Primary,
    /// Secondary (right) button, used for pan drags.
    Secondary,
    /// Middle button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for PointerButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Secondary,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Primary,
        }
    }
}
