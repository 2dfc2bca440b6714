//! Trackball camera controls: orbit, pan, and zoom with damping.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};

use crate::camera::{Camera, Viewport};
use crate::input::{
    Delivery, InputObserver, PointerButton, PointerEvent, WheelEvent,
};
use crate::options::ControlOptions;

/// Closest allowed orbit distance.
const MIN_DISTANCE: f32 = 1.0;
/// Farthest allowed orbit distance.
const MAX_DISTANCE: f32 = 5000.0;
/// Velocities below this magnitude are treated as rest.
const MOTION_EPSILON: f32 = 1e-6;

/// Accumulates raw input deltas between frames.
///
/// Shared (via `Rc`) between the stream subscriptions and the controls;
/// drained once per [`TrackballControls::update`].
#[derive(Debug, Default)]
struct InputSink {
    last_pointer: Option<Vec2>,
    orbit_drag: bool,
    pan_drag: bool,
    shift: bool,
    rotate: Vec2,
    pan: Vec2,
    zoom: f32,
}

impl InputSink {
    fn on_pointer(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Moved { x, y } => {
                let position = Vec2::new(x, y);
                if let Some(last) = self.last_pointer {
                    let delta = position - last;
                    if self.orbit_drag && !self.shift {
                        self.rotate += delta;
                    } else if self.pan_drag || (self.orbit_drag && self.shift)
                    {
                        self.pan += delta;
                    }
                }
                self.last_pointer = Some(position);
            }
            PointerEvent::Button { button, pressed } => match button {
                PointerButton::Primary => self.orbit_drag = pressed,
                PointerButton::Secondary | PointerButton::Middle => {
                    self.pan_drag = pressed;
                }
            },
            PointerEvent::Modifiers { shift } => self.shift = shift,
        }
    }

    fn on_wheel(&mut self, event: &WheelEvent) {
        self.zoom += event.delta;
    }

    /// Drain the accumulated deltas, leaving drag state intact.
    fn take(&mut self) -> (Vec2, Vec2, f32) {
        let taken = (self.rotate, self.pan, self.zoom);
        self.rotate = Vec2::ZERO;
        self.pan = Vec2::ZERO;
        self.zoom = 0.0;
        taken
    }
}

/// Translates input events into orbital camera motion.
///
/// The orbit state (orientation quaternion, focus point, distance) is
/// derived from the camera at construction. Input deltas accumulate in
/// a sink between frames; [`update`](Self::update) drains the sink into
/// damped velocities and applies one integration step to the camera,
/// once per frame, before the camera recomputes its matrices.
pub struct TrackballControls {
    options: ControlOptions,
    viewport: Viewport,
    orientation: Quat,
    focus: Vec3,
    distance: f32,
    rotate_velocity: Vec2,
    pan_velocity: Vec2,
    zoom_velocity: f32,
    sink: Option<Rc<RefCell<InputSink>>>,
    disposed: bool,
}

impl TrackballControls {
    /// Subscribe to `input`'s pointer and wheel streams and derive the
    /// initial orbit state from `camera`.
    pub fn new(
        input: &mut InputObserver,
        camera: &Camera,
        options: ControlOptions,
    ) -> Self {
        let sink = Rc::new(RefCell::new(InputSink::default()));

        let weak = Rc::downgrade(&sink);
        let _ = input.pointer.subscribe_with(move |event| {
            weak.upgrade().map_or(Delivery::Detach, |sink| {
                sink.borrow_mut().on_pointer(event);
                Delivery::Continue
            })
        });
        let weak = Rc::downgrade(&sink);
        let _ = input.wheel.subscribe_with(move |event| {
            weak.upgrade().map_or(Delivery::Detach, |sink| {
                sink.borrow_mut().on_wheel(event);
                Delivery::Continue
            })
        });

        let offset = camera.position - camera.target;
        Self {
            options,
            viewport: Viewport::default(),
            orientation: Quat::from_rotation_arc(
                Vec3::Z,
                offset.normalize_or(Vec3::Z),
            ),
            focus: camera.target,
            distance: offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE),
            rotate_velocity: Vec2::ZERO,
            pan_velocity: Vec2::ZERO,
            zoom_velocity: 0.0,
            sink: Some(sink),
            disposed: false,
        }
    }

    /// Apply one integration step of the accumulated input deltas to
    /// the camera. Called once per frame, before `camera.update()`.
    pub fn update(&mut self, camera: &mut Camera) {
        debug_assert!(!self.disposed, "controls updated after dispose");
        let Some(sink) = &self.sink else { return };
        let (rotate, pan, zoom) = sink.borrow_mut().take();

        let damping = self.options.damping.clamp(0.0, 0.95);
        self.rotate_velocity = rotate + self.rotate_velocity * damping;
        self.pan_velocity = pan + self.pan_velocity * damping;
        self.zoom_velocity = zoom + self.zoom_velocity * damping;

        if self.rotate_velocity.length_squared() > MOTION_EPSILON {
            self.apply_rotate(self.rotate_velocity);
        }
        if self.pan_velocity.length_squared() > MOTION_EPSILON {
            self.apply_pan(self.pan_velocity, camera.fovy());
        }
        if self.zoom_velocity.abs() > MOTION_EPSILON {
            self.apply_zoom(self.zoom_velocity);
        }

        self.apply_to_camera(camera);
    }

    /// Recenter on `center` and back the camera off far enough that a
    /// sphere of `radius` fits the view.
    pub fn fit_to_sphere(
        &mut self,
        camera: &mut Camera,
        center: Vec3,
        radius: f32,
    ) {
        self.focus = center;
        if radius > 0.0 {
            let fovy_rad = camera.fovy().to_radians();
            let fit = radius / (fovy_rad / 2.0).tan();
            // 1.5x padding for a comfortable framing
            self.distance = (fit * 1.5).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
        self.apply_to_camera(camera);
    }

    /// The controls' viewport copy, used for screen-to-world pan math.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Overwrite the viewport copy. Called by the owning viewer on
    /// resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Detach from the input streams.
    ///
    /// The shared input sink is dropped here; subscriptions observe
    /// that on their next delivery and detach themselves, so stale
    /// events mutate nothing. No further camera motion occurs.
    pub fn dispose(&mut self) {
        debug_assert!(!self.disposed, "controls disposed twice");
        self.sink = None;
        self.disposed = true;
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn apply_rotate(&mut self, delta: Vec2) {
        let speed = self.options.rotate_speed;

        // Horizontal rotation around the camera's up vector
        let up = self.orientation * Vec3::Y;
        let horizontal = Quat::from_axis_angle(up, -delta.x * speed);
        self.orientation = horizontal * self.orientation;

        // Vertical rotation around the camera's right vector
        let right = self.orientation * Vec3::X;
        let vertical = Quat::from_axis_angle(right, -delta.y * speed);
        self.orientation = (vertical * self.orientation).normalize();
    }

    fn apply_pan(&mut self, delta: Vec2, fovy_degrees: f32) {
        // Screen pixels to world units at the focus distance.
        let height = self.viewport.height.max(1) as f32;
        let world_per_pixel = 2.0
            * self.distance
            * (fovy_degrees.to_radians() / 2.0).tan()
            / height;
        let step = world_per_pixel * self.options.pan_speed;

        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        self.focus += right * (-delta.x * step) + up * (delta.y * step);
    }

    fn apply_zoom(&mut self, delta: f32) {
        self.distance = (self.distance
            * (1.0 - delta * self.options.zoom_speed))
            .clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    fn apply_to_camera(&self, camera: &mut Camera) {
        camera.position =
            self.focus + self.orientation * Vec3::Z * self.distance;
        camera.target = self.focus;
        camera.up = self.orientation * Vec3::Y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use crate::options::CameraOptions;

    fn setup() -> (InputObserver, Camera, TrackballControls) {
        let mut input = InputObserver::new();
        let mut camera = Camera::new(&CameraOptions::default()).unwrap();
        camera.set_viewport(Viewport::from_surface(800, 600));
        camera.update();
        let mut controls = TrackballControls::new(
            &mut input,
            &camera,
            ControlOptions::default(),
        );
        controls.set_viewport(camera.viewport());
        (input, camera, controls)
    }

    fn drag(input: &mut InputObserver, from: (f32, f32), to: (f32, f32)) {
        input.notify(InputEvent::Pointer(PointerEvent::Moved {
            x: from.0,
            y: from.1,
        }));
        input.notify(InputEvent::Pointer(PointerEvent::Button {
            button: PointerButton::Primary,
            pressed: true,
        }));
        input.notify(InputEvent::Pointer(PointerEvent::Moved {
            x: to.0,
            y: to.1,
        }));
        input.notify(InputEvent::Pointer(PointerEvent::Button {
            button: PointerButton::Primary,
            pressed: false,
        }));
    }

    #[test]
    fn wheel_zoom_moves_camera_closer() {
        let (mut input, mut camera, mut controls) = setup();
        let initial = (camera.position - camera.target).length();
        input.notify(InputEvent::Wheel(WheelEvent { delta: 2.0 }));
        controls.update(&mut camera);
        let zoomed = (camera.position - camera.target).length();
        assert!(zoomed < initial, "expected {zoomed} < {initial}");
    }

    #[test]
    fn orbit_drag_rotates_around_focus() {
        let (mut input, mut camera, mut controls) = setup();
        drag(&mut input, (0.0, 0.0), (40.0, 0.0));
        controls.update(&mut camera);
        // Orbiting keeps the distance while the direction changes.
        let offset = camera.position - camera.target;
        assert!((offset.length() - 50.0).abs() < 1e-3);
        assert!(offset.x.abs() > 1e-3);
    }

    #[test]
    fn damping_decays_velocity_between_frames() {
        let (mut input, mut camera, mut controls) = setup();
        drag(&mut input, (0.0, 0.0), (40.0, 0.0));

        controls.update(&mut camera);
        let first = camera.position;
        controls.update(&mut camera);
        let second = camera.position;
        controls.update(&mut camera);
        let third = camera.position;

        let step1 = (second - first).length();
        let step2 = (third - second).length();
        assert!(step1 > 0.0);
        assert!(step2 < step1, "expected decay: {step2} < {step1}");
    }

    /// Pan the camera with a secondary-button drag of `pixels` and
    /// return how far the focus moved.
    fn pan_distance(viewport_height: u32, pixels: f32) -> f32 {
        let (mut input, mut camera, mut controls) = setup();
        controls.set_viewport(Viewport::from_surface(800, viewport_height));
        input.notify(InputEvent::Pointer(PointerEvent::Moved {
            x: 0.0,
            y: 0.0,
        }));
        input.notify(InputEvent::Pointer(PointerEvent::Button {
            button: PointerButton::Secondary,
            pressed: true,
        }));
        input.notify(InputEvent::Pointer(PointerEvent::Moved {
            x: 0.0,
            y: pixels,
        }));
        controls.update(&mut camera);
        (camera.target - Vec3::ZERO).length()
    }

    #[test]
    fn pan_step_scales_inversely_with_viewport_height() {
        let short_viewport_pan = pan_distance(200, 30.0);
        let tall_viewport_pan = pan_distance(2000, 30.0);
        assert!(short_viewport_pan > tall_viewport_pan);
    }

    #[test]
    fn dispose_detaches_subscriptions_lazily() {
        let (mut input, _camera, mut controls) = setup();
        assert_eq!(input.pointer.len(), 1);
        assert_eq!(input.wheel.len(), 1);

        controls.dispose();
        assert!(controls.is_disposed());

        // The next delivery observes the dropped sink and prunes.
        input.notify(InputEvent::Pointer(PointerEvent::Moved {
            x: 1.0,
            y: 1.0,
        }));
        input.notify(InputEvent::Wheel(WheelEvent { delta: 1.0 }));
        assert!(input.pointer.is_empty());
        assert!(input.wheel.is_empty());
    }

    #[test]
    fn fit_to_sphere_frames_the_bounds() {
        let (_input, mut camera, mut controls) = setup();
        let center = Vec3::new(10.0, -4.0, 2.0);
        controls.fit_to_sphere(&mut camera, center, 20.0);

        assert_eq!(camera.target, center);
        let distance = (camera.position - center).length();
        // Far enough to contain the sphere, close enough to fill the
        // view.
        assert!(distance > 20.0);
        assert!(distance < MAX_DISTANCE);
    }
}
