use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Mouse orbit controls.
///
/// Left drag rotates around the target, right drag (or shift + left drag)
/// pans it and the wheel zooms. Button state comes from window events since
/// raw device buttons are not reported on every platform.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_left_pressed: bool,
    is_right_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_shift_held: false,
            is_left_pressed: false,
            is_right_pressed: false,
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.is_left_pressed = pressed,
            MouseButton::Right => self.is_right_pressed = pressed,
            _ => (),
        }
    }

    /// Forgets held buttons, e.g. when the UI takes the mouse
    pub fn release_buttons(&mut self) {
        self.is_left_pressed = false;
        self.is_right_pressed = false;
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::MouseWheel { delta } => {
                self.zoom(delta, camera);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.drag(*delta, camera) {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    pub fn zoom(&self, delta: &MouseScrollDelta, camera: &mut OrbitCamera) {
        let scroll_amount = -match delta {
            MouseScrollDelta::LineDelta(_, scroll) => *scroll,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                *scroll as f32 * 0.1
            }
        };
        camera.add_distance(scroll_amount * self.zoom_speed);
    }

    /// Applies a mouse motion to the camera, returning whether it moved
    pub fn drag(&self, delta: (f64, f64), camera: &mut OrbitCamera) -> bool {
        let (dx, dy) = (delta.0 as f32, delta.1 as f32);
        if self.is_panning() {
            camera.pan((-dx * self.pan_speed, dy * self.pan_speed));
            true
        } else if self.is_rotating() {
            camera.add_yaw(-dx * self.rotate_speed);
            camera.add_pitch(dy * self.rotate_speed);
            true
        } else {
            false
        }
    }

    /// Tracks the shift keys; shift turns a left drag into a pan
    pub fn process_keyed_events(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight) = event.physical_key {
            self.set_shift_held(event.state == ElementState::Pressed);
        }
    }

    pub fn set_shift_held(&mut self, held: bool) {
        self.is_shift_held = held;
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_right_pressed || (self.is_left_pressed && self.is_shift_held)
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.is_left_pressed && !self.is_shift_held
    }

    /// Adjust panning sensitivity
    pub fn set_pan_speed(&mut self, speed: f32) {
        self.pan_speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::looking_at([0.0, 0.0, 7.0], [0.0; 3], 1.0)
    }

    #[test]
    fn test_motion_without_buttons_is_ignored() {
        let controller = CameraController::new(0.01, 1.0);
        let mut camera = camera();
        assert!(!controller.drag((10.0, 5.0), &mut camera));
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_left_drag_rotates() {
        let mut controller = CameraController::new(0.01, 1.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.is_rotating());

        let mut camera = camera();
        assert!(controller.drag((10.0, 0.0), &mut camera));
        assert!((camera.yaw + 0.1).abs() < 1e-6);
        assert_eq!(camera.target, cgmath::Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_right_drag_pans() {
        let mut controller = CameraController::new(0.01, 1.0);
        controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert!(controller.is_panning());

        let mut camera = camera();
        controller.drag((10.0, 0.0), &mut camera);
        assert_eq!(camera.yaw, 0.0);
        assert!(camera.target.x < 0.0);

        controller.release_buttons();
        assert!(!controller.is_panning());
    }

    #[test]
    fn test_shift_left_drag_pans() {
        let mut controller = CameraController::new(0.01, 1.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.set_shift_held(true);
        assert!(controller.is_panning());
        assert!(!controller.is_rotating());

        let mut camera = camera();
        controller.drag((0.0, 10.0), &mut camera);
        assert_eq!(camera.pitch, 0.0);
        assert!(camera.target.y > 0.0);

        controller.set_shift_held(false);
        assert!(controller.is_rotating());
    }

    #[test]
    fn test_wheel_zooms_in() {
        let controller = CameraController::new(0.01, 1.0);
        let mut camera = camera();
        controller.zoom(&MouseScrollDelta::LineDelta(0.0, 1.0), &mut camera);
        assert!(camera.distance < 7.0);
    }
}
