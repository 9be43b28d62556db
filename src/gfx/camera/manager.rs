//! Camera state owned by the scene
//!
//! Pairs the orbit camera with the controller that moves it and keeps the
//! uploaded uniform in step with the camera after every change.

use winit::{
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton},
    window::Window,
};

use super::{
    camera_controller::CameraController,
    orbit_camera::OrbitCamera,
    uniform::{Camera, CameraUniform},
};

pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Raw mouse motion and wheel input; orbiting only happens while a
    /// button tracked by [`Self::handle_mouse_button`] is held
    pub fn handle_device_event(&mut self, event: &DeviceEvent, window: &Window) {
        self.controller
            .process_events(event, window, &mut self.camera);
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.controller.process_mouse_button(button, state);
    }

    pub fn handle_key(&mut self, event: &KeyEvent) {
        self.controller.process_keyed_events(event);
    }

    /// Drops any drag in progress, e.g. when a release lands on the UI
    pub fn release_buttons(&mut self) {
        self.controller.release_buttons();
    }

    /// Follows the surface aspect; zero sized surfaces are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize_projection(width, height);
        self.update();
    }

    pub fn update(&mut self) {
        self.camera.update_view_proj();
    }

    pub fn uniform(&self) -> CameraUniform {
        self.camera.uniform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> CameraManager {
        let camera = OrbitCamera::looking_at([0.0, 0.0, 7.0], [0.0; 3], 1.0);
        CameraManager::new(camera, CameraController::new(0.005, 0.1))
    }

    #[test]
    fn test_resize_refreshes_uniform() {
        let mut manager = manager();
        let before = manager.uniform();

        manager.resize(1600, 800);
        assert!((manager.camera.aspect - 2.0).abs() < 1e-6);
        assert_ne!(manager.uniform().view_proj, before.view_proj);
        assert_eq!(manager.uniform(), manager.camera.to_uniform());
    }

    #[test]
    fn test_zero_sized_resize_keeps_aspect() {
        let mut manager = manager();
        manager.resize(0, 600);
        assert_eq!(manager.camera.aspect, 1.0);
    }
}
