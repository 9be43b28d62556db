//! Viewport configuration
//!
//! Window and camera settings the application starts with. Every field has a
//! default matching the stock scene and can be overridden with a `with_*`
//! builder before calling [`ShapesApp::new`](crate::app::ShapesApp::new).

use cgmath::Deg;

use crate::{
    color::Color,
    gfx::camera::{CameraController, CameraManager, OrbitCamera},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    pub title: String,
    /// Window size in logical pixels
    pub size: (u32, u32),
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub znear: f32,
    pub zfar: f32,
    pub clear_color: Color,
    pub vsync: bool,
    pub font_size: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            title: "shapes3d".to_string(),
            size: (1200, 800),
            camera_position: [0.0, 0.0, 7.0],
            camera_target: [0.0, 0.0, 0.0],
            fov: 100.0,
            znear: 0.1,
            zfar: 1000.0,
            clear_color: Color::BLACK,
            vsync: true,
            font_size: 13.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }
}

impl ViewportConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_camera_position(mut self, position: [f32; 3]) -> Self {
        self.camera_position = position;
        self
    }

    pub fn with_camera_target(mut self, target: [f32; 3]) -> Self {
        self.camera_target = target;
        self
    }

    pub fn with_fov(mut self, degrees: f32) -> Self {
        self.fov = degrees;
        self
    }

    pub fn with_clip_planes(mut self, znear: f32, zfar: f32) -> Self {
        self.znear = znear;
        self.zfar = zfar;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Mouse sensitivity of the orbit controls
    pub fn with_control_speeds(mut self, rotate_speed: f32, zoom_speed: f32) -> Self {
        self.rotate_speed = rotate_speed;
        self.zoom_speed = zoom_speed;
        self
    }

    /// Builds the camera and its controller for a surface of the given aspect
    pub fn camera_manager(&self, aspect: f32) -> CameraManager {
        let camera = OrbitCamera::looking_at(self.camera_position, self.camera_target, aspect)
            .with_fovy(Deg(self.fov))
            .with_clip_planes(self.znear, self.zfar);
        let controller = CameraController::new(self.rotate_speed, self.zoom_speed);
        CameraManager::new(camera, controller)
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.clear_color.to_array();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Rad, Vector3};

    #[test]
    fn test_default_camera_matches_stock_viewport() {
        let config = ViewportConfig::default();
        let manager = config.camera_manager(1.5);
        let camera = &manager.camera;

        assert!((camera.eye - Vector3::from(config.camera_position)).magnitude() < 1e-4);
        assert_eq!(camera.target, Vector3::new(0.0, 0.0, 0.0));
        assert!((Rad::from(Deg(100.0_f32)).0 - camera.fovy.0).abs() < 1e-6);
        assert_eq!(camera.znear, 0.1);
        assert_eq!(camera.zfar, 1000.0);
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = ViewportConfig::default()
            .with_title("demo")
            .with_size(640, 480)
            .with_fov(60.0)
            .with_vsync(false)
            .with_clear_color(Color::WHITE);

        assert_eq!(config.title, "demo");
        assert_eq!(config.size, (640, 480));
        assert_eq!(config.fov, 60.0);
        assert!(!config.vsync);
        assert_eq!(config.clear_color().r, 1.0);
        assert_eq!(config.camera_position, [0.0, 0.0, 7.0]);
    }
}
