pub mod camera_controller;
pub mod manager;
pub mod orbit_camera;
pub mod uniform;

pub use camera_controller::CameraController;
pub use manager::CameraManager;
pub use orbit_camera::OrbitCamera;
pub use uniform::{Camera, CameraUniform};
