//! # Graphics Module
//!
//! Everything between the scene description and the pixels on screen.
//!
//! - **Camera System** ([`camera`]) - Orbit camera and its mouse controller
//! - **Geometry** ([`geometry`]) - Box, sphere, torus and torus knot generators
//! - **Scene Management** ([`scene`]) - Shape nodes, groups, lights and the tick
//! - **Picking** ([`picking`]) - Screen rays and ray/mesh intersection
//! - **Gizmos** ([`gizmos`]) - Line-drawn debug helpers
//! - **Rendering Pipeline** ([`rendering`]) - Render engine, pipelines and shaders
//! - **Resource Management** ([`resources`]) - Materials, global uniforms, depth texture
//!
//! ```no_run
//! use shapes3d::{composer, ViewportConfig};
//!
//! let config = ViewportConfig::default();
//! let mut scene = composer::compose(config.camera_manager(1.5));
//! scene.mount();
//! ```

pub mod camera;
pub mod geometry;
pub mod gizmos;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
