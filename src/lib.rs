// src/lib.rs
//! shapes3d
//!
//! An animated scene of 3D primitives rendered with wgpu: a group of spinning
//! cubes, a hoverable wireframe sphere, a torus and a wobbling torus knot,
//! with orbit controls and a live light panel.

pub mod app;
pub mod clock;
pub mod color;
pub mod composer;
pub mod config;
pub mod error;
pub mod gfx;
pub mod interaction;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ShapesApp;
pub use config::ViewportConfig;
pub use error::{Error, Result};

/// Opens the stock viewport and runs it until the window closes
pub fn run() -> Result<()> {
    ShapesApp::new(ViewportConfig::default())?.run()
}
