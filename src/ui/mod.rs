//! # User Interface Module
//!
//! Dear ImGui overlay for the viewer.
//!
//! ## Key Components
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu, input capture
//! - [`light_panel`] - The collapsed light color/intensity panel
//!
//! ## Input Handling
//!
//! When the UI wants the mouse, pointer picking and camera controls are
//! skipped so a drag on the panel never orbits the camera.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::light_panel;
