//! # Gizmo System
//!
//! Gizmos are visual aids drawn as line lists on top of the scene. The
//! [`GizmoManager`] updates every registered [`Gizmo`] after the scene tick
//! and uploads their lines for the line pipeline.
//!
//! ## Key Components
//!
//! - [`Gizmo`] - Base trait for all gizmo implementations
//! - [`GizmoManager`] - Manages multiple gizmo instances
//! - [`DirectionalLightHelper`] - Shows the directional light and its target
//!
//! ## Usage
//!
//! ```no_run
//! use shapes3d::color::Color;
//! use shapes3d::gfx::gizmos::{DirectionalLightHelper, GizmoManager};
//!
//! let mut gizmo_manager = GizmoManager::new();
//! gizmo_manager.add_gizmo("light", Box::new(DirectionalLightHelper::new(0.5, Color::WHITE)));
//! ```

pub mod light_helper;
pub mod manager;
pub mod traits;

// Re-export main types
pub use light_helper::DirectionalLightHelper;
pub use manager::GizmoManager;
pub use traits::Gizmo;
