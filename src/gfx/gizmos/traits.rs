//! # Gizmo Traits
//!
//! The interface every debug helper implements to be drawn by the
//! [`GizmoManager`](super::GizmoManager).

use crate::gfx::scene::{LineVertex, Scene};

/// A visual aid drawn as colored line segments.
///
/// ## Lifecycle
///
/// 1. **Update** - Called every frame after the scene update, rebuilding the
///    line geometry from the live scene state
/// 2. **Draw** - [`Gizmo::line_vertices`] is uploaded and drawn as a line list
///
/// ## Examples
///
/// ```no_run
/// use shapes3d::gfx::gizmos::Gizmo;
/// use shapes3d::gfx::scene::{LineVertex, Scene};
///
/// struct OriginGizmo {
///     enabled: bool,
///     lines: Vec<LineVertex>,
/// }
///
/// impl Gizmo for OriginGizmo {
///     fn update(&mut self, _scene: &Scene) {
///         self.lines = vec![
///             LineVertex::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
///             LineVertex::new([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
///         ];
///     }
///
///     fn line_vertices(&self) -> &[LineVertex] { &self.lines }
///     fn name(&self) -> &str { "Origin" }
///     fn is_enabled(&self) -> bool { self.enabled }
///     fn set_enabled(&mut self, enabled: bool) { self.enabled = enabled; }
/// }
/// ```
pub trait Gizmo {
    /// Rebuilds the gizmo for the current frame.
    fn update(&mut self, scene: &Scene);

    /// Line list vertices, two per segment
    fn line_vertices(&self) -> &[LineVertex];

    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Context-sensitive visibility, defaulting to the enabled flag
    fn should_be_visible(&self, _scene: &Scene) -> bool {
        self.is_enabled()
    }

    /// Lower priorities are drawn first
    fn get_priority(&self) -> i32 {
        0
    }
}
