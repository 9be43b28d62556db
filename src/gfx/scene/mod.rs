//! # Scene Management Module
//!
//! The scene graph of the demo: shape nodes with their transforms and
//! materials, the groups that offset them, and the lights.
//!
//! ## Key Components
//!
//! - [`Scene`] - Arena of groups and nodes plus lights, camera and light controls
//! - [`ShapeNode`] - One animated primitive (cube, sphere, torus or torus knot)
//! - [`Light`] / [`LightControls`] - Directional and ambient lights and their live parameters
//! - [`Vertex3D`] - Vertex layout shared by every mesh
//!
//! ## Usage
//!
//! ```no_run
//! use shapes3d::color::Color;
//! use shapes3d::gfx::camera::{CameraController, CameraManager, OrbitCamera};
//! use shapes3d::gfx::scene::{Scene, ShapeNode};
//!
//! let camera = OrbitCamera::looking_at([0.0, 0.0, 7.0], [0.0; 3], 1.0);
//! let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(0.01, 1.0)));
//! scene.add_node(ShapeNode::cube([0.0; 3], Color::WHITE, [1.0; 3]));
//! scene.mount();
//! ```

pub mod light;
pub mod mesh;
pub mod node;
pub mod scene;
pub mod transform;
pub mod vertex;

// Re-export main types
pub use light::{Light, LightControls};
pub use mesh::{DrawMesh, Mesh};
pub use node::{GroupId, InteractionState, NodeId, PointerEvent, Propagation, ShapeKind, ShapeNode};
pub use scene::{Group, Scene};
pub use transform::Transform;
pub use vertex::{LineVertex, Vertex3D};
