//! The fixed demo composition
//!
//! Four cubes in an offset group, a free cube, a hoverable sphere, a torus and
//! a wobbling torus knot, lit by one directional and one ambient light.

use crate::{
    color::Color,
    gfx::{
        camera::CameraManager,
        geometry::ShapeGeometry,
        gizmos::{DirectionalLightHelper, GizmoManager},
        scene::{Light, Scene, ShapeNode},
    },
};

pub const GROUP_OFFSET: [f32; 3] = [0.0, -1.0, 0.0];
pub const LIGHT_POSITION: [f32; 3] = [0.0, 0.0, 5.0];
pub const AMBIENT_INTENSITY: f32 = 0.1;
pub const LIGHT_HELPER_SIZE: f32 = 0.5;

const GREEN: Color = Color::from_hex(0x008000);
const BLUE: Color = Color::from_hex(0x0000ff);
const RED: Color = Color::from_hex(0xff0000);
const HOTPINK: Color = Color::from_hex(0xff69b4);
const ORANGE: Color = Color::from_hex(0xffa500);

const UNIT: [f32; 3] = [1.0, 1.0, 1.0];

/// Builds the demo scene around `camera_manager`
///
/// The scene is returned unmounted; nodes start animating once it is mounted.
pub fn compose(camera_manager: CameraManager) -> Scene {
    let mut scene = Scene::new(camera_manager);

    let directional = Light::directional(
        LIGHT_POSITION,
        scene.light_controls.color(),
        scene.light_controls.intensity(),
    );
    scene.add_light(directional);
    scene.add_light(Light::ambient(Color::WHITE, AMBIENT_INTENSITY));

    let group = scene.add_group("Group", GROUP_OFFSET);
    for (position, color, name) in [
        ([1.0, 0.0, 0.0], GREEN, "GreenCube"),
        ([-1.0, 0.0, 0.0], BLUE, "BlueCube"),
        ([-1.0, 2.0, 0.0], RED, "RedCube"),
        ([1.0, 2.0, 0.0], HOTPINK, "HotpinkCube"),
    ] {
        scene.add_node_to_group(group, ShapeNode::cube(position, color, UNIT).with_name(name));
    }

    scene.add_node(ShapeNode::cube([0.0; 3], ORANGE, UNIT).with_name("OrangeCube"));
    scene.add_node(ShapeNode::sphere([0.0; 3], 1.0, 30, 30));
    scene.add_node(ShapeNode::torus(
        [2.0, 0.0, 0.0],
        GREEN,
        ShapeGeometry::torus(0.8, 0.1, 30, 30),
    ));
    scene.add_node(ShapeNode::torus_knot(
        [0.0; 3],
        HOTPINK,
        ShapeGeometry::torus_knot(1.0, 0.1, 1000, 50),
    ));

    scene.enable_orbit_controls();
    scene
}

/// Debug helpers drawn on top of the composition
pub fn light_helpers() -> GizmoManager {
    let mut gizmos = GizmoManager::new();
    gizmos.add_gizmo(
        "directional_light",
        Box::new(DirectionalLightHelper::new(LIGHT_HELPER_SIZE, Color::WHITE)),
    );
    gizmos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FrameContext,
        gfx::{
            camera::{CameraController, OrbitCamera},
            resources::MaterialKind,
            scene::{NodeId, ShapeKind},
        },
    };
    use cgmath::{Vector4, Zero};

    fn composed() -> Scene {
        let camera = OrbitCamera::looking_at([0.0, 0.0, 7.0], [0.0; 3], 1.5);
        compose(CameraManager::new(camera, CameraController::new(0.005, 0.1)))
    }

    #[test]
    fn test_composition_counts() {
        let scene = composed();
        assert_eq!(scene.mesh_count(), 8);
        assert_eq!(scene.light_count(), 2);
        assert_eq!(scene.groups().len(), 1);
        assert!(scene.has_orbit_controls());
        assert!(!scene.is_mounted());
    }

    #[test]
    fn test_mount_order_and_kinds() {
        let scene = composed();
        let kinds: Vec<ShapeKind> = scene.nodes().iter().map(|node| node.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ShapeKind::Cube,
                ShapeKind::Cube,
                ShapeKind::Cube,
                ShapeKind::Cube,
                ShapeKind::Cube,
                ShapeKind::Sphere,
                ShapeKind::Torus,
                ShapeKind::TorusKnot,
            ]
        );
        assert_eq!(scene.node(NodeId(3)).unwrap().material.color, HOTPINK);
    }

    #[test]
    fn test_curved_shapes_are_wireframe() {
        let scene = composed();
        let wireframe: Vec<bool> = scene
            .nodes()
            .iter()
            .map(|node| node.material.wireframe)
            .collect();
        assert_eq!(wireframe, [false, false, false, false, false, true, true, true]);

        let knot = scene.find_node("TorusKnot").unwrap();
        assert_eq!(
            scene.node(knot).unwrap().material.kind(),
            MaterialKind::Wobble {
                factor: 3.0,
                speed: 2.0
            }
        );
        let torus = scene.find_node("Torus").unwrap();
        assert_eq!(scene.node(torus).unwrap().material.kind(), MaterialKind::Standard);
    }

    #[test]
    fn test_grouped_cubes_are_offset() {
        let scene = composed();
        let red = scene.find_node("RedCube").unwrap();
        let world = scene.world_matrix(red).unwrap() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(world, Vector4::new(-1.0, 1.0, 0.0, 1.0));

        let orange = scene.find_node("OrangeCube").unwrap();
        assert_eq!(scene.node(orange).unwrap().parent(), None);
    }

    #[test]
    fn test_only_the_sphere_is_interactive() {
        let scene = composed();
        let interactive: Vec<ShapeKind> = scene
            .nodes()
            .iter()
            .filter(|node| node.is_interactive())
            .map(|node| node.kind())
            .collect();
        assert_eq!(interactive, vec![ShapeKind::Sphere]);
    }

    #[test]
    fn test_lights_start_at_panel_defaults() {
        let scene = composed();
        assert_eq!(
            scene.directional_light(),
            Some(&Light::directional(LIGHT_POSITION, Color::WHITE, 0.5))
        );
        assert_eq!(scene.lights()[1], Light::ambient(Color::WHITE, 0.1));
    }

    #[test]
    fn test_knot_stays_put_after_ticks() {
        let mut scene = composed();
        scene.mount();
        let knot = scene.find_node("TorusKnot").unwrap();

        scene.update(&FrameContext::new(0.5, 0.5));
        scene.update(&FrameContext::new(1.0, 0.5));

        let node = scene.node(knot).unwrap();
        assert!(node.transform.rotation.is_zero());
        assert!(node.transform.position.is_zero());
        assert_eq!(node.material.time(), 2.0);
    }

    #[test]
    fn test_light_helper_is_registered() {
        let gizmos = light_helpers();
        assert_eq!(gizmos.gizmo_count(), 1);
        assert!(gizmos.has_gizmo("directional_light"));
    }
}
