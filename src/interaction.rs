//! Pointer routing for interactive shape nodes
//!
//! Turns raw cursor movement and button presses into enter, leave and click
//! events for the nodes under the cursor. Hits are visited nearest first and
//! a handler returning [`Propagation::Stop`] hides everything behind it.

use crate::gfx::{
    picking::ObjectPicker,
    scene::{NodeId, PointerEvent, Propagation, Scene},
};

/// Cursor travel in pixels beyond which a press/release pair is a drag
pub const CLICK_DRAG_THRESHOLD: f32 = 2.0;

#[derive(Debug, Clone)]
struct Press {
    position: (f32, f32),
    // Nodes reachable when the button went down
    targets: Vec<NodeId>,
}

pub struct PointerRouter {
    picker: ObjectPicker,
    // Nodes currently under the pointer together with how they handled enter
    hovered: Vec<(NodeId, Propagation)>,
    press: Option<Press>,
    cursor: Option<(f32, f32)>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self {
            picker: ObjectPicker::new(),
            hovered: Vec::new(),
            press: None,
            cursor: None,
        }
    }

    pub fn is_hovered(&self, id: NodeId) -> bool {
        self.hovered.iter().any(|(hovered, _)| *hovered == id)
    }

    pub fn hovered(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.hovered.iter().map(|(id, _)| *id)
    }

    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    /// Nodes reachable at `position`, nearest first.
    ///
    /// Newly hovered nodes receive `Enter` while walking the hits; the walk ends
    /// at the first node that stops propagation.
    fn reach(
        &mut self,
        scene: &mut Scene,
        position: (f32, f32),
        screen_size: (f32, f32),
    ) -> Vec<(NodeId, Propagation)> {
        let camera = scene.camera_manager.camera;
        let hits = self.picker.pick_all(position, screen_size, &camera, scene);

        let mut reached = Vec::new();
        for hit in hits {
            let known = self
                .hovered
                .iter()
                .find(|(id, _)| *id == hit.node)
                .map(|(_, propagation)| *propagation);

            let propagation = match known {
                Some(propagation) => propagation,
                None => scene.dispatch_pointer(hit.node, PointerEvent::Enter),
            };
            reached.push((hit.node, propagation));

            if propagation == Propagation::Stop {
                break;
            }
        }
        reached
    }

    /// Handles cursor movement, sending enter and leave events
    pub fn pointer_moved(
        &mut self,
        scene: &mut Scene,
        position: (f32, f32),
        screen_size: (f32, f32),
    ) {
        self.cursor = Some(position);
        let reached = self.reach(scene, position, screen_size);

        for (id, _) in &self.hovered {
            if !reached.iter().any(|(reached_id, _)| reached_id == id) {
                scene.dispatch_pointer(*id, PointerEvent::Leave);
            }
        }
        self.hovered = reached;
    }

    /// Remembers the nodes reachable at press time
    pub fn pointer_pressed(&mut self) {
        let Some(position) = self.cursor else {
            return;
        };
        self.press = Some(Press {
            position,
            targets: self.hovered().collect(),
        });
    }

    /// Sends `Click` to the nodes both pressed and released on
    ///
    /// Presses that turned into drags never click.
    pub fn pointer_released(&mut self, scene: &mut Scene, screen_size: (f32, f32)) {
        let (Some(press), Some(position)) = (self.press.take(), self.cursor) else {
            return;
        };

        let (dx, dy) = (position.0 - press.position.0, position.1 - press.position.1);
        if (dx * dx + dy * dy).sqrt() > CLICK_DRAG_THRESHOLD {
            return;
        }

        self.pointer_moved(scene, position, screen_size);

        for (id, _) in self.hovered.clone() {
            if !press.targets.contains(&id) {
                continue;
            }
            if scene.dispatch_pointer(id, PointerEvent::Click) == Propagation::Stop {
                break;
            }
        }
    }

    /// The cursor left the window: everything hovered gets `Leave`
    pub fn pointer_left(&mut self, scene: &mut Scene) {
        for (id, _) in self.hovered.drain(..) {
            scene.dispatch_pointer(id, PointerEvent::Leave);
        }
        self.cursor = None;
        self.press = None;
    }
}

impl Default for PointerRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        gfx::{
            camera::{CameraController, CameraManager, OrbitCamera},
            scene::{InteractionState, ShapeNode},
        },
    };

    const SCREEN: (f32, f32) = (800.0, 600.0);
    const CENTER: (f32, f32) = (400.0, 300.0);
    const CORNER: (f32, f32) = (5.0, 5.0);

    fn scene_with(nodes: Vec<ShapeNode>) -> Scene {
        let camera = OrbitCamera::looking_at([0.0, 0.0, 7.0], [0.0; 3], 800.0 / 600.0);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(0.01, 1.0)));
        for node in nodes {
            scene.add_node(node);
        }
        scene.mount();
        scene
    }

    fn sphere_at(position: [f32; 3]) -> ShapeNode {
        ShapeNode::sphere(position, 1.0, 15, 15)
    }

    fn state(scene: &Scene, id: usize) -> InteractionState {
        *scene.node(NodeId(id)).and_then(|n| n.interaction()).unwrap()
    }

    #[test]
    fn test_enter_and_leave() {
        let mut scene = scene_with(vec![sphere_at([0.0; 3])]);
        let mut router = PointerRouter::new();

        router.pointer_moved(&mut scene, CENTER, SCREEN);
        assert!(state(&scene, 0).is_hovered);
        assert!(router.is_hovered(NodeId(0)));

        // Moving within the sphere keeps it hovered
        router.pointer_moved(&mut scene, (402.0, 301.0), SCREEN);
        assert!(state(&scene, 0).is_hovered);

        router.pointer_moved(&mut scene, CORNER, SCREEN);
        assert!(!state(&scene, 0).is_hovered);
        assert_eq!(router.hovered().count(), 0);
    }

    #[test]
    fn test_nearest_node_stops_propagation() {
        let mut scene = scene_with(vec![sphere_at([0.0, 0.0, -3.0]), sphere_at([0.0; 3])]);
        let mut router = PointerRouter::new();

        router.pointer_moved(&mut scene, CENTER, SCREEN);
        assert!(state(&scene, 1).is_hovered);
        assert!(!state(&scene, 0).is_hovered);

        router.pointer_pressed();
        router.pointer_released(&mut scene, SCREEN);
        assert!(state(&scene, 1).is_clicked);
        assert!(!state(&scene, 0).is_clicked);
    }

    #[test]
    fn test_non_interactive_nodes_do_not_block() {
        let cube = ShapeNode::cube([0.0, 0.0, 3.0], Color::WHITE, [1.0; 3]);
        let mut scene = scene_with(vec![cube, sphere_at([0.0; 3])]);
        let mut router = PointerRouter::new();

        router.pointer_moved(&mut scene, CENTER, SCREEN);
        assert!(state(&scene, 1).is_hovered);
    }

    #[test]
    fn test_click_toggles_and_double_click_restores() {
        let mut scene = scene_with(vec![sphere_at([0.0; 3])]);
        let mut router = PointerRouter::new();
        router.pointer_moved(&mut scene, CENTER, SCREEN);

        router.pointer_pressed();
        router.pointer_released(&mut scene, SCREEN);
        assert!(state(&scene, 0).is_clicked);
        assert_eq!(scene.node(NodeId(0)).unwrap().transform.scale.x, 1.5);

        router.pointer_pressed();
        router.pointer_released(&mut scene, SCREEN);
        assert!(!state(&scene, 0).is_clicked);
        assert_eq!(scene.node(NodeId(0)).unwrap().transform.scale.x, 1.0);
    }

    #[test]
    fn test_drag_does_not_click() {
        let mut scene = scene_with(vec![sphere_at([0.0; 3])]);
        let mut router = PointerRouter::new();
        router.pointer_moved(&mut scene, CENTER, SCREEN);

        router.pointer_pressed();
        router.pointer_moved(&mut scene, (410.0, 300.0), SCREEN);
        router.pointer_released(&mut scene, SCREEN);
        assert!(!state(&scene, 0).is_clicked);
    }

    #[test]
    fn test_release_elsewhere_does_not_click() {
        let mut scene = scene_with(vec![sphere_at([0.0; 3])]);
        let mut router = PointerRouter::new();

        router.pointer_moved(&mut scene, CORNER, SCREEN);
        router.pointer_pressed();
        router.pointer_moved(&mut scene, (6.0, 5.0), SCREEN);
        router.pointer_released(&mut scene, SCREEN);
        assert!(!state(&scene, 0).is_clicked);
    }

    #[test]
    fn test_cursor_leaving_window_clears_hover() {
        let mut scene = scene_with(vec![sphere_at([0.0; 3])]);
        let mut router = PointerRouter::new();
        router.pointer_moved(&mut scene, CENTER, SCREEN);

        router.pointer_left(&mut scene);
        assert!(!state(&scene, 0).is_hovered);
        assert!(router.cursor().is_none());
    }
}
