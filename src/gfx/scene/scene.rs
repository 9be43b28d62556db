use cgmath::{Matrix4, SquareMatrix};
use wgpu::Device;

use crate::{
    clock::FrameContext,
    gfx::camera::CameraManager,
    wgpu_utils::binding_builder::BindGroupLayoutWithDesc,
};

use super::{
    light::{Light, LightControls},
    node::{GroupId, NodeId, PointerEvent, Propagation, ShapeNode},
    transform::Transform,
};

/// A named transform that offsets the origin of its member nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub transform: Transform,
}

/// Main scene containing shape nodes, groups, lights and camera
///
/// Nodes live in an arena in mount order; that order is also the order in
/// which they are updated each tick.
pub struct Scene {
    pub camera_manager: CameraManager,
    pub light_controls: LightControls,
    groups: Vec<Group>,
    nodes: Vec<ShapeNode>,
    lights: Vec<Light>,
    orbit_controls: bool,
    mounted: bool,
}

impl Scene {
    /// Creates a new, empty and unmounted scene
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            light_controls: LightControls::default(),
            groups: Vec::new(),
            nodes: Vec::new(),
            lights: Vec::new(),
            orbit_controls: false,
            mounted: false,
        }
    }

    pub fn add_group(&mut self, name: &str, position: [f32; 3]) -> GroupId {
        self.groups.push(Group {
            name: name.to_string(),
            transform: Transform::from_position(position),
        });
        GroupId(self.groups.len() - 1)
    }

    pub fn add_node(&mut self, node: ShapeNode) -> NodeId {
        self.push_node(node, None)
    }

    /// Adds a node whose position is relative to `group`
    pub fn add_node_to_group(&mut self, group: GroupId, node: ShapeNode) -> NodeId {
        if group.0 >= self.groups.len() {
            log::warn!(
                "Group {:?} does not exist, adding {} at the top level",
                group,
                node.name
            );
            return self.push_node(node, None);
        }
        self.push_node(node, Some(group))
    }

    fn push_node(&mut self, mut node: ShapeNode, parent: Option<GroupId>) -> NodeId {
        node.set_parent(parent);
        if self.mounted {
            node.attach();
        }
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn enable_orbit_controls(&mut self) {
        self.orbit_controls = true;
    }

    pub fn has_orbit_controls(&self) -> bool {
        self.orbit_controls
    }

    /// Attaches every node so that updates start running
    pub fn mount(&mut self) {
        for node in self.nodes.iter_mut() {
            node.attach();
        }
        self.mounted = true;
        log::info!(
            "Mounted scene with {} meshes and {} lights",
            self.mesh_count(),
            self.light_count()
        );
    }

    pub fn unmount(&mut self) {
        for node in self.nodes.iter_mut() {
            node.detach();
        }
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn nodes(&self) -> &[ShapeNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&ShapeNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut ShapeNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// The light driven by the light controls
    pub fn directional_light(&self) -> Option<&Light> {
        self.lights.iter().find(|light| light.is_directional())
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// World matrix of a node: its group's matrix times its own
    pub fn world_matrix(&self, id: NodeId) -> Option<Matrix4<f32>> {
        let node = self.node(id)?;
        let parent = node
            .parent()
            .and_then(|group| self.group(group))
            .map_or(Matrix4::identity(), |group| group.transform.matrix());
        Some(parent * node.transform.matrix())
    }

    /// Runs one tick.
    ///
    /// Applies the light controls, updates every node in mount order and then
    /// advances each node's material.
    pub fn update(&mut self, frame: &FrameContext) {
        if let Some(light) = self.lights.iter_mut().find(|light| light.is_directional()) {
            self.light_controls.apply_to(light);
        }

        for node in self.nodes.iter_mut() {
            node.update(frame);
        }

        for node in self.nodes.iter_mut() {
            node.update_material(frame);
        }

        self.camera_manager.update();
    }

    /// Delivers a pointer event to one node
    pub fn dispatch_pointer(&mut self, id: NodeId, event: PointerEvent) -> Propagation {
        self.node_mut(id)
            .map_or(Propagation::Continue, |node| node.handle_pointer(event))
    }

    /// Initializes GPU resources for all nodes
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        transform_layout: &BindGroupLayoutWithDesc,
        material_layout: &BindGroupLayoutWithDesc,
    ) {
        for node in self.nodes.iter_mut() {
            node.init_gpu_resources(device, transform_layout, material_layout);
        }
    }

    /// Syncs world matrices and materials to the GPU
    pub fn update_gpu_resources(&mut self, queue: &wgpu::Queue) {
        let world_matrices: Vec<Matrix4<f32>> = self
            .node_ids()
            .filter_map(|id| self.world_matrix(id))
            .collect();

        for (node, world_matrix) in self.nodes.iter_mut().zip(world_matrices) {
            node.update_gpu_resources(queue, world_matrix);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        gfx::camera::{CameraController, OrbitCamera},
    };
    use cgmath::{Vector4, Zero};

    fn empty_scene() -> Scene {
        let camera = OrbitCamera::looking_at([0.0, 0.0, 7.0], [0.0; 3], 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(0.01, 1.0)))
    }

    fn unit_cube(position: [f32; 3]) -> ShapeNode {
        ShapeNode::cube(position, Color::WHITE, [1.0; 3])
    }

    #[test]
    fn test_group_offsets_world_position() {
        let mut scene = empty_scene();
        let group = scene.add_group("Group", [0.0, -1.0, 0.0]);
        let id = scene.add_node_to_group(group, unit_cube([1.0, 2.0, 0.0]));

        let world = scene.world_matrix(id).unwrap() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(world, Vector4::new(1.0, 1.0, 0.0, 1.0));
        assert_eq!(scene.node(id).unwrap().parent(), Some(group));
    }

    #[test]
    fn test_unknown_group_falls_back_to_top_level() {
        let mut scene = empty_scene();
        let id = scene.add_node_to_group(GroupId(3), unit_cube([0.0; 3]));
        assert_eq!(scene.node(id).unwrap().parent(), None);
    }

    #[test]
    fn test_nodes_update_only_after_mount() {
        let mut scene = empty_scene();
        let id = scene.add_node(unit_cube([0.0; 3]));
        let frame = FrameContext::new(1.0, 0.5);

        scene.update(&frame);
        assert!(scene.node(id).unwrap().transform.rotation.is_zero());

        scene.mount();
        scene.update(&frame);
        assert_eq!(scene.node(id).unwrap().transform.rotation.y, 0.5);

        let late = scene.add_node(unit_cube([0.0; 3]));
        assert!(scene.node(late).unwrap().is_attached());
    }

    #[test]
    fn test_update_applies_light_controls() {
        let mut scene = empty_scene();
        scene.add_light(Light::ambient(Color::WHITE, 0.1));
        scene.add_light(Light::directional([0.0, 0.0, 5.0], Color::WHITE, 1.0));
        scene.light_controls.set_intensity(4.0);
        scene.light_controls.set_color_input("red");

        scene.update(&FrameContext::default());

        assert_eq!(
            scene.directional_light(),
            Some(&Light::Directional {
                position: [0.0, 0.0, 5.0].into(),
                target: [0.0, 0.0, 0.0].into(),
                color: Color::from_hex(0xff0000),
                intensity: 4.0,
            })
        );
        assert_eq!(scene.lights()[0], Light::ambient(Color::WHITE, 0.1));
    }

    #[test]
    fn test_dispatch_to_missing_node_continues() {
        let mut scene = empty_scene();
        assert_eq!(
            scene.dispatch_pointer(NodeId(0), PointerEvent::Click),
            Propagation::Continue
        );
    }
}
