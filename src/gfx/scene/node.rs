//! Shape nodes: the animated primitives of the scene
//!
//! Every node owns its transform, material and mesh. [`ShapeNode::update`]
//! applies the per-frame law of the node's kind; pointer events only change
//! the interaction state of nodes that have one.

use cgmath::Matrix4;
use wgpu::Device;

use crate::{
    clock::FrameContext,
    color::Color,
    gfx::{
        geometry::ShapeGeometry,
        resources::material::Material,
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutWithDesc},
        uniform_buffer::UniformBuffer,
    },
};

use super::{mesh::Mesh, transform::Transform};

/// Amplitude of the cube's Z oscillation
pub const CUBE_AMPLITUDE: f32 = 2.0;
/// Amplitude of the torus' Z oscillation
pub const TORUS_AMPLITUDE: f32 = 4.0;
/// Sphere spin rate while the pointer is elsewhere
pub const SPHERE_IDLE_SPEED: f32 = 0.2;
/// Sphere spin rate while hovered
pub const SPHERE_HOVER_SPEED: f32 = 1.0;
/// Sphere scale while toggled on by a click
pub const SPHERE_CLICKED_SCALE: f32 = 1.5;

/// Index of a shape node in its scene, in mount order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Index of a group in its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Sphere,
    Torus,
    TorusKnot,
}

/// Pointer events delivered to interactive nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Click,
}

/// Whether a handled pointer event may reach objects further away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Hover and click flags of an interactive node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub is_hovered: bool,
    pub is_clicked: bool,
}

impl InteractionState {
    pub fn pointer_enter(&mut self) {
        self.is_hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.is_hovered = false;
    }

    pub fn click(&mut self) {
        self.is_clicked = !self.is_clicked;
    }
}

/// Model matrix uniform, MUST match the Transform struct in the shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
}

impl From<Matrix4<f32>> for TransformUniform {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self {
            model: matrix.into(),
        }
    }
}

// GPU resources holding the per-node transform
pub struct NodeGpuResources {
    transform_ubo: UniformBuffer<TransformUniform>,
    transform_bind_group: wgpu::BindGroup,
}

pub struct ShapeNode {
    pub name: String,
    pub transform: Transform,
    pub material: Material,
    kind: ShapeKind,
    geometry: ShapeGeometry,
    base_color: Color,
    mesh: Mesh,
    interaction: Option<InteractionState>,
    parent: Option<GroupId>,
    attached: bool,
    gpu_resources: Option<NodeGpuResources>,
}

impl ShapeNode {
    fn new(
        name: &str,
        kind: ShapeKind,
        geometry: ShapeGeometry,
        position: [f32; 3],
        material: Material,
    ) -> Self {
        let base_color = material.color;
        Self {
            name: name.to_string(),
            transform: Transform::from_position(position),
            material,
            kind,
            geometry,
            base_color,
            mesh: Mesh::from_geometry(geometry.generate()),
            interaction: None,
            parent: None,
            attached: false,
            gpu_resources: None,
        }
    }

    /// Solid box that spins and bobs along Z with amplitude 2
    pub fn cube(position: [f32; 3], color: Color, size: [f32; 3]) -> Self {
        Self::new(
            "Cube",
            ShapeKind::Cube,
            ShapeGeometry::cube(size),
            position,
            Material::standard(color),
        )
    }

    /// Wireframe sphere reacting to hover and click
    pub fn sphere(position: [f32; 3], radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let mut node = Self::new(
            "Sphere",
            ShapeKind::Sphere,
            ShapeGeometry::sphere(radius, width_segments, height_segments),
            position,
            Material::standard(Color::from_hex(0xadd8e6)).with_wireframe(true),
        );
        node.interaction = Some(InteractionState::default());
        node
    }

    /// Wireframe torus with the cube's motion at twice the amplitude
    pub fn torus(position: [f32; 3], color: Color, geometry: ShapeGeometry) -> Self {
        Self::new(
            "Torus",
            ShapeKind::Torus,
            geometry,
            position,
            Material::standard(color).with_wireframe(true),
        )
    }

    /// Static wireframe knot animated only by its wobble material
    pub fn torus_knot(position: [f32; 3], color: Color, geometry: ShapeGeometry) -> Self {
        Self::new(
            "TorusKnot",
            ShapeKind::TorusKnot,
            geometry,
            position,
            Material::wobble(color, 3.0, 2.0).with_wireframe(true),
        )
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn interaction(&self) -> Option<&InteractionState> {
        self.interaction.as_ref()
    }

    /// Nodes with pointer handlers take part in picking
    pub fn is_interactive(&self) -> bool {
        self.interaction.is_some()
    }

    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<GroupId>) {
        self.parent = parent;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn attach(&mut self) {
        self.attached = true;
    }

    pub(crate) fn detach(&mut self) {
        self.attached = false;
    }

    /// Applies this node's per-frame law.
    ///
    /// Skipped entirely while the node is not attached to a mounted scene.
    pub fn update(&mut self, frame: &FrameContext) {
        if !self.attached {
            return;
        }

        let delta = frame.delta;
        match self.kind {
            ShapeKind::Cube | ShapeKind::Torus => {
                let amplitude = if self.kind == ShapeKind::Cube {
                    CUBE_AMPLITUDE
                } else {
                    TORUS_AMPLITUDE
                };
                self.transform.rotation.y += delta;
                self.transform.rotation.x += delta * 2.0;
                self.transform.position.z = frame.elapsed_time.sin() * amplitude;
            }
            ShapeKind::Sphere => {
                self.transform.rotation.y += delta * self.spin_speed();
            }
            // The knot stays put; its material carries the animation
            ShapeKind::TorusKnot => {}
        }
    }

    fn spin_speed(&self) -> f32 {
        match self.interaction {
            Some(InteractionState {
                is_hovered: true, ..
            }) => SPHERE_HOVER_SPEED,
            _ => SPHERE_IDLE_SPEED,
        }
    }

    /// Color the node is drawn with this frame
    pub fn display_color(&self) -> Color {
        match (self.kind, self.interaction) {
            (ShapeKind::Sphere, Some(state)) if state.is_hovered => Color::from_hex(0xffa500),
            (ShapeKind::Sphere, Some(_)) => Color::from_hex(0xadd8e6),
            _ => self.base_color,
        }
    }

    /// Selects the material color and advances material time.
    pub fn update_material(&mut self, frame: &FrameContext) {
        self.material.color = self.display_color();
        self.material.update(frame);
    }

    /// Delivers a pointer event to this node.
    ///
    /// Nodes without pointer handlers let every event through.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Propagation {
        let Some(state) = self.interaction.as_mut() else {
            return Propagation::Continue;
        };

        match event {
            PointerEvent::Enter => state.pointer_enter(),
            PointerEvent::Leave => state.pointer_leave(),
            PointerEvent::Click => {
                state.click();
                let scale = if state.is_clicked {
                    SPHERE_CLICKED_SCALE
                } else {
                    1.0
                };
                self.transform.set_uniform_scale(scale);
            }
        }

        log::debug!("{} received {:?}: {:?}", self.name, event, state);
        Propagation::Stop
    }

    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        transform_layout: &BindGroupLayoutWithDesc,
        material_layout: &BindGroupLayoutWithDesc,
    ) {
        self.mesh.init_gpu_resources(device, &self.name);
        self.material.init_gpu_resources(device, material_layout);

        if self.gpu_resources.is_none() {
            let transform_ubo =
                UniformBuffer::new_with_data(device, &TransformUniform::from(self.transform.matrix()));
            let transform_bind_group = BindGroupBuilder::new(transform_layout)
                .resource(transform_ubo.binding_resource())
                .create(device, "Transform Bind Group");

            self.gpu_resources = Some(NodeGpuResources {
                transform_ubo,
                transform_bind_group,
            });
        }
    }

    /// Syncs the world matrix and material uniforms to the GPU
    pub fn update_gpu_resources(&mut self, queue: &wgpu::Queue, world_matrix: Matrix4<f32>) {
        if let Some(gpu) = &mut self.gpu_resources {
            gpu.transform_ubo
                .update_content(queue, TransformUniform::from(world_matrix));
        }
        self.material.update_gpu_resources(queue);
    }

    /// Get the transform bind group for rendering
    pub fn transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|gpu| &gpu.transform_bind_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(mut node: ShapeNode) -> ShapeNode {
        node.attach();
        node
    }

    fn small_torus() -> ShapeGeometry {
        ShapeGeometry::torus(0.8, 0.1, 8, 8)
    }

    #[test]
    fn test_cube_update_law() {
        let mut cube = mounted(ShapeNode::cube([1.0, 0.0, 0.0], Color::WHITE, [1.0; 3]));
        cube.transform.rotation.y = 0.3;

        let (elapsed, delta) = (1.25_f32, 0.016_f32);
        cube.update(&FrameContext::new(elapsed, delta));

        assert_eq!(cube.transform.rotation.y, 0.3 + delta);
        assert_eq!(cube.transform.rotation.x, 2.0 * delta);
        assert_eq!(cube.transform.position.z, elapsed.sin() * 2.0);
        assert_eq!(cube.transform.position.x, 1.0);
    }

    #[test]
    fn test_torus_has_double_amplitude() {
        let mut cube = mounted(ShapeNode::cube([0.0; 3], Color::WHITE, [1.0; 3]));
        let mut torus = mounted(ShapeNode::torus([2.0, 0.0, 0.0], Color::WHITE, small_torus()));

        let frame = FrameContext::new(0.7, 0.1);
        cube.update(&frame);
        torus.update(&frame);

        assert_eq!(torus.transform.position.z, 0.7_f32.sin() * 4.0);
        assert_eq!(torus.transform.position.z, cube.transform.position.z * 2.0);
        assert_eq!(torus.transform.rotation.x, 0.2);
    }

    #[test]
    fn test_hover_spins_sphere_five_times_faster() {
        let mut idle = mounted(ShapeNode::sphere([0.0; 3], 1.0, 8, 8));
        let mut hovered = mounted(ShapeNode::sphere([0.0; 3], 1.0, 8, 8));
        assert_eq!(hovered.handle_pointer(PointerEvent::Enter), Propagation::Stop);
        assert!(hovered.interaction().is_some_and(|s| s.is_hovered));

        let mut elapsed = 0.0;
        for delta in [0.25, 0.5, 0.125] {
            elapsed += delta;
            let frame = FrameContext::new(elapsed, delta);
            idle.update(&frame);
            hovered.update(&frame);
        }

        assert!((idle.transform.rotation.y - 0.875 * 0.2).abs() < 1e-6);
        assert_eq!(hovered.transform.rotation.y, 0.875);
        assert!((hovered.transform.rotation.y - idle.transform.rotation.y * 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_double_click_restores_state_and_scale() {
        let mut sphere = ShapeNode::sphere([0.0; 3], 1.0, 8, 8);
        assert_eq!(sphere.transform.scale, [1.0, 1.0, 1.0].into());

        sphere.handle_pointer(PointerEvent::Click);
        assert!(sphere.interaction().is_some_and(|s| s.is_clicked));
        assert_eq!(sphere.transform.scale, [1.5, 1.5, 1.5].into());

        sphere.handle_pointer(PointerEvent::Click);
        assert_eq!(sphere.interaction(), Some(&InteractionState::default()));
        assert_eq!(sphere.transform.scale, [1.0, 1.0, 1.0].into());
    }

    #[test]
    fn test_sphere_color_follows_hover() {
        let mut sphere = ShapeNode::sphere([0.0; 3], 1.0, 8, 8);
        let frame = FrameContext::default();

        sphere.update_material(&frame);
        assert_eq!(sphere.material.color.to_hex(), 0xadd8e6);

        sphere.handle_pointer(PointerEvent::Enter);
        sphere.update_material(&frame);
        assert_eq!(sphere.material.color.to_hex(), 0xffa500);

        sphere.handle_pointer(PointerEvent::Leave);
        sphere.update_material(&frame);
        assert_eq!(sphere.material.color.to_hex(), 0xadd8e6);
        assert!(sphere.material.wireframe);
    }

    #[test]
    fn test_torus_knot_transform_is_static() {
        let mut knot = mounted(ShapeNode::torus_knot(
            [0.0; 3],
            Color::WHITE,
            ShapeGeometry::torus_knot(1.0, 0.1, 32, 8),
        ));
        let before = knot.transform;

        let frame = FrameContext::new(2.0, 0.5);
        knot.update(&frame);
        knot.update_material(&frame);

        assert_eq!(knot.transform, before);
        assert_eq!(knot.material.time(), 4.0);
    }

    #[test]
    fn test_detached_node_is_not_updated() {
        let mut cube = ShapeNode::cube([0.0; 3], Color::WHITE, [1.0; 3]);
        cube.update(&FrameContext::new(1.0, 1.0));
        assert_eq!(cube.transform, Transform::from_position([0.0; 3]));

        cube.attach();
        cube.detach();
        cube.update(&FrameContext::new(1.0, 1.0));
        assert_eq!(cube.transform, Transform::from_position([0.0; 3]));
    }

    #[test]
    fn test_non_interactive_nodes_pass_events_through() {
        let mut cube = ShapeNode::cube([0.0; 3], Color::WHITE, [1.0; 3]);
        assert!(!cube.is_interactive());
        assert_eq!(cube.handle_pointer(PointerEvent::Click), Propagation::Continue);
        assert_eq!(cube.transform.scale, [1.0, 1.0, 1.0].into());
    }
}
