//! # Gizmo Manager
//!
//! Owns the registered gizmos, updates them every frame and streams their
//! lines into a single vertex buffer.

use crate::{
    gfx::{
        gizmos::traits::Gizmo,
        scene::{LineVertex, Scene},
    },
    wgpu_utils::uniform_buffer::DynamicVertexBuffer,
};
use std::collections::HashMap;
use wgpu::{Device, Queue};

pub struct GizmoManager {
    gizmos: HashMap<String, Box<dyn Gizmo>>,

    /// Whether the gizmo system is globally enabled
    enabled: bool,

    // Lines of the visible gizmos gathered on the last update
    lines: Vec<LineVertex>,

    vertex_buffer: Option<DynamicVertexBuffer<LineVertex>>,
}

impl GizmoManager {
    pub fn new() -> Self {
        Self {
            gizmos: HashMap::new(),
            enabled: true,
            lines: Vec::new(),
            vertex_buffer: None,
        }
    }

    /// Registers a gizmo, replacing any with the same name
    pub fn add_gizmo(&mut self, name: &str, gizmo: Box<dyn Gizmo>) {
        if self.gizmos.insert(name.to_string(), gizmo).is_some() {
            log::debug!("Replaced gizmo {}", name);
        }
    }

    pub fn remove_gizmo(&mut self, name: &str) -> Option<Box<dyn Gizmo>> {
        self.gizmos.remove(name)
    }

    pub fn has_gizmo(&self, name: &str) -> bool {
        self.gizmos.contains_key(name)
    }

    pub fn gizmo(&self, name: &str) -> Option<&dyn Gizmo> {
        self.gizmos.get(name).map(|gizmo| gizmo.as_ref())
    }

    /// Update all gizmos against the scene and gather their lines
    pub fn update(&mut self, scene: &Scene) {
        self.lines.clear();
        if !self.enabled {
            return;
        }

        let mut visible_gizmos: Vec<_> = self
            .gizmos
            .iter_mut()
            .filter(|(_, gizmo)| gizmo.should_be_visible(scene))
            .collect();

        visible_gizmos.sort_by(|(a_name, a), (b_name, b)| {
            a.get_priority()
                .cmp(&b.get_priority())
                .then_with(|| a_name.cmp(b_name))
        });

        for (_, gizmo) in visible_gizmos {
            gizmo.update(scene);
            self.lines.extend_from_slice(gizmo.line_vertices());
        }
    }

    pub fn lines(&self) -> &[LineVertex] {
        &self.lines
    }

    /// Uploads the gathered lines, growing the buffer if needed
    pub fn update_gpu_resources(&mut self, device: &Device, queue: &Queue) {
        let buffer = self
            .vertex_buffer
            .get_or_insert_with(|| DynamicVertexBuffer::new(device, 64));
        buffer.update_data(device, queue, &self.lines);
    }

    /// Vertex buffer and vertex count ready for drawing
    pub fn vertex_buffer(&self) -> Option<(&wgpu::Buffer, u32)> {
        self.vertex_buffer
            .as_ref()
            .filter(|buffer| !buffer.is_empty())
            .map(|buffer| (buffer.buffer(), buffer.len() as u32))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn gizmo_count(&self) -> usize {
        self.gizmos.len()
    }
}

impl Default for GizmoManager {
    fn default() -> Self {
        Self::new()
    }
}
