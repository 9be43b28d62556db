//! CPU mesh data with lazily created GPU buffers

use wgpu::Device;

use crate::gfx::geometry::GeometryData;

use super::vertex::Vertex3D;

/// Vertex, triangle index and wireframe edge buffers of one mesh
pub struct MeshBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub edge_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub edge_count: u32,
}

/// A triangle mesh generated from [`GeometryData`].
///
/// The geometry stays on the CPU for picking; GPU buffers are created once a
/// device is available.
pub struct Mesh {
    geometry: GeometryData,
    vertices: Vec<Vertex3D>,
    edge_indices: Vec<u32>,
    buffers: Option<MeshBuffers>,
}

impl Mesh {
    pub fn from_geometry(geometry: GeometryData) -> Self {
        let (vertices, _) = geometry.to_scene_format();
        let edge_indices = geometry.edge_indices();

        Self {
            geometry,
            vertices,
            edge_indices,
            buffers: None,
        }
    }

    pub fn geometry(&self) -> &GeometryData {
        &self.geometry
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.geometry.triangle_count()
    }

    /// Number of unique edges drawn in wireframe mode
    pub fn edge_count(&self) -> usize {
        self.edge_indices.len() / 2
    }

    pub fn buffers(&self) -> Option<&MeshBuffers> {
        self.buffers.as_ref()
    }

    pub fn init_gpu_resources(&mut self, device: &Device, label: &str) {
        if self.buffers.is_some() {
            return;
        }

        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(&self.geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let edge_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Edge Buffer")),
                contents: bytemuck::cast_slice(&self.edge_indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        log::debug!(
            "Uploaded mesh '{}': {} vertices, {} triangles, {} edges",
            label,
            self.vertex_count(),
            self.triangle_count(),
            self.edge_count()
        );

        self.buffers = Some(MeshBuffers {
            vertex_buffer,
            index_buffer,
            edge_buffer,
            index_count: self.geometry.indices.len() as u32,
            edge_count: self.edge_indices.len() as u32,
        });
    }
}

/// Draw helpers for meshes on a render pass
pub trait DrawMesh<'a> {
    /// Draw the filled triangles of a mesh
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    /// Draw the unique edges of a mesh as a line list
    fn draw_mesh_edges(&mut self, mesh: &'a Mesh);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let Some(buffers) = mesh.buffers() else {
            return; // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
        self.set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..buffers.index_count, 0, 0..1);
    }

    fn draw_mesh_edges(&mut self, mesh: &'b Mesh) {
        let Some(buffers) = mesh.buffers() else {
            return;
        };

        self.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
        self.set_index_buffer(buffers.edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..buffers.edge_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_box;

    #[test]
    fn test_box_mesh_counts() {
        let mesh = Mesh::from_geometry(generate_box(1.0, 1.0, 1.0));
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        // 4 border edges plus 1 diagonal per face, faces share no vertices
        assert_eq!(mesh.edge_count(), 6 * 5);
        assert!(mesh.buffers().is_none());
    }
}
