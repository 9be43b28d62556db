//! # Procedural Geometry Generation
//!
//! This module generates the primitive shapes of the scene procedurally, so no
//! model files are needed.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box with configurable extents
//! - **Sphere**: UV sphere with configurable radius and resolution
//! - **Torus**: ring with configurable radius, tube and resolution
//! - **Torus knot**: (p, q) knot swept with a circular tube
//!
//! ## Usage
//!
//! ```rust
//! use shapes3d::gfx::geometry::{generate_box, generate_sphere, ShapeGeometry};
//!
//! let cube = generate_box(1.0, 1.0, 1.0);
//! let sphere = generate_sphere(1.0, 30, 30);
//!
//! // Or through a descriptor
//! let torus = ShapeGeometry::torus(0.8, 0.1, 30, 30).generate();
//! assert_eq!(torus.vertex_count(), 31 * 31);
//! ```

pub mod primitives;

pub use primitives::*;

use std::collections::HashSet;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Line-list indices covering every triangle edge once.
    ///
    /// Shared edges are emitted a single time regardless of winding.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut edges = Vec::with_capacity(self.indices.len() * 2);

        for triangle in self.indices.chunks_exact(3) {
            for (a, b) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    edges.push(a);
                    edges.push(b);
                }
            }
        }

        edges
    }

    /// Axis-aligned bounds in local space as `(min, max)`.
    ///
    /// Empty geometry reports a degenerate box at the origin.
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        if self.vertices.is_empty() {
            return ([0.0; 3], [0.0; 3]);
        }

        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for vertex in &self.vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(vertex[axis]);
                max[axis] = max[axis].max(vertex[axis]);
            }
        }
        (min, max)
    }

    /// Convert to the vertex format used by the renderer
    pub fn to_scene_format(&self) -> (Vec<crate::gfx::scene::vertex::Vertex3D>, Vec<u32>) {
        use crate::gfx::scene::vertex::Vertex3D;

        let vertices: Vec<Vertex3D> = (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

/// Geometry descriptor of a shape node: the variant tag plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
}

impl ShapeGeometry {
    pub fn cube(size: [f32; 3]) -> Self {
        Self::Box {
            width: size[0],
            height: size[1],
            depth: size[2],
        }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments,
            height_segments,
        }
    }

    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Self::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        }
    }

    /// A (2, 3) torus knot, the trefoil.
    pub fn torus_knot(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32) -> Self {
        Self::TorusKnot {
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p: 2,
            q: 3,
        }
    }

    /// Build the triangle mesh this descriptor describes.
    pub fn generate(&self) -> GeometryData {
        match *self {
            Self::Box {
                width,
                height,
                depth,
            } => generate_box(width, height, depth),
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => generate_sphere(radius, width_segments, height_segments),
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => generate_torus(radius, tube, radial_segments, tubular_segments),
            Self::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => generate_torus_knot(radius, tube, tubular_segments, radial_segments, p, q),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_deduplicated() {
        let mut quad = GeometryData::new();
        quad.vertices = vec![[0.0; 3]; 4];
        quad.indices = vec![0, 1, 2, 2, 3, 0];

        // 4 outer edges plus the shared diagonal
        assert_eq!(quad.edge_indices().len(), 5 * 2);
    }

    #[test]
    fn test_bounds_of_unit_cube() {
        let (min, max) = generate_box(1.0, 2.0, 3.0).bounds();
        assert_eq!(min, [-0.5, -1.0, -1.5]);
        assert_eq!(max, [0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_descriptor_dispatch() {
        let knot = ShapeGeometry::torus_knot(1.0, 0.1, 64, 8).generate();
        assert_eq!(knot.vertex_count(), 65 * 9);

        let cube = ShapeGeometry::cube([1.0, 1.0, 1.0]).generate();
        assert_eq!(cube.triangle_count(), 12);
    }
}
