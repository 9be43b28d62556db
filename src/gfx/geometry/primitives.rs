//! # Primitive Shape Generation
//!
//! This module contains functions to generate the scene's primitive shapes.
//! All shapes are generated Y-up with outward normals and texture coordinates.

use super::GeometryData;
use cgmath::{InnerSpace, Vector3};
use std::f32::consts::PI;

/// Generate a box centered at the origin
///
/// Each face has its own four vertices so normals stay flat, with UV
/// coordinates from 0 to 1.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

    // (normal, four corners counter-clockwise seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0], [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]]),
        ([0.0, 0.0, -1.0], [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]]),
        ([-1.0, 0.0, 0.0], [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]]),
        ([1.0, 0.0, 0.0], [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]]),
        ([0.0, 1.0, 0.0], [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]]),
        ([0.0, -1.0, 0.0], [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]]),
    ];
    let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    for (normal, corners) in faces {
        let base = data.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs) {
            data.vertices.push(*corner);
            data.normals.push(normal);
            data.tex_coords.push(uv);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Number of longitude segments (min 3)
/// * `height_segments` - Number of latitude segments (min 2)
///
/// The pole rings produce a single triangle per segment, so the mesh has
/// `width_segments * (2 * height_segments - 2)` triangles.
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let width_segs = width_segments.max(3);
    let height_segs = height_segments.max(2);
    let row = width_segs + 1;

    for iy in 0..=height_segs {
        let v = iy as f32 / height_segs as f32;
        let theta = v * PI;

        for ix in 0..=width_segs {
            let u = ix as f32 / width_segs as f32;
            let phi = u * 2.0 * PI;

            let x = -phi.cos() * theta.sin();
            let y = theta.cos();
            let z = phi.sin() * theta.sin();

            data.vertices.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
            data.tex_coords.push([u, 1.0 - v]);
        }
    }

    for iy in 0..height_segs {
        for ix in 0..width_segs {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segs - 1 {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    data
}

/// Generate a torus lying in the XY plane
///
/// # Arguments
/// * `radius` - Distance from the center to the middle of the tube
/// * `tube` - Tube radius
/// * `radial_segments` - Segments around the tube
/// * `tubular_segments` - Segments around the ring
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let radial_segs = radial_segments.max(2);
    let tubular_segs = tubular_segments.max(3);

    for j in 0..=radial_segs {
        let v = j as f32 / radial_segs as f32 * 2.0 * PI;

        for i in 0..=tubular_segs {
            let u = i as f32 / tubular_segs as f32 * 2.0 * PI;

            let vertex = Vector3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vector3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let normal = (vertex - center).normalize();

            data.vertices.push(vertex.into());
            data.normals.push(normal.into());
            data.tex_coords.push([
                i as f32 / tubular_segs as f32,
                j as f32 / radial_segs as f32,
            ]);
        }
    }

    let row = tubular_segs + 1;
    for j in 1..=radial_segs {
        for i in 1..=tubular_segs {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;

            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    data
}

/// Generate a (p, q) torus knot
///
/// The knot winds `p` times around its axis of rotational symmetry and `q`
/// times around the interior of the torus. The tube frame at each sample
/// follows the curve tangent.
pub fn generate_torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let tubular_segs = tubular_segments.max(3);
    let radial_segs = radial_segments.max(3);
    let (p, q) = (p.max(1) as f32, q as f32);

    for i in 0..=tubular_segs {
        let u = i as f32 / tubular_segs as f32 * p * 2.0 * PI;

        let p1 = knot_curve_point(u, p, q, radius);
        let p2 = knot_curve_point(u + 0.01, p, q, radius);

        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1).normalize();
        let normal = binormal.cross(tangent).normalize();

        for j in 0..=radial_segs {
            let v = j as f32 / radial_segs as f32 * 2.0 * PI;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let vertex = p1 + normal * cx + binormal * cy;

            data.vertices.push(vertex.into());
            data.normals.push((vertex - p1).normalize().into());
            data.tex_coords.push([
                i as f32 / tubular_segs as f32,
                j as f32 / radial_segs as f32,
            ]);
        }
    }

    let row = radial_segs + 1;
    for j in 1..=tubular_segs {
        for i in 1..=radial_segs {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;

            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    data
}

fn knot_curve_point(u: f32, p: f32, q: f32, radius: f32) -> Vector3<f32> {
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();

    Vector3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_generation() {
        let cube = generate_box(1.0, 1.0, 1.0);
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(1.0, 30, 30);
        assert_eq!(sphere.vertex_count(), 31 * 31);
        assert_eq!(sphere.triangle_count(), 30 * (2 * 30 - 2));
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());

        for vertex in &sphere.vertices {
            let length = Vector3::from(*vertex).magnitude();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(0.8, 0.1, 30, 30);
        assert_eq!(torus.vertex_count(), 31 * 31);
        assert_eq!(torus.triangle_count(), 30 * 30 * 2);

        for vertex in &torus.vertices {
            let ring = (vertex[0] * vertex[0] + vertex[1] * vertex[1]).sqrt();
            assert!(ring >= 0.7 - 1e-5 && ring <= 0.9 + 1e-5);
        }
    }

    #[test]
    fn test_torus_knot_generation() {
        let knot = generate_torus_knot(1.0, 0.1, 1000, 50, 2, 3);
        assert_eq!(knot.vertex_count(), 1001 * 51);
        assert_eq!(knot.triangle_count(), 1000 * 50 * 2);
        assert!(knot.indices.iter().all(|&i| (i as usize) < knot.vertex_count()));
    }
}
