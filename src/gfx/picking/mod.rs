//! # Object Picking System
//!
//! Mouse ray-casting against the interactive nodes of a scene.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: Convert mouse coordinates to a 3D ray in world space
//! 2. **Bounds test**: Reject nodes whose world-space bounding box the ray misses
//! 3. **Triangle test**: Intersect the ray with the node's world-space triangles
//! 4. **Ordering**: Return every hit, nearest first
//!
//! ## Usage
//!
//! ```no_run
//! # use shapes3d::gfx::picking::ObjectPicker;
//! # fn demo(scene: &shapes3d::gfx::scene::Scene) {
//! let mut picker = ObjectPicker::new();
//! let hits = picker.pick_all((400.0, 300.0), (800.0, 600.0), &scene.camera_manager.camera, scene);
//! if let Some(nearest) = hits.first() {
//!     println!("Pointer is over node {:?}", nearest.node);
//! }
//! # }
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero};

use crate::gfx::{
    camera::orbit_camera::OrbitCamera,
    scene::{NodeId, Scene},
};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Möller–Trumbore ray/triangle test, both faces count
    ///
    /// Returns the distance along the ray to the hit.
    pub fn intersect_triangle(
        &self,
        a: Vector3<f32>,
        b: Vector3<f32>,
        c: Vector3<f32>,
    ) -> Option<f32> {
        const EPSILON: f32 = 1e-7;

        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < EPSILON {
            return None; // Parallel to the triangle plane
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t > EPSILON).then_some(t)
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl AABB {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::from(*first);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            min.x = min.x.min(vertex[0]);
            min.y = min.y.min(vertex[1]);
            min.z = min.z.min(vertex[2]);
            max.x = max.x.max(vertex[0]);
            max.y = max.y.max(vertex[1]);
            max.z = max.z.max(vertex[2]);
        }

        Self::new(min, max)
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let mut transformed_corners: Vec<[f32; 3]> = Vec::with_capacity(8);
        for i in 0..8 {
            let corner = Vector3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            transformed_corners.push(transform_point(matrix, corner).into());
        }

        Self::from_vertices(&transformed_corners)
    }
}

fn transform_point(matrix: &Matrix4<f32>, point: Vector3<f32>) -> Vector3<f32> {
    let transformed = matrix * Vector4::new(point.x, point.y, point.z, 1.0);
    transformed.truncate() / transformed.w
}

/// Result of an object picking operation
#[derive(Debug, Clone, PartialEq)]
pub struct PickResult {
    pub node: NodeId,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Convert screen coordinates to a world-space ray
///
/// Returns `None` for an empty screen or a degenerate camera.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    screen_size: (f32, f32),
    camera: &OrbitCamera,
) -> Option<Ray> {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = screen_size;
    if screen_width <= 0.0 || screen_height <= 0.0 {
        return None;
    }

    // Normalized device coordinates (-1 to 1)
    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height; // Flip Y axis

    let inv_view_proj = camera.build_gl_view_projection_matrix().invert()?;

    // Near and far plane points in OpenGL clip space
    let near_3d = unproject(&inv_view_proj, Vector4::new(ndc_x, ndc_y, -1.0, 1.0));
    let far_3d = unproject(&inv_view_proj, Vector4::new(ndc_x, ndc_y, 1.0, 1.0));

    let direction = far_3d - near_3d;
    if direction.magnitude2() <= f32::EPSILON {
        return None;
    }
    Some(Ray::new(near_3d, direction))
}

fn unproject(inv_view_proj: &Matrix4<f32>, ndc: Vector4<f32>) -> Vector3<f32> {
    let world = inv_view_proj * ndc;
    world.truncate() / world.w
}

/// Object picker for 3D mouse selection
///
/// Only nodes with pointer handlers are considered. Local bounding boxes are
/// cached per node since geometry never changes after composition.
pub struct ObjectPicker {
    cached_aabbs: Vec<Option<AABB>>,
}

impl ObjectPicker {
    pub fn new() -> Self {
        Self {
            cached_aabbs: Vec::new(),
        }
    }

    /// Every interactive node under the cursor, nearest first
    pub fn pick_all(
        &mut self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &OrbitCamera,
        scene: &Scene,
    ) -> Vec<PickResult> {
        match screen_to_ray(screen_pos, screen_size, camera) {
            Some(ray) => self.pick_ray(&ray, scene),
            None => Vec::new(),
        }
    }

    /// Every interactive node hit by `ray`, nearest first
    pub fn pick_ray(&mut self, ray: &Ray, scene: &Scene) -> Vec<PickResult> {
        if self.cached_aabbs.len() < scene.mesh_count() {
            self.cached_aabbs.resize(scene.mesh_count(), None);
        }

        let mut hits = Vec::new();
        for id in scene.node_ids() {
            let Some(node) = scene.node(id) else {
                continue;
            };
            if !node.is_interactive() {
                continue;
            }
            let Some(world_matrix) = scene.world_matrix(id) else {
                continue;
            };

            let local_aabb = *self.cached_aabbs[id.0].get_or_insert_with(|| {
                let (min, max) = node.mesh().geometry().bounds();
                AABB::new(min.into(), max.into())
            });
            if local_aabb.transform(&world_matrix).intersect_ray(ray).is_none() {
                continue;
            }

            if let Some(distance) = nearest_triangle_hit(ray, &world_matrix, node.mesh().geometry())
            {
                hits.push(PickResult {
                    node: id,
                    distance,
                    intersection_point: ray.point_at(distance),
                });
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Invalidate cached AABBs (call when geometry changes)
    pub fn invalidate_cache(&mut self) {
        self.cached_aabbs.clear();
    }
}

impl Default for ObjectPicker {
    fn default() -> Self {
        Self::new()
    }
}

fn nearest_triangle_hit(
    ray: &Ray,
    world_matrix: &Matrix4<f32>,
    geometry: &crate::gfx::geometry::GeometryData,
) -> Option<f32> {
    let world_vertices: Vec<Vector3<f32>> = geometry
        .vertices
        .iter()
        .map(|v| transform_point(world_matrix, Vector3::from(*v)))
        .collect();

    geometry
        .indices
        .chunks_exact(3)
        .filter_map(|triangle| {
            let a = *world_vertices.get(triangle[0] as usize)?;
            let b = *world_vertices.get(triangle[1] as usize)?;
            let c = *world_vertices.get(triangle[2] as usize)?;
            ray.intersect_triangle(a, b, c)
        })
        .min_by(f32::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        gfx::{
            camera::{CameraController, CameraManager},
            scene::ShapeNode,
        },
    };

    fn scene_with_sphere_and_cube() -> Scene {
        let camera = OrbitCamera::looking_at([0.0, 0.0, 7.0], [0.0; 3], 1.0);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(0.01, 1.0)));
        scene.add_node(ShapeNode::cube([0.0, 0.0, 3.0], Color::WHITE, [1.0; 3]));
        scene.add_node(ShapeNode::sphere([0.0; 3], 1.0, 30, 30));
        scene
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = AABB::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_ray_triangle_intersection() {
        let ray = Ray::new(Vector3::new(0.2, 0.2, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let (a, b, c) = (
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        let t = ray.intersect_triangle(a, b, c).unwrap();
        assert!((t - 5.0).abs() < 1e-5);

        // Back faces count too
        assert!(ray.intersect_triangle(a, c, b).is_some());

        let miss = Ray::new(Vector3::new(2.0, 2.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(miss.intersect_triangle(a, b, c).is_none());
    }

    #[test]
    fn test_center_ray_points_down_view_axis() {
        let camera = OrbitCamera::looking_at([0.0, 0.0, 7.0], [0.0; 3], 1.0);
        let ray = screen_to_ray((400.0, 300.0), (800.0, 600.0), &camera).unwrap();

        assert!((ray.direction - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-4);
        assert!(screen_to_ray((0.0, 0.0), (0.0, 600.0), &camera).is_none());
    }

    #[test]
    fn test_picks_sphere_through_non_interactive_cube() {
        let scene = scene_with_sphere_and_cube();
        let mut picker = ObjectPicker::new();
        let camera = scene.camera_manager.camera;

        let hits = picker.pick_all((400.0, 310.0), (800.0, 600.0), &camera, &scene);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, NodeId(1));
        // Sphere surface faces the camera near z = 1
        let from_eye = (hits[0].intersection_point - camera.eye).magnitude();
        assert!((from_eye - 6.0).abs() < 0.05, "{}", from_eye);
    }

    #[test]
    fn test_miss_outside_sphere() {
        let scene = scene_with_sphere_and_cube();
        let mut picker = ObjectPicker::new();
        let camera = scene.camera_manager.camera;

        assert!(picker
            .pick_all((5.0, 5.0), (800.0, 600.0), &camera, &scene)
            .is_empty());
    }
}
