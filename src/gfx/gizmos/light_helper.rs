//! Debug helper for the directional light
//!
//! Draws a square of half-extent `size` at the light position, facing the
//! light target, plus a line from the light to its target. The geometry is
//! rebuilt from the live light every update.

use cgmath::{InnerSpace, Vector3};

use crate::{
    color::Color,
    gfx::scene::{Light, LineVertex, Scene},
};

use super::traits::Gizmo;

pub struct DirectionalLightHelper {
    size: f32,
    color: Color,
    enabled: bool,
    lines: Vec<LineVertex>,
}

impl DirectionalLightHelper {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            enabled: true,
            lines: Vec::new(),
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    fn rebuild(&mut self, position: Vector3<f32>, target: Vector3<f32>) {
        self.lines.clear();

        let to_target = target - position;
        if to_target.magnitude2() <= f32::EPSILON {
            return;
        }
        let forward = to_target.normalize();

        // Any axis not parallel to the light direction spans the plane
        let reference = if forward.y.abs() > 0.99 {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        let right = forward.cross(reference).normalize() * self.size;
        let up = right.cross(forward).normalize() * self.size;

        let corners = [
            position - right + up,
            position + right + up,
            position + right - up,
            position - right - up,
        ];

        let color = self.color.to_array();
        for i in 0..corners.len() {
            let next = corners[(i + 1) % corners.len()];
            self.lines.push(LineVertex::new(corners[i].into(), color));
            self.lines.push(LineVertex::new(next.into(), color));
        }
        self.lines.push(LineVertex::new(position.into(), color));
        self.lines.push(LineVertex::new(target.into(), color));
    }
}

impl Gizmo for DirectionalLightHelper {
    fn update(&mut self, scene: &Scene) {
        match scene.directional_light() {
            Some(&Light::Directional {
                position, target, ..
            }) => self.rebuild(position, target),
            _ => self.lines.clear(),
        }
    }

    fn line_vertices(&self) -> &[LineVertex] {
        &self.lines
    }

    fn name(&self) -> &str {
        "Directional Light Helper"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};

    fn scene_with(lights: &[Light]) -> Scene {
        let camera = OrbitCamera::looking_at([0.0, 0.0, 7.0], [0.0; 3], 1.0);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(0.01, 1.0)));
        for light in lights {
            scene.add_light(*light);
        }
        scene
    }

    #[test]
    fn test_square_faces_target() {
        let scene = scene_with(&[Light::directional([0.0, 0.0, 5.0], Color::WHITE, 0.5)]);
        let mut helper = DirectionalLightHelper::new(0.5, Color::WHITE);
        helper.update(&scene);

        let lines = helper.line_vertices();
        assert_eq!(lines.len(), 10);
        for vertex in &lines[..8] {
            assert!((vertex.position[2] - 5.0).abs() < 1e-6);
            assert!((vertex.position[0].abs() - 0.5).abs() < 1e-6);
            assert!((vertex.position[1].abs() - 0.5).abs() < 1e-6);
            assert_eq!(vertex.color, [1.0, 1.0, 1.0]);
        }
        assert_eq!(lines[8].position, [0.0, 0.0, 5.0]);
        assert_eq!(lines[9].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_tracks_moved_light() {
        let mut scene = scene_with(&[Light::directional([0.0, 0.0, 5.0], Color::WHITE, 0.5)]);
        let mut helper = DirectionalLightHelper::new(0.5, Color::WHITE);
        helper.update(&scene);

        scene = scene_with(&[Light::directional([0.0, 4.0, 0.0], Color::WHITE, 0.5)]);
        helper.update(&scene);

        assert_eq!(helper.line_vertices()[8].position, [0.0, 4.0, 0.0]);
        for vertex in &helper.line_vertices()[..8] {
            assert!((vertex.position[1] - 4.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_draws_nothing_without_directional_light() {
        let scene = scene_with(&[Light::ambient(Color::WHITE, 0.1)]);
        let mut helper = DirectionalLightHelper::new(0.5, Color::WHITE);
        helper.update(&scene);
        assert!(helper.line_vertices().is_empty());
    }
}
