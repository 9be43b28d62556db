//! Local transforms for shape nodes and groups

use cgmath::{Matrix4, Rad, Vector3};

/// Position, Euler rotation and per-axis scale.
///
/// Rotation is in radians and applied in XYZ order, so the local matrix is
/// `T * Rx * Ry * Rz * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity transform moved to `position`
    pub fn from_position(position: [f32; 3]) -> Self {
        Self {
            position: position.into(),
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = rotation.into();
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.set_uniform_scale(scale);
        self
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vector3::new(scale, scale, scale);
    }

    pub fn rotation_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
    }

    /// Local transformation matrix
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * self.rotation_matrix() * s // Order matters: T * R * S
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};

    fn assert_close(a: Vector4<f32>, b: Vector4<f32>) {
        assert!((a - b).x.abs() < 1e-5, "{a:?} != {b:?}");
        assert!((a - b).y.abs() < 1e-5, "{a:?} != {b:?}");
        assert!((a - b).z.abs() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Transform::default().matrix(), Matrix4::identity());
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let transform = Transform::from_position([1.0, 0.0, 0.0])
            .with_rotation([0.0, std::f32::consts::FRAC_PI_2, 0.0])
            .with_uniform_scale(2.0);

        // +X scaled to 2, rotated about Y onto -Z, then moved by +X
        let moved = transform.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_close(moved, Vector4::new(1.0, 0.0, -2.0, 1.0));
    }

    #[test]
    fn test_euler_order_is_xyz() {
        let transform = Transform::new().with_rotation([
            std::f32::consts::FRAC_PI_2,
            std::f32::consts::FRAC_PI_2,
            0.0,
        ]);

        // Ry maps +X to -Z first, then Rx maps -Z to +Y
        let moved = transform.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_close(moved, Vector4::new(0.0, 1.0, 0.0, 1.0));
    }
}
