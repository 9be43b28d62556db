use cgmath::{Matrix4, SquareMatrix, Vector3};

/// Anything that can feed the globals uniform
pub trait Camera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;

    fn eye_position(&self) -> Vector3<f32>;

    fn to_uniform(&self) -> CameraUniform {
        CameraUniform::new(self.eye_position(), self.build_view_projection_matrix())
    }
}

/// Camera block of the globals uniform, mirrored by `Globals` in the shaders
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    // w = 1 keeps the 16 byte alignment
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(eye: Vector3<f32>, view_proj: Matrix4<f32>) -> Self {
        Self {
            view_position: eye.extend(1.0).into(),
            view_proj: view_proj.into(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 0.0), Matrix4::identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_homogeneous() {
        let uniform = CameraUniform::new(Vector3::new(1.0, 2.0, 3.0), Matrix4::identity());
        assert_eq!(uniform.view_position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
