//! Global uniform bindings for camera and scene lighting
//!
//! Manages the uniform buffer and bind group for per-frame state shared by
//! every draw: camera matrices, the directional light and the ambient term.

use crate::{
    gfx::camera::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the Globals struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],  // Camera position (homogeneous coordinates)
    view_proj: [[f32; 4]; 4], // Camera view-projection matrix
    light_direction: [f32; 4], // Unit vector pointing towards the light, w unused
    light_color: [f32; 4],     // sRGB color, w = intensity
    ambient_color: [f32; 4],   // sRGB color, w = intensity
}
// Total: 16 + 64 + 16 + 16 + 16 = 128 bytes

/// Lighting values pushed to the shaders each frame
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub direction: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
}

impl Default for LightConfig {
    /// No directional contribution and no ambient light
    fn default() -> Self {
        Self {
            direction: [0.0, 0.0, 1.0],
            color: [1.0, 1.0, 1.0],
            intensity: 0.0,
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.0,
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with camera and light data
///
/// Should be called each frame after the scene and camera were updated.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    light: LightConfig,
) {
    let [dx, dy, dz] = light.direction;
    let [r, g, b] = light.color;
    let [ar, ag, ab] = light.ambient_color;

    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        light_direction: [dx, dy, dz, 0.0],
        light_color: [r, g, b, light.intensity],
        ambient_color: [ar, ag, ab, light.ambient_intensity],
    };

    ubo.update_content(queue, content);
}

/// Manages bind group layouts and bind groups for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    /// Creates the layout and binds it to `ubo`
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // Global uniforms (camera + light)
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    /// Returns the bind group layout for pipeline creation
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_ubo_layout_size() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 128);
    }
}
