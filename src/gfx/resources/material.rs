//! Material system for shape rendering
//!
//! Two material kinds exist: a standard lit material and a wobble material
//! whose vertices are twisted about the local Y axis over time. The wobble
//! clock is owned by the material and advanced once per tick from the frame
//! context, independently of the shape's own update.

use wgpu::Device;

use crate::{
    clock::FrameContext,
    color::Color,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// GPU uniform data for materials
///
/// MUST match the Material struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// sRGB base color, alpha unused
    pub color: [f32; 4],
    /// x = distortion factor, y = wobble time, z = 1.0 when wobbling
    pub wobble: [f32; 4],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Creates the bind group layout shared by every material.
///
/// The wobble parameters are read in the vertex stage and the color in the
/// fragment stage.
pub fn create_material_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_rendering(binding_types::uniform())
        .create(device, "Material Bind Group Layout")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialKind {
    /// Lambert-lit solid color
    Standard,
    /// Standard shading with a time-varying vertex twist
    Wobble { factor: f32, speed: f32 },
}

struct MaterialGpuResources {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

/// Material of one shape node
pub struct Material {
    pub color: Color,
    pub wireframe: bool,
    kind: MaterialKind,
    time: f32,
    gpu: Option<MaterialGpuResources>,
}

impl Material {
    pub fn standard(color: Color) -> Self {
        Self {
            color,
            wireframe: false,
            kind: MaterialKind::Standard,
            time: 0.0,
            gpu: None,
        }
    }

    pub fn wobble(color: Color, factor: f32, speed: f32) -> Self {
        Self {
            kind: MaterialKind::Wobble { factor, speed },
            ..Self::standard(color)
        }
    }

    /// Builder pattern: render edges only
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    /// Current wobble time, zero for standard materials
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advances material-driven animation for this tick.
    pub fn update(&mut self, frame: &FrameContext) {
        if let MaterialKind::Wobble { speed, .. } = self.kind {
            self.time = frame.elapsed_time * speed;
        }
    }

    pub fn uniform(&self) -> MaterialUniform {
        let wobble = match self.kind {
            MaterialKind::Standard => [0.0; 4],
            MaterialKind::Wobble { factor, .. } => [factor, self.time, 1.0, 0.0],
        };

        MaterialUniform {
            color: self.color.to_rgba(),
            wobble,
        }
    }

    pub fn init_gpu_resources(&mut self, device: &Device, layout: &BindGroupLayoutWithDesc) {
        if self.gpu.is_some() {
            return;
        }

        let ubo = MaterialUBO::new_with_data(device, &self.uniform());
        let bind_group = BindGroupBuilder::new(layout)
            .resource(ubo.binding_resource())
            .create(device, "Material Bind Group");

        self.gpu = Some(MaterialGpuResources { ubo, bind_group });
    }

    /// Syncs the current uniform data to the GPU
    pub fn update_gpu_resources(&mut self, queue: &wgpu::Queue) {
        let uniform = self.uniform();
        if let Some(gpu) = &mut self.gpu {
            gpu.ubo.update_content(queue, uniform);
        }
    }

    /// Gets the bind group for rendering
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wobble_time_follows_elapsed_time() {
        let mut material = Material::wobble(Color::WHITE, 3.0, 2.0);
        material.update(&FrameContext::new(1.5, 0.016));

        assert_eq!(material.time(), 3.0);
        assert_eq!(material.uniform().wobble, [3.0, 3.0, 1.0, 0.0]);
    }

    #[test]
    fn test_standard_material_does_not_wobble() {
        let mut material = Material::standard(Color::from_hex(0x00ff00)).with_wireframe(true);
        material.update(&FrameContext::new(4.0, 0.5));

        assert_eq!(material.time(), 0.0);
        assert_eq!(material.uniform().wobble, [0.0; 4]);
        assert!(material.wireframe);
        assert!(material.bind_group().is_none());
    }
}
