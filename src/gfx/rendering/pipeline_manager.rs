//! Named render pipelines
//!
//! Shaders are loaded once and shared; pipelines are registered as
//! [`PipelineConfig`]s and built together once every shader is in place.

use std::{collections::HashMap, sync::Arc};
use wgpu::{BindGroupLayout, Device, PrimitiveTopology, RenderPipeline, ShaderModule, TextureFormat};

use crate::{
    error::{Error, Result},
    gfx::scene::vertex::{LineVertex, Vertex3D},
};

/// Vertex buffer layout a pipeline consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexLayout {
    /// [`Vertex3D`]: position + normal
    Mesh,
    /// [`LineVertex`]: position + color
    Line,
}

impl VertexLayout {
    fn buffer_layout(self) -> wgpu::VertexBufferLayout<'static> {
        match self {
            VertexLayout::Mesh => Vertex3D::desc(),
            VertexLayout::Line => LineVertex::desc(),
        }
    }
}

/// Everything that differs between the viewer's pipelines
///
/// Faces are never culled: open and thin surfaces stay visible from behind.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub topology: PrimitiveTopology,
    pub vertex_layout: VertexLayout,
    pub color_format: TextureFormat,
    pub depth_format: Option<TextureFormat>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Mesh".to_string(),
            shader: "standard".to_string(),
            bind_group_layouts: Vec::new(),
            topology: PrimitiveTopology::TriangleList,
            vertex_layout: VertexLayout::Mesh,
            color_format: TextureFormat::Bgra8Unorm,
            depth_format: None,
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_shader(mut self, shader: &str) -> Self {
        self.shader = shader.to_owned();
        self
    }

    /// Layouts in bind group order
    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn with_primitive_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_vertex_layout(mut self, layout: VertexLayout) -> Self {
        self.vertex_layout = layout;
        self
    }

    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    /// Depth tested with `Less` and depth writes on
    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }
}

pub struct PipelineManager {
    device: Arc<Device>,
    shaders: HashMap<String, ShaderModule>,
    configs: Vec<(String, PipelineConfig)>,
    pipelines: HashMap<String, RenderPipeline>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            shaders: HashMap::new(),
            configs: Vec::new(),
            pipelines: HashMap::new(),
        }
    }

    pub fn load_shader(&mut self, name: &str, source: &str) {
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        self.shaders.insert(name.to_owned(), module);
    }

    /// Queues `config` under `name`; nothing is built until
    /// [`Self::create_all_pipelines`]
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) {
        self.configs.push((name.to_owned(), config));
    }

    /// Builds every queued pipeline, stopping at the first one whose shader
    /// was never loaded
    pub fn create_all_pipelines(&mut self) -> Result<()> {
        for (name, config) in std::mem::take(&mut self.configs) {
            let pipeline = self.build(&name, &config)?;
            log::debug!("Created pipeline '{}'", name);
            self.pipelines.insert(name, pipeline);
        }
        Ok(())
    }

    pub fn pipeline(&self, name: &str) -> Option<&RenderPipeline> {
        self.pipelines.get(name)
    }

    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    fn build(&self, name: &str, config: &PipelineConfig) -> Result<RenderPipeline> {
        let shader = self
            .shaders
            .get(&config.shader)
            .ok_or_else(|| Error::MissingShader {
                pipeline: name.to_owned(),
                shader: config.shader.clone(),
            })?;

        let layouts: Vec<&BindGroupLayout> = config.bind_group_layouts.iter().collect();
        let layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", config.label)),
                bind_group_layouts: &layouts,
                push_constant_ranges: &[],
            });

        let targets = [Some(wgpu::ColorTargetState {
            format: config.color_format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        Ok(self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[config.vertex_layout.buffer_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &targets,
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: config.topology,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: config.depth_format.map(|format| wgpu::DepthStencilState {
                    format,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: Default::default(),
                multiview: None,
                cache: None,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_draws_meshes() {
        let config = PipelineConfig::default();
        assert_eq!(config.shader, "standard");
        assert_eq!(config.topology, PrimitiveTopology::TriangleList);
        assert_eq!(config.vertex_layout, VertexLayout::Mesh);
        assert!(config.depth_format.is_none());
    }

    #[test]
    fn test_line_config_builders() {
        let config = PipelineConfig::default()
            .with_label("LINES")
            .with_shader("line")
            .with_primitive_topology(PrimitiveTopology::LineList)
            .with_vertex_layout(VertexLayout::Line)
            .with_depth_format(TextureFormat::Depth32Float);

        assert_eq!(config.label, "LINES");
        assert_eq!(config.shader, "line");
        assert_eq!(config.topology, PrimitiveTopology::LineList);
        assert_eq!(
            config.vertex_layout.buffer_layout().array_stride,
            std::mem::size_of::<LineVertex>() as u64
        );
        assert_eq!(config.depth_format, Some(TextureFormat::Depth32Float));
    }
}
