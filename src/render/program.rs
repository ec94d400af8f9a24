use log::{debug, error, info, warn};

use super::buffers::{DepthBuffer, LightingUniforms};
use crate::shading::{
    ShadingModel, FRAGMENT_ENTRY, NORMAL_LOCATION, POSITION_LOCATION, UNIFORM_BINDING,
    VERTEX_ENTRY,
};

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: POSITION_LOCATION,
}];

const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: NORMAL_LOCATION,
}];

/// Vertex buffer slot the position stream is bound to.
pub(crate) const POSITION_SLOT: u32 = 0;
/// Vertex buffer slot the normal stream is bound to.
pub(crate) const NORMAL_SLOT: u32 = 1;

/// A linked lighting pipeline and the layout its uniform block binds through.
pub struct LightingProgram {
    model: ShadingModel,
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_layout: wgpu::BindGroupLayout,
}

impl LightingProgram {
    /// Compiles both stages of `model` and links them into a pipeline.
    ///
    /// Returns `None` when either stage fails to compile or the pipeline fails
    /// to link. Diagnostics are logged and the failed objects are dropped.
    pub async fn build(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        model: ShadingModel,
    ) -> Option<Self> {
        let pair = model.shader_pair();
        let vertex = compile_stage(device, model, "vertex", &pair.vertex).await?;
        let fragment = compile_stage(device, model, "fragment", &pair.fragment).await?;

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lighting-uniform-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: UNIFORM_BINDING,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<LightingUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lighting-pipeline-layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let stride = std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress;
        let label = format!("{model}-lighting-pipeline");

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &POSITION_ATTRIBUTES,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &NORMAL_ATTRIBUTES,
                    },
                ],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &fragment,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
            cache: None,
        });
        if let Some(err) = device.pop_error_scope().await {
            error!("failed to link {model} lighting program: {err}");
            drop(pipeline);
            return None;
        }

        info!("linked {model} lighting program");
        Some(Self {
            model,
            pipeline,
            uniform_layout,
        })
    }

    pub fn model(&self) -> ShadingModel {
        self.model
    }
}

async fn compile_stage(
    device: &wgpu::Device,
    model: ShadingModel,
    stage: &str,
    source: &str,
) -> Option<wgpu::ShaderModule> {
    let label = format!("{model}-{stage}-shader");

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let scope_error = device.pop_error_scope().await;

    let mut failed = scope_error.is_some();
    for message in module.get_compilation_info().await.messages {
        let position = message
            .location
            .map(|loc| format!("{}:{}", loc.line_number, loc.line_position))
            .unwrap_or_default();
        match message.message_type {
            wgpu::CompilationMessageType::Error => {
                failed = true;
                error!("{label} {position}: {}", message.message);
            }
            wgpu::CompilationMessageType::Warning => {
                warn!("{label} {position}: {}", message.message);
            }
            wgpu::CompilationMessageType::Info => {
                debug!("{label} {position}: {}", message.message);
            }
        }
    }

    if failed {
        if let Some(err) = scope_error {
            error!("failed to compile {label}: {err}");
        }
        drop(module);
        return None;
    }
    Some(module)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// A device on the noop backend: no GPU work, but shader and pipeline
    /// validation still run.
    fn noop_device() -> wgpu::Device {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::NOOP,
            backend_options: wgpu::BackendOptions {
                noop: wgpu::NoopBackendOptions { enable: true },
                ..Default::default()
            },
            ..Default::default()
        });
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .expect("noop adapter");
        let (device, _queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("noop-device"),
            ..Default::default()
        }))
        .expect("noop device");
        device
    }

    #[test]
    fn invalid_stage_source_is_rejected() {
        let device = noop_device();
        let source = "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return undefined_value; }";
        let module = pollster::block_on(compile_stage(
            &device,
            ShadingModel::Gouraud,
            "vertex",
            source,
        ));
        assert!(module.is_none());
    }

    #[test]
    fn valid_stage_source_compiles() {
        let device = noop_device();
        let pair = ShadingModel::Phong.shader_pair();
        let module = pollster::block_on(compile_stage(
            &device,
            ShadingModel::Phong,
            "fragment",
            &pair.fragment,
        ));
        assert!(module.is_some());
    }

    #[test]
    fn every_model_links() {
        let device = noop_device();
        for model in ShadingModel::ALL {
            let program = pollster::block_on(LightingProgram::build(&device, COLOR_FORMAT, model))
                .unwrap_or_else(|| panic!("{model} program"));
            assert_eq!(program.model(), model);
        }
    }
}
