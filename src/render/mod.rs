mod buffers;
mod program;

use bytemuck::bytes_of;
use log::info;

use crate::error::RenderInitError;
use crate::shading::{ShadingModel, UNIFORM_BINDING, UNIFORM_GROUP};
use crate::state::RenderState;

use buffers::{DepthBuffer, GeometryBuffers, LightingUniforms};
pub use program::LightingProgram;
use program::{NORMAL_SLOT, POSITION_SLOT};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_BACKENDS: wgpu::Backends = wgpu::Backends::PRIMARY;
#[cfg(target_arch = "wasm32")]
const DEFAULT_BACKENDS: wgpu::Backends = wgpu::Backends::GL;

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Draws the cube with one lighting program. Every buffer and the program are
/// created up front; `render_frame` only uploads uniforms and draws.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthBuffer,
    program: LightingProgram,
    geometry: GeometryBuffers,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl Renderer {
    /// Acquires a rendering context for `target` and builds the selected
    /// lighting program.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        model: ShadingModel,
    ) -> Result<Self, RenderInitError> {
        if width == 0 || height == 0 {
            return Err(RenderInitError::EmptySurface);
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::from_env().unwrap_or(DEFAULT_BACKENDS),
            flags: wgpu::InstanceFlags::default(),
            memory_budget_thresholds: Default::default(),
            backend_options: Default::default(),
        });
        let surface = instance.create_surface(target)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("using adapter {:?}", adapter.get_info());

        let required_limits = if cfg!(target_arch = "wasm32") {
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
        } else {
            wgpu::Limits::default()
        };
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("renderer-device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: Default::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders write final colors directly, so skip the sRGB encode
        // when the surface offers a linear format.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(RenderInitError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth = DepthBuffer::create(&device, width, height);

        let program = LightingProgram::build(&device, surface_format, model)
            .await
            .ok_or(RenderInitError::ProgramUnavailable(model))?;

        let geometry = GeometryBuffers::new(&device);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lighting-uniforms"),
            size: std::mem::size_of::<LightingUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lighting-bind-group"),
            layout: &program.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: UNIFORM_BINDING,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            program,
            geometry,
            uniform_buffer,
            uniform_bind_group,
        })
    }

    pub fn shading_model(&self) -> ShadingModel {
        self.program.model()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigures the surface and depth buffer for a new drawable size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth = DepthBuffer::create(&self.device, width, height);
    }

    /// Clears the target and draws the cube once with `state`.
    pub fn render_frame(&mut self, state: &RenderState) -> Result<(), wgpu::SurfaceError> {
        let uniforms = LightingUniforms::from_state(state);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytes_of(&uniforms));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cube-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.program.pipeline);
            pass.set_vertex_buffer(POSITION_SLOT, self.geometry.positions.slice(..));
            pass.set_vertex_buffer(NORMAL_SLOT, self.geometry.normals.slice(..));
            pass.set_bind_group(UNIFORM_GROUP, &self.uniform_bind_group, &[]);
            pass.set_index_buffer(self.geometry.indices.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.geometry.index_count, 0, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
