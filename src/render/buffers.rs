use bytemuck::{Pod, Zeroable};
use glam::Mat3;
use wgpu::util::DeviceExt;

use crate::geometry::{CUBE_INDICES, CUBE_NORMALS, CUBE_POSITIONS, INDEX_COUNT};
use crate::state::RenderState;

/// Immutable cube buffers, uploaded once at start-up.
pub(crate) struct GeometryBuffers {
    pub positions: wgpu::Buffer,
    pub normals: wgpu::Buffer,
    pub indices: wgpu::Buffer,
    pub index_count: u32,
}

impl GeometryBuffers {
    pub fn new(device: &wgpu::Device) -> Self {
        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube-positions"),
            contents: bytemuck::cast_slice(&CUBE_POSITIONS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let normals = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube-normals"),
            contents: bytemuck::cast_slice(&CUBE_NORMALS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube-indices"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            positions,
            normals,
            indices,
            index_count: INDEX_COUNT as u32,
        }
    }
}

pub(crate) struct DepthBuffer {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthBuffer {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

    pub fn create(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth-texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

/// Host-side mirror of the `LightingUniforms` block declared by every shader
/// stage. `mat3x3` and `vec3` members occupy 16-byte slots in a uniform
/// buffer, hence the padded arrays.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct LightingUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
    pub light_position_1: [f32; 4],
    pub light_position_2: [f32; 4],
}

impl LightingUniforms {
    pub fn from_state(state: &RenderState) -> Self {
        let [light_1, light_2] = state.lights;
        Self {
            model_view: state.view.to_cols_array_2d(),
            projection: state.projection.to_cols_array_2d(),
            normal_matrix: mat3_to_3x4(state.normal_matrix()),
            light_position_1: light_1.extend(0.0).into(),
            light_position_2: light_2.extend(0.0).into(),
        }
    }
}

fn mat3_to_3x4(matrix: Mat3) -> [[f32; 4]; 3] {
    let cols = matrix.to_cols_array();
    [
        [cols[0], cols[1], cols[2], 0.0],
        [cols[3], cols[4], cols[5], 0.0],
        [cols[6], cols[7], cols[8], 0.0],
    ]
}
