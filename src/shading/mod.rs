//! Lighting strategies.
//!
//! Both models bind to the same vertex attributes and the same uniform block,
//! so either one can be linked against the cube buffers without touching the
//! renderer. Only the split of work between the two stages differs.

mod gouraud;
mod phong;
pub mod reference;

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::error::UnknownShadingModel;

pub use gouraud::{gouraud_fragment_source, gouraud_vertex_source};
pub use phong::{phong_fragment_source, phong_vertex_source};

pub const AMBIENT: Vec3 = Vec3::splat(0.2);
pub const DIFFUSE_1: Vec3 = Vec3::splat(0.4);
pub const DIFFUSE_2: Vec3 = Vec3::splat(0.4);
pub const SPECULAR: Vec3 = Vec3::ONE;
pub const SHININESS: f32 = 32.0;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

pub const POSITION_LOCATION: u32 = 0;
pub const NORMAL_LOCATION: u32 = 1;
pub const UNIFORM_GROUP: u32 = 0;
pub const UNIFORM_BINDING: u32 = 0;

/// Which stage evaluates the lighting equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadingModel {
    /// Per-vertex lighting, interpolated across each triangle.
    #[default]
    Gouraud,
    /// Per-fragment lighting from interpolated positions and normals.
    Phong,
}

impl ShadingModel {
    pub const ALL: [ShadingModel; 2] = [ShadingModel::Gouraud, ShadingModel::Phong];

    pub fn name(self) -> &'static str {
        match self {
            ShadingModel::Gouraud => "gouraud",
            ShadingModel::Phong => "phong",
        }
    }

    /// WGSL source for both pipeline stages of this model.
    pub fn shader_pair(self) -> ShaderPair {
        match self {
            ShadingModel::Gouraud => ShaderPair {
                vertex: gouraud_vertex_source(),
                fragment: gouraud_fragment_source(),
            },
            ShadingModel::Phong => ShaderPair {
                vertex: phong_vertex_source(),
                fragment: phong_fragment_source(),
            },
        }
    }
}

impl fmt::Display for ShadingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShadingModel {
    type Err = UnknownShadingModel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ShadingModel::ALL
            .into_iter()
            .find(|model| model.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownShadingModel(value.to_string()))
    }
}

/// Vertex and fragment stage sources, compiled as two separate modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPair {
    pub vertex: String,
    pub fragment: String,
}

/// Declarations shared by every stage: the uniform block and the lighting
/// constants, emitted from the same Rust constants the CPU reference uses.
fn prelude() -> String {
    format!(
        r#"struct LightingUniforms {{
    model_view: mat4x4<f32>,
    projection: mat4x4<f32>,
    normal_matrix: mat3x3<f32>,
    light_position_1: vec3<f32>,
    light_position_2: vec3<f32>,
}}

@group({UNIFORM_GROUP}) @binding({UNIFORM_BINDING})
var<uniform> uniforms: LightingUniforms;

const AMBIENT: vec3<f32> = {ambient};
const DIFFUSE_1: vec3<f32> = {diffuse_1};
const DIFFUSE_2: vec3<f32> = {diffuse_2};
const SPECULAR: vec3<f32> = {specular};
const SHININESS: f32 = {shininess:?};
"#,
        ambient = vec3_literal(AMBIENT),
        diffuse_1 = vec3_literal(DIFFUSE_1),
        diffuse_2 = vec3_literal(DIFFUSE_2),
        specular = vec3_literal(SPECULAR),
        shininess = SHININESS,
    )
}

fn vertex_input() -> String {
    format!(
        r#"
struct VertexInput {{
    @location({POSITION_LOCATION}) position: vec3<f32>,
    @location({NORMAL_LOCATION}) normal: vec3<f32>,
}}
"#
    )
}

fn vec3_literal(v: Vec3) -> String {
    format!("vec3<f32>({:?}, {:?}, {:?})", v.x, v.y, v.z)
}
