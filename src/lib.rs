//! A lit cube viewer comparing per-vertex (Gouraud) and per-fragment (Phong)
//! shading.
//!
//! The render state (projection, view and normal matrices plus two point
//! lights) is recomputed from scratch whenever a camera parameter changes,
//! and a single frame is drawn in response. The math, mesh and shader
//! sources are plain data and can be exercised without a GPU; `render`
//! and the hosts (`app` for desktop, `web` for the browser) own the
//! graphics context.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod render;
pub mod shading;
pub mod state;
pub mod summary;
pub mod viewer;

#[cfg(not(target_arch = "wasm32"))]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use camera::{derive_normal_matrix, recompute_projection, recompute_view, CameraParams};
pub use error::{ParamError, RenderInitError, UnknownShadingModel};
pub use render::{LightingProgram, Renderer};
pub use shading::{ShaderPair, ShadingModel};
pub use state::{ParameterChange, RenderState, Session, LIGHT_POSITIONS};
pub use summary::write_summary;
pub use viewer::{SurfaceErrorAction, Viewer};
