use thiserror::Error;

use crate::shading::ShadingModel;

/// Camera parameter combinations that produce a degenerate projection.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParamError {
    #[error("near plane must be positive (got {0})")]
    NearNotPositive(f32),
    #[error("far plane ({far}) must lie beyond the near plane ({near})")]
    FarNotBeyondNear { near: f32, far: f32 },
    #[error("field of view must lie strictly between 0 and 180 degrees (got {0})")]
    FieldOfViewOutOfRange(f32),
}

/// Fatal failures while setting up the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderInitError {
    #[error("drawing surface has zero area")]
    EmptySurface,
    #[error("no rendering context available for the drawing surface")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to acquire GPU adapter")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,
    #[error("{0} lighting program could not be built")]
    ProgramUnavailable(ShadingModel),
}

impl RenderInitError {
    /// Text shown to the user when the viewer cannot start.
    pub fn user_message(&self) -> String {
        match self {
            RenderInitError::EmptySurface => {
                "Unable to initialize the renderer: the canvas has no visible area.".to_string()
            }
            RenderInitError::ProgramUnavailable(model) => {
                format!("Unable to initialize the renderer: the {model} lighting program failed to build.")
            }
            other => format!(
                "Unable to initialize the renderer. Your browser may not support it.\n{other}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shading model `{0}` (expected `gouraud` or `phong`)")]
pub struct UnknownShadingModel(pub String);
