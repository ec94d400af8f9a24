use log::warn;

use crate::render::Renderer;
use crate::state::{ParameterChange, RenderState, Session};

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface must be reconfigured before drawing again.
    Reconfigure,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigure,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            _ => Self::SkipFrame,
        }
    }
}

/// Size to render at for a canvas, preferring its laid-out client size and
/// falling back to the backing-store size when the canvas is not laid out.
pub fn drawable_size(client: (i32, i32), backing: (u32, u32)) -> (u32, u32) {
    match client {
        (width, height) if width > 0 && height > 0 => (width as u32, height as u32),
        _ => backing,
    }
}

/// One viewing session: the camera parameters, the render state derived from
/// them, and the renderer that draws it.
///
/// Every parameter change rebuilds the state and renders a frame before
/// returning. There is no frame loop.
pub struct Viewer {
    session: Session,
    renderer: Renderer,
}

impl Viewer {
    pub fn new(session: Session, renderer: Renderer) -> Self {
        Self { session, renderer }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Applies `change` and re-renders.
    pub fn on_parameter_changed(&mut self, change: ParameterChange) -> Result<(), wgpu::SurfaceError> {
        if let ParameterChange::Viewport { width, height } = change {
            self.renderer.resize(width, height);
        }
        let state = *self.session.on_parameter_changed(change);
        self.draw(&state)
    }

    pub fn on_projection_params_changed(
        &mut self,
        near: f32,
        far: f32,
        fovy: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let state = *self.session.on_projection_params_changed(near, far, fovy);
        self.draw(&state)
    }

    pub fn on_camera_params_changed(&mut self, camera_z: f32) -> Result<(), wgpu::SurfaceError> {
        let state = *self.session.on_camera_params_changed(camera_z);
        self.draw(&state)
    }

    /// Redraws the current state, e.g. after the host exposes the surface.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let state = *self.session.state();
        self.draw(&state)
    }

    /// Only fatal surface errors are returned; a lost or outdated surface is
    /// reconfigured and drawn once more.
    fn draw(&mut self, state: &RenderState) -> Result<(), wgpu::SurfaceError> {
        let err = match self.renderer.render_frame(state) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        match SurfaceErrorAction::classify(&err) {
            SurfaceErrorAction::Reconfigure => {
                let (width, height) = self.renderer.size();
                self.renderer.resize(width, height);
                self.renderer.render_frame(state).or_else(|retry| {
                    match SurfaceErrorAction::classify(&retry) {
                        SurfaceErrorAction::Fatal => Err(retry),
                        _ => {
                            warn!("dropping frame after reconfigure: {retry}");
                            Ok(())
                        }
                    }
                })
            }
            SurfaceErrorAction::SkipFrame => {
                warn!("skipping frame: {err}");
                Ok(())
            }
            SurfaceErrorAction::Fatal => Err(err),
        }
    }
}
