use glam::{Mat3, Mat4, Vec3};
use log::{debug, warn};

use crate::camera::{derive_normal_matrix, CameraParams};

/// Fixed point lights, in view space.
pub const LIGHT_POSITIONS: [Vec3; 2] = [Vec3::new(2.0, 2.0, 2.0), Vec3::new(-2.0, -2.0, -2.0)];

/// Everything the renderer pushes to the lighting program for one frame.
///
/// A new value is built for every parameter change; nothing is patched in
/// place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub projection: Mat4,
    /// Model-view matrix. The model transform is the identity, so this is
    /// the camera's view matrix.
    pub view: Mat4,
    pub lights: [Vec3; 2],
}

impl RenderState {
    pub fn new(params: &CameraParams, aspect: f32) -> Self {
        Self {
            projection: params.projection(aspect),
            view: params.view(),
            lights: LIGHT_POSITIONS,
        }
    }

    /// Derived on demand; never cached.
    pub fn normal_matrix(&self) -> Mat3 {
        derive_normal_matrix(self.view)
    }
}

/// A single user input that invalidates the render state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterChange {
    Near(f32),
    Far(f32),
    FieldOfView(f32),
    CameraDistance(f32),
    Viewport { width: u32, height: u32 },
}

/// Owns the camera parameters and the current render state.
#[derive(Debug, Clone)]
pub struct Session {
    params: CameraParams,
    viewport: (u32, u32),
    state: RenderState,
}

impl Session {
    pub fn new(params: CameraParams, width: u32, height: u32) -> Self {
        let viewport = (width, height);
        Self {
            params,
            viewport,
            state: RenderState::new(&params, aspect_ratio(viewport)),
        }
    }

    pub fn params(&self) -> CameraParams {
        self.params
    }

    pub fn aspect(&self) -> f32 {
        aspect_ratio(self.viewport)
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Applies one change and rebuilds the whole render state.
    pub fn on_parameter_changed(&mut self, change: ParameterChange) -> &RenderState {
        match change {
            ParameterChange::Near(near) => self.params.near = near,
            ParameterChange::Far(far) => self.params.far = far,
            ParameterChange::FieldOfView(fovy) => self.params.fovy = fovy,
            ParameterChange::CameraDistance(camera_z) => self.params.camera_z = camera_z,
            ParameterChange::Viewport { width, height } => self.viewport = (width, height),
        }
        debug!("{change:?} -> {:?}", self.params);
        if let Err(err) = self.params.validate() {
            warn!("rendering with degenerate camera parameters: {err}");
        }
        self.state = RenderState::new(&self.params, self.aspect());
        &self.state
    }

    pub fn on_projection_params_changed(&mut self, near: f32, far: f32, fovy: f32) -> &RenderState {
        self.params.near = near;
        self.params.far = far;
        self.on_parameter_changed(ParameterChange::FieldOfView(fovy))
    }

    pub fn on_camera_params_changed(&mut self, camera_z: f32) -> &RenderState {
        self.on_parameter_changed(ParameterChange::CameraDistance(camera_z))
    }
}

/// Width over height. A collapsed viewport reports 1.0 rather than
/// dividing by zero.
fn aspect_ratio((width, height): (u32, u32)) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn session() -> Session {
        Session::new(CameraParams::DEFAULT, 800, 600)
    }

    #[test]
    fn initial_state_reflects_parameters() {
        let session = session();
        let state = session.state();
        assert_eq!(state.view.w_axis, Vec4::new(0.0, 0.0, -5.0, 1.0));
        assert_eq!(state.lights, LIGHT_POSITIONS);
        assert_eq!(state.normal_matrix(), Mat3::IDENTITY);
        assert_eq!(
            state.projection,
            CameraParams::DEFAULT.projection(800.0 / 600.0)
        );
    }

    #[test]
    fn camera_change_only_moves_the_view() {
        let mut session = session();
        let before = *session.state();
        let after = *session.on_camera_params_changed(8.0);
        assert_eq!(after.view.w_axis, Vec4::new(0.0, 0.0, -8.0, 1.0));
        assert_eq!(after.projection, before.projection);
        assert_eq!(session.params().camera_z, 8.0);
    }

    #[test]
    fn projection_change_rebuilds_projection() {
        let mut session = session();
        let state = *session.on_projection_params_changed(1.0, 50.0, 90.0);
        let expected = CameraParams {
            near: 1.0,
            far: 50.0,
            fovy: 90.0,
            camera_z: 5.0,
        };
        assert_eq!(state.projection, expected.projection(800.0 / 600.0));
        assert_eq!(state.view, CameraParams::DEFAULT.view());
    }

    #[test]
    fn each_change_is_applied_independently() {
        let mut session = session();
        session.on_parameter_changed(ParameterChange::Near(0.5));
        session.on_parameter_changed(ParameterChange::Far(20.0));
        session.on_parameter_changed(ParameterChange::FieldOfView(60.0));
        let params = session.params();
        assert_eq!((params.near, params.far, params.fovy), (0.5, 20.0, 60.0));
        assert_eq!(*session.state(), RenderState::new(&params, 800.0 / 600.0));
    }

    #[test]
    fn viewport_change_updates_aspect() {
        let mut session = session();
        let state = *session.on_parameter_changed(ParameterChange::Viewport {
            width: 400,
            height: 400,
        });
        assert_eq!(session.aspect(), 1.0);
        assert_eq!(state.projection, CameraParams::DEFAULT.projection(1.0));
    }

    #[test]
    fn degenerate_parameters_still_produce_a_state() {
        let mut session = session();
        let state = *session.on_parameter_changed(ParameterChange::Near(-1.0));
        assert_eq!(session.params().near, -1.0);
        assert_eq!(state.view, CameraParams::DEFAULT.view());
    }

    #[test]
    fn collapsed_viewport_uses_unit_aspect() {
        assert_eq!(aspect_ratio((0, 600)), 1.0);
        assert_eq!(aspect_ratio((1280, 720)), 1280.0 / 720.0);
    }
}
