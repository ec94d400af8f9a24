//! Desktop host: a `winit` window standing in for the browser canvas, with
//! keyboard shortcuts standing in for the sliders.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::info;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::camera::CameraParams;
use crate::render::Renderer;
use crate::shading::ShadingModel;
use crate::state::{ParameterChange, Session};
use crate::viewer::Viewer;

const NEAR_STEP: f32 = 0.1;
const MIN_NEAR: f32 = 0.01;
const FAR_STEP: f32 = 5.0;
const FOV_STEP: f32 = 5.0;
const CAMERA_STEP: f32 = 0.5;

pub const KEY_HELP: &str =
    "Controls: N/M near -/+, F/G far -/+, V/B field of view -/+, Up/Down camera distance, Esc quit";

/// The window or its event loop could not be created, typically because no
/// display is available.
#[derive(Debug)]
pub struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn from_panic(stage: &str, panic: Box<dyn Any + Send>) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {}", panic_message(panic)),
        }
    }

    fn from_error(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => "unknown panic".into(),
        },
    }
}

/// Opens a window and renders on demand until it is closed.
pub fn run_native(params: CameraParams, model: ShadingModel) -> Result<()> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let event_loop = panic::catch_unwind(AssertUnwindSafe(EventLoop::new));
    panic::set_hook(default_hook);
    let event_loop = event_loop
        .map_err(|panic| WindowInitError::from_panic("event loop", panic))?
        .map_err(|err| WindowInitError::from_error("event loop", err))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = NativeApp::new(params, model);
    event_loop
        .run_app(&mut app)
        .map_err(|err| anyhow!("event loop failed: {err}"))?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct NativeApp {
    params: CameraParams,
    model: ShadingModel,
    window: Option<Arc<Window>>,
    viewer: Option<Viewer>,
    failure: Option<anyhow::Error>,
}

impl NativeApp {
    fn new(params: CameraParams, model: ShadingModel) -> Self {
        Self {
            params,
            model,
            window: None,
            viewer: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.failure = Some(err);
        event_loop.exit();
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title(format!("Lit Cube ({})", self.model))
                    .with_inner_size(LogicalSize::new(800.0, 600.0)),
            )
            .map_err(|err| WindowInitError::from_error("window", err))?;
        let window = Arc::new(window);

        let size = window.inner_size();
        let renderer = pollster::block_on(Renderer::new(
            Arc::clone(&window),
            size.width,
            size.height,
            self.model,
        ))?;
        let session = Session::new(self.params, size.width, size.height);

        info!("{KEY_HELP}");
        self.viewer = Some(Viewer::new(session, renderer));
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, change: ParameterChange) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        if let Err(err) = viewer.on_parameter_changed(change) {
            self.fail(event_loop, anyhow!("render failed: {err}"));
        }
    }
}

impl ApplicationHandler for NativeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.open(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => {
                let Some(params) = self.viewer.as_ref().map(|viewer| viewer.session().params())
                else {
                    return;
                };
                if let Some(change) = parameter_change_for_key(code, &params) {
                    self.apply(event_loop, change);
                }
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.apply(
                        event_loop,
                        ParameterChange::Viewport {
                            width: size.width,
                            height: size.height,
                        },
                    );
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(viewer) = self.viewer.as_mut() {
                    if let Err(err) = viewer.render() {
                        self.fail(event_loop, anyhow!("render failed: {err}"));
                    }
                }
            }
            _ => {}
        }
    }
}

/// Maps a key press onto a camera adjustment, clamped to the range in which
/// the projection stays well formed.
pub fn parameter_change_for_key(key: KeyCode, params: &CameraParams) -> Option<ParameterChange> {
    let change = match key {
        KeyCode::KeyN => ParameterChange::Near((params.near - NEAR_STEP).max(MIN_NEAR)),
        KeyCode::KeyM => {
            ParameterChange::Near((params.near + NEAR_STEP).min(params.far - MIN_NEAR))
        }
        KeyCode::KeyF => ParameterChange::Far((params.far - FAR_STEP).max(params.near + MIN_NEAR)),
        KeyCode::KeyG => ParameterChange::Far(params.far + FAR_STEP),
        KeyCode::KeyV => ParameterChange::FieldOfView((params.fovy - FOV_STEP).max(FOV_STEP)),
        KeyCode::KeyB => {
            ParameterChange::FieldOfView((params.fovy + FOV_STEP).min(180.0 - FOV_STEP))
        }
        KeyCode::ArrowUp => ParameterChange::CameraDistance(params.camera_z - CAMERA_STEP),
        KeyCode::ArrowDown => ParameterChange::CameraDistance(params.camera_z + CAMERA_STEP),
        _ => return None,
    };
    Some(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_never_reaches_zero() {
        let params = CameraParams::DEFAULT;
        assert_eq!(
            parameter_change_for_key(KeyCode::KeyN, &params),
            Some(ParameterChange::Near(MIN_NEAR))
        );
    }

    #[test]
    fn far_stays_beyond_near() {
        let params = CameraParams {
            near: 4.0,
            far: 6.0,
            ..CameraParams::DEFAULT
        };
        assert_eq!(
            parameter_change_for_key(KeyCode::KeyF, &params),
            Some(ParameterChange::Far(4.0 + MIN_NEAR))
        );
        assert_eq!(
            parameter_change_for_key(KeyCode::KeyG, &params),
            Some(ParameterChange::Far(11.0))
        );
    }

    #[test]
    fn field_of_view_is_clamped() {
        let wide = CameraParams {
            fovy: 175.0,
            ..CameraParams::DEFAULT
        };
        assert_eq!(
            parameter_change_for_key(KeyCode::KeyB, &wide),
            Some(ParameterChange::FieldOfView(175.0))
        );
        let narrow = CameraParams {
            fovy: 5.0,
            ..CameraParams::DEFAULT
        };
        assert_eq!(
            parameter_change_for_key(KeyCode::KeyV, &narrow),
            Some(ParameterChange::FieldOfView(5.0))
        );
    }

    #[test]
    fn arrows_move_the_camera() {
        let params = CameraParams::DEFAULT;
        assert_eq!(
            parameter_change_for_key(KeyCode::ArrowUp, &params),
            Some(ParameterChange::CameraDistance(4.5))
        );
        assert_eq!(
            parameter_change_for_key(KeyCode::ArrowDown, &params),
            Some(ParameterChange::CameraDistance(5.5))
        );
        assert_eq!(parameter_change_for_key(KeyCode::KeyQ, &params), None);
    }
}
