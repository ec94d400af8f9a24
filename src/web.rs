//! Browser host. JavaScript owns the sliders and forwards each change to a
//! [`CubeViewer`], which recomputes the render state and draws one frame.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::camera::CameraParams;
use crate::render::Renderer;
use crate::shading::ShadingModel;
use crate::state::{ParameterChange, Session};
use crate::viewer::{drawable_size, Viewer};

#[wasm_bindgen(start)]
pub fn bootstrap() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

#[wasm_bindgen]
pub struct CubeViewer {
    viewer: Viewer,
}

#[wasm_bindgen]
impl CubeViewer {
    /// Binds to the canvas with id `canvas_id` and builds the `shading`
    /// program ("gouraud" or "phong"). When no rendering context can be
    /// acquired the user is alerted and the promise rejects.
    pub async fn create(canvas_id: String, shading: String) -> Result<CubeViewer, JsValue> {
        let model: ShadingModel = shading
            .parse()
            .map_err(|err| JsValue::from_str(&format!("{err}")))?;
        let canvas = find_canvas(&canvas_id)?;
        let (width, height) = drawable_size(
            (canvas.client_width(), canvas.client_height()),
            (canvas.width(), canvas.height()),
        );
        canvas.set_width(width);
        canvas.set_height(height);

        let renderer = match Renderer::new(wgpu::SurfaceTarget::Canvas(canvas), width, height, model).await
        {
            Ok(renderer) => renderer,
            Err(err) => {
                log::error!("renderer error: {err}");
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&err.user_message());
                }
                return Err(JsValue::from_str(&format!("renderer error: {err}")));
            }
        };

        let session = Session::new(CameraParams::DEFAULT, width, height);
        let mut viewer = Viewer::new(session, renderer);
        viewer.render().map_err(surface_error)?;
        Ok(Self { viewer })
    }

    #[wasm_bindgen(js_name = setNear)]
    pub fn set_near(&mut self, near: f32) -> Result<(), JsValue> {
        self.apply(ParameterChange::Near(near))
    }

    #[wasm_bindgen(js_name = setFar)]
    pub fn set_far(&mut self, far: f32) -> Result<(), JsValue> {
        self.apply(ParameterChange::Far(far))
    }

    #[wasm_bindgen(js_name = setFovy)]
    pub fn set_fovy(&mut self, fovy: f32) -> Result<(), JsValue> {
        self.apply(ParameterChange::FieldOfView(fovy))
    }

    #[wasm_bindgen(js_name = setCameraZ)]
    pub fn set_camera_z(&mut self, camera_z: f32) -> Result<(), JsValue> {
        self.apply(ParameterChange::CameraDistance(camera_z))
    }

    #[wasm_bindgen(js_name = onProjectionParamsChanged)]
    pub fn on_projection_params_changed(
        &mut self,
        near: f32,
        far: f32,
        fovy: f32,
    ) -> Result<(), JsValue> {
        self.viewer
            .on_projection_params_changed(near, far, fovy)
            .map_err(surface_error)
    }

    #[wasm_bindgen(js_name = onCameraParamsChanged)]
    pub fn on_camera_params_changed(&mut self, camera_z: f32) -> Result<(), JsValue> {
        self.viewer
            .on_camera_params_changed(camera_z)
            .map_err(surface_error)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.apply(ParameterChange::Viewport { width, height })
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        self.viewer.render().map_err(surface_error)
    }

    #[wasm_bindgen(getter)]
    pub fn shading(&self) -> String {
        self.viewer.renderer().shading_model().to_string()
    }
}

impl CubeViewer {
    fn apply(&mut self, change: ParameterChange) -> Result<(), JsValue> {
        self.viewer
            .on_parameter_changed(change)
            .map_err(surface_error)
    }
}

fn find_canvas(canvas_id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("missing document"))?;
    let element = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str("canvas element not found"))?;
    element
        .dyn_into()
        .map_err(|_| JsValue::from_str("element is not a canvas"))
}

fn surface_error(err: wgpu::SurfaceError) -> JsValue {
    JsValue::from_str(&format!("render failed: {err}"))
}
