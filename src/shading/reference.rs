//! CPU evaluation of the lighting shaders.
//!
//! Each function mirrors one shader stage line for line so the lighting math
//! can be checked without a GPU. No rasterization happens here: the
//! "interpolated" inputs are whatever the caller passes in.

use glam::{Mat3, Mat4, Vec3, Vec4};

use super::{ShadingModel, AMBIENT, DIFFUSE_1, DIFFUSE_2, SHININESS, SPECULAR};
use crate::state::RenderState;

/// Uniform values seen by the lighting stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingInputs {
    pub model_view: Mat4,
    pub normal_matrix: Mat3,
    pub light_positions: [Vec3; 2],
}

impl LightingInputs {
    pub fn from_state(state: &RenderState) -> Self {
        Self {
            model_view: state.view,
            normal_matrix: state.normal_matrix(),
            light_positions: state.lights,
        }
    }
}

/// The terms that make up one shaded color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Shade {
    /// Opaque output color, as written by the fragment stage.
    pub fn color(&self) -> Vec4 {
        (self.ambient + self.diffuse + self.specular).extend(1.0)
    }
}

/// Outputs of the Gouraud vertex stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GouraudVarying {
    pub normal: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

/// Outputs of the Phong vertex stage, both in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongVarying {
    pub position: Vec3,
    pub normal: Vec3,
}

pub fn gouraud_vertex(inputs: &LightingInputs, position: Vec3, normal: Vec3) -> GouraudVarying {
    let position = inputs.model_view.transform_point3(position);
    let [light_1, light_2] = inputs.light_positions;

    let light_direction_1 = (light_1 - position).normalize();
    let light_direction_2 = (light_2 - position).normalize();
    let normal = (inputs.normal_matrix * normal).normalize();

    let diffuse_factor_1 = normal.dot(light_direction_1).max(0.0);
    let diffuse_factor_2 = normal.dot(light_direction_2).max(0.0);

    let view_direction = (-position).normalize();
    let reflection_1 = reflect(-light_direction_1, normal);
    let specular_factor = reflection_1.dot(view_direction).max(0.0).powf(SHININESS);

    GouraudVarying {
        normal,
        diffuse: diffuse_factor_1 * DIFFUSE_1 + diffuse_factor_2 * DIFFUSE_2,
        specular: specular_factor * SPECULAR,
    }
}

pub fn gouraud_fragment(varying: &GouraudVarying) -> Shade {
    Shade {
        ambient: AMBIENT,
        diffuse: varying.diffuse,
        specular: varying.specular,
    }
}

pub fn phong_vertex(inputs: &LightingInputs, position: Vec3, normal: Vec3) -> PhongVarying {
    PhongVarying {
        position: inputs.model_view.transform_point3(position),
        normal: (inputs.normal_matrix * normal).normalize(),
    }
}

pub fn phong_fragment(inputs: &LightingInputs, varying: &PhongVarying) -> Shade {
    let [light_1, light_2] = inputs.light_positions;
    let light_direction_1 = (light_1 - varying.position).normalize();
    let light_direction_2 = (light_2 - varying.position).normalize();
    let normal = varying.normal.normalize();
    let view_direction = (-varying.position).normalize();

    let diffuse_factor_1 = normal.dot(light_direction_1).max(0.0);
    let diffuse_factor_2 = normal.dot(light_direction_2).max(0.0);

    let reflection_1 = reflect(-light_direction_1, normal);
    let reflection_2 = reflect(-light_direction_2, normal);
    let specular_factor_1 = reflection_1.dot(view_direction).max(0.0).powf(SHININESS);
    let specular_factor_2 = reflection_2.dot(view_direction).max(0.0).powf(SHININESS);

    Shade {
        ambient: AMBIENT,
        diffuse: diffuse_factor_1 * DIFFUSE_1 + diffuse_factor_2 * DIFFUSE_2,
        specular: specular_factor_1 * SPECULAR + specular_factor_2 * SPECULAR,
    }
}

impl ShadingModel {
    /// Runs both stages for a single vertex, with no interpolation in between.
    pub fn shade_vertex(self, inputs: &LightingInputs, position: Vec3, normal: Vec3) -> Shade {
        match self {
            ShadingModel::Gouraud => gouraud_fragment(&gouraud_vertex(inputs, position, normal)),
            ShadingModel::Phong => phong_fragment(inputs, &phong_vertex(inputs, position, normal)),
        }
    }
}

/// GLSL/WGSL `reflect`: mirrors `incident` about the plane with normal `normal`.
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraParams;
    use crate::geometry::{self, FACES};

    const EPS: f32 = 1e-5;

    fn default_inputs() -> LightingInputs {
        LightingInputs::from_state(&RenderState::new(&CameraParams::DEFAULT, 1.0))
    }

    fn inputs_with_lights(light_1: Vec3, light_2: Vec3) -> LightingInputs {
        LightingInputs {
            light_positions: [light_1, light_2],
            ..default_inputs()
        }
    }

    #[test]
    fn front_face_diffuse_stays_within_two_lights() {
        let inputs = default_inputs();
        let front = FACES[0];
        for model in ShadingModel::ALL {
            for index in front.first_vertex..front.first_vertex + 4 {
                let shade =
                    model.shade_vertex(&inputs, geometry::position(index), geometry::normal(index));
                assert_eq!(shade.ambient, Vec3::splat(0.2));
                for channel in shade.diffuse.to_array() {
                    assert!((0.0..=0.8).contains(&channel), "{model}: {channel}");
                }
                // Both default lights sit in front of the front face.
                assert!(shade.diffuse.x > 0.0);
            }
        }
    }

    #[test]
    fn unlit_surface_keeps_the_ambient_floor() {
        // Both lights behind the surface: N.L <= 0 for each.
        let inputs = inputs_with_lights(Vec3::new(1.0, 0.0, -20.0), Vec3::new(-1.0, 0.0, -30.0));
        let position = Vec3::new(0.0, 0.0, 1.0);
        let normal = Vec3::Z;
        for model in ShadingModel::ALL {
            let shade = model.shade_vertex(&inputs, position, normal);
            assert_eq!(shade.diffuse, Vec3::ZERO, "{model}");
            assert_eq!(shade.ambient, Vec3::new(0.2, 0.2, 0.2));
            assert!(shade.color().truncate().cmpge(Vec3::splat(0.2)).all());
        }
    }

    #[test]
    fn head_on_light_saturates_one_diffuse_term() {
        // Surface point at view (0, 0, -4); light 1 directly in front of it.
        let inputs = inputs_with_lights(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -50.0));
        let position = Vec3::new(0.0, 0.0, 1.0);
        for model in ShadingModel::ALL {
            let shade = model.shade_vertex(&inputs, position, Vec3::Z);
            assert!(shade.diffuse.abs_diff_eq(Vec3::splat(0.4), EPS), "{model}");
            // Mirror reflection straight back at the eye.
            assert!(shade.specular.abs_diff_eq(Vec3::ONE, EPS), "{model}");
        }
    }

    #[test]
    fn only_phong_has_a_highlight_from_the_second_light() {
        let inputs = inputs_with_lights(Vec3::new(0.0, 0.0, -50.0), Vec3::new(0.0, 0.0, 0.0));
        let position = Vec3::new(0.0, 0.0, 1.0);

        let gouraud = ShadingModel::Gouraud.shade_vertex(&inputs, position, Vec3::Z);
        assert_eq!(gouraud.specular, Vec3::ZERO);

        let phong = ShadingModel::Phong.shade_vertex(&inputs, position, Vec3::Z);
        assert!(phong.specular.abs_diff_eq(Vec3::ONE, EPS));
        assert!(gouraud.diffuse.abs_diff_eq(phong.diffuse, EPS));
    }

    #[test]
    fn back_face_receives_no_diffuse_light_by_default() {
        let inputs = default_inputs();
        let back = FACES[1];
        let index = back.first_vertex;
        for model in ShadingModel::ALL {
            let shade =
                model.shade_vertex(&inputs, geometry::position(index), geometry::normal(index));
            assert_eq!(shade.diffuse, Vec3::ZERO, "{model}");
        }
    }

    #[test]
    fn phong_varying_is_in_view_space() {
        let inputs = default_inputs();
        let varying = phong_vertex(&inputs, Vec3::new(1.0, 1.0, 1.0), Vec3::Z);
        assert!(varying.position.abs_diff_eq(Vec3::new(1.0, 1.0, -4.0), EPS));
        assert!(varying.normal.abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn reflect_matches_shader_builtin() {
        let reflected = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert!(reflected.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), EPS));
    }
}
