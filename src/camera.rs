use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::error::ParamError;

/// User-facing camera controls. Each value comes straight from a slider or a
/// command-line flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub near: f32,
    pub far: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Distance the camera is pulled back along +Z.
    pub camera_z: f32,
}

impl CameraParams {
    pub const DEFAULT: Self = Self {
        near: 0.1,
        far: 100.0,
        fovy: 45.0,
        camera_z: 5.0,
    };

    /// Checks the ranges in which the projection is meaningful.
    ///
    /// The renderer never calls this; out-of-range values simply produce a
    /// degenerate frame. Input layers use it to reject or clamp values.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.near.is_nan() || self.near <= 0.0 {
            return Err(ParamError::NearNotPositive(self.near));
        }
        if self.far.is_nan() || self.far <= self.near {
            return Err(ParamError::FarNotBeyondNear {
                near: self.near,
                far: self.far,
            });
        }
        if self.fovy.is_nan() || self.fovy <= 0.0 || self.fovy >= 180.0 {
            return Err(ParamError::FieldOfViewOutOfRange(self.fovy));
        }
        Ok(())
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        recompute_projection(self.near, self.far, self.fovy, aspect)
    }

    pub fn view(&self) -> Mat4 {
        recompute_view(self.camera_z)
    }
}

impl Default for CameraParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Builds a right-handed perspective projection with a `[0, 1]` depth range.
///
/// No validation happens here: `near <= 0`, `far <= near` or `aspect <= 0`
/// yield a degenerate matrix.
pub fn recompute_projection(near: f32, far: f32, fovy_degrees: f32, aspect: f32) -> Mat4 {
    let (sin_fov, cos_fov) = (0.5 * fovy_degrees.to_radians()).sin_cos();
    let h = cos_fov / sin_fov;
    let w = h / aspect;
    let r = far / (near - far);
    Mat4::from_cols(
        Vec4::new(w, 0.0, 0.0, 0.0),
        Vec4::new(0.0, h, 0.0, 0.0),
        Vec4::new(0.0, 0.0, r, -1.0),
        Vec4::new(0.0, 0.0, r * near, 0.0),
    )
}

/// View matrix for a camera sitting at `(0, 0, camera_z)` looking down -Z.
pub fn recompute_view(camera_z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -camera_z))
}

/// Inverse-transpose of the upper 3x3 block of `model_view`.
///
/// A singular block has no inverse; the identity is returned instead. Small
/// but invertible blocks are inverted as usual.
pub fn derive_normal_matrix(model_view: Mat4) -> Mat3 {
    let upper = Mat3::from_mat4(model_view);
    let det = upper.determinant();
    if det == 0.0 || !det.is_finite() {
        return Mat3::IDENTITY;
    }
    upper.inverse().transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn default_scenario_matches_expected_entries() {
        let params = CameraParams::DEFAULT;
        let projection = params.projection(1.0);
        let expected = 1.0 / 22.5_f32.to_radians().tan();
        assert!(approx(projection.col(1).y, expected));

        let view = params.view();
        assert_eq!(view.w_axis, Vec4::new(0.0, 0.0, -5.0, 1.0));
    }

    #[test]
    fn near_plane_maps_to_zero_depth() {
        for &(near, far, fovy, aspect) in &[
            (0.1, 100.0, 45.0, 4.0 / 3.0),
            (1.0, 10.0, 90.0, 1.0),
            (0.5, 2.0, 10.0, 0.5),
            (2.0, 500.0, 170.0, 16.0 / 9.0),
        ] {
            let projection = recompute_projection(near, far, fovy, aspect);
            assert!(projection.determinant().abs() > 0.0);

            let clip = projection * Vec4::new(0.0, 0.0, -near, 1.0);
            assert!(approx(clip.z / clip.w, 0.0), "near={near} far={far}");

            let clip = projection * Vec4::new(0.0, 0.0, -far, 1.0);
            assert!((clip.z / clip.w - 1.0).abs() < 1e-3, "near={near} far={far}");
        }
    }

    #[test]
    fn projection_agrees_with_glam() {
        let ours = recompute_projection(0.1, 100.0, 45.0, 1.5);
        let glam = Mat4::perspective_rh(45.0_f32.to_radians(), 1.5, 0.1, 100.0);
        assert!(ours.abs_diff_eq(glam, EPS));
    }

    #[test]
    fn view_is_a_pure_translation() {
        for &camera_z in &[0.0, 1.0, 5.0, -3.5, 42.0] {
            let view = recompute_view(camera_z);
            assert_eq!(Mat3::from_mat4(view), Mat3::IDENTITY);
            let origin = view.transform_point3(Vec3::ZERO);
            assert_eq!(origin, Vec3::new(0.0, 0.0, -camera_z));
        }
    }

    #[test]
    fn normal_matrix_is_identity_for_translation() {
        let normal = derive_normal_matrix(recompute_view(5.0));
        assert!(normal.abs_diff_eq(Mat3::IDENTITY, EPS));
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model_view = Mat4::from_scale(Vec3::new(2.0, 1.0, 0.5));
        let normal = derive_normal_matrix(model_view);
        let expected = Mat3::from_diagonal(Vec3::new(0.5, 1.0, 2.0));
        assert!(normal.abs_diff_eq(expected, EPS));

        // Normals stay perpendicular to transformed tangents.
        let tangent = Mat3::from_mat4(model_view) * Vec3::new(1.0, -1.0, 0.0);
        let n = normal * Vec3::new(1.0, 1.0, 0.0);
        assert!(approx(tangent.dot(n), 0.0));
    }

    #[test]
    fn normal_matrix_inverts_tiny_scales() {
        let model_view = Mat4::from_scale(Vec3::new(0.01, 0.01, 0.001));
        let normal = derive_normal_matrix(model_view);
        let expected = Mat3::from_diagonal(Vec3::new(100.0, 100.0, 1000.0));
        assert!(normal.abs_diff_eq(expected, 1e-2));

        let n = (normal * Vec3::new(1.0, 0.0, 1.0)).normalize();
        assert!(n.abs_diff_eq(Vec3::new(0.0995, 0.0, 0.995), 1e-3));
    }

    #[test]
    fn singular_view_falls_back_to_identity() {
        let normal = derive_normal_matrix(Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)));
        assert_eq!(normal, Mat3::IDENTITY);
    }

    #[test]
    fn validate_rejects_degenerate_ranges() {
        assert!(CameraParams::DEFAULT.validate().is_ok());

        let params = CameraParams {
            near: 0.0,
            ..CameraParams::DEFAULT
        };
        assert_eq!(params.validate(), Err(ParamError::NearNotPositive(0.0)));

        let params = CameraParams {
            near: 5.0,
            far: 5.0,
            ..CameraParams::DEFAULT
        };
        assert!(matches!(
            params.validate(),
            Err(ParamError::FarNotBeyondNear { .. })
        ));

        let params = CameraParams {
            fovy: 180.0,
            ..CameraParams::DEFAULT
        };
        assert_eq!(
            params.validate(),
            Err(ParamError::FieldOfViewOutOfRange(180.0))
        );
    }
}
