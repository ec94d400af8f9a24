use std::io::{self, Write};

use glam::{Mat3, Mat4, Vec3};

use crate::camera::CameraParams;
use crate::geometry::{self, FACES, INDEX_COUNT, VERTEX_COUNT};
use crate::shading::reference::LightingInputs;
use crate::shading::ShadingModel;
use crate::state::RenderState;

/// Writes the render state for `params` and a CPU shading probe of every face.
pub fn write_summary(
    out: &mut impl Write,
    params: &CameraParams,
    model: ShadingModel,
    aspect: f32,
) -> io::Result<()> {
    let state = RenderState::new(params, aspect);

    writeln!(out, "Shading model: {model}")?;
    writeln!(
        out,
        "Camera: near={:.2} far={:.2} fovy={:.2} camera_z={:.2} aspect={:.2}",
        params.near, params.far, params.fovy, params.camera_z, aspect
    )?;
    writeln!(
        out,
        "Mesh: {} triangles ({INDEX_COUNT} indices, {VERTEX_COUNT} vertices)",
        INDEX_COUNT / 3
    )?;
    writeln!(out, "Projection:")?;
    write_mat4(out, &state.projection)?;
    writeln!(out, "View:")?;
    write_mat4(out, &state.view)?;
    writeln!(out, "Normal matrix:")?;
    write_mat3(out, &state.normal_matrix())?;

    let inputs = LightingInputs::from_state(&state);
    writeln!(out, "Face shading (first vertex):")?;
    for face in FACES {
        let index = face.first_vertex;
        let shade = model.shade_vertex(&inputs, geometry::position(index), geometry::normal(index));
        writeln!(
            out,
            " - {} rgb={} diffuse={} specular={}",
            face.name,
            format_vec3(shade.color().truncate()),
            format_vec3(shade.diffuse),
            format_vec3(shade.specular)
        )?;
    }
    Ok(())
}

fn write_mat4(out: &mut impl Write, matrix: &Mat4) -> io::Result<()> {
    for row in 0..4 {
        write_row(out, &matrix.row(row).to_array())?;
    }
    Ok(())
}

fn write_mat3(out: &mut impl Write, matrix: &Mat3) -> io::Result<()> {
    for row in 0..3 {
        write_row(out, &matrix.row(row).to_array())?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, values: &[f32]) -> io::Result<()> {
    let cells: Vec<String> = values.iter().map(|value| format!("{value:7.3}")).collect();
    writeln!(out, "  [{}]", cells.join(" "))
}

fn format_vec3(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(model: ShadingModel) -> String {
        let mut out = Vec::new();
        write_summary(&mut out, &CameraParams::DEFAULT, model, 1.0).expect("write summary");
        String::from_utf8(out).expect("utf-8")
    }

    #[test]
    fn reports_matrices_for_default_camera() {
        let text = summary(ShadingModel::Gouraud);
        assert!(text.contains("Shading model: gouraud"));
        assert!(text.contains("Camera: near=0.10 far=100.00 fovy=45.00 camera_z=5.00 aspect=1.00"));
        assert!(text.contains("Mesh: 12 triangles (36 indices, 24 vertices)"));
        // 1 / tan(22.5 deg)
        assert!(text.contains("  [  0.000   2.414   0.000   0.000]"));
        assert!(text.contains("  [  0.000   0.000   1.000  -5.000]"));
    }

    #[test]
    fn probes_every_face() {
        let text = summary(ShadingModel::Phong);
        for face in FACES {
            assert!(text.contains(&format!(" - {} rgb=(", face.name)), "{}", face.name);
        }
        let back = text
            .lines()
            .find(|line| line.starts_with(" - back "))
            .expect("back face line");
        assert!(back.contains("diffuse=(0.000, 0.000, 0.000)"), "{back}");
    }
}
