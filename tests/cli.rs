use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn summary_reports_default_camera() {
    let mut cmd = Command::cargo_bin("lit-cube").expect("binary exists");
    cmd.arg("--summary-only");
    cmd.assert()
        .success()
        .stdout(contains("Shading model: gouraud"))
        .stdout(contains(
            "Camera: near=0.10 far=100.00 fovy=45.00 camera_z=5.00 aspect=1.33",
        ))
        .stdout(contains("Mesh: 12 triangles (36 indices, 24 vertices)"))
        .stdout(contains("  [  0.000   0.000   1.000  -5.000]"))
        .stdout(contains(" - front rgb=("));
}

#[test]
fn summary_follows_shading_and_camera_flags() {
    let mut cmd = Command::cargo_bin("lit-cube").expect("binary exists");
    cmd.args(["--shading", "phong", "--camera-z", "8", "--summary-only"]);
    cmd.assert()
        .success()
        .stdout(contains("Shading model: phong"))
        .stdout(contains("camera_z=8.00"))
        .stdout(contains("  [  0.000   0.000   1.000  -8.000]"));
}

#[test]
fn rejects_non_positive_near_plane() {
    let mut cmd = Command::cargo_bin("lit-cube").expect("binary exists");
    cmd.args(["--near", "0", "--summary-only"]);
    cmd.assert()
        .failure()
        .stderr(contains("invalid camera parameters"));
}

#[test]
fn rejects_unknown_shading_model() {
    let mut cmd = Command::cargo_bin("lit-cube").expect("binary exists");
    cmd.args(["--shading", "flat", "--summary-only"]);
    cmd.assert().failure().stderr(contains("flat"));
}
