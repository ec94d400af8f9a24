#[cfg(not(target_arch = "wasm32"))]
use std::io;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
use lit_cube::app::{run_native, WindowInitError};
#[cfg(not(target_arch = "wasm32"))]
use lit_cube::{write_summary, CameraParams, ShadingModel};

/// Aspect ratio reported by `--summary-only`, matching the default window.
#[cfg(not(target_arch = "wasm32"))]
const SUMMARY_ASPECT: f32 = 800.0 / 600.0;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug, Clone)]
#[command(name = "lit-cube")]
#[command(about = "Lit cube viewer comparing Gouraud and Phong shading", long_about = None)]
struct Cli {
    /// Lighting program to use: gouraud or phong
    #[arg(long, default_value = "gouraud")]
    shading: ShadingModel,

    /// Near clipping plane distance
    #[arg(long, default_value_t = CameraParams::DEFAULT.near, allow_negative_numbers = true)]
    near: f32,

    /// Far clipping plane distance
    #[arg(long, default_value_t = CameraParams::DEFAULT.far, allow_negative_numbers = true)]
    far: f32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = CameraParams::DEFAULT.fovy, allow_negative_numbers = true)]
    fovy: f32,

    /// Camera distance along +Z
    #[arg(long = "camera-z", default_value_t = CameraParams::DEFAULT.camera_z, allow_negative_numbers = true)]
    camera_z: f32,

    /// Print the render state instead of opening a window
    #[arg(long = "summary-only", default_value = "false")]
    summary_only: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl Cli {
    fn params(&self) -> CameraParams {
        CameraParams {
            near: self.near,
            far: self.far,
            fovy: self.fovy,
            camera_z: self.camera_z,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<()> {
    let cli = Cli::parse();
    let params = cli.params();
    params.validate().context("invalid camera parameters")?;

    if cli.summary_only {
        return print_summary(&params, cli.shading);
    }

    match run_native(params, cli.shading) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --summary-only mode (set DISPLAY or install X11 libs to enable rendering)."
                );
                print_summary(&params, cli.shading)
            } else {
                Err(err)
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_summary(params: &CameraParams, model: ShadingModel) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summary(&mut out, params, model, SUMMARY_ASPECT).context("failed to write summary")
}
