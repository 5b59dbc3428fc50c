//! Camera YAML inspection and conversion tool
//!
//! Loads a camera from a YAML or JSON file, prints its parameters, checks the
//! intrinsics and optionally writes the camera back out in either format.
//! The output format follows the extension of the output path.
//!
//! Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example camera_yaml_tool -- \
//!   --input samples/pinhole.yaml \
//!   --output output/pinhole.json
//! ```

use camera_yaml::camera::Camera;
use camera_yaml::yaml::{self, CameraYamlError};
use clap::Parser;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Camera YAML tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the input camera file (.yaml, .yml or .json)
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Optional path to write the camera to (.yaml, .yml or .json)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileFormat {
    Yaml,
    Json,
}

fn file_format(path: &Path) -> Result<FileFormat, String> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
        Some("json") => Ok(FileFormat::Json),
        _ => Err(format!(
            "Unsupported file extension for {:?}. Supported: yaml, yml, json",
            path
        )),
    }
}

fn load_camera(path: &Path) -> Result<Camera, Box<dyn std::error::Error>> {
    let camera = match file_format(path)? {
        FileFormat::Yaml => yaml::load_from_yaml(path)?,
        FileFormat::Json => yaml::load_from_json(path)?,
    };
    Ok(camera)
}

fn save_camera(camera: &Camera, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match file_format(path)? {
        FileFormat::Yaml => yaml::save_to_yaml(camera, path)?,
        FileFormat::Json => yaml::save_to_json(camera, path)?,
    }
    Ok(())
}

fn display_camera(camera: &Camera) {
    println!("📷 Camera: {:?}", camera.camera_type());
    println!("   label: \"{}\"", camera.get_label());
    let id = camera.get_id();
    if id.is_valid() {
        println!("   id: {}", id);
    } else {
        println!("   id: <unset>");
    }
    println!(
        "   resolution: {}x{}",
        camera.image_width(),
        camera.image_height()
    );
    println!(
        "   line delay: {} ns",
        camera.get_line_delay_nanoseconds()
    );
    println!("   intrinsics: {:?}", camera.get_parameters().as_slice());
    match camera.get_distortion() {
        Some(distortion) => println!(
            "   distortion: {:?} {:?}",
            distortion.distortion_type(),
            distortion.get_parameters().as_slice()
        ),
        None => println!("   distortion: none"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    info!("Loading camera from {:?}", cli.input);
    let camera = match load_camera(&cli.input) {
        Ok(camera) => camera,
        Err(err) => {
            error!("Failed to load camera from {:?}: {}", cli.input, err);
            if let Some(yaml_err) = err.downcast_ref::<CameraYamlError>() {
                if yaml_err.is_configuration_error() {
                    warn!("The input describes a model this tool does not support");
                }
            }
            return Err(err);
        }
    };
    info!("✅ Successfully loaded {:?} camera", camera.camera_type());

    display_camera(&camera);

    match camera.validate_params() {
        Ok(()) => info!("Intrinsics are valid"),
        Err(err) => warn!("Intrinsics failed validation: {}", err),
    }

    if let Some(output) = cli.output.as_deref() {
        save_camera(&camera, output)?;
        info!("💾 Saved camera to {:?}", output);
        println!("💾 Saved camera to {:?}", output);
    }

    Ok(())
}
