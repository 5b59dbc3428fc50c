//! YAML serialization of cameras.
//!
//! [`decode`] turns a node tree into a [`Camera`] and [`encode`] does the
//! reverse. A camera node looks like this:
//!
//! ```yaml
//! label: cam0
//! id: 0123456789abcdef0123456789abcdef
//! line-delay-nanoseconds: 0
//! image_height: 480
//! image_width: 752
//! type: pinhole
//! intrinsics:
//!   rows: 4
//!   cols: 1
//!   data: [458.654, 457.296, 367.215, 248.375]
//! distortion:
//!   type: radial-tangential
//!   parameters:
//!     rows: 4
//!     cols: 1
//!     data: [-0.28340811, 0.07395907, 0.00019359, 1.76187114e-05]
//! ```
//!
//! Decoding is a strict pipeline. Optional fields may be absent, but when
//! present they must parse, otherwise the whole camera is rejected.

use log::debug;
use nalgebra::DVector;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

use crate::camera::{Camera, CameraId, CameraModelError, CameraType, Resolution};
use crate::distortion::{Distortion, DistortionType};

pub mod node;

use node::{safe_get, untag, vector_to_node, FromNode};

const TYPE_KEY: &str = "type";
const IMAGE_WIDTH_KEY: &str = "image_width";
const IMAGE_HEIGHT_KEY: &str = "image_height";
const INTRINSICS_KEY: &str = "intrinsics";
const ID_KEY: &str = "id";
const LABEL_KEY: &str = "label";
const LINE_DELAY_KEY: &str = "line-delay-nanoseconds";
const DISTORTION_KEY: &str = "distortion";
const PARAMETERS_KEY: &str = "parameters";

#[derive(thiserror::Error, Debug)]
pub enum CameraYamlError {
    #[error("Unable to parse the camera because the node is not a map")]
    NotAMap,
    #[error("Unable to get the required parameter '{0}' from the distortion. Required: string type, vector parameters")]
    MissingDistortionField(&'static str),
    #[error("Unknown distortion model: \"{0}\". Valid values are {{none, equidistant, fisheye, radial-tangential}}")]
    UnknownDistortionType(String),
    #[error(transparent)]
    Model(#[from] CameraModelError),
    #[error("Unable to get the required parameter '{0}' from the camera. Required: string type, int image_width, int image_height, vector intrinsics")]
    MissingCameraField(&'static str),
    #[error("Unknown camera model: \"{0}\". Valid values are {{pinhole, unified-projection}}")]
    UnknownCameraType(String),
    #[error("Unable to parse \"{0}\" as a hex string")]
    InvalidId(String),
    #[error("Unable to parse the parameter id because it is not a scalar")]
    IdNotAScalar,
    #[error("Unable to parse the parameter line-delay-nanoseconds")]
    InvalidLineDelay,
    #[error("Unable to parse the parameter label as a string")]
    InvalidLabel,
    #[error("Failed to parse YAML: {0}")]
    Yaml(String),
    #[error("Failed to parse JSON: {0}")]
    Json(String),
    #[error("IO Error: {0}")]
    Io(String),
}

impl CameraYamlError {
    /// True for camera or distortion tags outside the closed set of known variants.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CameraYamlError::UnknownCameraType(_) | CameraYamlError::UnknownDistortionType(_)
        )
    }
}

impl From<std::io::Error> for CameraYamlError {
    fn from(err: std::io::Error) -> Self {
        CameraYamlError::Io(err.to_string())
    }
}

impl From<yaml_rust::ScanError> for CameraYamlError {
    fn from(err: yaml_rust::ScanError) -> Self {
        CameraYamlError::Yaml(err.to_string())
    }
}

impl From<serde_yaml::Error> for CameraYamlError {
    fn from(err: serde_yaml::Error) -> Self {
        CameraYamlError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for CameraYamlError {
    fn from(err: serde_json::Error) -> Self {
        CameraYamlError::Json(err.to_string())
    }
}

fn camera_type_from_tag(tag: &str) -> Option<CameraType> {
    match tag {
        "pinhole" => Some(CameraType::Pinhole),
        "unified-projection" => Some(CameraType::UnifiedProjection),
        _ => None,
    }
}

fn camera_type_tag(camera_type: CameraType) -> &'static str {
    match camera_type {
        CameraType::Pinhole => "pinhole",
        CameraType::UnifiedProjection => "unified-projection",
    }
}

fn distortion_type_from_tag(tag: &str) -> Option<DistortionType> {
    match tag {
        "none" => Some(DistortionType::NoDistortion),
        "equidistant" => Some(DistortionType::Equidistant),
        "fisheye" => Some(DistortionType::Fisheye),
        "radial-tangential" => Some(DistortionType::RadTan),
        _ => None,
    }
}

fn distortion_type_tag(distortion_type: DistortionType) -> &'static str {
    match distortion_type {
        DistortionType::NoDistortion => "none",
        DistortionType::Equidistant => "equidistant",
        DistortionType::Fisheye => "fisheye",
        DistortionType::RadTan => "radial-tangential",
    }
}

/// Decodes a camera from a node tree.
///
/// The stages run in order and the first failure is returned:
/// 1. the node must be a map;
/// 2. the optional `distortion` child is resolved and validated;
/// 3. `type`, `image_width`, `image_height` and `intrinsics` must be present;
/// 4. the camera type is dispatched and the intrinsics length checked
///    (see [`Camera::from_parameters`]);
/// 5. an `id`, if present, must be a valid hex string;
/// 6. a `line-delay-nanoseconds`, if present, must be an unsigned integer;
/// 7. a `label`, if present, must be a scalar.
///
/// No partially built camera ever escapes: an error in a late stage drops the
/// camera constructed in stage 4.
///
/// # Examples
///
/// ```rust
/// use camera_yaml::yaml;
///
/// let node: serde_yaml::Value = serde_yaml::from_str(
///     "{type: pinhole, image_width: 640, image_height: 480, intrinsics: [500, 500, 320, 240]}",
/// )
/// .unwrap();
/// let camera = yaml::decode(&node).unwrap();
/// assert_eq!(camera.image_width(), 640);
/// assert!(camera.get_distortion().is_none());
/// ```
pub fn decode(node: &Value) -> Result<Camera, CameraYamlError> {
    let node = untag(node);
    if !node.is_mapping() {
        return Err(CameraYamlError::NotAMap);
    }

    let distortion = decode_distortion(node)?;

    let camera_type_name: String =
        safe_get(node, TYPE_KEY).ok_or(CameraYamlError::MissingCameraField(TYPE_KEY))?;
    let image_width: u32 = safe_get(node, IMAGE_WIDTH_KEY)
        .ok_or(CameraYamlError::MissingCameraField(IMAGE_WIDTH_KEY))?;
    let image_height: u32 = safe_get(node, IMAGE_HEIGHT_KEY)
        .ok_or(CameraYamlError::MissingCameraField(IMAGE_HEIGHT_KEY))?;
    let intrinsics: DVector<f64> = safe_get(node, INTRINSICS_KEY)
        .ok_or(CameraYamlError::MissingCameraField(INTRINSICS_KEY))?;

    let camera_type = camera_type_from_tag(&camera_type_name)
        .ok_or(CameraYamlError::UnknownCameraType(camera_type_name))?;

    let resolution = Resolution {
        width: image_width,
        height: image_height,
    };
    let mut camera = Camera::from_parameters(camera_type, &intrinsics, resolution, distortion)?;

    if let Some(id_node) = node.get(ID_KEY) {
        let id_string = String::from_node(id_node).ok_or(CameraYamlError::IdNotAScalar)?;
        let id = CameraId::from_hex_string(&id_string)
            .ok_or(CameraYamlError::InvalidId(id_string))?;
        camera.set_id(id);
    }

    match node.get(LINE_DELAY_KEY) {
        Some(line_delay_node) => {
            let line_delay_nanoseconds =
                u64::from_node(line_delay_node).ok_or(CameraYamlError::InvalidLineDelay)?;
            camera.set_line_delay_nanoseconds(line_delay_nanoseconds);
        }
        None => debug!(
            "No line delay given, keeping the default of {} ns.",
            camera.get_line_delay_nanoseconds()
        ),
    }

    if let Some(label_node) = node.get(LABEL_KEY) {
        let label = String::from_node(label_node).ok_or(CameraYamlError::InvalidLabel)?;
        camera.set_label(label);
    }

    Ok(camera)
}

/// Resolves the optional `distortion` child of a camera node.
///
/// Both an absent child and an explicit `none` type yield `Ok(None)`.
fn decode_distortion(node: &Value) -> Result<Option<Distortion>, CameraYamlError> {
    let Some(distortion_node) = node.get(DISTORTION_KEY) else {
        debug!("Found a camera with no distortion.");
        return Ok(None);
    };

    let distortion_type_name: String = safe_get(distortion_node, TYPE_KEY)
        .ok_or(CameraYamlError::MissingDistortionField(TYPE_KEY))?;
    let parameters: DVector<f64> = safe_get(distortion_node, PARAMETERS_KEY)
        .ok_or(CameraYamlError::MissingDistortionField(PARAMETERS_KEY))?;

    let distortion_type = distortion_type_from_tag(&distortion_type_name)
        .ok_or(CameraYamlError::UnknownDistortionType(distortion_type_name))?;
    if distortion_type == DistortionType::NoDistortion {
        debug!("Found a camera with an explicit 'none' distortion.");
        return Ok(None);
    }

    Ok(Some(Distortion::new(distortion_type, &parameters)?))
}

/// Encodes a camera into a node tree.
///
/// The `id` key is only written for a valid id, and the `distortion` key only
/// when a distortion other than [`Distortion::NoDistortion`] is attached. The
/// input is not modified.
pub fn encode(camera: &Camera) -> Value {
    let mut camera_node = Mapping::new();

    camera_node.insert(LABEL_KEY.into(), camera.get_label().into());
    let id = camera.get_id();
    if id.is_valid() {
        camera_node.insert(ID_KEY.into(), id.hex_string().into());
    }
    camera_node.insert(
        LINE_DELAY_KEY.into(),
        camera.get_line_delay_nanoseconds().into(),
    );
    camera_node.insert(IMAGE_HEIGHT_KEY.into(), camera.image_height().into());
    camera_node.insert(IMAGE_WIDTH_KEY.into(), camera.image_width().into());
    camera_node.insert(TYPE_KEY.into(), camera_type_tag(camera.camera_type()).into());
    camera_node.insert(
        INTRINSICS_KEY.into(),
        vector_to_node(&camera.get_parameters()),
    );

    if let Some(distortion) = camera
        .get_distortion()
        .filter(|d| d.distortion_type() != DistortionType::NoDistortion)
    {
        let mut distortion_node = Mapping::new();
        distortion_node.insert(
            TYPE_KEY.into(),
            distortion_type_tag(distortion.distortion_type()).into(),
        );
        distortion_node.insert(
            PARAMETERS_KEY.into(),
            vector_to_node(&distortion.get_parameters()),
        );
        camera_node.insert(DISTORTION_KEY.into(), Value::Mapping(distortion_node));
    }

    Value::Mapping(camera_node)
}

/// Parses YAML text and decodes the camera it describes.
///
/// The text is loaded with [`node::load_document`], so string fields such as
/// `label` and `id` keep their source spelling. An empty document is rejected
/// with [`CameraYamlError::NotAMap`].
pub fn decode_str(contents: &str) -> Result<Camera, CameraYamlError> {
    let node = node::load_document(contents)?.ok_or(CameraYamlError::NotAMap)?;
    decode(&node)
}

/// Encodes a camera and renders it as YAML text.
pub fn encode_string(camera: &Camera) -> Result<String, CameraYamlError> {
    Ok(serde_yaml::to_string(&encode(camera))?)
}

/// Loads a camera from a YAML file.
///
/// # Errors
///
/// * [`CameraYamlError::Io`]: If there's an issue reading the file.
/// * [`CameraYamlError::Yaml`]: If the content is not well-formed YAML.
/// * Any decode error, see [`decode`].
///
/// # Related
/// * [`save_to_yaml()`]
pub fn load_from_yaml(path: impl AsRef<Path>) -> Result<Camera, CameraYamlError> {
    let contents = fs::read_to_string(path)?;
    decode_str(&contents)
}

/// Saves a camera to a YAML file.
///
/// # Related
/// * [`load_from_yaml()`]
pub fn save_to_yaml(camera: &Camera, path: impl AsRef<Path>) -> Result<(), CameraYamlError> {
    let yaml_string = encode_string(camera)?;
    fs::write(path, yaml_string)?;
    Ok(())
}

/// Loads a camera from a JSON file holding the same node tree.
pub fn load_from_json(path: impl AsRef<Path>) -> Result<Camera, CameraYamlError> {
    let contents = fs::read_to_string(path)?;
    let node: Value = serde_json::from_str(&contents)?;
    decode(&node)
}

/// Saves a camera to a JSON file, using the same node tree as [`save_to_yaml`].
pub fn save_to_json(camera: &Camera, path: impl AsRef<Path>) -> Result<(), CameraYamlError> {
    let json_string = serde_json::to_string_pretty(&encode(camera))?;
    fs::write(path, json_string)?;
    Ok(())
}
