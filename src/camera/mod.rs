//! Camera projection models.
//!
//! A [`Camera`] is one of a closed set of projection models (pinhole and
//! unified projection). Every model owns its intrinsics, the image
//! [`Resolution`], an optional [`Distortion`] moved in at construction, and
//! the identity fields grouped in [`CameraProperties`].

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::distortion::{Distortion, DistortionType};
use crate::yaml::{self, CameraYamlError};

pub mod id;
pub mod pinhole;
pub mod unified_projection;

pub use id::CameraId;
pub use pinhole::PinholeCamera;
pub use unified_projection::UnifiedProjectionCamera;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

#[derive(thiserror::Error, Debug)]
pub enum CameraModelError {
    #[error("Focal length must be positive")]
    FocalLengthMustBePositive,
    #[error("Principal point must be finite")]
    PrincipalPointMustBeFinite,
    #[error("Invalid camera parameters: {0}")]
    InvalidParams(String),
    #[error("Wrong number of parameters for the {camera_type:?} camera. Wanted: {expected}, got: {actual}")]
    WrongParameterCount {
        camera_type: CameraType,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid {distortion_type:?} distortion parameters: {parameters:?}")]
    InvalidDistortionParameters {
        distortion_type: DistortionType,
        parameters: Vec<f64>,
    },
}

/// Identifies the variant of a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraType {
    Pinhole,
    UnifiedProjection,
}

impl CameraType {
    /// Number of intrinsic parameters the variant expects.
    pub fn parameter_count(self) -> usize {
        match self {
            CameraType::Pinhole => PinholeCamera::PARAMETER_COUNT,
            CameraType::UnifiedProjection => UnifiedProjectionCamera::PARAMETER_COUNT,
        }
    }

    /// Line delay a freshly constructed camera of this variant starts with.
    pub fn default_line_delay_nanoseconds(self) -> u64 {
        match self {
            CameraType::Pinhole => PinholeCamera::DEFAULT_LINE_DELAY_NANOSECONDS,
            CameraType::UnifiedProjection => {
                UnifiedProjectionCamera::DEFAULT_LINE_DELAY_NANOSECONDS
            }
        }
    }
}

/// Identity and metadata shared by all camera models.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraProperties {
    /// Unique identifier; the default id is unset.
    pub id: CameraId,
    /// Free-text label, empty by default.
    pub label: String,
    /// Readout delay between consecutive image rows (rolling shutter).
    pub line_delay_nanoseconds: u64,
}

impl CameraProperties {
    pub(crate) fn with_line_delay(line_delay_nanoseconds: u64) -> Self {
        CameraProperties {
            line_delay_nanoseconds,
            ..Default::default()
        }
    }
}

/// Trait defining the core functionality for camera models.
///
/// Implementors provide the model-specific pieces; the identity accessors are
/// provided on top of [`CameraModel::properties`].
pub trait CameraModel {
    /// Fixed length of the intrinsics vector.
    const PARAMETER_COUNT: usize;

    /// Line delay used when none is given explicitly.
    const DEFAULT_LINE_DELAY_NANOSECONDS: u64 = 0;

    fn camera_type(&self) -> CameraType;

    /// The intrinsics in their canonical order.
    fn get_parameters(&self) -> DVector<f64>;

    fn get_resolution(&self) -> Resolution;

    /// The owned distortion, if any.
    fn get_distortion(&self) -> Option<&Distortion>;

    fn properties(&self) -> &CameraProperties;

    fn properties_mut(&mut self) -> &mut CameraProperties;

    /// Validate camera parameters
    fn validate_params(&self) -> Result<(), CameraModelError>;

    fn image_width(&self) -> u32 {
        self.get_resolution().width
    }

    fn image_height(&self) -> u32 {
        self.get_resolution().height
    }

    fn get_id(&self) -> CameraId {
        self.properties().id
    }

    fn set_id(&mut self, id: CameraId) {
        self.properties_mut().id = id;
    }

    fn get_label(&self) -> &str {
        &self.properties().label
    }

    fn set_label(&mut self, label: impl Into<String>) {
        self.properties_mut().label = label.into();
    }

    fn get_line_delay_nanoseconds(&self) -> u64 {
        self.properties().line_delay_nanoseconds
    }

    fn set_line_delay_nanoseconds(&mut self, line_delay_nanoseconds: u64) {
        self.properties_mut().line_delay_nanoseconds = line_delay_nanoseconds;
    }
}

/// A camera of one of the supported projection models.
///
/// # Examples
///
/// ```rust
/// use nalgebra::DVector;
/// use camera_yaml::camera::{Camera, CameraType, Resolution};
///
/// let intrinsics = DVector::from_vec(vec![458.654, 457.296, 367.215, 248.375]);
/// let resolution = Resolution { width: 752, height: 480 };
/// let mut camera =
///     Camera::from_parameters(CameraType::Pinhole, &intrinsics, resolution, None).unwrap();
/// camera.set_label("cam0");
///
/// assert_eq!(camera.camera_type(), CameraType::Pinhole);
/// assert_eq!(camera.image_width(), 752);
/// assert!(camera.get_distortion().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Camera {
    Pinhole(PinholeCamera),
    UnifiedProjection(UnifiedProjectionCamera),
}

impl Camera {
    /// Builds a camera of the given variant without checking the intrinsics length.
    ///
    /// # Panics
    ///
    /// Panics if `intrinsics` holds fewer values than
    /// [`CameraType::parameter_count`]. Use [`Camera::from_parameters`] for
    /// unchecked input.
    pub fn new(
        camera_type: CameraType,
        intrinsics: &DVector<f64>,
        resolution: Resolution,
        distortion: Option<Distortion>,
    ) -> Self {
        match camera_type {
            CameraType::Pinhole => {
                Camera::Pinhole(PinholeCamera::new(intrinsics, resolution, distortion))
            }
            CameraType::UnifiedProjection => Camera::UnifiedProjection(
                UnifiedProjectionCamera::new(intrinsics, resolution, distortion),
            ),
        }
    }

    /// Builds a camera after checking the intrinsics length.
    ///
    /// # Errors
    ///
    /// Returns [`CameraModelError::WrongParameterCount`] if the length of
    /// `intrinsics` differs from the variant's parameter count.
    pub fn from_parameters(
        camera_type: CameraType,
        intrinsics: &DVector<f64>,
        resolution: Resolution,
        distortion: Option<Distortion>,
    ) -> Result<Self, CameraModelError> {
        let expected = camera_type.parameter_count();
        if intrinsics.len() != expected {
            return Err(CameraModelError::WrongParameterCount {
                camera_type,
                expected,
                actual: intrinsics.len(),
            });
        }
        Ok(Camera::new(camera_type, intrinsics, resolution, distortion))
    }

    /// Loads a camera from a YAML file. See [`yaml::load_from_yaml`].
    pub fn load_from_yaml(path: impl AsRef<Path>) -> Result<Self, CameraYamlError> {
        yaml::load_from_yaml(path)
    }

    /// Saves the camera to a YAML file. See [`yaml::save_to_yaml`].
    pub fn save_to_yaml(&self, path: impl AsRef<Path>) -> Result<(), CameraYamlError> {
        yaml::save_to_yaml(self, path)
    }

    pub fn camera_type(&self) -> CameraType {
        match self {
            Camera::Pinhole(c) => c.camera_type(),
            Camera::UnifiedProjection(c) => c.camera_type(),
        }
    }

    pub fn get_parameters(&self) -> DVector<f64> {
        match self {
            Camera::Pinhole(c) => c.get_parameters(),
            Camera::UnifiedProjection(c) => c.get_parameters(),
        }
    }

    pub fn get_resolution(&self) -> Resolution {
        match self {
            Camera::Pinhole(c) => c.get_resolution(),
            Camera::UnifiedProjection(c) => c.get_resolution(),
        }
    }

    pub fn get_distortion(&self) -> Option<&Distortion> {
        match self {
            Camera::Pinhole(c) => c.get_distortion(),
            Camera::UnifiedProjection(c) => c.get_distortion(),
        }
    }

    pub fn validate_params(&self) -> Result<(), CameraModelError> {
        match self {
            Camera::Pinhole(c) => c.validate_params(),
            Camera::UnifiedProjection(c) => c.validate_params(),
        }
    }

    pub fn properties(&self) -> &CameraProperties {
        match self {
            Camera::Pinhole(c) => c.properties(),
            Camera::UnifiedProjection(c) => c.properties(),
        }
    }

    pub fn properties_mut(&mut self) -> &mut CameraProperties {
        match self {
            Camera::Pinhole(c) => c.properties_mut(),
            Camera::UnifiedProjection(c) => c.properties_mut(),
        }
    }

    pub fn image_width(&self) -> u32 {
        self.get_resolution().width
    }

    pub fn image_height(&self) -> u32 {
        self.get_resolution().height
    }

    pub fn get_id(&self) -> CameraId {
        self.properties().id
    }

    pub fn set_id(&mut self, id: CameraId) {
        self.properties_mut().id = id;
    }

    pub fn get_label(&self) -> &str {
        &self.properties().label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.properties_mut().label = label.into();
    }

    pub fn get_line_delay_nanoseconds(&self) -> u64 {
        self.properties().line_delay_nanoseconds
    }

    pub fn set_line_delay_nanoseconds(&mut self, line_delay_nanoseconds: u64) {
        self.properties_mut().line_delay_nanoseconds = line_delay_nanoseconds;
    }
}

impl From<PinholeCamera> for Camera {
    fn from(camera: PinholeCamera) -> Self {
        Camera::Pinhole(camera)
    }
}

impl From<UnifiedProjectionCamera> for Camera {
    fn from(camera: UnifiedProjectionCamera) -> Self {
        Camera::UnifiedProjection(camera)
    }
}

/// Common validation functions for camera parameters
pub mod validation {
    use super::*;

    pub fn validate_intrinsics(intrinsics: &Intrinsics) -> Result<(), CameraModelError> {
        if intrinsics.fx <= 0.0 || intrinsics.fy <= 0.0 {
            return Err(CameraModelError::FocalLengthMustBePositive);
        }
        if !intrinsics.cx.is_finite() || !intrinsics.cy.is_finite() {
            return Err(CameraModelError::PrincipalPointMustBeFinite);
        }
        Ok(())
    }
}
