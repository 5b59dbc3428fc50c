//! Lens distortion models.
//!
//! This module provides the closed family of lens-distortion variants that a
//! camera may own: no distortion, equidistant, fisheye (FOV) and
//! radial-tangential. Every variant carries a fixed-length parameter vector and
//! a pure validity predicate over that vector. The [`Distortion`] enum is the
//! owned value that gets moved into a camera at construction time.

use nalgebra::DVector;

use crate::camera::CameraModelError;

pub mod equidistant;
pub mod fisheye;
pub mod rad_tan;

pub use equidistant::EquidistantDistortion;
pub use fisheye::FisheyeDistortion;
pub use rad_tan::RadTanDistortion;

/// Identifies the variant of a [`Distortion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistortionType {
    NoDistortion,
    Equidistant,
    Fisheye,
    RadTan,
}

impl DistortionType {
    /// Number of parameters the variant expects.
    pub fn parameter_count(self) -> usize {
        match self {
            DistortionType::NoDistortion => NoDistortion::PARAMETER_COUNT,
            DistortionType::Equidistant => EquidistantDistortion::PARAMETER_COUNT,
            DistortionType::Fisheye => FisheyeDistortion::PARAMETER_COUNT,
            DistortionType::RadTan => RadTanDistortion::PARAMETER_COUNT,
        }
    }
}

/// Trait defining the common functionality of the distortion variants.
pub trait DistortionModel {
    /// Fixed length of the parameter vector.
    const PARAMETER_COUNT: usize;

    /// The variant tag of this distortion.
    fn distortion_type(&self) -> DistortionType;

    /// The parameters in their canonical order.
    fn get_parameters(&self) -> DVector<f64>;

    /// Checks a candidate parameter vector against the constraints of the variant.
    ///
    /// This is pure and includes the length check, so it can be used on
    /// untrusted input before anything is indexed.
    fn distortion_parameters_valid(parameters: &DVector<f64>) -> bool;
}

/// The identity distortion. Carries no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoDistortion;

impl DistortionModel for NoDistortion {
    const PARAMETER_COUNT: usize = 0;

    fn distortion_type(&self) -> DistortionType {
        DistortionType::NoDistortion
    }

    fn get_parameters(&self) -> DVector<f64> {
        DVector::zeros(0)
    }

    fn distortion_parameters_valid(parameters: &DVector<f64>) -> bool {
        parameters.is_empty()
    }
}

/// An owned lens distortion of one of the supported variants.
///
/// A value of this type always satisfies the validity predicate of its
/// variant: the only way to build one from raw parameters is
/// [`Distortion::new`] (or the variant constructors), which reject invalid
/// vectors.
///
/// # Examples
///
/// ```rust
/// use nalgebra::DVector;
/// use camera_yaml::distortion::{Distortion, DistortionType};
///
/// let params = DVector::from_vec(vec![0.9]);
/// let distortion = Distortion::new(DistortionType::Fisheye, &params).unwrap();
/// assert_eq!(distortion.distortion_type(), DistortionType::Fisheye);
///
/// let out_of_range = DVector::from_vec(vec![3.0]);
/// assert!(Distortion::new(DistortionType::Fisheye, &out_of_range).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Distortion {
    NoDistortion,
    Equidistant(EquidistantDistortion),
    Fisheye(FisheyeDistortion),
    RadTan(RadTanDistortion),
}

impl Distortion {
    /// Builds a distortion of the given variant from a parameter vector.
    ///
    /// # Errors
    ///
    /// Returns [`CameraModelError::InvalidDistortionParameters`] if the vector
    /// fails the variant's [`DistortionModel::distortion_parameters_valid`].
    pub fn new(
        distortion_type: DistortionType,
        parameters: &DVector<f64>,
    ) -> Result<Self, CameraModelError> {
        let distortion = match distortion_type {
            DistortionType::NoDistortion => {
                if !NoDistortion::distortion_parameters_valid(parameters) {
                    return Err(invalid_parameters(distortion_type, parameters));
                }
                Distortion::NoDistortion
            }
            DistortionType::Equidistant => {
                Distortion::Equidistant(EquidistantDistortion::new(parameters)?)
            }
            DistortionType::Fisheye => Distortion::Fisheye(FisheyeDistortion::new(parameters)?),
            DistortionType::RadTan => Distortion::RadTan(RadTanDistortion::new(parameters)?),
        };
        Ok(distortion)
    }

    /// Dispatches to the validity predicate of `distortion_type`.
    pub fn distortion_parameters_valid(
        distortion_type: DistortionType,
        parameters: &DVector<f64>,
    ) -> bool {
        match distortion_type {
            DistortionType::NoDistortion => NoDistortion::distortion_parameters_valid(parameters),
            DistortionType::Equidistant => {
                EquidistantDistortion::distortion_parameters_valid(parameters)
            }
            DistortionType::Fisheye => FisheyeDistortion::distortion_parameters_valid(parameters),
            DistortionType::RadTan => RadTanDistortion::distortion_parameters_valid(parameters),
        }
    }

    pub fn distortion_type(&self) -> DistortionType {
        match self {
            Distortion::NoDistortion => DistortionType::NoDistortion,
            Distortion::Equidistant(d) => d.distortion_type(),
            Distortion::Fisheye(d) => d.distortion_type(),
            Distortion::RadTan(d) => d.distortion_type(),
        }
    }

    pub fn get_parameters(&self) -> DVector<f64> {
        match self {
            Distortion::NoDistortion => NoDistortion.get_parameters(),
            Distortion::Equidistant(d) => d.get_parameters(),
            Distortion::Fisheye(d) => d.get_parameters(),
            Distortion::RadTan(d) => d.get_parameters(),
        }
    }
}

impl From<EquidistantDistortion> for Distortion {
    fn from(distortion: EquidistantDistortion) -> Self {
        Distortion::Equidistant(distortion)
    }
}

impl From<FisheyeDistortion> for Distortion {
    fn from(distortion: FisheyeDistortion) -> Self {
        Distortion::Fisheye(distortion)
    }
}

impl From<RadTanDistortion> for Distortion {
    fn from(distortion: RadTanDistortion) -> Self {
        Distortion::RadTan(distortion)
    }
}

/// Builds the error returned by the variant constructors.
pub(crate) fn invalid_parameters(
    distortion_type: DistortionType,
    parameters: &DVector<f64>,
) -> CameraModelError {
    CameraModelError::InvalidDistortionParameters {
        distortion_type,
        parameters: parameters.iter().copied().collect(),
    }
}
