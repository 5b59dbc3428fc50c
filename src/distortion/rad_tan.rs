//! Implements the Radial-Tangential (RadTan) distortion model.
//!
//! This module provides the [`RadTanDistortion`] struct, the plumb-bob model
//! with two radial coefficients (`k1`, `k2`) and two tangential coefficients
//! (`p1`, `p2`). It is the distortion commonly paired with a pinhole camera
//! for standard, narrow field-of-view lenses.

use nalgebra::DVector;
use std::fmt;

use super::{invalid_parameters, DistortionModel, DistortionType};
use crate::camera::CameraModelError;

/// Represents a Radial-Tangential distortion.
///
/// The coefficients are stored in the order `[k1, k2, p1, p2]`:
/// *   `k1`, `k2`: Radial distortion coefficients.
/// *   `p1`, `p2`: Tangential distortion coefficients.
///
/// # Examples
///
/// ```rust
/// use nalgebra::DVector;
/// use camera_yaml::distortion::RadTanDistortion;
///
/// let params = DVector::from_vec(vec![-0.28340811, 0.07395907, 0.00019359, 1.76187114e-05]);
/// let distortion = RadTanDistortion::new(&params).unwrap();
/// assert_eq!(distortion.distortions[0], -0.28340811); // k1
/// ```
#[derive(Clone, PartialEq)]
pub struct RadTanDistortion {
    /// The 4 distortion coefficients: `[k1, k2, p1, p2]`.
    pub distortions: [f64; 4],
}

impl RadTanDistortion {
    /// Creates a new [`RadTanDistortion`] from a vector of parameters.
    ///
    /// # Arguments
    ///
    /// * `parameters` - A `&DVector<f64>` containing the coefficients in the order:
    ///   1.  `k1`: First radial distortion coefficient.
    ///   2.  `k2`: Second radial distortion coefficient.
    ///   3.  `p1`: First tangential distortion coefficient.
    ///   4.  `p2`: Second tangential distortion coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`CameraModelError::InvalidDistortionParameters`] if the vector
    /// does not hold exactly four finite values.
    pub fn new(parameters: &DVector<f64>) -> Result<Self, CameraModelError> {
        if !Self::distortion_parameters_valid(parameters) {
            return Err(invalid_parameters(DistortionType::RadTan, parameters));
        }

        Ok(RadTanDistortion {
            distortions: [
                parameters[0], // k1
                parameters[1], // k2
                parameters[2], // p1
                parameters[3], // p2
            ],
        })
    }
}

/// Provides a debug string representation for [`RadTanDistortion`].
impl fmt::Debug for RadTanDistortion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RadTanDistortion [k1: {} k2: {} p1: {} p2: {}]",
            self.distortions[0], self.distortions[1], self.distortions[2], self.distortions[3],
        )
    }
}

impl DistortionModel for RadTanDistortion {
    const PARAMETER_COUNT: usize = 4;

    fn distortion_type(&self) -> DistortionType {
        DistortionType::RadTan
    }

    /// Returns the coefficients in the order `[k1, k2, p1, p2]`.
    fn get_parameters(&self) -> DVector<f64> {
        DVector::from_row_slice(&self.distortions)
    }

    fn distortion_parameters_valid(parameters: &DVector<f64>) -> bool {
        parameters.len() == Self::PARAMETER_COUNT && parameters.iter().all(|p| p.is_finite())
    }
}
