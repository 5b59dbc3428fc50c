//! Implements the equidistant distortion model.
//!
//! The equidistant model describes the distorted angle as an odd polynomial of
//! the incidence angle, `theta_d = theta (1 + k1 theta^2 + k2 theta^4 + k3 theta^6 + k4 theta^8)`,
//! and is the usual choice for fisheye lenses calibrated with Kalibr.

use nalgebra::DVector;

use super::{invalid_parameters, DistortionModel, DistortionType};
use crate::camera::CameraModelError;

/// Equidistant distortion with the four coefficients `[k1, k2, k3, k4]`.
///
/// # Examples
///
/// ```rust
/// use nalgebra::DVector;
/// use camera_yaml::distortion::EquidistantDistortion;
///
/// let params = DVector::from_vec(vec![-0.0110, 0.0429, -0.0411, 0.0121]);
/// let distortion = EquidistantDistortion::new(&params).unwrap();
/// assert_eq!(distortion.coefficients[1], 0.0429);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EquidistantDistortion {
    /// Polynomial coefficients `[k1, k2, k3, k4]`.
    pub coefficients: [f64; 4],
}

impl EquidistantDistortion {
    /// Creates a new [`EquidistantDistortion`] from a vector of parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CameraModelError::InvalidDistortionParameters`] if the vector
    /// does not hold exactly four finite coefficients.
    pub fn new(parameters: &DVector<f64>) -> Result<Self, CameraModelError> {
        if !Self::distortion_parameters_valid(parameters) {
            return Err(invalid_parameters(DistortionType::Equidistant, parameters));
        }

        Ok(EquidistantDistortion {
            coefficients: [parameters[0], parameters[1], parameters[2], parameters[3]],
        })
    }
}

impl DistortionModel for EquidistantDistortion {
    const PARAMETER_COUNT: usize = 4;

    fn distortion_type(&self) -> DistortionType {
        DistortionType::Equidistant
    }

    fn get_parameters(&self) -> DVector<f64> {
        DVector::from_row_slice(&self.coefficients)
    }

    fn distortion_parameters_valid(parameters: &DVector<f64>) -> bool {
        parameters.len() == Self::PARAMETER_COUNT && parameters.iter().all(|k| k.is_finite())
    }
}
