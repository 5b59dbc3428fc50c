//! Implements the fisheye (field-of-view) distortion model.
//!
//! The model of Devernay and Faugeras maps the undistorted radius `r_u` to
//! `r_d = atan(2 r_u tan(w / 2)) / w` and is controlled by a single parameter
//! `w`, the field of view of the ideal fisheye lens.

use nalgebra::DVector;

use super::{invalid_parameters, DistortionModel, DistortionType};
use crate::camera::CameraModelError;

/// Fisheye distortion with the single parameter `w`.
#[derive(Debug, Clone, PartialEq)]
pub struct FisheyeDistortion {
    /// Field-of-view parameter, in `[MIN_VALID_W, MAX_VALID_W]`.
    pub w: f64,
}

impl FisheyeDistortion {
    /// Smallest accepted value of `w`.
    pub const MIN_VALID_W: f64 = 0.5;
    /// Largest accepted value of `w`.
    pub const MAX_VALID_W: f64 = 1.5;

    /// Creates a new [`FisheyeDistortion`] from a one-element parameter vector.
    ///
    /// # Errors
    ///
    /// Returns [`CameraModelError::InvalidDistortionParameters`] if the vector
    /// does not hold exactly one value within
    /// [`FisheyeDistortion::MIN_VALID_W`]..=[`FisheyeDistortion::MAX_VALID_W`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nalgebra::DVector;
    /// use camera_yaml::distortion::FisheyeDistortion;
    ///
    /// let distortion = FisheyeDistortion::new(&DVector::from_vec(vec![0.93])).unwrap();
    /// assert_eq!(distortion.w, 0.93);
    /// assert!(FisheyeDistortion::new(&DVector::from_vec(vec![0.1])).is_err());
    /// ```
    pub fn new(parameters: &DVector<f64>) -> Result<Self, CameraModelError> {
        if !Self::distortion_parameters_valid(parameters) {
            return Err(invalid_parameters(DistortionType::Fisheye, parameters));
        }
        Ok(FisheyeDistortion { w: parameters[0] })
    }
}

impl DistortionModel for FisheyeDistortion {
    const PARAMETER_COUNT: usize = 1;

    fn distortion_type(&self) -> DistortionType {
        DistortionType::Fisheye
    }

    fn get_parameters(&self) -> DVector<f64> {
        DVector::from_element(1, self.w)
    }

    fn distortion_parameters_valid(parameters: &DVector<f64>) -> bool {
        // NaN fails the range check as well.
        parameters.len() == Self::PARAMETER_COUNT
            && (Self::MIN_VALID_W..=Self::MAX_VALID_W).contains(&parameters[0])
    }
}
