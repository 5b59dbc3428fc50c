//! Implements the Pinhole camera model.
//!
//! This module provides the [`PinholeCamera`] struct. It adheres to the
//! [`CameraModel`] trait defined in the parent `camera` module ([`crate::camera`]).
//! The pinhole model is the simplest projection model; lens distortion, if
//! any, is carried by the owned [`Distortion`].

use crate::camera::{
    validation, CameraModel, CameraModelError, CameraProperties, CameraType, Intrinsics,
    Resolution,
};
use crate::distortion::Distortion;
use nalgebra::DVector;

/// Represents a Pinhole camera.
///
/// This struct holds the intrinsic parameters (focal length, principal point),
/// the image resolution, an optional owned distortion and the identity fields.
///
/// # Examples
///
/// ```rust
/// use nalgebra::DVector;
/// use camera_yaml::camera::pinhole::PinholeCamera;
/// use camera_yaml::camera::{CameraModel, Resolution};
///
/// let params = DVector::from_vec(vec![500.0, 500.0, 320.0, 240.0]); // fx, fy, cx, cy
/// let resolution = Resolution { width: 640, height: 480 };
/// let pinhole = PinholeCamera::new(&params, resolution, None);
///
/// assert_eq!(pinhole.intrinsics.fx, 500.0);
/// assert_eq!(pinhole.image_width(), 640);
/// assert_eq!(pinhole.get_line_delay_nanoseconds(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PinholeCamera {
    /// The intrinsic parameters of the camera, [`Intrinsics`] (fx, fy, cx, cy).
    pub intrinsics: Intrinsics,
    /// The resolution of the camera image, [`Resolution`] (width, height).
    pub resolution: Resolution,
    /// The lens distortion owned by this camera.
    pub distortion: Option<Distortion>,
    /// Id, label and line delay.
    pub properties: CameraProperties,
}

impl PinholeCamera {
    /// Creates a new [`PinholeCamera`] from a vector of parameters.
    ///
    /// # Arguments
    ///
    /// * `parameters` - A `&DVector<f64>` containing the intrinsic parameters in the order:
    ///   `fx` (focal length x), `fy` (focal length y), `cx` (principal point x), `cy` (principal point y).
    /// * `resolution` - The image size in pixels.
    /// * `distortion` - The distortion to take ownership of, or `None`.
    ///
    /// The parameter values are not validated here; see
    /// [`CameraModel::validate_params`].
    ///
    /// # Panics
    ///
    /// Panics if `parameters` holds fewer than 4 values.
    pub fn new(
        parameters: &DVector<f64>,
        resolution: Resolution,
        distortion: Option<Distortion>,
    ) -> Self {
        PinholeCamera {
            intrinsics: Intrinsics {
                fx: parameters[0],
                fy: parameters[1],
                cx: parameters[2],
                cy: parameters[3],
            },
            resolution,
            distortion,
            properties: CameraProperties::with_line_delay(Self::DEFAULT_LINE_DELAY_NANOSECONDS),
        }
    }
}

impl CameraModel for PinholeCamera {
    const PARAMETER_COUNT: usize = 4;

    fn camera_type(&self) -> CameraType {
        CameraType::Pinhole
    }

    /// Returns the intrinsics as `[fx, fy, cx, cy]`.
    fn get_parameters(&self) -> DVector<f64> {
        DVector::from_vec(vec![
            self.intrinsics.fx,
            self.intrinsics.fy,
            self.intrinsics.cx,
            self.intrinsics.cy,
        ])
    }

    fn get_resolution(&self) -> Resolution {
        self.resolution
    }

    fn get_distortion(&self) -> Option<&Distortion> {
        self.distortion.as_ref()
    }

    fn properties(&self) -> &CameraProperties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut CameraProperties {
        &mut self.properties
    }

    /// Validates the intrinsic parameters of the camera model.
    ///
    /// This method checks if the focal lengths (fx, fy) are positive and
    /// if the principal point coordinates (cx, cy) are finite numbers.
    ///
    /// # Errors
    ///
    /// * [`CameraModelError::FocalLengthMustBePositive`]
    /// * [`CameraModelError::PrincipalPointMustBeFinite`]
    fn validate_params(&self) -> Result<(), CameraModelError> {
        validation::validate_intrinsics(&self.intrinsics)?;
        Ok(())
    }
}

/// Contains unit tests for the Pinhole camera model.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::distortion::{DistortionType, EquidistantDistortion};

    fn sample_camera() -> PinholeCamera {
        let params = DVector::from_vec(vec![461.629, 460.152, 362.680, 246.049]);
        PinholeCamera::new(
            &params,
            Resolution {
                width: 752,
                height: 480,
            },
            None,
        )
    }

    #[test]
    fn test_pinhole_new() {
        let model = sample_camera();

        assert_eq!(model.intrinsics.fx, 461.629);
        assert_eq!(model.intrinsics.fy, 460.152);
        assert_eq!(model.intrinsics.cx, 362.680);
        assert_eq!(model.intrinsics.cy, 246.049);
        assert_eq!(model.resolution.width, 752);
        assert_eq!(model.resolution.height, 480);
        assert_eq!(model.camera_type(), CameraType::Pinhole);
        assert!(model.get_distortion().is_none());
    }

    #[test]
    fn test_pinhole_parameters_in_order() {
        let model = sample_camera();
        let params = model.get_parameters();
        assert_eq!(params.len(), PinholeCamera::PARAMETER_COUNT);
        assert_eq!(params.as_slice(), &[461.629, 460.152, 362.680, 246.049]);
    }

    #[test]
    fn test_pinhole_owns_distortion() {
        let distortion = EquidistantDistortion::new(&DVector::from_vec(vec![
            -0.0110, 0.0429, -0.0411, 0.0121,
        ]))
        .unwrap();
        let model = PinholeCamera::new(
            &DVector::from_vec(vec![190.97, 190.97, 254.93, 256.89]),
            Resolution {
                width: 512,
                height: 512,
            },
            Some(distortion.into()),
        );

        assert_eq!(
            model.get_distortion().map(|d| d.distortion_type()),
            Some(DistortionType::Equidistant)
        );
    }

    #[test]
    fn test_pinhole_validate_params() {
        let mut model = sample_camera();
        assert!(model.validate_params().is_ok());

        model.intrinsics.fx = 0.0;
        assert!(matches!(
            model.validate_params(),
            Err(CameraModelError::FocalLengthMustBePositive)
        ));
    }
}
