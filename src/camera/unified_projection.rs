//! Unified Projection Camera Implementation
//!
//! This module implements the unified projection model of Geyer/Daniilidis and
//! Mei, which first projects a point onto the unit sphere and then onto the
//! normalized image plane from a centre shifted by `xi` along the optical axis.
//! It covers catadioptric and wide-angle lenses with a single mirror parameter
//! in addition to the pinhole intrinsics.
//!
//! # References
//!
//! C. Mei and P. Rives, "Single View Point Omnidirectional Camera Calibration
//! from Planar Grids", ICRA 2007.

use crate::camera::{
    validation, CameraModel, CameraModelError, CameraProperties, CameraType, Intrinsics,
    Resolution,
};
use crate::distortion::Distortion;
use nalgebra::DVector;
use std::fmt;

/// A camera following the unified projection model.
///
/// # Fields
///
/// *   `xi`: `f64` - Distance of the projection centre from the sphere centre.
///     Must be finite and non-negative.
/// *   `intrinsics`: [`Intrinsics`] - Holds the focal lengths (fx, fy) and principal point (cx, cy).
/// *   `resolution`: [`Resolution`] - The width and height of the camera image in pixels.
/// *   `distortion`: optional owned [`Distortion`].
/// *   `properties`: id, label and line delay.
///
/// # Examples
///
/// ```rust
/// use nalgebra::DVector;
/// use camera_yaml::camera::unified_projection::UnifiedProjectionCamera;
/// use camera_yaml::camera::{CameraModel, Resolution};
///
/// // Parameters: xi, fx, fy, cx, cy
/// let params = DVector::from_vec(vec![0.89, 1456.9, 1455.6, 632.0, 479.2]);
/// let camera = UnifiedProjectionCamera::new(&params, Resolution { width: 1280, height: 960 }, None);
///
/// assert_eq!(camera.xi, 0.89);
/// assert_eq!(camera.intrinsics.fx, 1456.9);
/// assert!(camera.validate_params().is_ok());
/// ```
#[derive(Clone, PartialEq)]
pub struct UnifiedProjectionCamera {
    /// Mirror parameter.
    pub xi: f64,
    /// Camera intrinsic parameters: `fx`, `fy`, `cx`, `cy`.
    pub intrinsics: Intrinsics,
    /// Image resolution as width and height in pixels.
    pub resolution: Resolution,
    pub distortion: Option<Distortion>,
    pub properties: CameraProperties,
}

impl UnifiedProjectionCamera {
    /// Creates a new [`UnifiedProjectionCamera`] from a parameter vector.
    ///
    /// The parameter vector holds `[xi, fx, fy, cx, cy]`.
    ///
    /// # Panics
    ///
    /// This function will panic if `parameters.len()` is less than 5, due to direct
    /// indexing (`parameters[0]` through `parameters[4]`).
    pub fn new(
        parameters: &DVector<f64>,
        resolution: Resolution,
        distortion: Option<Distortion>,
    ) -> Self {
        UnifiedProjectionCamera {
            xi: parameters[0],
            intrinsics: Intrinsics {
                fx: parameters[1],
                fy: parameters[2],
                cx: parameters[3],
                cy: parameters[4],
            },
            resolution,
            distortion,
            properties: CameraProperties::with_line_delay(Self::DEFAULT_LINE_DELAY_NANOSECONDS),
        }
    }
}

/// Provides a concise debug string for [`UnifiedProjectionCamera`].
impl fmt::Debug for UnifiedProjectionCamera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UnifiedProjection [xi: {} fx: {} fy: {} cx: {} cy: {} resolution: {}x{} distortion: {:?} properties: {:?}]",
            self.xi,
            self.intrinsics.fx,
            self.intrinsics.fy,
            self.intrinsics.cx,
            self.intrinsics.cy,
            self.resolution.width,
            self.resolution.height,
            self.distortion,
            self.properties,
        )
    }
}

impl CameraModel for UnifiedProjectionCamera {
    const PARAMETER_COUNT: usize = 5;

    fn camera_type(&self) -> CameraType {
        CameraType::UnifiedProjection
    }

    /// Returns the intrinsics as `[xi, fx, fy, cx, cy]`.
    fn get_parameters(&self) -> DVector<f64> {
        DVector::from_vec(vec![
            self.xi,
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

    /// Validates the parameters of the unified projection model.
    ///
    /// # Errors
    ///
    /// * [`CameraModelError::InvalidParams`]: If `xi` is negative or not a finite number.
    /// * Errors propagated from [`validation::validate_intrinsics`].
    fn validate_params(&self) -> Result<(), CameraModelError> {
        validation::validate_intrinsics(&self.intrinsics)?;

        if !self.xi.is_finite() || self.xi < 0.0 {
            return Err(CameraModelError::InvalidParams(
                "xi must be finite and non-negative".to_string(),
            ));
        }

        Ok(())
    }
}
