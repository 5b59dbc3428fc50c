//! Camera YAML Library
//!
//! Camera projection models with owned lens distortions, and a strict codec
//! between cameras and YAML node trees. This library provides:
//! - Pinhole and unified projection camera models
//! - Equidistant, fisheye (FOV) and radial-tangential distortion models
//! - 128-bit camera ids with a fixed-width hex text form
//! - Decoding and encoding of cameras as YAML (or JSON) node trees
//!
//! ```rust
//! use camera_yaml::yaml;
//!
//! let camera = yaml::decode_str(
//!     "
//! type: pinhole
//! image_width: 752
//! image_height: 480
//! intrinsics: [458.654, 457.296, 367.215, 248.375]
//! distortion:
//!   type: radial-tangential
//!   parameters: [-0.28340811, 0.07395907, 0.00019359, 1.76187114e-05]
//! ",
//! )
//! .unwrap();
//!
//! let text = yaml::encode_string(&camera).unwrap();
//! assert_eq!(yaml::decode_str(&text).unwrap(), camera);
//! ```

pub mod camera;
pub mod distortion;
pub mod yaml;

// Re-export commonly used types
pub use camera::{
    Camera, CameraId, CameraModel, CameraModelError, CameraType, Intrinsics, PinholeCamera,
    Resolution, UnifiedProjectionCamera,
};
pub use distortion::{
    Distortion, DistortionModel, DistortionType, EquidistantDistortion, FisheyeDistortion,
    RadTanDistortion,
};
pub use yaml::CameraYamlError;
