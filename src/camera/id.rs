//! 128-bit camera identifiers with a fixed-width hex text form.

use std::fmt;

/// Unique identifier of a camera.
///
/// The all-zero value is reserved as the unset id: [`CameraId::default`] is
/// not valid, and unset ids are never written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CameraId(u128);

impl CameraId {
    /// Number of hex digits in the text form.
    pub const HEX_LENGTH: usize = 32;

    pub fn from_u128(value: u128) -> Self {
        CameraId(value)
    }

    pub fn as_u128(&self) -> u128 {
        self.0
    }

    /// Parses exactly [`CameraId::HEX_LENGTH`] hex digits, in either case.
    ///
    /// Returns `None` for any other length or for non-hex characters. Signs
    /// and surrounding whitespace are not accepted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use camera_yaml::camera::CameraId;
    ///
    /// let id = CameraId::from_hex_string("deadbeefdeadbeefdeadbeefdeadbeef").unwrap();
    /// assert!(id.is_valid());
    /// assert!(CameraId::from_hex_string("deadbeef").is_none());
    /// ```
    pub fn from_hex_string(hex: &str) -> Option<Self> {
        if hex.len() != Self::HEX_LENGTH || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u128::from_str_radix(hex, 16).ok().map(CameraId)
    }

    /// Lowercase, zero-padded hex form.
    pub fn hex_string(&self) -> String {
        format!("{:032x}", self.0)
    }

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let hex = "0000000000000000000000000000abcd";
        let id = CameraId::from_hex_string(hex).unwrap();
        assert_eq!(id.as_u128(), 0xabcd);
        assert_eq!(id.hex_string(), hex);
        assert_eq!(id.to_string(), hex);
    }

    #[test]
    fn test_uppercase_is_accepted_and_normalized() {
        let id = CameraId::from_hex_string("DEADBEEFDEADBEEFDEADBEEFDEADBEEF").unwrap();
        assert_eq!(id.hex_string(), "deadbeefdeadbeefdeadbeefdeadbeef");
    }

    #[test]
    fn test_rejects_malformed() {
        let malformed = [
            "",
            "deadbeef",
            "deadbeefdeadbeefdeadbeefdeadbeef00",
            "deadbeefdeadbeefdeadbeefdeadbeeg",
            "+eadbeefdeadbeefdeadbeefdeadbeef",
            " deadbeefdeadbeefdeadbeefdeadbee",
        ];
        for hex in malformed {
            assert!(CameraId::from_hex_string(hex).is_none(), "{:?}", hex);
        }
    }

    #[test]
    fn test_zero_is_invalid() {
        assert!(!CameraId::default().is_valid());
        let zero = CameraId::from_hex_string(&"0".repeat(32)).unwrap();
        assert!(!zero.is_valid());
        assert!(CameraId::from_u128(1).is_valid());
    }
}
