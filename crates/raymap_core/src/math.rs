//! Q16.16 fixed-point helpers shared with the engine.
//!
//! The raycaster stores positions and directions as signed 32-bit Q16.16
//! values. Everything the editor writes into a container goes through these
//! helpers so the editor and the engine agree bit for bit.

use fixed::types::I16F16;

/// Fixed-point number type used for every spawn field.
///
/// 16 bits of integer part, 16 bits of fraction.
/// Range: -32768 to 32767.99998
/// Precision: 1/65536
pub type Fixed = I16F16;

/// Raw bits of `1.0` in Q16.16.
pub const FIXED_ONE_BITS: i32 = 1 << 16;

/// Raw bit pattern marking an unassigned fixed-point field on the wire.
pub const UNSET_BITS: i32 = -1;

/// Largest deviation of `x² + y²` from one still accepted as a unit vector.
const UNIT_TOLERANCE: Fixed = Fixed::from_bits(8);

/// Convert a fixed-point value to a float.
#[must_use]
pub fn to_float(fp: Fixed) -> f64 {
    fp.to_num::<f64>()
}

/// Integer (tile) part of a fixed-point value.
///
/// Arithmetic shift, so negative values floor toward negative infinity.
#[must_use]
pub const fn to_int(fp: Fixed) -> i32 {
    fp.to_bits() >> 16
}

/// Convert a non-negative float to fixed point, rounding half up.
///
/// Negative inputs are outside the contract: the rounding direction flips
/// for them. Values beyond the Q16.16 range saturate.
#[must_use]
pub fn from_float(value: f64) -> Fixed {
    let scaled = (value * f64::from(FIXED_ONE_BITS) + 0.5).floor();
    Fixed::from_bits(scaled as i32)
}

/// Normalize `(dx, dy)` into a fixed-point unit vector.
///
/// A zero-length input yields `(1.0, 0.0)`, i.e. facing +X.
#[must_use]
pub fn normalize_to_unit(dx: f64, dy: f64) -> (Fixed, Fixed) {
    let magnitude = dx.hypot(dy);
    if magnitude == 0.0 {
        return (Fixed::ONE, Fixed::ZERO);
    }

    let scale = f64::from(FIXED_ONE_BITS);
    (
        unit_component(dx / magnitude * scale),
        unit_component(dy / magnitude * scale),
    )
}

/// Round a scaled unit component, never landing on the unset sentinel.
fn unit_component(scaled: f64) -> Fixed {
    let bits = scaled.round() as i32;
    if bits == UNSET_BITS {
        Fixed::ZERO
    } else {
        Fixed::from_bits(bits)
    }
}

/// Unit direction for a heading in degrees (0 = +X, 90 = +Y).
#[must_use]
pub fn direction_from_degrees(degrees: f64) -> (Fixed, Fixed) {
    let radians = degrees.to_radians();
    normalize_to_unit(radians.cos(), radians.sin())
}

/// Whole-degree heading of a direction vector, wrapped into `0..360`.
#[must_use]
pub fn degrees_from_direction(x: Fixed, y: Fixed) -> u32 {
    let degrees = to_float(y).atan2(to_float(x)).to_degrees() as i32;
    degrees.rem_euclid(360) as u32
}

/// Fixed-point 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2Fixed {
    /// X component.
    pub x: Fixed,
    /// Y component.
    pub y: Fixed,
}

/// Serde support for `Option<Fixed>`.
///
/// `None` is serialized as a serialized `None`, not as the wire sentinel.
pub mod option_fixed_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize an optional fixed-point number.
    pub fn serialize<S>(value: &Option<Fixed>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => v.to_bits().serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional fixed-point number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Fixed>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<i32>::deserialize(deserializer)?;
        Ok(opt.map(Fixed::from_bits))
    }
}

impl Vec2Fixed {
    /// Create a new fixed-point vector.
    #[must_use]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };

    /// Dot product of two vectors.
    #[must_use]
    pub fn dot(self, other: Self) -> Fixed {
        self.x
            .saturating_mul(other.x)
            .saturating_add(self.y.saturating_mul(other.y))
    }

    /// Squared length.
    #[must_use]
    pub fn length_squared(self) -> Fixed {
        self.dot(self)
    }

    /// Whether the vector has unit length within fixed-point rounding.
    #[must_use]
    pub fn is_unit(self) -> bool {
        (self.length_squared() - Fixed::ONE).abs() <= UNIT_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_identity_round_trip() {
        let value = to_float(from_float(2.5));
        assert!((value - 2.5).abs() <= 1.0 / 65536.0);
        assert_eq!(from_float(2.5).to_bits(), 2 * FIXED_ONE_BITS + FIXED_ONE_BITS / 2);
    }

    #[test]
    fn test_from_float_rounds_half_up() {
        // 0.5 / 65536 sits exactly between 0 and 1 LSB
        assert_eq!(from_float(0.5 / 65536.0).to_bits(), 1);
        assert_eq!(from_float(0.49 / 65536.0).to_bits(), 0);
        assert_eq!(from_float(10.252).to_bits(), 671_875);
    }

    #[test]
    fn test_from_float_saturates() {
        assert_eq!(from_float(1.0e9).to_bits(), i32::MAX);
    }

    #[test]
    fn test_to_int_floors() {
        assert_eq!(to_int(from_float(10.75)), 10);
        assert_eq!(to_int(Fixed::from_bits(-1)), -1);
        assert_eq!(to_int(Fixed::from_bits(-FIXED_ONE_BITS - 1)), -2);
    }

    #[test]
    fn test_zero_vector_falls_back_to_plus_x() {
        let (x, y) = normalize_to_unit(0.0, 0.0);
        assert_eq!(x.to_bits(), 65536);
        assert_eq!(y.to_bits(), 0);
    }

    #[test]
    fn test_normalize_three_four() {
        let (x, y) = normalize_to_unit(3.0, 4.0);
        // 0.6 * 65536 = 39321.6, 0.8 * 65536 = 52428.8
        assert_eq!(x.to_bits(), 39322);
        assert_eq!(y.to_bits(), 52429);
        assert!(Vec2Fixed::new(x, y).is_unit());
    }

    #[test]
    fn test_normalize_never_emits_sentinel() {
        let (x, y) = normalize_to_unit(1.0, -1.0e-5);
        assert_eq!(x, Fixed::ONE);
        assert_ne!(y.to_bits(), UNSET_BITS);
    }

    #[test]
    fn test_direction_from_degrees() {
        let (x, y) = direction_from_degrees(90.0);
        assert_eq!(x.to_bits(), 0);
        assert_eq!(y, Fixed::ONE);

        let (x, y) = direction_from_degrees(180.0);
        assert_eq!(x, -Fixed::ONE);
        assert_eq!(y.to_bits(), 0);
    }

    #[test]
    fn test_degrees_round_trip_whole_angles() {
        for degrees in [0u32, 45, 90, 135, 180, 225, 270, 315] {
            let (x, y) = direction_from_degrees(f64::from(degrees));
            let back = degrees_from_direction(x, y);
            // Truncation may land one degree short
            assert!(
                back == degrees || back == (degrees + 359) % 360,
                "{degrees} came back as {back}"
            );
        }
    }

    #[test]
    fn test_is_unit_rejects_long_vectors() {
        let v = Vec2Fixed::new(Fixed::ONE, Fixed::ONE);
        assert!(!v.is_unit());
        assert!(!Vec2Fixed::ZERO.is_unit());
    }
}
