//! Player spawn position and facing.
//!
//! A plain value holder. Nothing here validates; the document decides what
//! is saveable so there is a single place that reports problems.

use serde::{Deserialize, Serialize};

use crate::math::{
    degrees_from_direction, option_fixed_serde, to_int, Fixed, UNSET_BITS,
};

/// Where the player starts and which way they face.
///
/// Every field is `None` until assigned. On the wire an unassigned field is
/// written as the raw value `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerSpawn {
    /// X position in tiles.
    #[serde(with = "option_fixed_serde", default)]
    pub start_x: Option<Fixed>,
    /// Y position in tiles.
    #[serde(with = "option_fixed_serde", default)]
    pub start_y: Option<Fixed>,
    /// X component of the unit facing vector.
    #[serde(with = "option_fixed_serde", default)]
    pub start_angle_x: Option<Fixed>,
    /// Y component of the unit facing vector.
    #[serde(with = "option_fixed_serde", default)]
    pub start_angle_y: Option<Fixed>,
}

impl PlayerSpawn {
    /// A spawn with nothing assigned.
    #[must_use]
    pub const fn unset() -> Self {
        Self {
            start_x: None,
            start_y: None,
            start_angle_x: None,
            start_angle_y: None,
        }
    }

    /// Overwrite the position.
    pub fn set_position(&mut self, x: Fixed, y: Fixed) {
        self.start_x = Some(x);
        self.start_y = Some(y);
    }

    /// Overwrite the facing vector.
    ///
    /// The caller passes an already normalized vector, normally from
    /// [`crate::math::normalize_to_unit`].
    pub fn set_direction(&mut self, x: Fixed, y: Fixed) {
        self.start_angle_x = Some(x);
        self.start_angle_y = Some(y);
    }

    /// Position, if both components are set.
    #[must_use]
    pub fn position(&self) -> Option<(Fixed, Fixed)> {
        Some((self.start_x?, self.start_y?))
    }

    /// Facing vector, if both components are set.
    #[must_use]
    pub fn direction(&self) -> Option<(Fixed, Fixed)> {
        Some((self.start_angle_x?, self.start_angle_y?))
    }

    /// Tile the spawn stands on.
    #[must_use]
    pub fn tile_position(&self) -> Option<(i32, i32)> {
        self.position().map(|(x, y)| (to_int(x), to_int(y)))
    }

    /// Facing as whole degrees in `0..360`.
    #[must_use]
    pub fn facing_degrees(&self) -> Option<u32> {
        self.direction()
            .map(|(x, y)| degrees_from_direction(x, y))
    }

    /// Raw wire values in container order, unset fields as `-1`.
    #[must_use]
    pub fn to_wire(&self) -> [i32; 4] {
        [
            self.start_x,
            self.start_y,
            self.start_angle_x,
            self.start_angle_y,
        ]
        .map(|field| field.map_or(UNSET_BITS, Fixed::to_bits))
    }

    /// Rebuild a spawn from raw wire values.
    #[must_use]
    pub fn from_wire(raw: [i32; 4]) -> Self {
        let [start_x, start_y, start_angle_x, start_angle_y] = raw.map(|bits| {
            if bits == UNSET_BITS {
                None
            } else {
                Some(Fixed::from_bits(bits))
            }
        });
        Self {
            start_x,
            start_y,
            start_angle_x,
            start_angle_y,
        }
    }
}
