//! Proptest strategies for map documents.
//!
//! These generate random but reproducible grids and spawns for
//! property-based testing of the container codec and validation.

use proptest::prelude::*;
use raymap_core::document::MapDocument;
use raymap_core::grid::{MapGrid, TileId, MAX_MAP_SIZE};
use raymap_core::math::{direction_from_degrees, Fixed, FIXED_ONE_BITS};
use raymap_core::spawn::PlayerSpawn;

/// Generate a map dimension.
///
/// Range: 1 to 32, kept small so shrinking stays fast.
pub fn arb_dimension() -> impl Strategy<Value = u32> {
    1u32..=32
}

/// Generate any valid dimension, up to [`MAX_MAP_SIZE`].
pub fn arb_full_dimension() -> impl Strategy<Value = u32> {
    1u32..=MAX_MAP_SIZE
}

/// Generate a grid whose tile buffer matches its dimensions.
pub fn arb_grid() -> impl Strategy<Value = MapGrid> {
    (arb_dimension(), arb_dimension()).prop_flat_map(|(width, height)| {
        let len = (width * height) as usize;
        proptest::collection::vec(any::<TileId>(), len)
            .prop_map(move |tiles| MapGrid::from_raw_parts(width, height, tiles))
    })
}

/// Generate a position coordinate anywhere on a maximum-size map.
///
/// Never negative, so never the unset sentinel.
pub fn arb_position() -> impl Strategy<Value = Fixed> {
    (0..(MAX_MAP_SIZE as i32) * FIXED_ONE_BITS).prop_map(Fixed::from_bits)
}

/// Generate a heading in degrees.
pub fn arb_heading() -> impl Strategy<Value = f64> {
    0.0f64..360.0
}

/// Generate a fully assigned spawn.
pub fn arb_spawn() -> impl Strategy<Value = PlayerSpawn> {
    (arb_position(), arb_position(), arb_heading()).prop_map(|(x, y, heading)| {
        let mut spawn = PlayerSpawn::unset();
        spawn.set_position(x, y);
        let (dx, dy) = direction_from_degrees(heading);
        spawn.set_direction(dx, dy);
        spawn
    })
}

/// Generate a spawn with each field independently set or unset.
pub fn arb_partial_spawn() -> impl Strategy<Value = PlayerSpawn> {
    (
        proptest::option::of(arb_position()),
        proptest::option::of(arb_position()),
        proptest::option::of(arb_position()),
        proptest::option::of(arb_position()),
    )
        .prop_map(|(start_x, start_y, start_angle_x, start_angle_y)| PlayerSpawn {
            start_x,
            start_y,
            start_angle_x,
            start_angle_y,
        })
}

/// Generate a document that passes save validation.
pub fn arb_valid_document() -> impl Strategy<Value = MapDocument> {
    (arb_grid(), arb_spawn()).prop_map(|(grid, spawn)| MapDocument::from_parts(grid, spawn))
}
