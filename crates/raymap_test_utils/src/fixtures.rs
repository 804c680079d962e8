//! Test fixtures and helpers.
//!
//! Pre-built documents for consistent testing.

use raymap_core::document::MapDocument;
use raymap_core::grid::TileId;
use raymap_core::math::{from_float, normalize_to_unit};

/// A saveable `width` x `height` map walled with `wall`, spawn in the middle
/// of the floor facing +X.
///
/// # Panics
///
/// Panics if the map is smaller than 3x3 (no floor left for the spawn).
#[must_use]
pub fn walled_room(width: u32, height: u32, wall: TileId) -> MapDocument {
    assert!(width >= 3 && height >= 3, "room needs a floor tile");

    let mut doc = MapDocument::new();
    doc.new_map(width, height);
    let (w, h) = (width as i32, height as i32);
    for x in 0..w {
        doc.set_tile(x, 0, wall);
        doc.set_tile(x, h - 1, wall);
    }
    for y in 0..h {
        doc.set_tile(0, y, wall);
        doc.set_tile(w - 1, y, wall);
    }

    let centre_x = f64::from(width / 2) + 0.5;
    let centre_y = f64::from(height / 2) + 0.5;
    doc.set_spawn_position(from_float(centre_x), from_float(centre_y));
    let (dx, dy) = normalize_to_unit(1.0, 0.0);
    doc.set_spawn_direction(dx, dy);
    doc
}

/// The 16x16 room the editor opens with, walled with tile 1.
#[must_use]
pub fn default_room() -> MapDocument {
    walled_room(16, 16, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walled_room_is_saveable() {
        let doc = walled_room(5, 4, 2);
        assert!(doc.validate_for_save().is_empty());
        assert_eq!(doc.get_tile(0, 0), Some(2));
        assert_eq!(doc.get_tile(2, 2), Some(0));
        assert_eq!(doc.spawn().tile_position(), Some((2, 2)));
    }
}
