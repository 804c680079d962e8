//! Scripted edits: new maps, tile painting and spawn placement.
//!
//! These apply the same rules as the interactive editor, but turn a refused
//! edit into an error so scripts notice.

use raymap_core::document::MapDocument;
use raymap_core::grid::TileId;
use tracing::{debug, info};

use crate::config::ToolsConfig;
use crate::error::{ToolsError, ToolsResult};

/// Parameters for a new map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewMapRequest {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Spawn position in tile units; the centre tile when `None`.
    pub spawn: Option<(f64, f64)>,
    /// Spawn heading in degrees.
    pub heading: f64,
}

impl NewMapRequest {
    /// A request using the configured default size.
    #[must_use]
    pub fn from_config(config: &ToolsConfig) -> Self {
        Self {
            width: config.default_width,
            height: config.default_height,
            spawn: None,
            heading: 0.0,
        }
    }
}

/// Build a blank map with its spawn placed, ready to save.
pub fn create_map(config: &ToolsConfig, request: &NewMapRequest) -> ToolsResult<MapDocument> {
    config.check_size(request.width, request.height)?;

    let mut document = MapDocument::new();
    document.new_map(request.width, request.height);

    let (x, y) = request.spawn.unwrap_or_else(|| {
        (
            f64::from(request.width / 2) + 0.5,
            f64::from(request.height / 2) + 0.5,
        )
    });
    place_spawn(&mut document, x, y, Some(request.heading))?;
    info!(
        width = request.width,
        height = request.height,
        "created new map"
    );
    Ok(document)
}

/// Paint one tile.
///
/// Returns `false` when the tile already held `tile`, in which case the
/// document is unchanged.
pub fn paint(document: &mut MapDocument, x: i32, y: i32, tile: TileId) -> ToolsResult<bool> {
    let Some(current) = document.get_tile(x, y) else {
        return Err(ToolsError::OutOfBounds { x, y });
    };
    if document.spawn().tile_position() == Some((x, y)) {
        return Err(ToolsError::SpawnTile { x, y });
    }
    if current == tile {
        debug!(x, y, tile, "tile already set");
        return Ok(false);
    }
    Ok(document.paint_tile(x, y, tile))
}

/// Move the spawn to an empty tile, optionally turning it.
pub fn place_spawn(
    document: &mut MapDocument,
    x: f64,
    y: f64,
    heading: Option<f64>,
) -> ToolsResult<()> {
    if !document.place_spawn(x, y) {
        return Err(ToolsError::SpawnBlocked { x, y });
    }
    if let Some(degrees) = heading {
        document.set_spawn_heading(degrees);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use raymap_core::document::DocumentEvent;
    use raymap_test_utils::fixtures::walled_room;

    #[test]
    fn test_create_map_is_saveable() {
        let config = ToolsConfig::default();
        let document = create_map(&config, &NewMapRequest::from_config(&config)).unwrap();

        assert!(document.validate_for_save().is_empty());
        assert_eq!(document.grid().width(), Some(16));
        assert_eq!(document.spawn().tile_position(), Some((8, 8)));
        assert_eq!(document.spawn().facing_degrees(), Some(0));
    }

    #[test]
    fn test_create_map_honours_spawn_and_heading() {
        let config = ToolsConfig::default();
        let request = NewMapRequest {
            width: 20,
            height: 18,
            spawn: Some((3.5, 4.5)),
            heading: 90.0,
        };
        let document = create_map(&config, &request).unwrap();

        assert_eq!(document.spawn().tile_position(), Some((3, 4)));
        assert_eq!(document.spawn().facing_degrees(), Some(90));
    }

    #[test]
    fn test_create_map_rejects_small_sizes() {
        let config = ToolsConfig::default();
        let request = NewMapRequest {
            width: 8,
            ..NewMapRequest::from_config(&config)
        };
        assert!(matches!(
            create_map(&config, &request),
            Err(ToolsError::InvalidSize { width: 8, .. })
        ));
    }

    #[test]
    fn test_create_map_rejects_spawn_outside() {
        let config = ToolsConfig::default();
        let request = NewMapRequest {
            spawn: Some((40.0, 2.0)),
            ..NewMapRequest::from_config(&config)
        };
        assert!(matches!(
            create_map(&config, &request),
            Err(ToolsError::SpawnBlocked { .. })
        ));
    }

    #[test]
    fn test_paint_rules() {
        let mut document = walled_room(5, 5, 1);
        document.take_events();

        assert!(paint(&mut document, 1, 1, 4).unwrap());
        assert_eq!(document.get_tile(1, 1), Some(4));
        assert!(!paint(&mut document, 1, 1, 4).unwrap());

        assert!(matches!(
            paint(&mut document, 2, 2, 4),
            Err(ToolsError::SpawnTile { x: 2, y: 2 })
        ));
        assert!(matches!(
            paint(&mut document, 5, 0, 4),
            Err(ToolsError::OutOfBounds { .. })
        ));

        let tile_events = document
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, DocumentEvent::TileChanged { .. }))
            .count();
        assert_eq!(tile_events, 1);
    }

    #[test]
    fn test_spawn_needs_empty_tile() {
        let mut document = walled_room(5, 5, 1);

        assert!(matches!(
            place_spawn(&mut document, 0.5, 0.5, None),
            Err(ToolsError::SpawnBlocked { .. })
        ));

        place_spawn(&mut document, 1.5, 3.5, Some(180.0)).unwrap();
        assert_eq!(document.spawn().tile_position(), Some((1, 3)));
        assert_eq!(document.spawn().facing_degrees(), Some(180));
    }
}
