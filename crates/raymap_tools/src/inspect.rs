//! Human and machine readable views of a map container.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

use raymap_core::catalog::TileCatalog;
use raymap_core::container::{self, ContainerHeader};
use raymap_core::document::MapDocument;
use raymap_core::error::MapError;
use raymap_core::grid::{TileId, EMPTY_TILE};
use raymap_core::math::{to_float, Fixed};
use raymap_core::spawn::PlayerSpawn;
use serde::Serialize;

use crate::error::ToolsResult;

/// Character drawn on the spawn tile.
pub const SPAWN_CHAR: char = '@';

/// A decoded container together with its header.
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Header as stored in the file.
    pub header: ContainerHeader,
    /// Decoded document.
    pub document: MapDocument,
}

/// Summary printed by `inspect --json`.
///
/// Spawn fields are raw Q16.16 values, `null` when unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    /// Header version word.
    pub version: u32,
    /// Offset of the player section.
    pub player_offset: u32,
    /// Offset of the map section.
    pub map_offset: u32,
    /// Width in tiles.
    pub width: Option<u32>,
    /// Height in tiles.
    pub height: Option<u32>,
    /// Number of stored tiles.
    pub tile_count: usize,
    /// Tiles that are not empty.
    pub non_empty_tiles: usize,
    /// Player spawn.
    pub spawn: PlayerSpawn,
    /// Tile under the spawn.
    pub spawn_tile: Option<(i32, i32)>,
    /// Spawn facing in whole degrees.
    pub facing_degrees: Option<u32>,
    /// Reasons the map could not be saved back as is.
    pub issues: Vec<String>,
}

impl Inspection {
    /// Parse the header and decode the document.
    pub fn from_bytes(bytes: &[u8]) -> ToolsResult<Self> {
        let header = container::read_header(bytes).map_err(MapError::from)?;
        let document = container::decode(bytes).map_err(MapError::from)?;
        Ok(Self { header, document })
    }

    /// Read and inspect the container at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> ToolsResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| MapError::io(path, e))?;
        Self::from_bytes(&bytes)
    }

    /// Collect the summary.
    #[must_use]
    pub fn summary(&self) -> MapSummary {
        let grid = self.document.grid();
        let spawn = *self.document.spawn();
        MapSummary {
            version: self.header.version,
            player_offset: self.header.player_offset,
            map_offset: self.header.map_offset,
            width: grid.width(),
            height: grid.height(),
            tile_count: grid.tiles().len(),
            non_empty_tiles: grid.count_non_empty(),
            spawn,
            spawn_tile: spawn.tile_position(),
            facing_degrees: spawn.facing_degrees(),
            issues: self
                .document
                .validate_for_save()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Summary as pretty-printed JSON.
    pub fn to_json(&self) -> ToolsResult<String> {
        Ok(serde_json::to_string_pretty(&self.summary())?)
    }

    /// Header, spawn and map drawing as plain text.
    #[must_use]
    pub fn render_text(&self) -> String {
        let summary = self.summary();
        let mut output = String::new();

        let _ = writeln!(
            output,
            "container  version {}  player@{}  map@{}",
            summary.version, summary.player_offset, summary.map_offset
        );
        let size = match (summary.width, summary.height) {
            (Some(w), Some(h)) => format!("{w}x{h}"),
            _ => "unset".to_owned(),
        };
        let _ = writeln!(
            output,
            "size       {size} ({} tiles, {} non-empty)",
            summary.tile_count, summary.non_empty_tiles
        );
        let _ = writeln!(output, "spawn      {}", describe_spawn(&summary.spawn));
        for issue in &summary.issues {
            let _ = writeln!(output, "issue      {issue}");
        }
        output.push('\n');
        output.push_str(&render_ascii(&self.document));
        output
    }
}

fn describe_spawn(spawn: &PlayerSpawn) -> String {
    let coord = |value: Option<Fixed>| {
        value.map_or_else(|| "unset".to_owned(), |v| format!("{:.2}", to_float(v)))
    };
    let mut text = format!("({}, {})", coord(spawn.start_x), coord(spawn.start_y));
    if let Some((x, y)) = spawn.tile_position() {
        let _ = write!(text, " tile ({x}, {y})");
    }
    match spawn.facing_degrees() {
        Some(degrees) => {
            let _ = write!(text, " facing {degrees} deg");
        }
        None => text.push_str(" facing unset"),
    }
    text
}

/// Draw the grid row by row, spawn marked with [`SPAWN_CHAR`].
///
/// Empty tiles are `.`, tiles 1-9 their digit, 10-35 a letter and anything
/// higher `#`. Cells missing from a short tile buffer are blank.
#[must_use]
pub fn render_ascii(document: &MapDocument) -> String {
    let grid = document.grid();
    let (Some(width), Some(height)) = (grid.width(), grid.height()) else {
        return String::new();
    };
    let spawn = document.spawn().tile_position();

    let mut output = String::with_capacity(((width + 1) * height) as usize);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let ch = if spawn == Some((x, y)) {
                SPAWN_CHAR
            } else {
                grid.get_tile(x, y).map_or(' ', tile_char)
            };
            output.push(ch);
        }
        output.push('\n');
    }
    output
}

/// Legend of the tiles used in `document`, named from `catalog`.
#[must_use]
pub fn render_legend(document: &MapDocument, catalog: &impl TileCatalog) -> String {
    let used: BTreeSet<TileId> = document
        .grid()
        .tiles()
        .iter()
        .copied()
        .filter(|&tile| tile != EMPTY_TILE)
        .collect();

    let mut output = String::new();
    for tile in used {
        let name = catalog
            .tile_info(tile)
            .map_or("unknown", |info| info.name.as_str());
        let _ = writeln!(
            output,
            "{} {tile:>3} {} {name}",
            tile_char(tile),
            catalog.color_of(tile)
        );
    }
    output
}

fn tile_char(tile: TileId) -> char {
    match tile {
        EMPTY_TILE => '.',
        1..=9 => char::from(b'0' + tile),
        10..=35 => char::from(b'a' + (tile - 10)),
        _ => '#',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raymap_core::catalog::{Rgb8, TextureCatalog};
    use raymap_test_utils::fixtures::walled_room;

    fn inspect(document: &MapDocument) -> Inspection {
        Inspection::from_bytes(&document.encode()).unwrap()
    }

    #[test]
    fn test_ascii_is_row_major_view_of_columns() {
        let mut document = walled_room(5, 4, 1);
        document.set_tile(3, 1, 12);

        assert_eq!(
            render_ascii(&document),
            "11111\n1..c1\n1.@.1\n11111\n"
        );
    }

    #[test]
    fn test_ascii_of_uninitialized_grid_is_empty() {
        assert!(render_ascii(&MapDocument::new()).is_empty());
    }

    #[test]
    fn test_summary_fields() {
        let summary = inspect(&walled_room(5, 4, 1)).summary();

        assert_eq!(summary.version, 100_000);
        assert_eq!((summary.player_offset, summary.map_offset), (20, 36));
        assert_eq!((summary.width, summary.height), (Some(5), Some(4)));
        assert_eq!(summary.tile_count, 20);
        assert_eq!(summary.non_empty_tiles, 14);
        assert_eq!(summary.spawn_tile, Some((2, 2)));
        assert_eq!(summary.facing_degrees, Some(0));
        assert!(summary.issues.is_empty());
    }

    #[test]
    fn test_json_uses_raw_fixed_values() {
        let document = walled_room(5, 4, 1);
        let mut spawn = *document.spawn();
        spawn.start_angle_x = None;
        spawn.start_angle_y = None;
        let document = MapDocument::from_parts(document.grid().clone(), spawn);

        let json: serde_json::Value =
            serde_json::from_str(&inspect(&document).to_json().unwrap()).unwrap();
        assert_eq!(json["width"], 5);
        assert_eq!(json["spawn"]["start_x"], 163_840);
        assert!(json["spawn"]["start_angle_x"].is_null());
        assert_eq!(json["issues"][0], "Player start angle is not set.");
    }

    #[test]
    fn test_text_report() {
        let text = inspect(&walled_room(5, 4, 1)).render_text();
        assert!(text.contains("version 100000"));
        assert!(text.contains("5x4 (20 tiles, 14 non-empty)"));
        assert!(text.contains("(2.50, 2.50) tile (2, 2) facing 0 deg"));
        assert!(text.ends_with("11111\n"));
    }

    #[test]
    fn test_legend_names_used_tiles() {
        let catalog = TextureCatalog::from_json_str(
            r##"{"textures": [{"id": 0, "name": "brick", "rcolor": "#A03020"}]}"##,
        )
        .unwrap();
        let mut document = walled_room(5, 4, 1);
        document.set_tile(1, 1, 40);

        let legend = render_legend(&document, &catalog);
        let lines: Vec<&str> = legend.lines().collect();
        assert_eq!(lines[0], "1   1 #A03020 brick");
        assert_eq!(lines[1], format!("#  40 {} unknown", Rgb8::MISSING));
    }

    #[test]
    fn test_bad_file_is_reported() {
        let err = Inspection::from_bytes(b"NOPE").unwrap_err();
        assert!(err.to_string().to_lowercase().contains("magic"));
    }
}
