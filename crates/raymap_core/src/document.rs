//! The editable map document.
//!
//! [`MapDocument`] is the single source of truth for one editing session. It
//! owns the grid and the spawn, tracks unsaved changes, decides what is
//! saveable, and queues [`DocumentEvent`]s for whoever renders it.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::container;
use crate::error::{MapError, Result};
use crate::grid::{MapGrid, TileId, EMPTY_TILE, MAX_MAP_SIZE};
use crate::math::{direction_from_degrees, from_float, Fixed};
use crate::spawn::PlayerSpawn;

/// A rule the document breaks that prevents saving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// Width or height is unset or zero.
    #[error("Map has zero width or height, cannot save.")]
    MissingDimensions,

    /// Width or height is above [`MAX_MAP_SIZE`].
    #[error("Map dimensions {width}x{height} exceed maximum size of {MAX_MAP_SIZE}x{MAX_MAP_SIZE}.")]
    ExceedsMaximumSize {
        /// Current width.
        width: u32,
        /// Current height.
        height: u32,
    },

    /// The tile buffer does not hold `width * height` tiles.
    ///
    /// With no dimensions set no buffer can match.
    #[error(
        "Map tile data size ({actual}) does not match width and height ({}).",
        expected_len_text(*.expected)
    )]
    TileCountMismatch {
        /// Tiles the dimensions call for, `None` if they are unset.
        expected: Option<usize>,
        /// Tiles actually stored.
        actual: usize,
    },

    /// The tile buffer is empty.
    #[error("Map has no tile data to save.")]
    NoTileData,

    /// Neither position component is set.
    #[error("Player start position is not set.")]
    SpawnPositionUnset,

    /// Neither angle component is set.
    #[error("Player start angle is not set.")]
    SpawnAngleUnset,
}

fn expected_len_text(expected: Option<usize>) -> String {
    expected.map_or_else(|| "unset".to_owned(), |len| len.to_string())
}

/// Why the whole map was swapped out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceReason {
    /// A new blank map was created or the map was resized.
    NewMap,
    /// A container was loaded.
    Loaded,
}

/// Change notifications drained by observers via [`MapDocument::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    /// A single tile was written.
    TileChanged {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// New tile value.
        tile: TileId,
    },
    /// The spawn position changed.
    SpawnMoved {
        /// New X position.
        x: Fixed,
        /// New Y position.
        y: Fixed,
    },
    /// The spawn facing changed.
    DirectionChanged {
        /// New X component.
        x: Fixed,
        /// New Y component.
        y: Fixed,
    },
    /// The unsaved-changes flag flipped.
    DirtyChanged(bool),
    /// Grid (and on load, spawn) replaced wholesale.
    MapReplaced(ReplaceReason),
    /// The document was written to disk.
    Saved(PathBuf),
}

/// Map grid plus player spawn, with dirty tracking.
#[derive(Debug, Clone, Default)]
pub struct MapDocument {
    grid: MapGrid,
    spawn: PlayerSpawn,
    dirty: bool,
    events: Vec<DocumentEvent>,
}

impl MapDocument {
    /// Create an empty, clean document with an uninitialized grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a clean document from decoded parts.
    #[must_use]
    pub fn from_parts(grid: MapGrid, spawn: PlayerSpawn) -> Self {
        Self {
            grid,
            spawn,
            dirty: false,
            events: Vec::new(),
        }
    }

    /// The tile grid.
    #[must_use]
    pub const fn grid(&self) -> &MapGrid {
        &self.grid
    }

    /// The player spawn.
    #[must_use]
    pub const fn spawn(&self) -> &PlayerSpawn {
        &self.spawn
    }

    /// Whether there are unsaved changes.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drain queued change notifications.
    pub fn take_events(&mut self) -> Vec<DocumentEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_dirty(&mut self, dirty: bool) {
        if self.dirty != dirty {
            self.dirty = dirty;
            self.events.push(DocumentEvent::DirtyChanged(dirty));
        }
    }

    /// Replace the grid with a blank `width` x `height` one.
    ///
    /// Existing tiles are not carried over. The spawn is kept.
    pub fn new_map(&mut self, width: u32, height: u32) {
        debug!(width, height, "creating new map");
        self.grid = MapGrid::new(width, height);
        self.set_dirty(true);
        self.events
            .push(DocumentEvent::MapReplaced(ReplaceReason::NewMap));
    }

    /// Tile at coordinates, `None` if out of bounds.
    #[must_use]
    pub fn get_tile(&self, x: i32, y: i32) -> Option<TileId> {
        self.grid.get_tile(x, y)
    }

    /// Write a tile. Out-of-bounds writes are ignored.
    ///
    /// Returns whether anything was written.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileId) -> bool {
        if !self.grid.set_tile(x, y, tile) {
            return false;
        }
        self.set_dirty(true);
        self.events
            .push(DocumentEvent::TileChanged { x, y, tile });
        true
    }

    /// Paint a tile the way the editor canvas does.
    ///
    /// Refuses the tile the spawn stands on and skips writes that would not
    /// change the cell.
    pub fn paint_tile(&mut self, x: i32, y: i32, tile: TileId) -> bool {
        if self.spawn.tile_position() == Some((x, y)) {
            return false;
        }
        match self.grid.get_tile(x, y) {
            Some(current) if current != tile => self.set_tile(x, y, tile),
            _ => false,
        }
    }

    /// Overwrite the spawn position.
    pub fn set_spawn_position(&mut self, x: Fixed, y: Fixed) {
        self.spawn.set_position(x, y);
        self.set_dirty(true);
        self.events.push(DocumentEvent::SpawnMoved { x, y });
    }

    /// Overwrite the spawn facing with an already normalized vector.
    pub fn set_spawn_direction(&mut self, x: Fixed, y: Fixed) {
        self.spawn.set_direction(x, y);
        self.set_dirty(true);
        self.events
            .push(DocumentEvent::DirectionChanged { x, y });
    }

    /// Face the spawn toward a heading in degrees.
    pub fn set_spawn_heading(&mut self, degrees: f64) {
        let (x, y) = direction_from_degrees(degrees);
        self.set_spawn_direction(x, y);
    }

    /// Place the spawn at a position in tile units.
    ///
    /// Only empty, in-bounds tiles accept the spawn. Returns whether it moved.
    pub fn place_spawn(&mut self, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return false;
        }
        if self.grid.get_tile(x as i32, y as i32) != Some(EMPTY_TILE) {
            return false;
        }
        self.set_spawn_position(from_float(x), from_float(y));
        true
    }

    /// Check every save rule and report all violations.
    ///
    /// An empty list means the document can be saved. Spawn rules only fire
    /// when *both* components are unset; a half-set position passes.
    #[must_use]
    pub fn validate_for_save(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let width = self.grid.width();
        let height = self.grid.height();
        let tile_count = self.grid.tiles().len();

        if matches!(width, None | Some(0)) || matches!(height, None | Some(0)) {
            issues.push(ValidationIssue::MissingDimensions);
        }

        let (w, h) = (width.unwrap_or(0), height.unwrap_or(0));
        if w > MAX_MAP_SIZE || h > MAX_MAP_SIZE {
            issues.push(ValidationIssue::ExceedsMaximumSize {
                width: w,
                height: h,
            });
        }

        let expected = self.grid.expected_len();
        if expected != Some(tile_count) {
            issues.push(ValidationIssue::TileCountMismatch {
                expected,
                actual: tile_count,
            });
        }

        if tile_count == 0 {
            issues.push(ValidationIssue::NoTileData);
        }

        if self.spawn.start_x.is_none() && self.spawn.start_y.is_none() {
            issues.push(ValidationIssue::SpawnPositionUnset);
        }

        if self.spawn.start_angle_x.is_none() && self.spawn.start_angle_y.is_none() {
            issues.push(ValidationIssue::SpawnAngleUnset);
        }

        issues
    }

    /// Encode to container bytes without validating.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        container::encode(self)
    }

    /// Validate, encode and write the container to `path`.
    ///
    /// Nothing is written if validation fails. The dirty flag is cleared only
    /// after the write succeeds.
    pub fn save_to_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let issues = self.validate_for_save();
        if !issues.is_empty() {
            return Err(MapError::Validation { issues });
        }

        let bytes = self.encode();
        std::fs::write(path, &bytes).map_err(|e| MapError::io(path, e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "saved map container");

        self.set_dirty(false);
        self.events.push(DocumentEvent::Saved(path.to_path_buf()));
        Ok(())
    }

    /// Replace this document with one decoded from `bytes`.
    ///
    /// On error the document is left untouched.
    pub fn load_from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let decoded = container::decode(bytes)?;
        self.replace_with(decoded);
        Ok(())
    }

    /// Read and decode the container at `path`, replacing this document.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| MapError::io(path, e))?;
        self.load_from_bytes(&bytes)?;
        debug!(path = %path.display(), "loaded map container");
        Ok(())
    }

    /// Open a container file as a new document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut document = Self::new();
        document.load_from_path(path)?;
        document.events.clear();
        Ok(document)
    }

    fn replace_with(&mut self, other: Self) {
        self.grid = other.grid;
        self.spawn = other.spawn;
        self.set_dirty(false);
        self.events
            .push(DocumentEvent::MapReplaced(ReplaceReason::Loaded));
    }
}
