//! Error types for the map tools.

use std::path::PathBuf;

use raymap_core::error::MapError;
use thiserror::Error;

/// Errors raised by the tools on top of core map errors.
#[derive(Debug, Error)]
pub enum ToolsError {
    /// Failed to read the config file.
    #[error("Failed to read config '{path}': {source}")]
    ConfigIo {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the config file.
    #[error("Failed to parse config '{path}': {source}")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Requested map size is outside the allowed range.
    #[error("Map size {width}x{height} is outside {min}..={max}")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Smallest allowed side.
        min: u32,
        /// Largest allowed side.
        max: u32,
    },

    /// Coordinates fall outside the map.
    #[error("Tile ({x}, {y}) is outside the map")]
    OutOfBounds {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },

    /// The spawn stands on the tile.
    #[error("Tile ({x}, {y}) holds the player spawn and cannot be painted")]
    SpawnTile {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },

    /// The spawn can only go on an empty tile.
    #[error("Spawn cannot be placed at ({x}, {y}): tile is not empty")]
    SpawnBlocked {
        /// Position in tile units.
        x: f64,
        /// Position in tile units.
        y: f64,
    },

    /// Failed to produce a JSON report.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// Core map error.
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Result type for tool operations.
pub type ToolsResult<T> = Result<T, ToolsError>;
