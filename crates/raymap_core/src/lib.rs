//! # Raymap Core
//!
//! Map data model and container codec for the pico raycaster.
//!
//! The engine loads a single binary container holding the player spawn and
//! a tile map. This crate owns everything both sides must agree on:
//! - Q16.16 fixed-point conversion (no engine-side floats)
//! - Column-major tile storage
//! - The `MAP0` container layout
//!
//! Editing front ends mutate a [`document::MapDocument`], validate it, and
//! hand it to the codec. Nothing here renders or prompts.
//!
//! ## Crate Structure
//!
//! - [`math`] - Fixed-point conversions and direction vectors
//! - [`grid`] - Column-major tile grid
//! - [`spawn`] - Player spawn position and facing
//! - [`document`] - Editable document, validation, save/load
//! - [`container`] - Binary container encode/decode
//! - [`catalog`] - Tile names and colors for display
//! - [`assets`] - Asset file locations

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod assets;
pub mod catalog;
pub mod container;
pub mod document;
pub mod error;
pub mod grid;
pub mod math;
pub mod spawn;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::assets::AssetPaths;
    pub use crate::catalog::{Rgb8, TextureCatalog, TileCatalog, TileInfo};
    pub use crate::container::{decode, encode, ContainerHeader, FormatError};
    pub use crate::document::{DocumentEvent, MapDocument, ValidationIssue};
    pub use crate::error::{MapError, Result};
    pub use crate::grid::{MapGrid, TileId, EMPTY_TILE, MAX_MAP_SIZE};
    pub use crate::math::Fixed;
    pub use crate::spawn::PlayerSpawn;
}
