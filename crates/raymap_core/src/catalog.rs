//! Tile catalog: display name and representative color per tile index.
//!
//! Loaded from the `textures.json` side-file written by the texture
//! generator. Only editing front ends use it; the codec never does.
//!
//! Texture ids in the file start at zero, but tile `0` is empty space, so
//! tile index = texture id + 1. Every texture comes in a normal and a
//! `shaded` variant, which is why the file's count is halved.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{MapError, Result};
use crate::grid::TileId;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Color shown for tiles with no usable color.
    pub const MISSING: Self = Self::new(0xFF, 0x00, 0xFF);

    /// Create a color from channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Expand an RGB565 value by replicating the high bits into the low ones.
    #[must_use]
    pub const fn from_rgb565(value: u16) -> Self {
        let r5 = (value >> 11) & 0x1F;
        let g6 = (value >> 5) & 0x3F;
        let b5 = value & 0x1F;
        Self {
            r: ((r5 << 3) | (r5 >> 2)) as u8,
            g: ((g6 << 2) | (g6 >> 4)) as u8,
            b: ((b5 << 3) | (b5 >> 2)) as u8,
        }
    }

    /// Parse `#RRGGBB` or an RGB565 hex literal (`0xF800` or `F800`).
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(hex) = text.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            let value = u32::from_str_radix(hex, 16).ok()?;
            return Some(Self::new(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            ));
        }

        let hex = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        let value = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::from_rgb565((value & 0xFFFF) as u16))
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Catalog entry for one tile index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileInfo {
    /// Texture name.
    pub name: String,
    /// Representative color.
    pub color: Rgb8,
}

impl TileInfo {
    /// Whether this is the darkened variant of another texture.
    #[must_use]
    pub fn is_shaded(&self) -> bool {
        self.name.contains("shaded")
    }
}

/// Lookup from tile index to display information.
pub trait TileCatalog {
    /// Entry for `tile`, if known.
    fn tile_info(&self, tile: TileId) -> Option<&TileInfo>;

    /// Display color for `tile`, [`Rgb8::MISSING`] if unknown.
    fn color_of(&self, tile: TileId) -> Rgb8 {
        self.tile_info(tile).map_or(Rgb8::MISSING, |info| info.color)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    version: Option<i64>,
    #[serde(default)]
    texture_count: u32,
    textures: Vec<TextureEntry>,
}

#[derive(Debug, Deserialize)]
struct TextureEntry {
    id: Option<u32>,
    name: Option<String>,
    rcolor: Option<String>,
}

/// Catalog backed by the texture generator's JSON metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureCatalog {
    version: Option<i64>,
    texture_count: u32,
    tiles: BTreeMap<TileId, TileInfo>,
}

impl TextureCatalog {
    /// Parse catalog JSON.
    ///
    /// Entries without an id, or whose tile index would not fit in a byte,
    /// are skipped.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let tiles = file
            .textures
            .into_iter()
            .filter_map(|entry| {
                let tile = TileId::try_from(entry.id?.checked_add(1)?).ok()?;
                let color = entry
                    .rcolor
                    .as_deref()
                    .and_then(Rgb8::parse)
                    .unwrap_or(Rgb8::MISSING);
                let name = entry.name.unwrap_or_else(|| "ERROR_NO_NAME".to_owned());
                Some((tile, TileInfo { name, color }))
            })
            .collect();

        Ok(Self {
            version: file.version,
            texture_count: file.texture_count / 2,
            tiles,
        })
    }

    /// Load the catalog file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| MapError::io(path, e))?;
        Self::from_json_str(&json).map_err(|e| MapError::Catalog {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Metadata version, if the file declared one.
    #[must_use]
    pub const fn version(&self) -> Option<i64> {
        self.version
    }

    /// Number of distinct textures (shaded variants not counted).
    #[must_use]
    pub const fn texture_count(&self) -> u32 {
        self.texture_count
    }

    /// Entries in tile order, optionally without shaded variants.
    pub fn tiles(&self, exclude_shaded: bool) -> impl Iterator<Item = (TileId, &TileInfo)> + '_ {
        self.tiles
            .iter()
            .filter(move |(_, info)| !(exclude_shaded && info.is_shaded()))
            .map(|(&tile, info)| (tile, info))
    }
}

impl TileCatalog for TextureCatalog {
    fn tile_info(&self, tile: TileId) -> Option<&TileInfo> {
        self.tiles.get(&tile)
    }
}
