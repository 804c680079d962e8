//! `MAP0` container codec.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! Header (20 bytes)
//!   0   magic            b"MAP0"
//!   4   version          u32, 100000 = "1.0.00"
//!   8   player offset    u32
//!   12  map offset       u32
//!   16  reserved         u32, zero
//!
//! PlayerData (16 bytes, at player offset)
//!   start_x, start_y, start_angle_x, start_angle_y   i32 Q16.16, -1 = unset
//!
//! MapData (at map offset)
//!   width u8, height u8, width * height tile bytes in column-major order
//! ```
//!
//! Readers always follow the header offsets instead of assuming the
//! sections are packed, so the header can grow without breaking them.

use std::fmt;
use std::io::{Cursor, Read, Seek, SeekFrom};

use thiserror::Error;
use tracing::{debug, trace};

use crate::document::MapDocument;
use crate::grid::{MapGrid, TileId};
use crate::spawn::PlayerSpawn;

/// Magic bytes opening every container.
pub const MAGIC: [u8; 4] = *b"MAP0";

/// Format version written by this crate ("1.0.00").
pub const FORMAT_VERSION: u32 = 100_000;

/// Size of the v1 header in bytes.
pub const HEADER_LEN: u32 = 20;

/// Size of the player section in bytes.
pub const PLAYER_SECTION_LEN: u32 = 16;

/// Width and height bytes preceding the tile data.
pub const MAP_SECTION_PREFIX_LEN: u32 = 2;

/// Container section, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The fixed header at offset zero.
    Header,
    /// Player spawn block.
    PlayerData,
    /// Map dimensions and tiles.
    MapData,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::PlayerData => write!(f, "player data"),
            Self::MapData => write!(f, "map data"),
        }
    }
}

/// Ways a container can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The first four bytes are not `MAP0`.
    #[error("bad magic {found:02X?}, expected \"MAP0\"")]
    BadMagic {
        /// Bytes found where the magic should be (zero-padded if short).
        found: [u8; 4],
    },

    /// A section ends past the end of the buffer.
    #[error("{section} truncated: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        /// Section being read.
        section: Section,
        /// Position the read started at.
        offset: u64,
        /// Bytes the read required.
        needed: u64,
        /// Bytes left in the buffer.
        available: u64,
    },

    /// A header offset points beyond the buffer.
    #[error("{section} offset {offset} is outside the {len}-byte container")]
    OffsetOutOfRange {
        /// Section the offset belongs to.
        section: Section,
        /// Offset read from the header.
        offset: u32,
        /// Total container length.
        len: u64,
    },
}

/// Parsed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Advisory format version.
    pub version: u32,
    /// Byte offset of the player section.
    pub player_offset: u32,
    /// Byte offset of the map section.
    pub map_offset: u32,
    /// Reserved word, zero when written by this crate.
    pub reserved: u32,
}

impl ContainerHeader {
    /// Header a v1 writer emits: sections packed right after the header.
    #[must_use]
    pub const fn v1() -> Self {
        let player_offset = HEADER_LEN;
        Self {
            version: FORMAT_VERSION,
            player_offset,
            map_offset: player_offset + PLAYER_SECTION_LEN,
            reserved: 0,
        }
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&self.player_offset.to_le_bytes());
        out.extend_from_slice(&self.map_offset.to_le_bytes());
        out.extend_from_slice(&self.reserved.to_le_bytes());
    }
}

/// Encode a document into container bytes.
///
/// Performs no validation: call [`MapDocument::validate_for_save`] first.
/// Width and height are masked to one byte and the tile buffer is written
/// verbatim. An uninitialized grid is written as `0 x 0`.
#[must_use]
pub fn encode(document: &MapDocument) -> Vec<u8> {
    let header = ContainerHeader::v1();
    let grid = document.grid();
    let tiles = grid.tiles();

    let mut out = Vec::with_capacity(
        (header.map_offset + MAP_SECTION_PREFIX_LEN) as usize + tiles.len(),
    );
    header.write_to(&mut out);

    pad_to(&mut out, header.player_offset);
    for field in document.spawn().to_wire() {
        out.extend_from_slice(&field.to_le_bytes());
    }

    pad_to(&mut out, header.map_offset);
    out.push(dimension_byte(grid.width()));
    out.push(dimension_byte(grid.height()));
    out.extend_from_slice(tiles);

    trace!(bytes = out.len(), "encoded map container");
    out
}

/// Decode container bytes into a fresh, clean document.
///
/// All-or-nothing: any malformation yields an error and no document.
pub fn decode(bytes: &[u8]) -> Result<MapDocument, FormatError> {
    let header = read_header(bytes)?;
    if header.version != FORMAT_VERSION {
        debug!(
            version = header.version,
            expected = FORMAT_VERSION,
            "container version differs, reading as v1"
        );
    }

    let mut reader = SectionReader::new(bytes);

    reader.seek_to(Section::PlayerData, header.player_offset)?;
    let mut raw = [0i32; 4];
    for field in &mut raw {
        *field = i32::from_le_bytes(reader.read_array(Section::PlayerData)?);
    }

    reader.seek_to(Section::MapData, header.map_offset)?;
    let [width, height] = reader.read_array::<2>(Section::MapData)?;
    let tile_count = usize::from(width) * usize::from(height);
    let tiles: Vec<TileId> = reader.read_vec(Section::MapData, tile_count)?;

    trace!(width, height, "decoded map container");
    Ok(MapDocument::from_parts(
        MapGrid::from_raw_parts(u32::from(width), u32::from(height), tiles),
        PlayerSpawn::from_wire(raw),
    ))
}

/// Read and check the header.
///
/// The magic is checked before anything else is parsed.
pub fn read_header(bytes: &[u8]) -> Result<ContainerHeader, FormatError> {
    let mut magic = [0u8; 4];
    let available = bytes.len().min(magic.len());
    magic[..available].copy_from_slice(&bytes[..available]);
    if magic != MAGIC {
        return Err(FormatError::BadMagic { found: magic });
    }

    let mut reader = SectionReader::new(bytes);
    reader.seek_to(Section::Header, MAGIC.len() as u32)?;
    let mut words = [0u32; 4];
    for word in &mut words {
        *word = u32::from_le_bytes(reader.read_array(Section::Header)?);
    }
    let [version, player_offset, map_offset, reserved] = words;

    Ok(ContainerHeader {
        version,
        player_offset,
        map_offset,
        reserved,
    })
}

fn dimension_byte(value: Option<u32>) -> u8 {
    value.map_or(0, |v| (v & 0xFF) as u8)
}

fn pad_to(out: &mut Vec<u8>, offset: u32) {
    let offset = offset as usize;
    if out.len() < offset {
        out.resize(offset, 0);
    }
}

/// Bounds-checked reader over a container buffer.
struct SectionReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> SectionReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    fn len(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    fn seek_to(&mut self, section: Section, offset: u32) -> Result<(), FormatError> {
        let len = self.len();
        if u64::from(offset) > len {
            return Err(FormatError::OffsetOutOfRange {
                section,
                offset,
                len,
            });
        }
        self.cursor
            .seek(SeekFrom::Start(u64::from(offset)))
            .map_err(|_| FormatError::OffsetOutOfRange {
                section,
                offset,
                len,
            })?;
        Ok(())
    }

    fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.cursor.position())
    }

    fn ensure_available(&self, section: Section, needed: usize) -> Result<(), FormatError> {
        if needed as u64 > self.remaining() {
            return Err(FormatError::Truncated {
                section,
                offset: self.cursor.position(),
                needed: needed as u64,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self, section: Section) -> Result<[u8; N], FormatError> {
        self.ensure_available(section, N)?;
        let mut buf = [0u8; N];
        self.cursor
            .read_exact(&mut buf)
            .map_err(|_| FormatError::Truncated {
                section,
                offset: self.cursor.position(),
                needed: N as u64,
                available: 0,
            })?;
        Ok(buf)
    }

    fn read_vec(&mut self, section: Section, count: usize) -> Result<Vec<u8>, FormatError> {
        self.ensure_available(section, count)?;
        let mut buf = vec![0u8; count];
        self.cursor
            .read_exact(&mut buf)
            .map_err(|_| FormatError::Truncated {
                section,
                offset: self.cursor.position(),
                needed: count as u64,
                available: 0,
            })?;
        Ok(buf)
    }
}
