//! Column-major tile grid.
//!
//! The engine walks maps column by column while casting rays, so tiles are
//! stored with the vertical axis fastest: cell `(x, y)` lives at
//! `y + height * x`. The container codec relies on the same ordering.

/// Index into the texture catalog. `0` is empty space.
pub type TileId = u8;

/// Tile value meaning "nothing here".
pub const EMPTY_TILE: TileId = 0;

/// Largest width or height the container can hold.
pub const MAX_MAP_SIZE: u32 = 255;

/// Tile grid with its dimensions.
///
/// A default grid is uninitialized: it has no dimensions and no tiles.
/// Size limits are not enforced here; a grid may exceed [`MAX_MAP_SIZE`]
/// while being edited and is only rejected when saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapGrid {
    /// `(width, height)` once initialized.
    size: Option<(u32, u32)>,
    /// Tile data stored in column-major order.
    tiles: Vec<TileId>,
}

impl MapGrid {
    /// Create a `width` x `height` grid filled with [`EMPTY_TILE`].
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let cell_count = (width as usize) * (height as usize);
        Self {
            size: Some((width, height)),
            tiles: vec![EMPTY_TILE; cell_count],
        }
    }

    /// Assemble a grid from already column-major tile data.
    ///
    /// The tile count is not checked against the dimensions; a mismatch is
    /// reported by document validation instead.
    #[must_use]
    pub fn from_raw_parts(width: u32, height: u32, tiles: Vec<TileId>) -> Self {
        Self {
            size: Some((width, height)),
            tiles,
        }
    }

    /// Grid width in tiles, `None` while uninitialized.
    #[must_use]
    pub fn width(&self) -> Option<u32> {
        self.size.map(|(width, _)| width)
    }

    /// Grid height in tiles, `None` while uninitialized.
    #[must_use]
    pub fn height(&self) -> Option<u32> {
        self.size.map(|(_, height)| height)
    }

    /// Whether the grid has dimensions.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.size.is_some()
    }

    /// Number of tiles the dimensions call for.
    #[must_use]
    pub fn expected_len(&self) -> Option<usize> {
        self.size
            .map(|(width, height)| (width as usize) * (height as usize))
    }

    /// Raw column-major tile buffer.
    #[must_use]
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    /// Check if coordinates are within grid bounds.
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        match self.size {
            Some((width, height)) => {
                x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
            }
            None => false,
        }
    }

    /// Buffer index of `(x, y)`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let height = self.height()? as usize;
        Some(y as usize + height * x as usize)
    }

    /// Tile at coordinates.
    /// Returns `None` if out of bounds or the grid is uninitialized.
    #[must_use]
    pub fn get_tile(&self, x: i32, y: i32) -> Option<TileId> {
        self.index_of(x, y)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Overwrite the tile at coordinates.
    /// Returns `false` (and writes nothing) if out of bounds.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileId) -> bool {
        let Some(index) = self.index_of(x, y) else {
            return false;
        };
        match self.tiles.get_mut(index) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    /// All tiles of column `x`, top to bottom.
    #[must_use]
    pub fn column(&self, x: i32) -> Option<&[TileId]> {
        let start = self.index_of(x, 0)?;
        let height = self.height()? as usize;
        self.tiles.get(start..start + height)
    }

    /// Number of cells holding something other than [`EMPTY_TILE`].
    #[must_use]
    pub fn count_non_empty(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile != EMPTY_TILE).count()
    }
}
