use glam::IVec2;

/// Wall type stored in a map cell; `0` = empty/walkable, anything else is
/// both "solid" and the id of the wall texture.
pub type TileId = u8;

pub const EMPTY: TileId = 0;

/// Problems found while building a map.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no cells")]
    Empty,

    #[error("map is {width}×{height} but {got} ids were supplied")]
    Size { width: usize, height: usize, got: usize },

    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },

    #[error("unknown glyph `{glyph}` at ({x}, {y})")]
    Glyph { glyph: char, x: usize, y: usize },

    #[error("border cell ({x}, {y}) is empty; the map must be closed")]
    OpenBorder { x: usize, y: usize },

    #[error("more than one player start")]
    TwoStarts,
}

/// Immutable 2-D grid of wall ids (row-major, `y` grows downwards).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    cells: Vec<TileId>,
}

impl TileMap {
    /// Build a closed map from row-major `ids`.
    pub fn new(width: usize, height: usize, ids: Vec<TileId>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        if ids.len() != width * height {
            return Err(MapError::Size {
                width,
                height,
                got: ids.len(),
            });
        }
        let map = Self {
            width,
            height,
            cells: ids,
        };
        map.check_border()?;
        Ok(map)
    }

    fn check_border(&self) -> Result<(), MapError> {
        for y in 0..self.height {
            for x in 0..self.width {
                let edge = x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height;
                if edge && self.cells[y * self.width + x] == EMPTY {
                    return Err(MapError::OpenBorder { x, y });
                }
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (`x`, `y`), or `None` outside the grid.
    #[inline(always)]
    pub fn get(&self, x: i32, y: i32) -> Option<TileId> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    #[inline]
    pub fn cell(&self, c: IVec2) -> Option<TileId> {
        self.get(c.x, c.y)
    }

    /// True for walls *and* for anything outside the grid.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(|id| id != EMPTY)
    }

    /// Every distinct non-empty id, ascending.
    pub fn wall_ids(&self) -> Vec<TileId> {
        let mut seen = [false; 256];
        for &id in &self.cells {
            seen[id as usize] = true;
        }
        (1..=255u8).filter(|&id| seen[id as usize]).collect()
    }
}
