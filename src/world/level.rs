//! Plain-text level format.
//!
//! ```text
//! 11111
//! 1@.A1     1-9  wall tile (texture id = digit)
//! 1.2.1     . 0  empty
//! 11111     @    player start, facing east
//!           A-Z  sprite at the cell centre, texture SPRITE_TEXTURE_BASE + n
//! ```

use std::path::Path;

use glam::Vec2;

use super::map::{EMPTY, MapError, TileId, TileMap};
use super::texture::TextureId;

/// Texture id of the sprite glyph `A`; `B` is one more, and so on.
pub const SPRITE_TEXTURE_BASE: TextureId = 32;

/// Billboard placed in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub pos: Vec2, // map units (cell units straight out of `Level::parse`)
    pub texture: TextureId,
}

/// Errors from [`Level::from_file`].
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Map(#[from] MapError),
}

/// Runtime snapshot of one level (immutable after load).
#[derive(Clone, Debug)]
pub struct Level {
    pub map: TileMap,
    pub sprites: Vec<Sprite>,
    /// Player start in *cell* coordinates (`None` → caller picks).
    pub start: Option<(usize, usize)>,
}

impl Level {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let level = Self::parse(&text)?;
        log::debug!(
            "loaded level {}: {}×{}, {} sprites",
            path.display(),
            level.map.width(),
            level.map.height(),
            level.sprites.len()
        );
        Ok(level)
    }

    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut rows: Vec<&str> = text.lines().map(str::trim_end).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }

        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut ids: Vec<TileId> = Vec::with_capacity(width * height);
        let mut sprites = Vec::new();
        let mut start = None;

        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(MapError::Ragged {
                    row: y,
                    len,
                    expected: width,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let id = match glyph {
                    '.' | '0' => EMPTY,
                    '1'..='9' => glyph as u8 - b'0',
                    '@' => {
                        if start.replace((x, y)).is_some() {
                            return Err(MapError::TwoStarts);
                        }
                        EMPTY
                    }
                    'A'..='Z' => {
                        sprites.push((x, y, SPRITE_TEXTURE_BASE + (glyph as u8 - b'A') as TextureId));
                        EMPTY
                    }
                    _ => return Err(MapError::Glyph { glyph, x, y }),
                };
                ids.push(id);
            }
        }

        let map = TileMap::new(width, height, ids)?;
        Ok(Self {
            map,
            sprites: sprites
                .into_iter()
                .map(|(x, y, texture)| Sprite {
                    pos: Vec2::new(x as f32 + 0.5, y as f32 + 0.5),
                    texture,
                })
                .collect(),
            start,
        })
    }

    /// Convert sprite positions from cell units to map units.
    ///
    /// `parse` stores positions in cells because it does not know the tile
    /// size; the engine calls this once when it takes ownership.
    pub fn scaled_sprites(&self, tile_size: i32) -> Vec<Sprite> {
        self.sprites
            .iter()
            .map(|s| Sprite {
                pos: s.pos * tile_size as f32,
                texture: s.texture,
            })
            .collect()
    }

    /// Every texture id the level needs: walls first, then sprites.
    pub fn texture_ids(&self) -> Vec<TextureId> {
        let mut ids: Vec<TextureId> = self
            .map
            .wall_ids()
            .into_iter()
            .map(TextureId::from)
            .collect();
        for s in &self.sprites {
            if !ids.contains(&s.texture) {
                ids.push(s.texture);
            }
        }
        ids
    }
}
