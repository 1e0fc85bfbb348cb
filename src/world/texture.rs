// Repository of decoded textures, addressed by `TextureId`.
// Map tiles, floors, ceilings and sprites all refer to textures by id only.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian as LE, ReadBytesExt};

use crate::renderer::Rgba;

/// Runtime handle for a texture in a bank.
///
/// Wall tile ids are used as texture ids directly, so `1..=9` are the wall
/// textures of a map.
pub type TextureId = u16;

/// Magic bytes at the start of a texture pack file.
pub const PACK_MAGIC: &[u8; 4] = b"TXPK";

/// Largest edge accepted from a pack (guards against absurd allocations).
const MAX_EDGE: u16 = 1024;

/// Immutable `w × h` grid of 0xAARRGGBB pixels, row-major.
///
/// Both edges are powers of two so [`Texture::sample`] can wrap by masking.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    w: usize,
    h: usize,
    pixels: Vec<Rgba>,
}

/// Things that can go wrong when building or using the bank.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Underlying I/O failure while reading a pack.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Pack does not start with `TXPK`.
    #[error("not a texture pack")]
    BadMagic,

    #[error("texture {w}×{h} must have power-of-two edges no larger than {MAX_EDGE}")]
    BadSize { w: usize, h: usize },

    #[error("texture has {got} pixels, expected {expected}")]
    PixelCount { got: usize, expected: usize },

    /// Attempted to insert a second texture with an existing id.
    #[error("texture id {0} already present in bank")]
    Duplicate(TextureId),

    /// Requested id has no texture.
    #[error("texture id {0} missing")]
    Missing(TextureId),
}

impl Texture {
    pub fn new(w: usize, h: usize, pixels: Vec<Rgba>) -> Result<Self, TextureError> {
        if w == 0 || h == 0 || !w.is_power_of_two() || !h.is_power_of_two() {
            return Err(TextureError::BadSize { w, h });
        }
        if w > MAX_EDGE as usize || h > MAX_EDGE as usize {
            return Err(TextureError::BadSize { w, h });
        }
        if pixels.len() != w * h {
            return Err(TextureError::PixelCount {
                got: pixels.len(),
                expected: w * h,
            });
        }
        Ok(Self { w, h, pixels })
    }

    /// Build a texture by evaluating `f(x, y)` for every texel.
    pub fn from_fn(
        w: usize,
        h: usize,
        f: impl Fn(usize, usize) -> Rgba,
    ) -> Result<Self, TextureError> {
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                pixels.push(f(x, y));
            }
        }
        Self::new(w, h, pixels)
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Texel at integer coordinates; both axes wrap.
    #[inline(always)]
    pub fn sample(&self, x: i32, y: i32) -> Rgba {
        let x = (x & (self.w as i32 - 1)) as usize;
        let y = (y & (self.h as i32 - 1)) as usize;
        self.pixels[y * self.w + x]
    }
}

/// Id-addressed cache of textures.
///
/// * Does **not** know how textures are produced – see [`TextureBank::load_pack`]
///   and [`TextureBank::procedural`].
/// * An id is either empty or holds exactly one texture for the bank's
///   lifetime.
#[derive(Default)]
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Option<Texture>>,
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    /// Read a texture pack from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let mut bank = Self::new();
        let mut rd = BufReader::new(File::open(path)?);
        bank.load_pack(&mut rd)?;
        Ok(bank)
    }

    /// Append every texture of a pack to this bank.
    ///
    /// Layout (little-endian):
    /// ```text
    /// "TXPK" u16 count
    /// count × { u16 id, u16 w, u16 h, w·h × u32 argb }
    /// ```
    pub fn load_pack<R: Read>(&mut self, rd: &mut R) -> Result<usize, TextureError> {
        let mut magic = [0u8; 4];
        rd.read_exact(&mut magic)?;
        if &magic != PACK_MAGIC {
            return Err(TextureError::BadMagic);
        }

        let count = rd.read_u16::<LE>()?;
        for _ in 0..count {
            let id = rd.read_u16::<LE>()?;
            let w = rd.read_u16::<LE>()?;
            let h = rd.read_u16::<LE>()?;
            if w > MAX_EDGE || h > MAX_EDGE {
                return Err(TextureError::BadSize {
                    w: w as usize,
                    h: h as usize,
                });
            }
            let mut pixels = vec![0; w as usize * h as usize];
            rd.read_u32_into::<LE>(&mut pixels)?;
            let tex = Texture::new(w as usize, h as usize, pixels)?;
            self.insert(id, format!("PACK{id}"), tex)?;
        }

        log::debug!("loaded {count} textures from pack");
        Ok(count as usize)
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored.
    pub fn len(&self) -> usize {
        self.data.iter().filter(|t| t.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Obtain the id for a texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, id: TextureId) -> bool {
        matches!(self.data.get(id as usize), Some(Some(_)))
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data
            .get(id as usize)
            .and_then(Option::as_ref)
            .ok_or(TextureError::Missing(id))
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Store `tex` under `id` and `name`. Fails if `id` is taken.
    pub fn insert<S: Into<String>>(
        &mut self,
        id: TextureId,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        if self.contains(id) {
            return Err(TextureError::Duplicate(id));
        }
        if self.data.len() <= id as usize {
            self.data.resize(id as usize + 1, None);
        }
        self.data[id as usize] = Some(tex);
        self.by_name.insert(name.into(), id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
