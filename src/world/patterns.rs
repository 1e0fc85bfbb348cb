//! Built-in procedural textures, so a session can start without any asset
//! files on disk.

use super::level::SPRITE_TEXTURE_BASE;
use super::texture::{Texture, TextureBank, TextureError, TextureId};
use crate::renderer::Rgba;

pub const FLOOR_TEXTURE: TextureId = 16;
pub const CEILING_TEXTURE: TextureId = 17;

/// Background of the built-in sprites; matches `Config::default().transparent_key`.
pub const KEY: Rgba = 0xFF_FF00FF;

const EDGE: usize = 64;

/// Cheap integer hash used as per-texel noise.
#[inline]
fn noise(x: usize, y: usize, seed: u32) -> u32 {
    let mut h = (x as u32).wrapping_mul(374_761_393)
        ^ (y as u32).wrapping_mul(668_265_263)
        ^ seed.wrapping_mul(2_246_822_519);
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^ (h >> 16)
}

#[inline]
fn rgb(r: u32, g: u32, b: u32) -> Rgba {
    0xFF00_0000 | (r.min(255) << 16) | (g.min(255) << 8) | b.min(255)
}

/// Jitter every channel of a base colour by up to `amp`.
fn grain(base: (u32, u32, u32), x: usize, y: usize, seed: u32, amp: u32) -> Rgba {
    let n = noise(x, y, seed) % (amp + 1);
    rgb(base.0 + n, base.1 + n, base.2 + n)
}

fn bricks(x: usize, y: usize) -> Rgba {
    let row = y / 16;
    let shift = if row % 2 == 0 { 0 } else { 16 };
    let mortar = y % 16 == 0 || (x + shift) % 32 == 0;
    if mortar {
        rgb(150, 150, 140)
    } else {
        grain((150, 50, 35), x, y, 1, 30)
    }
}

fn stone(x: usize, y: usize) -> Rgba {
    let block = (x / 32 + y / 32) % 2 == 0;
    let base = if block { (100, 100, 105) } else { (85, 85, 95) };
    if x % 32 == 0 || y % 32 == 0 {
        rgb(40, 40, 45)
    } else {
        grain(base, x, y, 2, 25)
    }
}

fn wood(x: usize, y: usize) -> Rgba {
    let plank = x / 16;
    if x % 16 == 0 {
        return rgb(60, 35, 15);
    }
    let ring = ((y + plank * 11) % 12) as u32;
    grain((120 + ring * 3, 75 + ring * 2, 35), x, y, 3, 12)
}

fn metal(x: usize, y: usize) -> Rgba {
    let rivet = (x % 16 == 4 || x % 16 == 11) && (y % 32 == 4 || y % 32 == 27);
    if rivet {
        rgb(220, 220, 230)
    } else if y % 32 == 0 {
        rgb(50, 60, 70)
    } else {
        grain((90, 110, 130), x, y, 4, 20)
    }
}

fn floor_tiles(x: usize, y: usize) -> Rgba {
    if (x / 8 + y / 8) % 2 == 0 {
        grain((110, 105, 90), x, y, 5, 10)
    } else {
        grain((70, 65, 55), x, y, 6, 10)
    }
}

fn ceiling(x: usize, y: usize) -> Rgba {
    if x % 32 == 0 || y % 32 == 0 {
        rgb(30, 30, 30)
    } else {
        grain((60, 60, 70), x, y, 7, 8)
    }
}

/// Round barrel with a transparent surround.
fn barrel(x: usize, y: usize) -> Rgba {
    let dx = x as i32 - 32;
    if !(8..=63).contains(&y) || dx.abs() > 18 {
        return KEY;
    }
    if y % 16 == 8 {
        rgb(40, 40, 40)
    } else {
        let lit = 140 - (dx.unsigned_abs() * 4);
        rgb(lit / 2, lit, lit / 3)
    }
}

/// Tall pillar with a lamp on top.
fn pillar(x: usize, y: usize) -> Rgba {
    let dx = (x as i32 - 32).unsigned_abs();
    if y < 12 {
        let dy = (y as i32 - 6).unsigned_abs();
        if dx * dx + dy * dy <= 36 {
            return rgb(255, 230, 120);
        }
        return KEY;
    }
    if dx > 6 {
        return KEY;
    }
    rgb(90 + dx * 10, 90 + dx * 10, 100)
}

/// Small plant in a pot.
fn plant(x: usize, y: usize) -> Rgba {
    let dx = (x as i32 - 32).unsigned_abs();
    if y >= 48 {
        return if dx <= 10 { rgb(150, 80, 40) } else { KEY };
    }
    if y >= 20 && dx as usize <= (y - 20) / 2 + 2 && noise(x, y, 8) % 4 != 0 {
        return rgb(30, 120 + (noise(x, y, 9) % 60), 40);
    }
    KEY
}

impl TextureBank {
    /// Bank with the built-in wall (1–4), floor, ceiling and sprite
    /// (`SPRITE_TEXTURE_BASE`..+3) textures.
    pub fn procedural() -> Result<Self, TextureError> {
        let mut bank = Self::new();
        let walls: [(&str, fn(usize, usize) -> Rgba); 4] = [
            ("BRICK", bricks),
            ("STONE", stone),
            ("WOOD", wood),
            ("METAL", metal),
        ];
        for (i, (name, f)) in walls.into_iter().enumerate() {
            bank.insert(i as TextureId + 1, name, Texture::from_fn(EDGE, EDGE, f)?)?;
        }

        bank.insert(FLOOR_TEXTURE, "FLOOR", Texture::from_fn(EDGE, EDGE, floor_tiles)?)?;
        bank.insert(CEILING_TEXTURE, "CEILING", Texture::from_fn(EDGE, EDGE, ceiling)?)?;

        let sprites: [(&str, fn(usize, usize) -> Rgba); 3] =
            [("BARREL", barrel), ("PILLAR", pillar), ("PLANT", plant)];
        for (i, (name, f)) in sprites.into_iter().enumerate() {
            bank.insert(
                SPRITE_TEXTURE_BASE + i as TextureId,
                name,
                Texture::from_fn(EDGE, EDGE, f)?,
            )?;
        }

        log::debug!("built {} procedural textures", bank.len());
        Ok(bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::same_rgb;

    #[test]
    fn procedural_bank_has_everything_the_demo_needs() {
        let bank = TextureBank::procedural().unwrap();
        for id in 1..=4 {
            assert!(bank.contains(id), "wall texture {id}");
        }
        assert!(bank.contains(FLOOR_TEXTURE));
        assert!(bank.contains(CEILING_TEXTURE));
        for i in 0..3 {
            assert!(bank.contains(SPRITE_TEXTURE_BASE + i));
        }
        assert_eq!(bank.id("BARREL"), Some(SPRITE_TEXTURE_BASE));
    }

    #[test]
    fn sprites_have_keyed_and_opaque_texels() {
        let bank = TextureBank::procedural().unwrap();
        let tex = bank.texture(SPRITE_TEXTURE_BASE).unwrap();
        assert!(same_rgb(tex.sample(0, 0), KEY));
        assert!(!same_rgb(tex.sample(32, 40), KEY));
    }

    #[test]
    fn walls_are_opaque() {
        let bank = TextureBank::procedural().unwrap();
        let tex = bank.texture(1).unwrap();
        for y in 0..64 {
            for x in 0..64 {
                assert!(!same_rgb(tex.sample(x, y), KEY));
            }
        }
    }
}
