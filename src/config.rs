//! Session parameters.
//!
//! Everything the renderer and the movement code need to know that is *not*
//! part of the map: resolution, world scale, shading constants and speeds.
//! The field of view is not configurable on its own – it is always one angle
//! unit per screen column (60°), so it follows `screen_width`.

use crate::renderer::Rgba;

/// Things that make a [`Config`] unusable.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("screen width must be a positive even number, got {0}")]
    BadWidth(usize),

    #[error("screen height must be positive")]
    BadHeight,

    #[error("tile size must be a power of two, got {0}")]
    TileSize(i32),

    #[error("wall height must be positive, got {0}")]
    WallHeight(i32),

    #[error("eye height {eye} outside 0..{wall}")]
    EyeHeight { eye: i32, wall: i32 },

    #[error("wall margin {margin} must be positive and below half a tile ({tile})")]
    WallMargin { margin: f32, tile: i32 },
}

#[derive(Clone, Debug)]
pub struct Config {
    /* frame-buffer */
    pub screen_width: usize,
    pub screen_height: usize,

    /* world scale (map units) */
    pub tile_size: i32,
    pub wall_height: i32,
    pub eye_height: i32,
    /// Lowest eye height allowed; the highest is `wall_height - eye_min`.
    pub eye_min: i32,

    /* fake lighting */
    pub horizontal_brightness: f32,
    pub vertical_brightness: f32,
    pub floor_brightness: f32,
    pub ceiling_brightness: f32,

    /* movement, all per second */
    pub move_speed: f32,   // map-units
    pub turn_speed: f32,   // degrees
    pub pitch_speed: f32,  // screen rows
    pub eye_speed: f32,    // map-units
    pub run_factor: f32,

    /// Closest the camera may get to a wall face.
    pub wall_margin: f32,

    /// Sprite texels of this RGB value are not drawn.
    pub transparent_key: Rgba,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 400,
            tile_size: 64,
            wall_height: 64,
            eye_height: 32,
            eye_min: 8,
            horizontal_brightness: 1.0,
            vertical_brightness: 0.75,
            floor_brightness: 160.0,
            ceiling_brightness: 120.0,
            move_speed: 192.0,
            turn_speed: 120.0,
            pitch_speed: 200.0,
            eye_speed: 48.0,
            run_factor: 2.0,
            wall_margin: 20.0,
            transparent_key: 0x00_FF00FF,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_width % 2 != 0 {
            return Err(ConfigError::BadWidth(self.screen_width));
        }
        if self.screen_height == 0 {
            return Err(ConfigError::BadHeight);
        }
        if self.tile_size <= 0 || (self.tile_size & (self.tile_size - 1)) != 0 {
            return Err(ConfigError::TileSize(self.tile_size));
        }
        if self.wall_height <= 0 {
            return Err(ConfigError::WallHeight(self.wall_height));
        }
        if self.eye_height <= 0 || self.eye_height >= self.wall_height {
            return Err(ConfigError::EyeHeight {
                eye: self.eye_height,
                wall: self.wall_height,
            });
        }
        if self.wall_margin <= 0.0 || self.wall_margin >= self.tile_size as f32 * 0.5 {
            return Err(ConfigError::WallMargin {
                margin: self.wall_margin,
                tile: self.tile_size,
            });
        }
        Ok(())
    }

    /// Distance from the eye to the projection plane, in pixels.
    ///
    /// ```text
    /// proj = (w / 2) / tan(30°)
    /// ```
    #[inline]
    pub fn projection_distance(&self) -> f32 {
        (self.screen_width as f32 * 0.5) / 30_f32.to_radians().tan()
    }

    /// Allowed pitch range: half the screen either way.
    #[inline]
    pub fn pitch_limit(&self) -> i32 {
        (self.screen_height as i32) >> 1
    }
}
