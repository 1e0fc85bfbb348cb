use crate::{
    config::Config,
    engine::trig::{AngleUnit, TrigTables},
    world::{Camera, TextureId, TileId},
};

/// Per-frame constants shared by every casting pass.
#[derive(Clone, Copy)]
pub struct View<'a> {
    pub cfg: &'a Config,
    pub trig: &'a TrigTables,
    pub camera: &'a Camera,
    pub width: usize,
    pub height: usize,
    pub half_w: f32,
    pub proj: f32,    // distance eye → projection plane, pixels
    pub horizon: i32, // screen row of the horizon
}

impl<'a> View<'a> {
    pub fn new(cfg: &'a Config, trig: &'a TrigTables, camera: &'a Camera) -> Self {
        Self {
            cfg,
            trig,
            camera,
            width: cfg.screen_width,
            height: cfg.screen_height,
            half_w: cfg.screen_width as f32 * 0.5,
            proj: cfg.projection_distance(),
            horizon: camera.horizon(cfg.screen_height),
        }
    }

    /// Ray angle for screen column `col`.
    #[inline(always)]
    pub fn cast_angle(&self, col: usize) -> AngleUnit {
        let a = self.trig.angles;
        a.wrap(self.camera.angle as i64 - a.a30 as i64 + col as i64)
    }
}

/// Which family of grid lines a ray stopped on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitAxis {
    /// A line of constant y (north/south wall face).
    Horizontal,
    /// A line of constant x (east/west wall face).
    Vertical,
}

/// First wall a ray ran into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    /// Along the ray, map units (not fisheye corrected).
    pub distance: f32,
    pub axis: HitAxis,
    pub tile: TileId,
    /// Position across the wall face, `0..tile_size`, left to right as seen.
    pub offset: f32,
}

/// One column's wall, ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSlice {
    /// Perpendicular distance (fisheye corrected).
    pub distance: f32,
    /// First row covered, may be off-screen.
    pub top: i32,
    /// One past the last row covered, may be off-screen.
    pub bottom: i32,
    pub texture: TextureId,
    /// Texture column, already scaled to the texture width.
    pub tex_x: i32,
    pub shade: f32,
}

impl WallSlice {
    #[inline(always)]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Rows of one column that no wall covers: `0..ceil_end` is ceiling,
/// `floor_start..height` is floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenRows {
    pub ceil_end: i32,
    pub floor_start: i32,
}

/// 16.16 fixed-point texel stepper: maps `span` screen pixels onto `texels`
/// texels without a division per pixel. Samples are taken at pixel centres.
#[derive(Clone, Copy, Debug)]
pub struct TexStep {
    acc: i64,
    step: i64,
}

impl TexStep {
    /// Start `skip` pixels into the span.
    #[inline]
    pub fn new(texels: usize, span: i32, skip: i32) -> Self {
        let step = ((texels as i64) << 16) / span.max(1) as i64;
        Self {
            acc: step * skip.max(0) as i64 + step / 2,
            step,
        }
    }

    #[inline(always)]
    pub fn texel(&self) -> i32 {
        (self.acc >> 16) as i32
    }

    #[inline(always)]
    pub fn advance(&mut self) {
        self.acc += self.step;
    }
}
