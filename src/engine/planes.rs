//! Floor and ceiling casting.
//!
//! Rows outside a column's wall slice are inverse-projected: by similar
//! triangles a floor row `r` below the horizon sees the floor at
//! `eye · proj / (r − horizon)` along the view axis. That distance is
//! stretched by the column's fisheye factor, walked along the column's ray,
//! and the texel under the resulting world point is drawn.

use crate::{
    engine::{
        trig::AngleUnit,
        types::{OpenRows, View, WallSlice},
    },
    renderer::{PixelSink, shade},
    world::{Texture, TileMap},
};

/// Which plane a row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane {
    Floor,
    Ceiling,
}

/// Rows of column left open by `slice` (`None` = nothing hit).
pub fn open_rows(view: &View, slice: Option<&WallSlice>) -> OpenRows {
    match slice {
        Some(s) => OpenRows {
            ceil_end: s.top,
            floor_start: s.bottom,
        },
        None => OpenRows {
            ceil_end: view.horizon,
            floor_start: view.horizon,
        },
    }
}

/// Texture and shade for screen row `row` of a column cast along `cast`.
///
/// `None` when the row is on the horizon, belongs to neither plane, or the
/// world point it sees lies outside the map.
pub fn sample_row(
    view: &View,
    map: &TileMap,
    col: usize,
    cast: AngleUnit,
    row: i32,
    plane: Plane,
    tex: &Texture,
) -> Option<u32> {
    let cfg = view.cfg;
    let (height_above, dy, brightness) = match plane {
        Plane::Floor => (
            view.camera.eye_height,
            row - view.horizon,
            cfg.floor_brightness,
        ),
        Plane::Ceiling => (
            cfg.wall_height - view.camera.eye_height,
            view.horizon - row,
            cfg.ceiling_brightness,
        ),
    };
    if dy <= 0 {
        return None;
    }

    let straight = height_above as f32 * view.proj / dy as f32;
    let distance = straight * view.trig.fisheye(col);

    let world = view.camera.pos + view.trig.direction(cast) * distance;
    let t = view.trig.tile_size();
    map.get((world.x / t).floor() as i32, (world.y / t).floor() as i32)?;

    let u = (world.x.rem_euclid(t) / t * tex.width() as f32) as i32;
    let v = (world.y.rem_euclid(t) / t * tex.height() as f32) as i32;
    let light = (brightness / distance).clamp(0.0, 1.0);
    Some(shade(tex.sample(u, v), light))
}

/// Fill the open floor and ceiling rows of column `col`.
#[allow(clippy::too_many_arguments)]
pub fn draw_column<S: PixelSink + ?Sized>(
    sink: &mut S,
    view: &View,
    map: &TileMap,
    col: usize,
    cast: AngleUnit,
    open: OpenRows,
    floor: &Texture,
    ceiling: &Texture,
) {
    let h = sink.height() as i32;

    // floor: strictly below the slice, strictly below the horizon
    let first = open.floor_start.max(view.horizon + 1).max(0);
    for row in first..h {
        if let Some(c) = sample_row(view, map, col, cast, row, Plane::Floor, floor) {
            sink.put_pixel(col, row as usize, c);
        }
    }

    // ceiling: strictly above the slice, strictly above the horizon
    let last = open.ceil_end.min(view.horizon).min(h);
    for row in 0..last {
        if let Some(c) = sample_row(view, map, col, cast, row, Plane::Ceiling, ceiling) {
            sink.put_pixel(col, row as usize, c);
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
