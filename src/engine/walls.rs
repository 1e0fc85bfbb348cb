//! Grid DDA wall casting.
//!
//! Every column casts one ray. Two candidates walk the grid independently:
//! one stops only on horizontal grid lines (constant y), the other only on
//! vertical ones (constant x). Each advances a whole tile per step using the
//! precomputed step tables, so the inner loop is two additions and a map
//! lookup. The nearer candidate is the wall.

use glam::Vec2;

use crate::{
    engine::{
        depth::DepthBuffer,
        trig::{AngleUnit, TrigTables},
        types::{HitAxis, TexStep, View, WallHit, WallSlice},
    },
    renderer::{PixelSink, shade},
    world::{EMPTY, Texture, TextureBank, TextureId, TileMap},
};

/// Perpendicular distances are never allowed below this (camera pressed
/// against a face would otherwise divide by ~0).
const MIN_DISTANCE: f32 = 1.0e-3;

/*──────────────────────── ray traversal ─────────────────────────────*/

/// Walk the horizontal grid lines from `pos` along `a`.
///
/// `None` when the ray is parallel to them or leaves the map first.
pub fn horizontal_hit(map: &TileMap, trig: &TrigTables, pos: Vec2, a: AngleUnit) -> Option<WallHit> {
    let ang = trig.angles;
    if a == 0 || a == ang.a180 {
        return None;
    }

    let t = trig.tile_size();
    let up = ang.facing_up(a);

    // first line crossed, and the row bias that picks the cell beyond it
    let (mut y, dy, bias) = if up {
        ((pos.y / t).floor() * t, -t, -1)
    } else {
        ((pos.y / t).floor() * t + t, t, 0)
    };
    let mut x = pos.x + (y - pos.y) * trig.itan(a);
    let dx = trig.x_step(a);

    loop {
        let cx = (x / t).floor() as i32;
        let cy = (y / t).round() as i32 + bias;
        match map.get(cx, cy)? {
            EMPTY => {
                x += dx;
                y += dy;
            }
            tile => {
                let along = x - cx as f32 * t;
                return Some(WallHit {
                    distance: (y - pos.y) * trig.isin(a),
                    axis: HitAxis::Horizontal,
                    tile,
                    // looking south the face runs east → west across the screen
                    offset: if up { along } else { t - along },
                });
            }
        }
    }
}

/// Walk the vertical grid lines from `pos` along `a`.
pub fn vertical_hit(map: &TileMap, trig: &TrigTables, pos: Vec2, a: AngleUnit) -> Option<WallHit> {
    let ang = trig.angles;
    if a == ang.a90 || a == ang.a270 {
        return None;
    }

    let t = trig.tile_size();
    let left = ang.facing_left(a);

    let (mut x, dx, bias) = if left {
        ((pos.x / t).floor() * t, -t, -1)
    } else {
        ((pos.x / t).floor() * t + t, t, 0)
    };
    let mut y = pos.y + (x - pos.x) * trig.tan(a);
    let dy = trig.y_step(a);

    loop {
        let cx = (x / t).round() as i32 + bias;
        let cy = (y / t).floor() as i32;
        match map.get(cx, cy)? {
            EMPTY => {
                x += dx;
                y += dy;
            }
            tile => {
                let along = y - cy as f32 * t;
                return Some(WallHit {
                    distance: (x - pos.x) * trig.icos(a),
                    axis: HitAxis::Vertical,
                    tile,
                    // looking west the face runs south → north across the screen
                    offset: if left { t - along } else { along },
                });
            }
        }
    }
}

/// Nearest wall along `a`, if any.
pub fn cast_ray(map: &TileMap, trig: &TrigTables, pos: Vec2, a: AngleUnit) -> Option<WallHit> {
    let h = horizontal_hit(map, trig, pos, a);
    let v = vertical_hit(map, trig, pos, a);
    match (h, v) {
        (Some(h), Some(v)) => Some(if h.distance <= v.distance { h } else { v }),
        (h, v) => h.or(v),
    }
}

/*──────────────────────── projection ────────────────────────────────*/

/// Turn a hit in column `col` into screen rows and texture coordinates.
pub fn project(view: &View, col: usize, hit: &WallHit, tex_w: usize) -> WallSlice {
    let cfg = view.cfg;
    let distance = (hit.distance / view.trig.fisheye(col)).max(MIN_DISTANCE);
    let scale = view.proj / distance;

    let bottom = view.horizon as f32 + view.camera.eye_height as f32 * scale;
    let top = bottom - cfg.wall_height as f32 * scale;

    let t = view.trig.tile_size();
    let tex_x = ((hit.offset / t) * tex_w as f32) as i32;

    WallSlice {
        distance,
        top: top.floor() as i32,
        bottom: bottom.floor() as i32,
        texture: TextureId::from(hit.tile),
        tex_x: tex_x.clamp(0, tex_w as i32 - 1),
        shade: match hit.axis {
            HitAxis::Horizontal => cfg.horizontal_brightness,
            HitAxis::Vertical => cfg.vertical_brightness,
        },
    }
}

/*──────────────────────── rasterising ───────────────────────────────*/

/// Draw the visible part of `slice` into column `col`.
pub fn draw_slice<S: PixelSink + ?Sized>(sink: &mut S, col: usize, slice: &WallSlice, tex: &Texture) {
    let h = sink.height() as i32;
    let y0 = slice.top.max(0);
    let y1 = slice.bottom.min(h);
    if y0 >= y1 {
        return;
    }

    let mut v = TexStep::new(tex.height(), slice.height(), y0 - slice.top);
    for y in y0..y1 {
        let texel = tex.sample(slice.tex_x, v.texel());
        sink.put_pixel(col, y as usize, shade(texel, slice.shade));
        v.advance();
    }
}

/// Cast column `col`, record its depth and return the slice to draw.
pub fn cast_column<'t>(
    view: &View,
    map: &TileMap,
    textures: &'t TextureBank,
    depth: &mut DepthBuffer,
    col: usize,
) -> Option<(WallSlice, &'t Texture)> {
    let cast = view.cast_angle(col);
    let hit = cast_ray(map, view.trig, view.camera.pos, cast);

    let Some(hit) = hit else {
        depth.set(col, None);
        return None;
    };

    let tex = textures.texture(TextureId::from(hit.tile)).ok();
    let slice = project(view, col, &hit, tex.map_or(1, Texture::width));
    depth.set(col, Some(slice.distance));
    tex.map(|t| (slice, t))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, renderer::FrameBuffer, world::Camera};

    const T: f32 = 64.0;

    fn trig() -> TrigTables {
        TrigTables::new(320, 64)
    }

    fn cfg() -> Config {
        Config {
            screen_width: 320,
            screen_height: 200,
            ..Config::default()
        }
    }

    /// `w × h` ring of walls (id 1) with an empty interior.
    fn room(w: usize, h: usize) -> TileMap {
        let mut ids = vec![0; w * h];
        for y in 0..h {
            for x in 0..w {
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    ids[y * w + x] = 1;
                }
            }
        }
        TileMap::new(w, h, ids).unwrap()
    }

    fn centre(cx: usize, cy: usize) -> Vec2 {
        Vec2::new((cx as f32 + 0.5) * T, (cy as f32 + 0.5) * T)
    }

    #[test]
    fn corridor_distance_matches_geometry() {
        // 10×3: corridor along x at row 1
        let map = room(10, 3);
        let t = trig();
        for start_x in [70.0, 100.0, 250.5, 400.0] {
            let pos = Vec2::new(start_x, 96.0);
            let east = cast_ray(&map, &t, pos, 0).unwrap();
            assert!((east.distance - (576.0 - start_x)).abs() < 1e-2, "{start_x}");
            assert_eq!(east.axis, HitAxis::Vertical);

            let west = cast_ray(&map, &t, pos, t.angles.a180).unwrap();
            assert!((west.distance - (start_x - 64.0)).abs() < 1e-2);
        }
    }

    #[test]
    fn cardinal_distances_in_single_cell_room() {
        let map = room(3, 3);
        let t = trig();
        let a = t.angles;
        let pos = centre(1, 1);
        for ang in [0, a.a90, a.a180, a.a270] {
            let hit = cast_ray(&map, &t, pos, ang).unwrap();
            assert!((hit.distance - T * 0.5).abs() < 1e-2, "angle {ang}: {hit:?}");
        }
    }

    #[test]
    fn axis_aligned_rays_skip_parallel_test() {
        let map = room(5, 5);
        let t = trig();
        let a = t.angles;
        let pos = centre(2, 2);
        assert!(horizontal_hit(&map, &t, pos, 0).is_none());
        assert!(horizontal_hit(&map, &t, pos, a.a180).is_none());
        assert!(vertical_hit(&map, &t, pos, a.a90).is_none());
        assert!(vertical_hit(&map, &t, pos, a.a270).is_none());
        assert_eq!(cast_ray(&map, &t, pos, a.a90).unwrap().axis, HitAxis::Horizontal);
    }

    #[test]
    fn diagonal_ray_hits_nearest_face() {
        let map = room(5, 5);
        let t = trig();
        // south-east at 45° from the centre of (2,2): walls at x=256, y=256
        let pos = centre(2, 2);
        let hit = cast_ray(&map, &t, pos, t.angles.a90 / 2).unwrap();
        let expect = (256.0 - 160.0) * std::f32::consts::SQRT_2;
        assert!((hit.distance - expect).abs() < 0.5);
    }

    #[test]
    fn leaving_the_map_is_no_hit() {
        // a map whose ring is id 0 inside bounds cannot be built, so use a
        // position outside the grid instead
        let map = room(3, 3);
        let t = trig();
        let pos = Vec2::new(-500.0, -500.0);
        assert!(cast_ray(&map, &t, pos, t.angles.a180).is_none());
    }

    #[test]
    fn offset_runs_left_to_right_on_screen() {
        let map = room(5, 5);
        let t = trig();
        let a = t.angles;
        let pos = centre(2, 2);
        // looking north, a ray slightly right of centre hits further east
        let l = horizontal_hit(&map, &t, pos, a.a270 - 10).unwrap();
        let r = horizontal_hit(&map, &t, pos, a.a270 + 10).unwrap();
        assert!(r.offset > l.offset);
        // looking south the same holds
        let l = horizontal_hit(&map, &t, pos, a.a90 - 10).unwrap();
        let r = horizontal_hit(&map, &t, pos, a.a90 + 10).unwrap();
        assert!(r.offset > l.offset);
        // east and west
        let l = vertical_hit(&map, &t, pos, a.a360 - 10).unwrap();
        let r = vertical_hit(&map, &t, pos, 10).unwrap();
        assert!(r.offset > l.offset);
        let l = vertical_hit(&map, &t, pos, a.a180 - 10).unwrap();
        let r = vertical_hit(&map, &t, pos, a.a180 + 10).unwrap();
        assert!(r.offset > l.offset);
    }

    #[test]
    fn equal_distance_gives_equal_slices() {
        let cfg = cfg();
        let t = trig();
        let cam = Camera::new(centre(2, 2), 0, 32);
        let view = View::new(&cfg, &t, &cam);
        let hit = WallHit {
            distance: 150.0,
            axis: HitAxis::Vertical,
            tile: 1,
            offset: 10.0,
        };
        // columns symmetric around the centre have the same fisheye factor
        let a = project(&view, 100, &hit, 64);
        let b = project(&view, 220, &hit, 64);
        assert_eq!(a.top, b.top);
        assert_eq!(a.bottom, b.bottom);
        assert_eq!(a.height(), b.height());

        let c = project(&view, 160, &hit, 64);
        let d = project(&view, 160, &hit, 64);
        assert_eq!(c, d);
        // eye at half wall height → slice centred on the horizon
        let mid = (c.top + c.bottom) / 2;
        assert!((mid - view.horizon).abs() <= 1);
    }

    #[test]
    fn fisheye_correction_shortens_side_columns() {
        let cfg = cfg();
        let t = trig();
        let cam = Camera::new(centre(2, 2), 0, 32);
        let view = View::new(&cfg, &t, &cam);
        let hit = WallHit {
            distance: 200.0,
            axis: HitAxis::Horizontal,
            tile: 1,
            offset: 0.0,
        };
        let edge = project(&view, 0, &hit, 64);
        let mid = project(&view, 160, &hit, 64);
        assert!((mid.distance - 200.0).abs() < 1e-3);
        assert!((edge.distance - 200.0 * 30_f32.to_radians().cos()).abs() < 1e-2);
    }

    #[test]
    fn vertical_faces_are_darker() {
        let cfg = cfg();
        let t = trig();
        let cam = Camera::new(centre(2, 2), 0, 32);
        let view = View::new(&cfg, &t, &cam);
        let mut hit = WallHit {
            distance: 100.0,
            axis: HitAxis::Horizontal,
            tile: 1,
            offset: 0.0,
        };
        let h = project(&view, 160, &hit, 64);
        hit.axis = HitAxis::Vertical;
        let v = project(&view, 160, &hit, 64);
        assert!(v.shade < h.shade);
    }

    #[test]
    fn draw_slice_clips_to_screen() {
        let mut fb = FrameBuffer::new(4, 10);
        let tex = Texture::from_fn(4, 4, |_, y| 0xFF_000000 | y as u32).unwrap();
        let slice = WallSlice {
            distance: 1.0,
            top: -10,
            bottom: 30,
            texture: 1,
            tex_x: 0,
            shade: 1.0,
        };
        draw_slice(&mut fb, 2, &slice, &tex);
        for y in 0..10 {
            // 40 rows over 4 texels → rows 10..19 map to texel 1
            let expect = 0xFF_000000 | ((y + 10) / 10) as u32;
            assert_eq!(fb.get(2, y), Some(expect));
        }
        assert_eq!(fb.get(1, 5), Some(crate::renderer::software::CLEAR_COLOUR));
    }

    #[test]
    fn cast_column_writes_depth() {
        let cfg = cfg();
        let t = trig();
        let map = room(3, 3);
        let bank = TextureBank::procedural().unwrap();
        let cam = Camera::new(centre(1, 1), 0, 32);
        let view = View::new(&cfg, &t, &cam);
        let mut depth = DepthBuffer::new(320);
        let (slice, _) = cast_column(&view, &map, &bank, &mut depth, 160).unwrap();
        assert!((slice.distance - 32.0).abs() < 1e-2);
        assert_eq!(depth.get(160), Some(slice.distance));
    }
}
