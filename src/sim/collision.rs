//! Axis-separated wall clipping on the tile grid.
//!
//! A move is cut into pieces no longer than the wall margin so that no piece
//! can skip over a margin band. Each piece is then resolved one axis at a
//! time: x against the current row, y against the resulting column. Because
//! the axes are independent, a blocked axis does not stop the other one and
//! the camera slides along walls.

use glam::Vec2;

use crate::world::TileMap;

/* ─────────────────────────────  ONE AXIS  ───────────────────────────── */

/// Resolve `d` along one axis.
///
/// `along` is the coordinate being moved, `solid(cell)` tells whether the
/// cell with that index on the moving axis (the other axis held fixed) is
/// solid.
#[inline]
fn clip_axis(along: f32, d: f32, tile: f32, margin: f32, solid: impl Fn(i32) -> bool) -> f32 {
    if d == 0.0 {
        return along;
    }

    let next = along + d;
    let cell = (next / tile).floor() as i32;
    if solid(cell) {
        // walked straight into a wall: stay put on this axis
        return along;
    }

    let offset = next - cell as f32 * tile;
    if d > 0.0 && solid(cell + 1) && offset > tile - margin {
        return (cell + 1) as f32 * tile - margin;
    }
    if d < 0.0 && solid(cell - 1) && offset < margin {
        return cell as f32 * tile + margin;
    }
    next
}

/* ─────────────────────────────  FULL MOVE  ──────────────────────────── */

/// Move `pos` by `delta`, keeping `margin` map units away from wall faces.
pub fn clip_move(map: &TileMap, tile: f32, margin: f32, pos: Vec2, delta: Vec2) -> Vec2 {
    if delta == Vec2::ZERO || !delta.is_finite() {
        return pos;
    }

    let longest = delta.x.abs().max(delta.y.abs());
    let pieces = (longest / margin).ceil().max(1.0) as u32;
    let step = delta / pieces as f32;

    let mut p = pos;
    for _ in 0..pieces {
        let row = (p.y / tile).floor() as i32;
        p.x = clip_axis(p.x, step.x, tile, margin, |cx| map.is_solid(cx, row));

        let col = (p.x / tile).floor() as i32;
        p.y = clip_axis(p.y, step.y, tile, margin, |cy| map.is_solid(col, cy));
    }
    p
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    const T: f32 = 64.0;
    const M: f32 = 20.0;

    /// 6×6 room: walls on the border only.
    fn room() -> TileMap {
        let (w, h) = (6, 6);
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

    #[test]
    fn zero_delta_is_identity() {
        let map = room();
        let p = Vec2::new(100.3, 200.7);
        assert_eq!(clip_move(&map, T, M, p, Vec2::ZERO), p);
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let map = room();
        let p = Vec2::new(150.0, 150.0);
        for d in [Vec2::new(f32::NAN, 0.0), Vec2::new(0.0, f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)] {
            assert_eq!(clip_move(&map, T, M, p, d), p);
        }
    }

    #[test]
    fn free_move_is_exact() {
        let map = room();
        let p = Vec2::new(150.0, 150.0);
        let q = clip_move(&map, T, M, p, Vec2::new(30.0, -10.0));
        assert!((q - Vec2::new(180.0, 140.0)).length() < 1e-4);
    }

    #[test]
    fn stops_at_margin_from_east_wall() {
        let map = room();
        // east wall face is x = 5 · 64 = 320
        let q = clip_move(&map, T, M, Vec2::new(250.0, 150.0), Vec2::new(500.0, 0.0));
        assert_eq!(q.x, 320.0 - M);
        assert_eq!(q.y, 150.0);
    }

    #[test]
    fn stops_at_margin_from_north_wall() {
        let map = room();
        // north wall face is y = 64
        let q = clip_move(&map, T, M, Vec2::new(150.0, 150.0), Vec2::new(0.0, -500.0));
        assert_eq!(q.y, 64.0 + M);
    }

    #[test]
    fn slides_along_wall() {
        let map = room();
        let q = clip_move(&map, T, M, Vec2::new(150.0, 250.0), Vec2::new(40.0, 100.0));
        // y is blocked by the south wall (face at 320), x keeps moving
        assert_eq!(q.y, 320.0 - M);
        assert!((q.x - 190.0).abs() < 1e-3);
    }

    #[test]
    fn pillar_is_never_entered() {
        // 7×7 room with a pillar in the middle
        let (w, h) = (7, 7);
        let mut ids = vec![0; w * h];
        for y in 0..h {
            for x in 0..w {
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 || (x == 3 && y == 3) {
                    ids[y * w + x] = 1;
                }
            }
        }
        let map = TileMap::new(w, h, ids).unwrap();

        let mut p = Vec2::new(100.0, 224.0);
        for _ in 0..50 {
            p = clip_move(&map, T, M, p, Vec2::new(13.0, 0.0));
            assert!(!map.is_solid((p.x / T).floor() as i32, (p.y / T).floor() as i32));
        }
        // held at the pillar's west face
        assert_eq!(p.x, 192.0 - M);
    }
}
