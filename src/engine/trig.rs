//! Precomputed trigonometry over integer angle units.
//!
//! A full turn is `6 × screen width` units so that the 60° field of view is
//! exactly one unit per screen column. Units grow clockwise on screen:
//! `0` looks along +x (east), `a90` along +y (south, screen-down).
//!
//! The tables are built once per session from the screen width and owned
//! by the engine; nothing here is global.

use std::f64::consts::PI;

/// Integer angle in `0..Angles::a360`.
pub type AngleUnit = usize;

/// Added to every table angle so that exact 0/90/180/270° never produce an
/// infinite tangent or reciprocal.
const EPSILON_RAD: f64 = 1e-4;

/// The named fractions of a full turn for one screen width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Angles {
    pub a5: AngleUnit,
    pub a30: AngleUnit,
    pub a60: AngleUnit,
    pub a90: AngleUnit,
    pub a180: AngleUnit,
    pub a270: AngleUnit,
    pub a360: AngleUnit,
}

impl Angles {
    /// `screen_width` must be even (checked by `Config::validate`).
    pub fn for_width(screen_width: usize) -> Self {
        let a60 = screen_width;
        let a30 = a60 / 2;
        let a90 = a30 * 3;
        let a180 = a90 * 2;
        Self {
            a5: a30 / 6,
            a30,
            a60,
            a90,
            a180,
            a270: a90 * 3,
            a360: a180 * 2,
        }
    }

    /// Fold any signed unit count into `0..a360`.
    #[inline(always)]
    pub fn wrap(&self, a: i64) -> AngleUnit {
        a.rem_euclid(self.a360 as i64) as AngleUnit
    }

    /// Angle units per degree.
    #[inline]
    pub fn per_degree(&self) -> f32 {
        self.a360 as f32 / 360.0
    }

    /// Angle units per radian; one unit is one screen column.
    #[inline]
    pub fn per_radian(&self) -> f32 {
        self.a180 as f32 / std::f32::consts::PI
    }

    #[inline]
    pub fn to_radians(&self, a: f64) -> f64 {
        a * PI / (self.a60 as f64 * 3.0)
    }

    /// Ray travels towards −x.
    #[inline(always)]
    pub fn facing_left(&self, a: AngleUnit) -> bool {
        a > self.a90 && a < self.a270
    }

    /// Ray travels towards −y (screen-up).
    #[inline(always)]
    pub fn facing_up(&self, a: AngleUnit) -> bool {
        a > self.a180
    }
}

/// Per-angle lookup tables plus the per-column fisheye table.
pub struct TrigTables {
    pub angles: Angles,
    tile_size: f32,

    sin: Vec<f32>,
    isin: Vec<f32>,
    cos: Vec<f32>,
    icos: Vec<f32>,
    tan: Vec<f32>,
    itan: Vec<f32>,

    /// x advance per horizontal grid line crossed.
    x_step: Vec<f32>,
    /// y advance per vertical grid line crossed.
    y_step: Vec<f32>,

    /// `1/cos` of each column's angle relative to the view direction.
    fisheye: Vec<f32>,
}

impl TrigTables {
    pub fn new(screen_width: usize, tile_size: i32) -> Self {
        let angles = Angles::for_width(screen_width);
        let n = angles.a360;
        let tile = tile_size as f64;

        let mut t = Self {
            angles,
            tile_size: tile_size as f32,
            sin: Vec::with_capacity(n),
            isin: Vec::with_capacity(n),
            cos: Vec::with_capacity(n),
            icos: Vec::with_capacity(n),
            tan: Vec::with_capacity(n),
            itan: Vec::with_capacity(n),
            x_step: Vec::with_capacity(n),
            y_step: Vec::with_capacity(n),
            fisheye: Vec::with_capacity(angles.a60 + 1),
        };

        for i in 0..n {
            let rad = angles.to_radians(i as f64) + EPSILON_RAD;
            let (s, c) = rad.sin_cos();
            let tn = s / c;

            t.sin.push(s as f32);
            t.isin.push((1.0 / s) as f32);
            t.cos.push(c as f32);
            t.icos.push((1.0 / c) as f32);
            t.tan.push(tn as f32);
            t.itan.push((1.0 / tn) as f32);

            let xs = (tile / tn).abs();
            t.x_step.push((if angles.facing_left(i) { -xs } else { xs }) as f32);

            let ys = (tile * tn).abs();
            t.y_step.push((if angles.facing_up(i) { -ys } else { ys }) as f32);
        }

        for col in 0..=angles.a60 {
            let rel = col as f64 - angles.a30 as f64;
            t.fisheye.push((1.0 / angles.to_radians(rel).cos()) as f32);
        }

        log::debug!(
            "trig tables: {} angles, {} fisheye columns",
            n,
            t.fisheye.len()
        );
        t
    }

    #[inline(always)]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline(always)]
    pub fn sin(&self, a: AngleUnit) -> f32 {
        self.sin[a]
    }
    #[inline(always)]
    pub fn isin(&self, a: AngleUnit) -> f32 {
        self.isin[a]
    }
    #[inline(always)]
    pub fn cos(&self, a: AngleUnit) -> f32 {
        self.cos[a]
    }
    #[inline(always)]
    pub fn icos(&self, a: AngleUnit) -> f32 {
        self.icos[a]
    }
    #[inline(always)]
    pub fn tan(&self, a: AngleUnit) -> f32 {
        self.tan[a]
    }
    #[inline(always)]
    pub fn itan(&self, a: AngleUnit) -> f32 {
        self.itan[a]
    }
    #[inline(always)]
    pub fn x_step(&self, a: AngleUnit) -> f32 {
        self.x_step[a]
    }
    #[inline(always)]
    pub fn y_step(&self, a: AngleUnit) -> f32 {
        self.y_step[a]
    }

    /// Fisheye factor for screen column `col` (`0..=a60`).
    #[inline(always)]
    pub fn fisheye(&self, col: usize) -> f32 {
        self.fisheye[col]
    }

    /// Unit vector along angle `a`, +y = screen-down.
    #[inline]
    pub fn direction(&self, a: AngleUnit) -> glam::Vec2 {
        glam::Vec2::new(self.cos[a], self.sin[a])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> TrigTables {
        TrigTables::new(320, 64)
    }

    #[test]
    fn angle_fractions_are_exact() {
        let a = Angles::for_width(320);
        assert_eq!(a.a60, 320);
        assert_eq!(a.a30, 160);
        assert_eq!(a.a90, 480);
        assert_eq!(a.a180, 960);
        assert_eq!(a.a270, 1440);
        assert_eq!(a.a360, 1920);
        assert_eq!(a.a5, 26);
    }

    #[test]
    fn wrap_folds_negative_and_overflow() {
        let a = Angles::for_width(320);
        assert_eq!(a.wrap(-1), 1919);
        assert_eq!(a.wrap(1920), 0);
        assert_eq!(a.wrap(1920 * 3 + 7), 7);
    }

    #[test]
    fn fisheye_centre_is_one() {
        let t = tables();
        assert!((t.fisheye(t.angles.a30) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn fisheye_is_symmetric_and_grows_outwards() {
        let t = tables();
        let a30 = t.angles.a30;
        for d in 1..=a30 {
            let l = t.fisheye(a30 - d);
            let r = t.fisheye(a30 + d);
            assert!((l - r).abs() < 1e-5);
            assert!(l > t.fisheye(a30 - d + 1) - 1e-6);
        }
        // edge of a 60° FOV: 1/cos(30°)
        assert!((t.fisheye(0) - 1.0 / 30_f32.to_radians().cos()).abs() < 1e-4);
    }

    #[test]
    fn cardinal_tables_are_finite() {
        let t = tables();
        let a = t.angles;
        for ang in [0, a.a90, a.a180, a.a270] {
            assert!(t.tan(ang).is_finite());
            assert!(t.itan(ang).is_finite());
            assert!(t.isin(ang).is_finite());
            assert!(t.icos(ang).is_finite());
        }
        assert!((t.cos(0) - 1.0).abs() < 1e-6);
        assert!((t.sin(a.a90) - 1.0).abs() < 1e-6);
        assert!((t.cos(a.a180) + 1.0).abs() < 1e-6);
        assert!((t.sin(a.a270) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn step_signs_follow_quadrant() {
        let t = tables();
        let a = t.angles;
        let q = a.a90 / 2; // 45° into each quadrant
        // south-east: right & down
        assert!(t.x_step(q) > 0.0 && t.y_step(q) > 0.0);
        // south-west: left & down
        assert!(t.x_step(a.a90 + q) < 0.0 && t.y_step(a.a90 + q) > 0.0);
        // north-west: left & up
        assert!(t.x_step(a.a180 + q) < 0.0 && t.y_step(a.a180 + q) < 0.0);
        // north-east: right & up
        assert!(t.x_step(a.a270 + q) > 0.0 && t.y_step(a.a270 + q) < 0.0);
    }

    #[test]
    fn diagonal_steps_are_one_tile() {
        let t = tables();
        let q = t.angles.a90 / 2;
        assert!((t.x_step(q).abs() - 64.0).abs() < 0.05);
        assert!((t.y_step(q).abs() - 64.0).abs() < 0.05);
    }

    #[test]
    fn per_radian_inverts_to_radians() {
        let a = tables().angles;
        let back = a.to_radians(a.a30 as f64) as f32 * a.per_radian();
        assert!((back - a.a30 as f32).abs() < 1e-3);
    }

    #[test]
    fn direction_is_unit() {
        let t = tables();
        for a in (0..t.angles.a360).step_by(37) {
            assert!((t.direction(a).length() - 1.0).abs() < 1e-5);
        }
    }
}
