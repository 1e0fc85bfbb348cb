use glam::{IVec2, Mat2, Vec2};

use crate::engine::trig::{AngleUnit, TrigTables};

/// Player view-point in world space.
///
/// * `pos` is in map units (one tile = `tile_size` units), +y = screen-down.
/// * `angle` is an integer [`AngleUnit`]; see `engine::trig`.
/// * `eye_height` is measured from the floor, `pitch` shifts the horizon row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub angle: AngleUnit,
    pub eye_height: i32,
    pub pitch: i32,
    /* sub-unit remainders not yet applied to the integer fields */
    turn_carry: f32,
    pitch_carry: f32,
    eye_carry: f32,
}

/// Add `delta` to `carry` and take out the whole part.
#[inline]
fn take_whole(carry: &mut f32, delta: f32) -> i64 {
    let total = *carry + delta;
    let whole = total.trunc();
    *carry = total - whole;
    whole as i64
}

impl Camera {
    pub fn new(pos: Vec2, angle: AngleUnit, eye_height: i32) -> Self {
        Self {
            pos,
            angle,
            eye_height,
            pitch: 0,
            turn_carry: 0.0,
            pitch_carry: 0.0,
            eye_carry: 0.0,
        }
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(&self, trig: &TrigTables) -> Vec2 {
        trig.direction(self.angle)
    }

    /// Unit vector pointing to the camera's right (towards higher columns).
    #[inline(always)]
    pub fn right(&self, trig: &TrigTables) -> Vec2 {
        // forward rotated +90° in a y-down frame: (x, y) -> (-y, x)
        self.forward(trig).perp()
    }

    /// Camera plane: `right · tan(FOV/2)`, so `forward ± plane` are the
    /// edges of the field of view.
    #[inline]
    pub fn plane(&self, trig: &TrigTables) -> Vec2 {
        self.right(trig) * 30_f32.to_radians().tan()
    }

    /// Transform a world point into camera space via the inverse of the
    /// `[plane | forward]` basis:
    ///  .x = lateral offset in plane units (±1 at the FOV edges per unit depth)
    ///  .y = depth along the forward axis, in map units
    #[inline]
    pub fn to_cam(&self, trig: &TrigTables, p: Vec2) -> Vec2 {
        let basis = Mat2::from_cols(self.plane(trig), self.forward(trig));
        basis.inverse() * (p - self.pos)
    }

    /// Screen row of the horizon for a screen `height` rows tall.
    #[inline(always)]
    pub fn horizon(&self, height: usize) -> i32 {
        (height as i32 >> 1) + self.pitch
    }

    /// Map cell currently containing the camera.
    #[inline]
    pub fn cell(&self, tile_size: i32) -> IVec2 {
        (self.pos / tile_size as f32).floor().as_ivec2()
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Rotate by `delta` angle units (positive = turn right). Fractions of
    /// a unit accumulate until they add up to a whole one.
    pub fn turn(&mut self, trig: &TrigTables, delta: f32) {
        let whole = take_whole(&mut self.turn_carry, delta);
        self.angle = trig.angles.wrap(self.angle as i64 + whole);
    }

    /// Shift the horizon by `rows` (positive = look up), clamped to
    /// `-limit..=limit`.
    pub fn look(&mut self, rows: f32, limit: i32) {
        let whole = take_whole(&mut self.pitch_carry, rows);
        let pitch = (self.pitch as i64 + whole).clamp(-limit as i64, limit as i64);
        if pitch != self.pitch as i64 + whole {
            self.pitch_carry = 0.0;
        }
        self.pitch = pitch as i32;
    }

    /// Raise the eye by `units`, clamped to `lo..=hi`.
    pub fn raise(&mut self, units: f32, lo: i32, hi: i32) {
        let whole = take_whole(&mut self.eye_carry, units);
        let eye = (self.eye_height as i64 + whole).clamp(lo as i64, hi as i64);
        if eye != self.eye_height as i64 + whole {
            self.eye_carry = 0.0;
        }
        self.eye_height = eye as i32;
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
