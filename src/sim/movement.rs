//! Per-frame camera update.
//!
//! `read_input → compute_delta → collide → apply`, once per frame. Nothing
//! here looks at the wall clock: all rates are scaled by the frame time the
//! caller reports in [`InputCmd`].

use glam::Vec2;

use super::{
    collision::clip_move,
    components::{Buttons, InputCmd},
};
use crate::{
    config::Config,
    engine::trig::{Angles, TrigTables},
    world::{Camera, TileMap},
};

/// Longest frame time acted on; a stall moves the camera this far at most.
pub const MAX_FRAME_SECONDS: f32 = 0.25;

/// What the held keys ask for, each axis in `-1..=1`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Intent {
    forward: f32,
    strafe: f32, // +1 = right
    turn: f32,   // +1 = clockwise (right)
    look: f32,   // +1 = up
    rise: f32,
    speed: f32, // 1, or the run factor
}

/// Requested change for one frame, before collision.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Delta {
    shift: Vec2, // map units
    turn: f32,   // angle units
    pitch: f32,  // screen rows
    eye: f32,    // map units
}

pub struct MovementController {
    move_speed: f32,
    turn_rate: f32, // angle units per second
    pitch_speed: f32,
    eye_speed: f32,
    run_factor: f32,

    tile: f32,
    margin: f32,
    pitch_limit: i32,
    eye_lo: i32,
    eye_hi: i32,
}

impl MovementController {
    pub fn new(cfg: &Config, angles: &Angles) -> Self {
        Self {
            move_speed: cfg.move_speed,
            turn_rate: cfg.turn_speed * angles.per_degree(),
            pitch_speed: cfg.pitch_speed,
            eye_speed: cfg.eye_speed,
            run_factor: cfg.run_factor,
            tile: cfg.tile_size as f32,
            margin: cfg.wall_margin,
            pitch_limit: cfg.pitch_limit(),
            eye_lo: cfg.eye_min,
            eye_hi: cfg.wall_height - cfg.eye_min,
        }
    }

    /// Advance `cam` by one frame of `cmd`.
    pub fn update(&self, cam: &mut Camera, map: &TileMap, trig: &TrigTables, cmd: &InputCmd) {
        let intent = self.read_input(cmd);
        let delta = self.compute_delta(&intent, cam, trig, cmd.frame_seconds);
        let pos = self.collide(map, cam.pos, delta.shift);
        self.apply(cam, trig, pos, &delta);
    }

    /* ----------------------------------------------------------------- */

    fn read_input(&self, cmd: &InputCmd) -> Intent {
        let b = cmd.buttons;
        Intent {
            forward: b.axis(Buttons::FORWARD, Buttons::BACK),
            strafe: b.axis(Buttons::STRAFE_RIGHT, Buttons::STRAFE_LEFT),
            turn: b.axis(Buttons::TURN_RIGHT, Buttons::TURN_LEFT),
            look: b.axis(Buttons::LOOK_UP, Buttons::LOOK_DOWN),
            rise: b.axis(Buttons::RISE, Buttons::CROUCH),
            speed: if b.contains(Buttons::RUN) {
                self.run_factor
            } else {
                1.0
            },
        }
    }

    fn compute_delta(&self, i: &Intent, cam: &Camera, trig: &TrigTables, dt: f32) -> Delta {
        // negative or NaN frame times move nothing, long ones are capped
        let dt = if dt > 0.0 { dt.min(MAX_FRAME_SECONDS) } else { 0.0 };
        let step = self.move_speed * i.speed * dt;

        let mut shift = Vec2::ZERO;
        if i.forward != 0.0 {
            shift += cam.forward(trig) * (i.forward * step);
        }
        if i.strafe != 0.0 {
            shift += cam.right(trig) * (i.strafe * step);
        }

        Delta {
            shift,
            turn: i.turn * self.turn_rate * i.speed * dt,
            pitch: i.look * self.pitch_speed * dt,
            eye: i.rise * self.eye_speed * dt,
        }
    }

    fn collide(&self, map: &TileMap, pos: Vec2, shift: Vec2) -> Vec2 {
        clip_move(map, self.tile, self.margin, pos, shift)
    }

    fn apply(&self, cam: &mut Camera, trig: &TrigTables, pos: Vec2, d: &Delta) {
        cam.pos = pos;
        if d.turn != 0.0 {
            cam.turn(trig, d.turn);
        }
        if d.pitch != 0.0 {
            cam.look(d.pitch, self.pitch_limit);
        }
        if d.eye != 0.0 {
            cam.raise(d.eye, self.eye_lo, self.eye_hi);
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config {
            screen_width: 320,
            screen_height: 200,
            ..Config::default()
        }
    }

    /// 8×8 room, border walls only.
    fn room() -> TileMap {
        let (w, h) = (8, 8);
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

    fn setup() -> (Config, TrigTables, MovementController, TileMap) {
        let cfg = cfg();
        let trig = TrigTables::new(cfg.screen_width, cfg.tile_size);
        let mc = MovementController::new(&cfg, &trig.angles);
        (cfg, trig, mc, room())
    }

    #[test]
    fn idle_input_changes_nothing() {
        let (_, trig, mc, map) = setup();
        for i in 0..40 {
            let pos = Vec2::new(70.0 + i as f32 * 9.3, 90.0 + i as f32 * 7.1);
            let mut cam = Camera::new(pos, (i * 47) % trig.angles.a360, 32);
            cam.pitch = i as i32 - 20;
            let before = cam;
            mc.update(&mut cam, &map, &trig, &InputCmd::idle(0.016));
            assert_eq!(cam, before);
        }
    }

    #[test]
    fn forward_moves_along_view() {
        let (_, trig, mc, map) = setup();
        let mut cam = Camera::new(Vec2::new(200.0, 200.0), 0, 32);
        mc.update(&mut cam, &map, &trig, &InputCmd::new(Buttons::FORWARD, 0.1));
        // 192 units/s · 0.1 s east
        assert!((cam.pos.x - 219.2).abs() < 1e-2);
        assert!((cam.pos.y - 200.0).abs() < 1e-2);
    }

    #[test]
    fn run_doubles_speed() {
        let (_, trig, mc, map) = setup();
        let mut cam = Camera::new(Vec2::new(200.0, 200.0), 0, 32);
        let cmd = InputCmd::new(Buttons::FORWARD | Buttons::RUN, 0.1);
        mc.update(&mut cam, &map, &trig, &cmd);
        assert!((cam.pos.x - 238.4).abs() < 1e-2);
    }

    #[test]
    fn strafe_right_of_east_is_south() {
        let (_, trig, mc, map) = setup();
        let mut cam = Camera::new(Vec2::new(200.0, 200.0), 0, 32);
        mc.update(&mut cam, &map, &trig, &InputCmd::new(Buttons::STRAFE_RIGHT, 0.1));
        assert!(cam.pos.y > 215.0);
    }

    #[test]
    fn walls_keep_their_margin() {
        let (cfg, trig, mc, map) = setup();
        let t = cfg.tile_size as f32;
        let m = cfg.wall_margin;
        let a = trig.angles;
        // run at every wall from the room centre for a long while
        for heading in (0..a.a360).step_by(97) {
            let mut cam = Camera::new(Vec2::new(256.0, 256.0), heading, 32);
            for _ in 0..200 {
                mc.update(&mut cam, &map, &trig, &InputCmd::new(Buttons::FORWARD | Buttons::RUN, 0.05));
                let p = cam.pos;
                assert!(p.x >= t + m - 1e-3 && p.x <= 7.0 * t - m + 1e-3, "{p}");
                assert!(p.y >= t + m - 1e-3 && p.y <= 7.0 * t - m + 1e-3, "{p}");
            }
        }
    }

    #[test]
    fn turning_accumulates() {
        let (cfg, trig, mc, map) = setup();
        let mut cam = Camera::new(Vec2::new(200.0, 200.0), 0, 32);
        // 120°/s for half a second → 60° = a60 units
        for _ in 0..50 {
            mc.update(&mut cam, &map, &trig, &InputCmd::new(Buttons::TURN_RIGHT, 0.01));
        }
        let expect = trig.angles.a60 as i64;
        assert!((cam.angle as i64 - expect).abs() <= 1, "{}", cam.angle);
        assert_eq!(cfg.turn_speed, 120.0);

        for _ in 0..100 {
            mc.update(&mut cam, &map, &trig, &InputCmd::new(Buttons::TURN_LEFT, 0.01));
        }
        // wrapped past zero
        let back = trig.angles.a360 as i64 - expect;
        assert!((cam.angle as i64 - back).abs() <= 2, "{}", cam.angle);
    }

    #[test]
    fn pitch_and_eye_are_clamped() {
        let (cfg, trig, mc, map) = setup();
        let mut cam = Camera::new(Vec2::new(200.0, 200.0), 0, 32);
        let up = InputCmd::new(Buttons::LOOK_UP | Buttons::RISE, 0.1);
        for _ in 0..100 {
            mc.update(&mut cam, &map, &trig, &up);
        }
        assert_eq!(cam.pitch, cfg.pitch_limit());
        assert_eq!(cam.eye_height, cfg.wall_height - cfg.eye_min);

        let down = InputCmd::new(Buttons::LOOK_DOWN | Buttons::CROUCH, 0.1);
        for _ in 0..100 {
            mc.update(&mut cam, &map, &trig, &down);
        }
        assert_eq!(cam.pitch, -cfg.pitch_limit());
        assert_eq!(cam.eye_height, cfg.eye_min);
    }

    #[test]
    fn negative_or_nan_frame_time_is_ignored() {
        let (_, trig, mc, map) = setup();
        let mut cam = Camera::new(Vec2::new(200.0, 200.0), 0, 32);
        let before = cam;
        let held = Buttons::FORWARD | Buttons::TURN_RIGHT | Buttons::LOOK_UP | Buttons::RISE;
        for dt in [-1.0, f32::NAN, f32::NEG_INFINITY] {
            mc.update(&mut cam, &map, &trig, &InputCmd::new(held, dt));
            assert_eq!(cam, before, "dt {dt}");
        }
    }

    #[test]
    fn long_frames_are_capped() {
        let (_, trig, mc, map) = setup();
        let held = Buttons::FORWARD | Buttons::TURN_RIGHT;
        let mut capped = Camera::new(Vec2::new(100.0, 200.0), 0, 32);
        mc.update(&mut capped, &map, &trig, &InputCmd::new(held, MAX_FRAME_SECONDS));

        for dt in [1.0, 1e30, f32::INFINITY] {
            let mut cam = Camera::new(Vec2::new(100.0, 200.0), 0, 32);
            mc.update(&mut cam, &map, &trig, &InputCmd::new(held, dt));
            assert_eq!(cam, capped, "dt {dt}");
        }
        // 192 units/s · 0.25 s east
        assert!((capped.pos.x - 148.0).abs() < 1e-2);
    }
}
