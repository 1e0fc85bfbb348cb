use bitflags::bitflags;

bitflags! {
    /// Keys held during one frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u16 {
        const FORWARD      = 1 << 0;
        const BACK         = 1 << 1;
        const TURN_LEFT    = 1 << 2;
        const TURN_RIGHT   = 1 << 3;
        const STRAFE_LEFT  = 1 << 4;
        const STRAFE_RIGHT = 1 << 5;
        const LOOK_UP      = 1 << 6;
        const LOOK_DOWN    = 1 << 7;
        const RISE         = 1 << 8;
        const CROUCH       = 1 << 9;
        const RUN          = 1 << 10;
    }
}

impl Buttons {
    /// `+1`, `-1` or `0` depending on which of the two opposing keys is held.
    #[inline]
    pub fn axis(self, pos: Buttons, neg: Buttons) -> f32 {
        match (self.contains(pos), self.contains(neg)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// One frame of player input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub buttons: Buttons,
    pub frame_seconds: f32, // time since the previous frame
}

impl InputCmd {
    pub fn new(buttons: Buttons, frame_seconds: f32) -> Self {
        Self {
            buttons,
            frame_seconds,
        }
    }

    /// Nothing held.
    pub fn idle(frame_seconds: f32) -> Self {
        Self::new(Buttons::empty(), frame_seconds)
    }
}
