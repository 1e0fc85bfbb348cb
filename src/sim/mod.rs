mod collision;
mod components;
mod movement;

pub use collision::clip_move;
pub use components::{Buttons, InputCmd};
pub use movement::{MAX_FRAME_SECONDS, MovementController};
