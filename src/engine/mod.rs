mod depth;
#[allow(clippy::module_inception)]
mod engine;
pub mod planes;
pub mod sprites;
pub mod trig;
mod types;
pub mod walls;

pub use depth::DepthBuffer;

pub use engine::{Engine, EngineError, Scene, render_frame};

pub use trig::{AngleUnit, Angles, TrigTables};

pub use types::{HitAxis, OpenRows, TexStep, View, WallHit, WallSlice};
