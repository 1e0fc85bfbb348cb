//! Grid ray-casting renderer.
//!
//! A camera on a tile map casts one ray per screen column. The result is
//! textured walls, floor and ceiling, plus depth-tested billboard sprites,
//! written through a [`renderer::PixelSink`]. [`engine::Engine`] owns a
//! session and [`sim::MovementController`] turns held keys into camera
//! motion with wall sliding.

pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;

pub use config::{Config, ConfigError};
pub use engine::{Engine, EngineError, Scene};
pub use renderer::{FrameBuffer, PixelSink, Rgba};
pub use sim::{Buttons, InputCmd};
pub use world::{Camera, Level, Sprite, Texture, TextureBank, TileMap};
