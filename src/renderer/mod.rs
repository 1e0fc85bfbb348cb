//! Pixel output abstraction.
//!
//! *The casting passes never touch a pixel buffer's memory layout.*
//! Everything they draw goes through [`PixelSink::put_pixel`], so a window
//! back-end, an off-screen image or a test probe can sit behind the same
//! passes.
//!
//! * [`software::FrameBuffer`] is the plain in-memory sink used by the demo.
//! * [`shade`] implements the one-axis brightness heuristic shared by walls,
//!   floors and ceilings.

/// Pixel format of the frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// The sole write primitive the renderer relies on.
pub trait PixelSink {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Write `colour` at (`x`, `y`). Callers stay inside
    /// `0..width() × 0..height()`.
    fn put_pixel(&mut self, x: usize, y: usize, colour: Rgba);
}

/// Scale the RGB channels of `colour` by `brightness` (clamped to 0‥1).
/// Alpha is kept.
#[inline]
pub fn shade(colour: Rgba, brightness: f32) -> Rgba {
    if brightness >= 1.0 {
        return colour;
    }
    // 8.8 fixed-point factor; 256 = full brightness
    let k = (brightness.max(0.0) * 256.0) as u32;
    let r = (((colour >> 16) & 0xFF) * k) >> 8;
    let g = (((colour >> 8) & 0xFF) * k) >> 8;
    let b = ((colour & 0xFF) * k) >> 8;
    (colour & 0xFF00_0000) | (r << 16) | (g << 8) | b
}

/// Colour-key comparison, ignoring alpha.
#[inline(always)]
pub fn same_rgb(a: Rgba, b: Rgba) -> bool {
    (a ^ b) & 0x00FF_FFFF == 0
}

pub mod software;

pub use software::FrameBuffer;
