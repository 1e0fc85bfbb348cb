//! ---------------------------------------------------------------------------
//! In-memory frame-buffer
//!
//! * Row-major `Vec<u32>` in **0xAARRGGBB** format, exactly what
//!   `minifb::Window::update_with_buffer` wants.
//! * `begin_frame` clears, `end_frame` loans the finished pixels out.
//! ---------------------------------------------------------------------------

use crate::renderer::{PixelSink, Rgba};

/// Colour every frame starts from.
pub const CLEAR_COLOUR: Rgba = 0xFF_000000;

pub struct FrameBuffer {
    pixels: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![CLEAR_COLOUR; width * height],
            width,
            height,
        }
    }

    /// (Re)allocate for the requested resolution and clear.
    pub fn begin_frame(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.pixels.resize(w * h, CLEAR_COLOUR);
        }
        self.pixels.fill(CLEAR_COLOUR);
    }

    /// Finish the frame and **loan** the buffer to `submit`.
    pub fn end_frame<F>(&self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.pixels, self.width, self.height);
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Read back one pixel (out-of-range → `None`).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }
}

impl PixelSink for FrameBuffer {
    #[inline(always)]
    fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn put_pixel(&mut self, x: usize, y: usize, colour: Rgba) {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x] = colour;
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
