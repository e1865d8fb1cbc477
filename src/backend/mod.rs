//! Graphics/windowing backend seam.
//!
//! Everything that touches the platform goes through [`Backend`]: image
//! decoding, text rasterization, texture upload, drawing, presenting and input
//! polling. The engine core only ever sees [`RawPixels`], opaque
//! [`Backend::Handle`]s and [`InputFrame`]s.
//!
//! - [`window::RaylibBackend`] opens a real window through raylib.
//! - [`headless::HeadlessBackend`] keeps everything in memory and records draw
//!   calls; it backs the tests and `--headless` runs.
//!
//! The backend must be created before the first texture is loaded and must be
//! dropped after the last texture handle is released.

pub mod headless;
pub mod window;

use std::path::Path;

use raylib::prelude::{Color, Vector2};

use crate::components::sprite::Rect;
use crate::components::transform::Flip;
use crate::error::DrawError;
use crate::events::input::InputFrame;

/// Decoded image, row-major, one [`Color`] per pixel.
#[derive(Debug, Clone)]
pub struct RawPixels {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl RawPixels {
    /// Image of `width x height` filled with `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels.get(index).copied()
    }

    /// Tightly packed RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect()
    }
}

/// One fully resolved textured quad.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    /// Source rectangle in texture pixels.
    pub src: Rect,
    /// Destination rectangle on the surface, before rotation.
    pub dest: Rect,
    /// Clockwise rotation in degrees around `pivot`.
    pub angle_deg: f64,
    /// Rotation pivot relative to the destination's top-left corner.
    pub pivot: Vector2,
    pub flip: Flip,
    /// Color and alpha modulation.
    pub tint: Color,
}

/// Services the engine needs from the platform.
pub trait Backend {
    /// Native texture handle. Dropping it releases the backend texture.
    type Handle;

    fn decode_image(&mut self, path: &Path) -> Result<RawPixels, String>;

    fn rasterize_text(&mut self, text: &str, size: i32, color: Color)
    -> Result<RawPixels, String>;

    fn upload(&mut self, pixels: &RawPixels) -> Result<Self::Handle, String>;

    /// Start a frame and clear the surface.
    fn begin_frame(&mut self, clear: Color);

    fn draw(&mut self, handle: &Self::Handle, call: &DrawCall) -> Result<(), DrawError>;

    /// Finish the frame. Blocks on vsync when the backend has it enabled.
    fn present(&mut self);

    /// Drain all input observed since the previous call.
    fn poll_input(&mut self) -> InputFrame;

    /// Monotonic milliseconds since the backend was created.
    fn ticks_ms(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_pixels() {
        let img = RawPixels::filled(3, 2, Color::new(1, 2, 3, 4));
        assert_eq!(img.pixels.len(), 6);
        let px = img.pixel(2, 1).unwrap();
        assert_eq!((px.r, px.g, px.b, px.a), (1, 2, 3, 4));
        assert!(img.pixel(3, 0).is_none());
        assert!(img.pixel(0, 2).is_none());
    }

    #[test]
    fn test_to_rgba8_is_packed_row_major() {
        let mut img = RawPixels::filled(2, 1, Color::new(0, 0, 0, 255));
        img.pixels[1] = Color::new(9, 8, 7, 6);
        assert_eq!(img.to_rgba8(), vec![0, 0, 0, 255, 9, 8, 7, 6]);
    }
}
