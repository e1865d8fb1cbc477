//! Texture resource.
//!
//! A [`Texture`] exclusively owns at most one backend handle. Every load
//! releases the current handle before anything else happens, so a failed
//! reload leaves the texture empty instead of holding the stale image.
//! Dropping the texture (or its owner) releases the handle as well.

use std::path::Path;

use log::debug;
use raylib::prelude::{Color, Vector2};

use crate::backend::{Backend, DrawCall, RawPixels};
use crate::components::sprite::Rect;
use crate::components::transform::Flip;
use crate::error::{DrawError, LoadError};

/// Pure cyan, the default transparent color key.
pub const DEFAULT_COLOR_KEY: Color = Color::new(0x00, 0xFF, 0xFF, 0xFF);

/// Make every pixel whose RGB equals `key` fully transparent.
pub fn apply_color_key(image: &mut RawPixels, key: Color) {
    for px in image.pixels.iter_mut() {
        if px.r == key.r && px.g == key.g && px.b == key.b {
            *px = Color::new(0, 0, 0, 0);
        }
    }
}

/// Optional parameters of [`Texture::render`].
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Source sub-rectangle; the whole texture when `None`.
    pub clip: Option<Rect>,
    pub angle_deg: f64,
    /// Rotation pivot relative to the destination; its center when `None`.
    pub pivot: Option<Vector2>,
    pub flip: Flip,
    /// Multiplier applied to the destination size.
    pub scale: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            clip: None,
            angle_deg: 0.0,
            pivot: None,
            flip: Flip::None,
            scale: 1.0,
        }
    }
}

impl RenderOptions {
    pub fn clipped(clip: Rect) -> Self {
        Self {
            clip: Some(clip),
            ..Default::default()
        }
    }

    pub fn with_angle(mut self, angle_deg: f64) -> Self {
        self.angle_deg = angle_deg;
        self
    }

    pub fn with_pivot(mut self, pivot: Vector2) -> Self {
        self.pivot = Some(pivot);
        self
    }

    pub fn with_flip(mut self, flip: Flip) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// One decoded and uploaded image.
pub struct Texture<B: Backend> {
    handle: Option<B::Handle>,
    width: i32,
    height: i32,
    modulation: Color,
}

impl<B: Backend> Default for Texture<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Texture<B> {
    /// An empty texture.
    pub fn new() -> Self {
        Self {
            handle: None,
            width: 0,
            height: 0,
            modulation: Color::WHITE,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&B::Handle> {
        self.handle.as_ref()
    }

    /// Width in pixels, 0 when empty.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels, 0 when empty.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Release the handle, if any. Safe to call repeatedly.
    pub fn deallocate(&mut self) {
        if self.handle.take().is_some() {
            self.width = 0;
            self.height = 0;
        }
    }

    /// Decode `path`, key out `color_key` and upload the result.
    pub fn load(
        &mut self,
        backend: &mut B,
        path: impl AsRef<Path>,
        color_key: Color,
    ) -> Result<(), LoadError> {
        self.deallocate();
        let path = path.as_ref();

        let mut image = backend
            .decode_image(path)
            .map_err(|reason| LoadError::DecodeFailed {
                path: path.display().to_string(),
                reason,
            })?;
        apply_color_key(&mut image, color_key);
        self.install(backend, &image, &path.display().to_string())?;

        debug!(
            "Loaded texture {} ({}x{})",
            path.display(),
            self.width,
            self.height
        );
        Ok(())
    }

    /// Rasterize `text` and upload it. No color key is applied.
    pub fn load_text(
        &mut self,
        backend: &mut B,
        text: &str,
        size: i32,
        color: Color,
    ) -> Result<(), LoadError> {
        self.deallocate();
        let image = backend
            .rasterize_text(text, size, color)
            .map_err(|reason| LoadError::RasterizeFailed {
                text: text.to_string(),
                reason,
            })?;
        self.install(backend, &image, &format!("text {text:?}"))
    }

    fn install(&mut self, backend: &mut B, image: &RawPixels, what: &str) -> Result<(), LoadError> {
        let handle = backend
            .upload(image)
            .map_err(|reason| LoadError::UploadFailed {
                what: what.to_string(),
                reason,
            })?;
        self.handle = Some(handle);
        self.width = image.width as i32;
        self.height = image.height as i32;
        Ok(())
    }

    /// Color modulation for later draws. Alpha is left untouched.
    pub fn set_color_mod(&mut self, r: u8, g: u8, b: u8) {
        self.modulation = Color::new(r, g, b, self.modulation.a);
    }

    pub fn set_alpha_mod(&mut self, a: u8) {
        self.modulation.a = a;
    }

    pub fn modulation(&self) -> Color {
        self.modulation
    }

    /// Resolve the draw call for a render at `(x, y)`.
    pub fn draw_call(&self, x: i32, y: i32, options: &RenderOptions) -> DrawCall {
        let src = options
            .clip
            .unwrap_or(Rect::new(0, 0, self.width, self.height));
        let w = (src.w as f32 * options.scale).round() as i32;
        let h = (src.h as f32 * options.scale).round() as i32;
        let pivot = options
            .pivot
            .unwrap_or(Vector2::new(w as f32 / 2.0, h as f32 / 2.0));
        DrawCall {
            src,
            dest: Rect::new(x, y, w, h),
            angle_deg: options.angle_deg,
            pivot,
            flip: options.flip,
            tint: self.modulation,
        }
    }

    /// Issue one draw call with the top-left of the unrotated quad at `(x, y)`.
    pub fn render(
        &self,
        backend: &mut B,
        x: i32,
        y: i32,
        options: &RenderOptions,
    ) -> Result<(), DrawError> {
        let handle = self.handle.as_ref().ok_or(DrawError::EmptyTexture)?;
        backend.draw(handle, &self.draw_call(x, y, options))
    }
}
