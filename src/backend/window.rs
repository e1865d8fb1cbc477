//! Raylib-backed window.
//!
//! Owns the [`RaylibHandle`]; the window closes when the backend is dropped.
//! Drawing goes straight through the FFI so that a frame can stay open across
//! several [`Backend::draw`] calls without holding a draw handle borrow.
//!
//! Raylib reports input as polled state rather than an event queue, so
//! [`RaylibBackend::poll_input`] synthesizes events in a fixed order per tick:
//! quit request, key presses (in the order raylib queued them), pointer motion,
//! button presses, button releases, wheel.

use std::ffi::CString;
use std::path::Path;

use log::{debug, info};
use raylib::ffi;
use raylib::prelude::*;

use crate::backend::{Backend, DrawCall, RawPixels};
use crate::components::transform::Flip;
use crate::error::{DrawError, StartupError};
use crate::events::input::{InputEvent, InputFrame, PointerButton};
use crate::resources::gameconfig::WindowConfig;

const POINTER_BUTTONS: [(MouseButton, PointerButton); 3] = [
    (MouseButton::MOUSE_BUTTON_LEFT, PointerButton::Left),
    (MouseButton::MOUSE_BUTTON_MIDDLE, PointerButton::Middle),
    (MouseButton::MOUSE_BUTTON_RIGHT, PointerButton::Right),
];

pub struct RaylibBackend {
    rl: RaylibHandle,
    _thread: RaylibThread,
    in_frame: bool,
}

impl RaylibBackend {
    /// Open the window described by `window`.
    pub fn new(window: &WindowConfig) -> Result<Self, StartupError> {
        // raylib-rs panics when the window cannot be created
        let built = std::panic::catch_unwind(|| {
            let mut builder = raylib::init();
            builder
                .size(window.width as i32, window.height as i32)
                .title(&window.title);
            if window.vsync {
                builder.vsync();
            }
            builder.build()
        });
        let (mut rl, thread) = built.map_err(|_| {
            StartupError::Initialization(format!(
                "could not create a {}x{} window",
                window.width, window.height
            ))
        })?;

        rl.set_target_fps(window.target_fps);
        // Only closing the window quits
        rl.set_exit_key(None);

        info!(
            "Window ready: {}x{} '{}', fps={}, vsync={}",
            window.width, window.height, window.title, window.target_fps, window.vsync
        );

        Ok(Self {
            rl,
            _thread: thread,
            in_frame: false,
        })
    }
}

/// Copy the pixels of a raylib image into [`RawPixels`].
fn image_pixels(image: &Image) -> Result<RawPixels, String> {
    let width = image.width;
    let height = image.height;
    if width <= 0 || height <= 0 {
        return Err("image has no pixels".to_string());
    }
    let count = (width * height) as usize;
    unsafe {
        let colors = ffi::LoadImageColors(**image);
        if colors.is_null() {
            return Err("could not read image colors".to_string());
        }
        let pixels = std::slice::from_raw_parts(colors, count)
            .iter()
            .map(|c| Color::new(c.r, c.g, c.b, c.a))
            .collect();
        ffi::UnloadImageColors(colors);
        Ok(RawPixels {
            width: width as u32,
            height: height as u32,
            pixels,
        })
    }
}

impl Backend for RaylibBackend {
    type Handle = Texture2D;

    fn decode_image(&mut self, path: &Path) -> Result<RawPixels, String> {
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("path is not valid UTF-8: {}", path.display()))?;
        let image = Image::load_image(path_str).map_err(|e| e.to_string())?;
        debug!("Decoded {} ({}x{})", path.display(), image.width, image.height);
        image_pixels(&image)
    }

    fn rasterize_text(
        &mut self,
        text: &str,
        size: i32,
        color: Color,
    ) -> Result<RawPixels, String> {
        let c_text = CString::new(text).map_err(|e| e.to_string())?;
        let image = unsafe { Image::from_raw(ffi::ImageText(c_text.as_ptr(), size, color.into())) };
        image_pixels(&image)
    }

    fn upload(&mut self, pixels: &RawPixels) -> Result<Texture2D, String> {
        if pixels.width == 0 || pixels.height == 0 {
            return Err("cannot upload an empty image".to_string());
        }
        let mut bytes = pixels.to_rgba8();
        // LoadTextureFromImage copies the data to the GPU and does not take ownership
        let image = ffi::Image {
            data: bytes.as_mut_ptr().cast(),
            width: pixels.width as i32,
            height: pixels.height as i32,
            mipmaps: 1,
            format: ffi::PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8 as i32,
        };
        let raw = unsafe { ffi::LoadTextureFromImage(image) };
        if raw.id == 0 {
            return Err("raylib returned an invalid texture id".to_string());
        }
        Ok(unsafe { Texture2D::from_raw(raw) })
    }

    fn begin_frame(&mut self, clear: Color) {
        unsafe {
            ffi::BeginDrawing();
            ffi::ClearBackground(clear.into());
        }
        self.in_frame = true;
    }

    fn draw(&mut self, handle: &Texture2D, call: &DrawCall) -> Result<(), DrawError> {
        if !self.in_frame {
            return Err(DrawError::Backend("draw outside of a frame".to_string()));
        }
        let mut src = ffi::Rectangle {
            x: call.src.x as f32,
            y: call.src.y as f32,
            width: call.src.w as f32,
            height: call.src.h as f32,
        };
        // Negative source extents mirror the quad
        match call.flip {
            Flip::None => {}
            Flip::Horizontal => src.width = -src.width,
            Flip::Vertical => src.height = -src.height,
        }
        // raylib places `origin` at dest.x/dest.y, so shift by the pivot to keep
        // the unrotated quad's top-left at call.dest.x/y
        let dest = ffi::Rectangle {
            x: call.dest.x as f32 + call.pivot.x,
            y: call.dest.y as f32 + call.pivot.y,
            width: call.dest.w as f32,
            height: call.dest.h as f32,
        };
        let origin = ffi::Vector2 {
            x: call.pivot.x,
            y: call.pivot.y,
        };
        unsafe {
            ffi::DrawTexturePro(
                **handle,
                src,
                dest,
                origin,
                call.angle_deg as f32,
                call.tint.into(),
            );
        }
        Ok(())
    }

    fn present(&mut self) {
        if self.in_frame {
            unsafe { ffi::EndDrawing() };
            self.in_frame = false;
        }
    }

    fn poll_input(&mut self) -> InputFrame {
        let mut events = Vec::new();
        if self.rl.window_should_close() {
            events.push(InputEvent::Quit);
        }
        while let Some(key) = self.rl.get_key_pressed() {
            events.push(InputEvent::KeyDown(key));
        }
        let delta = self.rl.get_mouse_delta();
        if delta.x != 0.0 || delta.y != 0.0 {
            events.push(InputEvent::PointerMove);
        }
        for (native, button) in POINTER_BUTTONS {
            if self.rl.is_mouse_button_pressed(native) {
                events.push(InputEvent::PointerButtonDown(button));
            }
        }
        for (native, button) in POINTER_BUTTONS {
            if self.rl.is_mouse_button_released(native) {
                events.push(InputEvent::PointerButtonUp(button));
            }
        }
        let wheel = self.rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            events.push(InputEvent::Wheel(wheel));
        }

        let pointer = self.rl.get_mouse_position();
        InputFrame {
            events,
            pointer: (pointer.x as i32, pointer.y as i32),
        }
    }

    fn ticks_ms(&self) -> u64 {
        (self.rl.get_time() * 1000.0) as u64
    }
}
