//! In-memory backend.
//!
//! Nothing is displayed. Images are served from an in-memory table keyed by
//! path, uploads hand out counted handles, every draw call of the current
//! frame is recorded, and input comes from a queue filled by the caller.
//! Each `present` advances the simulated clock by one vsync interval.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use raylib::prelude::Color;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::backend::{Backend, DrawCall, RawPixels};
use crate::error::{DrawError, StartupError};
use crate::events::input::{InputEvent, InputFrame};
use crate::resources::gameconfig::AppConfig;

const DEFAULT_FRAME_MS: u64 = 16;

/// Texture handle handed out by [`HeadlessBackend`].
///
/// Dropping it marks the texture as released.
#[derive(Debug)]
pub struct HeadlessHandle {
    id: u64,
    live: Rc<RefCell<FxHashSet<u64>>>,
}

impl HeadlessHandle {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for HeadlessHandle {
    fn drop(&mut self) {
        self.live.borrow_mut().remove(&self.id);
    }
}

/// A draw call recorded during the current frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawRecord {
    pub texture: u64,
    pub call: DrawCall,
}

#[derive(Debug)]
pub struct HeadlessBackend {
    images: FxHashMap<PathBuf, RawPixels>,
    live: Rc<RefCell<FxHashSet<u64>>>,
    next_id: u64,
    uploads: FxHashMap<u64, RawPixels>,
    pending_input: VecDeque<InputFrame>,
    draws: Vec<DrawRecord>,
    in_frame: bool,
    frames_presented: u64,
    clock_ms: u64,
    frame_ms: u64,
    /// Make every upload fail.
    pub fail_uploads: bool,
    /// Make every text rasterization fail.
    pub fail_text: bool,
    /// Make every draw call fail.
    pub fail_draws: bool,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            images: FxHashMap::default(),
            live: Rc::new(RefCell::new(FxHashSet::default())),
            next_id: 1,
            uploads: FxHashMap::default(),
            pending_input: VecDeque::new(),
            draws: Vec::new(),
            in_frame: false,
            frames_presented: 0,
            clock_ms: 0,
            frame_ms: DEFAULT_FRAME_MS,
            fail_uploads: false,
            fail_text: false,
            fail_draws: false,
        }
    }

    /// Backend serving flat placeholder images sized like the configured
    /// sheets, so headless runs need no asset files.
    pub fn for_config(config: &AppConfig) -> Result<Self, StartupError> {
        let sprite = &config.sprite;
        let buttons = &config.buttons;
        let sheet = placeholder(
            "sprite sheet",
            (sprite.frame_width, sprite.frames.get()),
            (sprite.frame_height, 1),
            Color::BLACK,
        )?;
        let button_sheet = placeholder(
            "button sheet",
            (buttons.width, 1),
            (buttons.height, 4),
            Color::GRAY,
        )?;
        Ok(Self::new()
            .with_image(&config.assets.sprite_sheet, sheet)
            .with_image(&config.assets.button_sheet, button_sheet))
    }

    /// Serve `pixels` when `path` is decoded.
    pub fn insert_image(&mut self, path: impl Into<PathBuf>, pixels: RawPixels) {
        self.images.insert(path.into(), pixels);
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, pixels: RawPixels) -> Self {
        self.insert_image(path, pixels);
        self
    }

    pub fn remove_image(&mut self, path: impl AsRef<Path>) {
        self.images.remove(path.as_ref());
    }

    /// Queue the input for one future tick.
    pub fn queue_input(&mut self, frame: InputFrame) {
        self.pending_input.push_back(frame);
    }

    pub fn push_events(
        &mut self,
        pointer: (i32, i32),
        events: impl IntoIterator<Item = InputEvent>,
    ) {
        self.queue_input(InputFrame::new(pointer, events));
    }

    /// Number of uploaded textures whose handle has not been dropped yet.
    pub fn live_textures(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn is_live(&self, id: u64) -> bool {
        self.live.borrow().contains(&id)
    }

    /// Pixels received by the upload that produced handle `id`.
    pub fn uploaded(&self, id: u64) -> Option<&RawPixels> {
        self.uploads.get(&id)
    }

    /// Draw calls of the current (or last presented) frame.
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn set_frame_ms(&mut self, frame_ms: u64) {
        self.frame_ms = frame_ms;
    }

    pub fn advance_clock(&mut self, ms: u64) {
        self.clock_ms += ms;
    }
}

/// Flat image whose `width` and `height` are given as
/// `(cell size, cell count)` pairs.
fn placeholder(
    what: &str,
    width: (i32, u32),
    height: (i32, u32),
    color: Color,
) -> Result<RawPixels, StartupError> {
    let too_large = || {
        StartupError::Initialization(format!(
            "{what} of {}x{} cells of {}x{} px is too large",
            width.1, height.1, width.0, height.0
        ))
    };
    let extent = |(cell, count): (i32, u32)| {
        u32::try_from(cell).ok().and_then(|cell| cell.checked_mul(count))
    };
    let w = extent(width).ok_or_else(too_large)?;
    let h = extent(height).ok_or_else(too_large)?;
    w.checked_mul(h).ok_or_else(too_large)?;
    Ok(RawPixels::filled(w, h, color))
}

impl Backend for HeadlessBackend {
    type Handle = HeadlessHandle;

    fn decode_image(&mut self, path: &Path) -> Result<RawPixels, String> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no such file: {}", path.display()))
    }

    fn rasterize_text(
        &mut self,
        text: &str,
        size: i32,
        color: Color,
    ) -> Result<RawPixels, String> {
        if self.fail_text {
            return Err("text rasterization disabled".to_string());
        }
        if text.is_empty() || size <= 0 {
            return Err("nothing to rasterize".to_string());
        }
        // Fixed-advance glyph boxes
        let width = text.chars().count() as u32 * (size as u32 / 2).max(1);
        Ok(RawPixels::filled(width, size as u32, color))
    }

    fn upload(&mut self, pixels: &RawPixels) -> Result<HeadlessHandle, String> {
        if self.fail_uploads {
            return Err("uploads disabled".to_string());
        }
        if pixels.width == 0 || pixels.height == 0 {
            return Err("cannot upload an empty image".to_string());
        }
        let id = self.next_id;
        self.next_id += 1;
        self.live.borrow_mut().insert(id);
        self.uploads.insert(id, pixels.clone());
        Ok(HeadlessHandle {
            id,
            live: Rc::clone(&self.live),
        })
    }

    fn begin_frame(&mut self, _clear: Color) {
        self.draws.clear();
        self.in_frame = true;
    }

    fn draw(&mut self, handle: &HeadlessHandle, call: &DrawCall) -> Result<(), DrawError> {
        if !self.in_frame {
            return Err(DrawError::Backend("draw outside of a frame".to_string()));
        }
        if self.fail_draws {
            return Err(DrawError::Backend("draws disabled".to_string()));
        }
        if !self.is_live(handle.id) {
            return Err(DrawError::Backend(format!("texture {} was released", handle.id)));
        }
        self.draws.push(DrawRecord {
            texture: handle.id,
            call: *call,
        });
        Ok(())
    }

    fn present(&mut self) {
        self.in_frame = false;
        self.frames_presented += 1;
        self.clock_ms += self.frame_ms;
    }

    fn poll_input(&mut self) -> InputFrame {
        self.pending_input.pop_front().unwrap_or_default()
    }

    fn ticks_ms(&self) -> u64 {
        self.clock_ms
    }
}
