//! Application configuration.
//!
//! Settings are read from an INI file. Every key is optional: missing keys keep
//! their defaults, which reproduce the stick-figure demo. Present keys with
//! unusable values are reported as [`ConfigError::Invalid`].
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 800
//! title = spritestage
//! target_fps = 60
//! vsync = true
//! clear_color = FFFFFF
//!
//! [assets]
//! sprite_sheet = img/6_animation.png
//! button_sheet = img/button.png
//! color_key = 00FFFF
//!
//! [sprite]
//! frame_width = 64
//! frame_height = 205
//! frames = 4
//! ticks_per_frame = 4
//! scale = 1
//! drive = frame
//! tint = FFFFFF
//! alpha = 255
//! caption = im stickman :D
//! caption_size = 28
//! text_color = 000000
//!
//! [buttons]
//! width = 300
//! height = 200
//!
//! [controls]
//! up = w
//! down = s
//! left = a
//! right = d
//! reset = r
//! reset_timer = enter
//! red_up = u
//! red_down = j
//! green_up = i
//! green_down = k
//! blue_up = o
//! blue_down = l
//! alpha_up = y
//! alpha_down = h
//! step = 10
//! rotation_step = 20
//! reset_position = true
//! rest_x = 320
//! rest_y = 320
//! ```

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use configparser::ini::Ini;
use log::info;
use raylib::prelude::{Color, KeyboardKey};

use crate::error::ConfigError;
use crate::resources::animationclock::ClockDrive;
use crate::resources::input::{KeyBindings, key_from_name, key_name};

const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_WINDOW_SIZE: u32 = 800;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_FRAME_WIDTH: i32 = 64;
const DEFAULT_FRAME_HEIGHT: i32 = 205;
const DEFAULT_FRAMES: u32 = 4;
const DEFAULT_TICKS_PER_FRAME: u32 = 4;
const DEFAULT_BUTTON_WIDTH: i32 = 300;
const DEFAULT_BUTTON_HEIGHT: i32 = 200;
const DEFAULT_STEP: i32 = 10;
const DEFAULT_ROTATION_STEP: f64 = 20.0;
/// Offset of the default rest position from the surface center.
const REST_OFFSET: i32 = 80;

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub target_fps: u32,
    pub vsync: bool,
    pub clear_color: Color,
}

#[derive(Debug, Clone)]
pub struct AssetConfig {
    pub sprite_sheet: PathBuf,
    pub button_sheet: PathBuf,
    /// Pixels of this RGB become transparent on load.
    pub color_key: Color,
}

#[derive(Debug, Clone)]
pub struct SpriteConfig {
    pub frame_width: i32,
    pub frame_height: i32,
    pub frames: NonZeroU32,
    pub ticks_per_frame: NonZeroU32,
    pub scale: f32,
    pub drive: ClockDrive,
    /// Color modulation; only RGB is used.
    pub tint: Color,
    pub alpha: u8,
    pub caption: String,
    pub caption_size: i32,
    pub text_color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlConfig {
    pub keys: KeyBindings,
    pub step: i32,
    pub rotation_step: f64,
    /// Whether the middle button and reset key also move the sprite to rest.
    pub reset_position: bool,
    /// Explicit rest position; derived from the window size when `None`.
    pub rest: Option<(i32, i32)>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub sprite: SpriteConfig,
    pub buttons: ButtonConfig,
    pub controls: ControlConfig,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    /// Configuration with the default values.
    pub fn new() -> Self {
        Self {
            window: WindowConfig {
                width: DEFAULT_WINDOW_SIZE,
                height: DEFAULT_WINDOW_SIZE,
                title: "spritestage".to_string(),
                target_fps: DEFAULT_TARGET_FPS,
                vsync: true,
                clear_color: Color::WHITE,
            },
            assets: AssetConfig {
                sprite_sheet: PathBuf::from("img/6_animation.png"),
                button_sheet: PathBuf::from("img/button.png"),
                color_key: Color::new(0x00, 0xFF, 0xFF, 0xFF),
            },
            sprite: SpriteConfig {
                frame_width: DEFAULT_FRAME_WIDTH,
                frame_height: DEFAULT_FRAME_HEIGHT,
                frames: NonZeroU32::new(DEFAULT_FRAMES).unwrap_or(NonZeroU32::MIN),
                ticks_per_frame: NonZeroU32::new(DEFAULT_TICKS_PER_FRAME)
                    .unwrap_or(NonZeroU32::MIN),
                scale: 1.0,
                drive: ClockDrive::Frame,
                tint: Color::WHITE,
                alpha: 255,
                caption: "im stickman :D".to_string(),
                caption_size: 28,
                text_color: Color::BLACK,
            },
            buttons: ButtonConfig {
                width: DEFAULT_BUTTON_WIDTH,
                height: DEFAULT_BUTTON_HEIGHT,
            },
            controls: ControlConfig {
                keys: KeyBindings::default(),
                step: DEFAULT_STEP,
                rotation_step: DEFAULT_ROTATION_STEP,
                reset_position: true,
                rest: None,
            },
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Default configuration that loads from and saves to `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Surface size in pixels.
    pub fn surface_size(&self) -> (i32, i32) {
        (self.window.width as i32, self.window.height as i32)
    }

    /// Where the sprite starts and where a reset sends it.
    pub fn rest_position(&self) -> (i32, i32) {
        self.controls.rest.unwrap_or_else(|| {
            let (w, h) = self.surface_size();
            (w / 2 - REST_OFFSET, h / 2 - REST_OFFSET)
        })
    }

    /// Load configuration from [`Self::config_path`].
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|reason| ConfigError::Read {
            path: self.config_path.display().to_string(),
            reason,
        })?;
        self.apply(&ini)?;

        info!(
            "Loaded config {}: {}x{} window, {} frames of {}x{}, buttons {}x{}",
            self.config_path.display(),
            self.window.width,
            self.window.height,
            self.sprite.frames,
            self.sprite.frame_width,
            self.sprite.frame_height,
            self.buttons.width,
            self.buttons.height
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|reason| ConfigError::Read {
                path: "<string>".to_string(),
                reason,
            })?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [window]
        if let Some(width) = read_positive(ini, "window", "width")? {
            self.window.width = width as u32;
        }
        if let Some(height) = read_positive(ini, "window", "height")? {
            self.window.height = height as u32;
        }
        if let Some(title) = ini.get("window", "title") {
            self.window.title = title;
        }
        if let Some(fps) = read_uint(ini, "window", "target_fps")? {
            self.window.target_fps = u32::try_from(fps)
                .map_err(|_| invalid("window", "target_fps", "out of range"))?;
        }
        if let Some(vsync) = read_bool(ini, "window", "vsync")? {
            self.window.vsync = vsync;
        }
        if let Some(color) = read_color(ini, "window", "clear_color")? {
            self.window.clear_color = color;
        }

        // [assets]
        if let Some(path) = ini.get("assets", "sprite_sheet") {
            self.assets.sprite_sheet = PathBuf::from(path);
        }
        if let Some(path) = ini.get("assets", "button_sheet") {
            self.assets.button_sheet = PathBuf::from(path);
        }
        if let Some(color) = read_color(ini, "assets", "color_key")? {
            self.assets.color_key = color;
        }

        // [sprite]
        if let Some(w) = read_positive(ini, "sprite", "frame_width")? {
            self.sprite.frame_width = w;
        }
        if let Some(h) = read_positive(ini, "sprite", "frame_height")? {
            self.sprite.frame_height = h;
        }
        if let Some(frames) = read_nonzero(ini, "sprite", "frames")? {
            self.sprite.frames = frames;
        }
        if let Some(ticks) = read_nonzero(ini, "sprite", "ticks_per_frame")? {
            self.sprite.ticks_per_frame = ticks;
        }
        if let Some(scale) = read_float(ini, "sprite", "scale")? {
            if !(scale > 0.0 && scale.is_finite()) {
                return Err(invalid("sprite", "scale", "must be a positive number"));
            }
            self.sprite.scale = scale as f32;
        }
        if let Some(drive) = ini.get("sprite", "drive") {
            self.sprite.drive = match drive.trim().to_ascii_lowercase().as_str() {
                "frame" => ClockDrive::Frame,
                "pointer" => ClockDrive::Pointer,
                other => {
                    return Err(invalid(
                        "sprite",
                        "drive",
                        format!("expected 'frame' or 'pointer', got '{other}'"),
                    ));
                }
            };
        }
        if let Some(tint) = read_color(ini, "sprite", "tint")? {
            self.sprite.tint = tint;
        }
        if let Some(alpha) = read_uint(ini, "sprite", "alpha")? {
            self.sprite.alpha = u8::try_from(alpha)
                .map_err(|_| invalid("sprite", "alpha", "must be between 0 and 255"))?;
        }
        if let Some(caption) = ini.get("sprite", "caption") {
            self.sprite.caption = caption;
        }
        if let Some(size) = read_positive(ini, "sprite", "caption_size")? {
            self.sprite.caption_size = size;
        }
        if let Some(color) = read_color(ini, "sprite", "text_color")? {
            self.sprite.text_color = color;
        }

        // [buttons]
        if let Some(w) = read_positive(ini, "buttons", "width")? {
            self.buttons.width = w;
        }
        if let Some(h) = read_positive(ini, "buttons", "height")? {
            self.buttons.height = h;
        }

        // [controls]
        let keys = &mut self.controls.keys;
        for (name, slot) in [
            ("up", &mut keys.up),
            ("down", &mut keys.down),
            ("left", &mut keys.left),
            ("right", &mut keys.right),
            ("reset", &mut keys.reset),
            ("reset_timer", &mut keys.reset_timer),
            ("red_up", &mut keys.red_up),
            ("red_down", &mut keys.red_down),
            ("green_up", &mut keys.green_up),
            ("green_down", &mut keys.green_down),
            ("blue_up", &mut keys.blue_up),
            ("blue_down", &mut keys.blue_down),
            ("alpha_up", &mut keys.alpha_up),
            ("alpha_down", &mut keys.alpha_down),
        ] {
            if let Some(key) = read_key(ini, "controls", name)? {
                *slot = key;
            }
        }
        if let Some(step) = read_positive(ini, "controls", "step")? {
            self.controls.step = step;
        }
        if let Some(step) = read_float(ini, "controls", "rotation_step")? {
            if !step.is_finite() {
                return Err(invalid("controls", "rotation_step", "must be a finite number"));
            }
            self.controls.rotation_step = step;
        }
        if let Some(reset) = read_bool(ini, "controls", "reset_position")? {
            self.controls.reset_position = reset;
        }
        match (
            read_int(ini, "controls", "rest_x")?,
            read_int(ini, "controls", "rest_y")?,
        ) {
            (Some(x), Some(y)) => {
                let x = i32::try_from(x).map_err(|_| invalid("controls", "rest_x", "out of range"))?;
                let y = i32::try_from(y).map_err(|_| invalid("controls", "rest_y", "out of range"))?;
                self.controls.rest = Some((x, y));
            }
            (None, None) => {}
            _ => {
                return Err(invalid(
                    "controls",
                    "rest_x",
                    "rest_x and rest_y must be set together",
                ));
            }
        }

        self.validate_controls()
    }

    /// Movement step and rest position must fit the surface.
    fn validate_controls(&self) -> Result<(), ConfigError> {
        let (width, height) = self.surface_size();
        if self.controls.step > width.min(height) {
            return Err(invalid(
                "controls",
                "step",
                format!("must not exceed the surface size {width}x{height}"),
            ));
        }
        match self.controls.rest {
            Some((x, y)) if !((0..=width).contains(&x) && (0..=height).contains(&y)) => {
                Err(invalid(
                    "controls",
                    "rest_x",
                    format!("rest position ({x}, {y}) is outside the {width}x{height} surface"),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Save configuration to [`Self::config_path`], creating the file if needed.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| ConfigError::Write {
                path: self.config_path.display().to_string(),
                reason: e.to_string(),
            })?;
        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            ini.set(section, key, Some(value));
        };

        set("window", "width", self.window.width.to_string());
        set("window", "height", self.window.height.to_string());
        set("window", "title", self.window.title.clone());
        set("window", "target_fps", self.window.target_fps.to_string());
        set("window", "vsync", self.window.vsync.to_string());
        set("window", "clear_color", color_to_hex(self.window.clear_color));

        set("assets", "sprite_sheet", self.assets.sprite_sheet.display().to_string());
        set("assets", "button_sheet", self.assets.button_sheet.display().to_string());
        set("assets", "color_key", color_to_hex(self.assets.color_key));

        set("sprite", "frame_width", self.sprite.frame_width.to_string());
        set("sprite", "frame_height", self.sprite.frame_height.to_string());
        set("sprite", "frames", self.sprite.frames.to_string());
        set("sprite", "ticks_per_frame", self.sprite.ticks_per_frame.to_string());
        set("sprite", "scale", self.sprite.scale.to_string());
        let drive = match self.sprite.drive {
            ClockDrive::Frame => "frame",
            ClockDrive::Pointer => "pointer",
        };
        set("sprite", "drive", drive.to_string());
        set("sprite", "tint", color_to_hex(self.sprite.tint));
        set("sprite", "alpha", self.sprite.alpha.to_string());
        set("sprite", "caption", self.sprite.caption.clone());
        set("sprite", "caption_size", self.sprite.caption_size.to_string());
        set("sprite", "text_color", color_to_hex(self.sprite.text_color));

        set("buttons", "width", self.buttons.width.to_string());
        set("buttons", "height", self.buttons.height.to_string());

        let keys = &self.controls.keys;
        for (name, key) in [
            ("up", keys.up),
            ("down", keys.down),
            ("left", keys.left),
            ("right", keys.right),
            ("reset", keys.reset),
            ("reset_timer", keys.reset_timer),
            ("red_up", keys.red_up),
            ("red_down", keys.red_down),
            ("green_up", keys.green_up),
            ("green_down", keys.green_down),
            ("blue_up", keys.blue_up),
            ("blue_down", keys.blue_down),
            ("alpha_up", keys.alpha_up),
            ("alpha_down", keys.alpha_down),
        ] {
            if let Some(key_name) = key_name(key) {
                set("controls", name, key_name.to_string());
            }
        }
        set("controls", "step", self.controls.step.to_string());
        set("controls", "rotation_step", self.controls.rotation_step.to_string());
        set("controls", "reset_position", self.controls.reset_position.to_string());
        if let Some((x, y)) = self.controls.rest {
            set("controls", "rest_x", x.to_string());
            set("controls", "rest_y", y.to_string());
        }

        ini
    }

    /// Whether a config file exists at [`Self::config_path`].
    pub fn file_exists(&self) -> bool {
        Path::new(&self.config_path).is_file()
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn read_uint(ini: &Ini, section: &str, key: &str) -> Result<Option<u64>, ConfigError> {
    ini.getuint(section, key)
        .map_err(|e| invalid(section, key, e))
}

fn read_int(ini: &Ini, section: &str, key: &str) -> Result<Option<i64>, ConfigError> {
    ini.getint(section, key).map_err(|e| invalid(section, key, e))
}

fn read_float(ini: &Ini, section: &str, key: &str) -> Result<Option<f64>, ConfigError> {
    ini.getfloat(section, key)
        .map_err(|e| invalid(section, key, e))
}

fn read_bool(ini: &Ini, section: &str, key: &str) -> Result<Option<bool>, ConfigError> {
    ini.getbool(section, key)
        .map_err(|e| invalid(section, key, e))
}

fn read_positive(ini: &Ini, section: &str, key: &str) -> Result<Option<i32>, ConfigError> {
    match read_int(ini, section, key)? {
        Some(v) if v > 0 && v <= i64::from(i32::MAX) => Ok(Some(v as i32)),
        Some(_) => Err(invalid(section, key, "must be a positive integer")),
        None => Ok(None),
    }
}

fn read_nonzero(
    ini: &Ini,
    section: &str,
    key: &str,
) -> Result<Option<NonZeroU32>, ConfigError> {
    match read_uint(ini, section, key)? {
        Some(v) => u32::try_from(v)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Some)
            .ok_or_else(|| invalid(section, key, "must be a positive integer")),
        None => Ok(None),
    }
}

fn read_color(ini: &Ini, section: &str, key: &str) -> Result<Option<Color>, ConfigError> {
    match ini.get(section, key) {
        Some(text) => parse_hex_color(&text)
            .map(Some)
            .ok_or_else(|| invalid(section, key, format!("'{text}' is not an RRGGBB color"))),
        None => Ok(None),
    }
}

fn read_key(ini: &Ini, section: &str, key: &str) -> Result<Option<KeyboardKey>, ConfigError> {
    match ini.get(section, key) {
        Some(name) => key_from_name(&name)
            .map(Some)
            .ok_or_else(|| invalid(section, key, format!("unknown key '{name}'"))),
        None => Ok(None),
    }
}

/// Parse `RRGGBB` or `RRGGBBAA`, optionally prefixed with `#` or `0x`.
pub fn parse_hex_color(text: &str) -> Option<Color> {
    let text = text.trim();
    let hex = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .unwrap_or(text);
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { byte(6)? } else { 0xFF };
    Some(Color::new(byte(0)?, byte(2)?, byte(4)?, alpha))
}

fn color_to_hex(color: Color) -> String {
    format!("{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}
