//! Application context and main loop.
//!
//! [`AppContext`] owns all runtime state explicitly: textures, sprite sheets,
//! buttons, the transform, the animation clock, the stopwatch and the backend.
//! One [`AppContext::tick`] is one loop iteration:
//!
//! 1. poll the backend for this tick's input
//! 2. route it (a `Quit` ends the loop before anything is drawn)
//! 3. re-rasterize the stopwatch text
//! 4. draw and present
//! 5. advance the animation clock (frame drive mode)
//!
//! The clock moves after presenting, so the first frame shows clip 0 for a
//! full `ticks_per_frame` ticks.

use std::path::Path;

use log::{info, warn};

use crate::backend::Backend;
use crate::components::button::{Button, ButtonSprites};
use crate::components::sprite::SpriteSheet;
use crate::components::transform::Transform;
use crate::error::{LoadError, StartupError};
use crate::resources::animationclock::{AnimationClock, ClockDrive};
use crate::resources::gameconfig::AppConfig;
use crate::resources::stopwatch::Stopwatch;
use crate::resources::texturestore::TextureStore;
use crate::systems::input::{InputRouter, RouteTargets, TickControl};
use crate::systems::render::{
    BUTTON_TEXTURE, CAPTION_TEXTURE, SPRITE_TEXTURE, Scene, TIMER_TEXTURE, render_pass,
};

pub struct AppContext<B: Backend> {
    config: AppConfig,
    textures: TextureStore<B>,
    sheet: SpriteSheet,
    button_sprites: ButtonSprites,
    buttons: Vec<Button>,
    transform: Transform,
    clock: AnimationClock,
    stopwatch: Stopwatch,
    router: InputRouter,
    ticks: u64,
    // Dropped last, after every texture handle.
    backend: B,
}

impl<B: Backend> AppContext<B> {
    /// Load every asset named by `config` and place the sprite at rest.
    pub fn new(mut backend: B, config: AppConfig) -> Result<Self, StartupError> {
        let mut textures = TextureStore::new();
        let color_key = config.assets.color_key;

        for (key, path) in [
            (SPRITE_TEXTURE, &config.assets.sprite_sheet),
            (BUTTON_TEXTURE, &config.assets.button_sheet),
        ] {
            textures
                .load(&mut backend, key, path, color_key)
                .map_err(|source| StartupError::AssetLoad {
                    asset: path.display().to_string(),
                    source,
                })?;
        }

        let sprite = &config.sprite;
        let sprite_texture = textures.entry(SPRITE_TEXTURE);
        sprite_texture.set_color_mod(sprite.tint.r, sprite.tint.g, sprite.tint.b);
        sprite_texture.set_alpha_mod(sprite.alpha);

        textures
            .entry(CAPTION_TEXTURE)
            .load_text(&mut backend, &sprite.caption, sprite.caption_size, sprite.text_color)
            .map_err(|source| StartupError::AssetLoad {
                asset: CAPTION_TEXTURE.to_string(),
                source,
            })?;

        let now = backend.ticks_ms();
        let stopwatch = Stopwatch::started_at(now);
        textures
            .entry(TIMER_TEXTURE)
            .load_text(
                &mut backend,
                &stopwatch.caption(now),
                sprite.caption_size,
                sprite.text_color,
            )
            .map_err(|source| StartupError::AssetLoad {
                asset: TIMER_TEXTURE.to_string(),
                source,
            })?;

        let sheet = SpriteSheet::horizontal_strip(
            0,
            0,
            sprite.frame_width,
            sprite.frame_height,
            sprite.frames.get() as usize,
        );
        let button_size = (config.buttons.width, config.buttons.height);
        let button_sprites = ButtonSprites::vertical_strip(button_size.0, button_size.1);
        let buttons = Button::corners(config.surface_size(), button_size).to_vec();
        let (rest_x, rest_y) = config.rest_position();

        info!(
            "Loaded {} textures; sprite at ({rest_x}, {rest_y}), {} frames every {} ticks",
            textures.len(),
            sprite.frames,
            sprite.ticks_per_frame
        );

        Ok(Self {
            clock: AnimationClock::new(sprite.ticks_per_frame, sprite.frames),
            router: InputRouter::from_config(&config),
            transform: Transform::new(rest_x, rest_y),
            config,
            textures,
            sheet,
            button_sprites,
            buttons,
            stopwatch,
            ticks: 0,
            backend,
        })
    }

    /// Run one loop iteration.
    pub fn tick(&mut self) -> TickControl {
        let input = self.backend.poll_input();
        let now = self.backend.ticks_ms();
        let control = self.router.route(
            &input,
            RouteTargets {
                transform: &mut self.transform,
                buttons: &mut self.buttons,
                clock: &mut self.clock,
                stopwatch: &mut self.stopwatch,
                sprite: self.textures.get_mut(SPRITE_TEXTURE),
            },
            now,
        );
        if control == TickControl::Quit {
            return control;
        }

        self.refresh_timer(now);

        let scene = Scene {
            textures: &self.textures,
            sheet: &self.sheet,
            clock: &self.clock,
            transform: &self.transform,
            buttons: &self.buttons,
            button_sprites: &self.button_sprites,
            scale: self.config.sprite.scale,
            clear_color: self.config.window.clear_color,
        };
        render_pass(&mut self.backend, &scene);
        if self.router.drive() == ClockDrive::Frame {
            self.clock.advance();
        }
        self.ticks += 1;
        TickControl::Continue
    }

    fn refresh_timer(&mut self, now: u64) {
        let caption = self.stopwatch.caption(now);
        let sprite = &self.config.sprite;
        if let Err(e) = self.textures.entry(TIMER_TEXTURE).load_text(
            &mut self.backend,
            &caption,
            sprite.caption_size,
            sprite.text_color,
        ) {
            warn!("Failed to refresh stopwatch text: {e}");
        }
    }

    /// Reload the texture stored under `key` from `path` with the configured
    /// color key. On failure the texture is left empty.
    pub fn reload_texture(&mut self, key: &str, path: impl AsRef<Path>) -> Result<(), LoadError> {
        self.textures
            .load(&mut self.backend, key, path, self.config.assets.color_key)
    }

    /// Tick until the backend reports a quit.
    pub fn run(&mut self) {
        while self.tick() == TickControl::Continue {}
        info!("Quit after {} frames", self.ticks);
    }

    /// Tick until quit or until `max_ticks` frames were rendered.
    /// Returns the number of frames rendered by this call.
    pub fn run_for(&mut self, max_ticks: u64) -> u64 {
        let start = self.ticks;
        while self.ticks - start < max_ticks {
            if self.tick() == TickControl::Quit {
                break;
            }
        }
        self.ticks - start
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn textures(&self) -> &TextureStore<B> {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureStore<B> {
        &mut self.textures
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    /// Frames rendered so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RawPixels;
    use crate::backend::headless::HeadlessBackend;
    use crate::events::input::InputEvent;
    use raylib::prelude::Color;

    fn backend(config: &AppConfig) -> HeadlessBackend {
        HeadlessBackend::new()
            .with_image(
                &config.assets.sprite_sheet,
                RawPixels::filled(256, 205, Color::RED),
            )
            .with_image(
                &config.assets.button_sheet,
                RawPixels::filled(300, 800, Color::GREEN),
            )
    }

    #[test]
    fn test_new_places_sprite_at_rest() {
        let config = AppConfig::new();
        let app = AppContext::new(backend(&config), config).unwrap();
        assert_eq!(app.transform().position(), (320, 320));
        assert_eq!(app.buttons().len(), 4);
        assert_eq!(app.sheet().len(), 4);
        assert_eq!(app.textures().len(), 4);
        assert_eq!(app.backend().live_textures(), 4);
    }

    #[test]
    fn test_tint_and_alpha_reach_sprite_texture() {
        let mut config = AppConfig::new();
        config.sprite.tint = Color::new(1, 2, 3, 255);
        config.sprite.alpha = 100;
        let app = AppContext::new(backend(&config), config).unwrap();
        let m = app.textures().get(SPRITE_TEXTURE).unwrap().modulation();
        assert_eq!((m.r, m.g, m.b, m.a), (1, 2, 3, 100));
    }

    #[test]
    fn test_quit_tick_does_not_render() {
        let config = AppConfig::new();
        let mut app = AppContext::new(backend(&config), config).unwrap();
        app.backend_mut().push_events((0, 0), [InputEvent::Quit]);
        assert_eq!(app.tick(), TickControl::Quit);
        assert_eq!(app.backend().frames_presented(), 0);
        assert_eq!(app.ticks(), 0);
    }

    #[test]
    fn test_run_for_stops_at_limit() {
        let config = AppConfig::new();
        let mut app = AppContext::new(backend(&config), config).unwrap();
        assert_eq!(app.run_for(5), 5);
        assert_eq!(app.clock().tick_count(), 5);
        assert_eq!(app.backend().frames_presented(), 5);
    }

    #[test]
    fn test_first_frames_show_clip_zero() {
        let config = AppConfig::new();
        let mut app = AppContext::new(backend(&config), config).unwrap();
        app.tick();
        assert_eq!(app.backend().draws()[0].call.src.x, 0);
        assert_eq!(app.clock().tick_count(), 1);
    }

    #[test]
    fn test_timer_texture_is_reloaded_every_frame() {
        let config = AppConfig::new();
        let mut app = AppContext::new(backend(&config), config).unwrap();
        app.run_for(3);
        // Each refresh releases the previous timer texture.
        assert_eq!(app.backend().live_textures(), 4);
        let width_after = app.textures().get(TIMER_TEXTURE).unwrap().width();
        // "32 ms passed." is 13 characters at 14 px each.
        assert_eq!(width_after, 13 * 14);
    }
}
