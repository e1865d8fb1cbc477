//! Render pass.
//!
//! Draws one frame in a fixed order: the animated sprite, its caption, the
//! stopwatch text, then the corner buttons. A failed draw is logged and the
//! rest of the frame is still drawn.
use log::warn;
use raylib::prelude::Color;

use crate::backend::Backend;
use crate::components::button::{Button, ButtonSprites};
use crate::components::sprite::SpriteSheet;
use crate::components::transform::Transform;
use crate::error::DrawError;
use crate::resources::animationclock::AnimationClock;
use crate::resources::texture::RenderOptions;
use crate::resources::texturestore::TextureStore;

pub const SPRITE_TEXTURE: &str = "sprite";
pub const CAPTION_TEXTURE: &str = "caption";
pub const TIMER_TEXTURE: &str = "timer";
pub const BUTTON_TEXTURE: &str = "button";

/// Caption offset from the sprite position.
pub const CAPTION_OFFSET: (i32, i32) = (80, 80);
/// Stopwatch text offset from the sprite position.
pub const TIMER_OFFSET: (i32, i32) = (90, 10);

/// Everything the render pass reads.
pub struct Scene<'a, B: Backend> {
    pub textures: &'a TextureStore<B>,
    pub sheet: &'a SpriteSheet,
    pub clock: &'a AnimationClock,
    pub transform: &'a Transform,
    pub buttons: &'a [Button],
    pub button_sprites: &'a ButtonSprites,
    pub scale: f32,
    pub clear_color: Color,
}

/// Draw and present one frame. Returns the number of draws that failed.
pub fn render_pass<B: Backend>(backend: &mut B, scene: &Scene<'_, B>) -> usize {
    let mut failures = 0;
    let mut report = |what: &str, result: Result<(), DrawError>| {
        if let Err(e) = result {
            warn!("Failed to draw {what}: {e}");
            failures += 1;
        }
    };

    backend.begin_frame(scene.clear_color);

    let t = scene.transform;
    let frame = scene.clock.current_frame();
    let sprite = match scene.sheet.get(frame) {
        Some(clip) => RenderOptions::clipped(*clip)
            .with_angle(t.angle_deg)
            .with_flip(t.flip)
            .with_scale(scene.scale),
        None => {
            warn!("Sprite sheet has no frame {frame}");
            RenderOptions::default().with_angle(t.angle_deg).with_flip(t.flip)
        }
    };
    report(
        SPRITE_TEXTURE,
        draw_texture(backend, scene.textures, SPRITE_TEXTURE, t.x, t.y, &sprite),
    );

    let rotated = RenderOptions::default().with_angle(t.angle_deg);
    report(
        CAPTION_TEXTURE,
        draw_texture(
            backend,
            scene.textures,
            CAPTION_TEXTURE,
            t.x + CAPTION_OFFSET.0,
            t.y + CAPTION_OFFSET.1,
            &rotated,
        ),
    );
    report(
        TIMER_TEXTURE,
        draw_texture(
            backend,
            scene.textures,
            TIMER_TEXTURE,
            t.x + TIMER_OFFSET.0,
            t.y + TIMER_OFFSET.1,
            &rotated,
        ),
    );

    match scene.textures.get(BUTTON_TEXTURE) {
        Some(texture) => {
            for button in scene.buttons {
                report(
                    BUTTON_TEXTURE,
                    button.render(backend, texture, scene.button_sprites),
                );
            }
        }
        None => {
            for _ in scene.buttons {
                report(BUTTON_TEXTURE, Err(DrawError::EmptyTexture));
            }
        }
    }

    backend.present();
    failures
}

fn draw_texture<B: Backend>(
    backend: &mut B,
    textures: &TextureStore<B>,
    key: &str,
    x: i32,
    y: i32,
    options: &RenderOptions,
) -> Result<(), DrawError> {
    textures
        .get(key)
        .ok_or(DrawError::EmptyTexture)?
        .render(backend, x, y, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RawPixels;
    use crate::backend::headless::HeadlessBackend;
    use crate::components::button::ButtonState;
    use crate::components::sprite::Rect;
    use crate::components::transform::Flip;
    use crate::resources::texture::DEFAULT_COLOR_KEY;
    use std::num::NonZeroU32;

    struct Fixture {
        backend: HeadlessBackend,
        textures: TextureStore<HeadlessBackend>,
        sheet: SpriteSheet,
        clock: AnimationClock,
        transform: Transform,
        buttons: Vec<Button>,
        sprites: ButtonSprites,
    }

    impl Fixture {
        fn new() -> Self {
            let mut backend = HeadlessBackend::new()
                .with_image("sprite.png", RawPixels::filled(256, 205, Color::RED))
                .with_image("button.png", RawPixels::filled(300, 800, Color::GREEN));
            let mut textures = TextureStore::new();
            textures
                .load(&mut backend, SPRITE_TEXTURE, "sprite.png", DEFAULT_COLOR_KEY)
                .unwrap();
            textures
                .load(&mut backend, BUTTON_TEXTURE, "button.png", DEFAULT_COLOR_KEY)
                .unwrap();
            textures
                .entry(CAPTION_TEXTURE)
                .load_text(&mut backend, "im stickman :D", 28, Color::BLACK)
                .unwrap();
            textures
                .entry(TIMER_TEXTURE)
                .load_text(&mut backend, "0 ms passed.", 28, Color::BLACK)
                .unwrap();
            Self {
                backend,
                textures,
                sheet: SpriteSheet::horizontal_strip(0, 0, 64, 205, 4),
                clock: AnimationClock::new(
                    NonZeroU32::new(4).unwrap(),
                    NonZeroU32::new(4).unwrap(),
                ),
                transform: Transform::new(320, 320),
                buttons: Button::corners((800, 800), (300, 200)).to_vec(),
                sprites: ButtonSprites::vertical_strip(300, 200),
            }
        }

        fn render(&mut self) -> usize {
            let scene = Scene {
                textures: &self.textures,
                sheet: &self.sheet,
                clock: &self.clock,
                transform: &self.transform,
                buttons: &self.buttons,
                button_sprites: &self.sprites,
                scale: 1.0,
                clear_color: Color::WHITE,
            };
            render_pass(&mut self.backend, &scene)
        }
    }

    #[test]
    fn test_frame_draw_order_and_positions() {
        let mut f = Fixture::new();
        f.transform.angle_deg = 40.0;
        f.transform.flip = Flip::Horizontal;
        assert_eq!(f.render(), 0);
        assert_eq!(f.backend.frames_presented(), 1);

        let draws = f.backend.draws();
        assert_eq!(draws.len(), 7);
        let sprite = draws[0].call;
        assert_eq!(sprite.src, Rect::new(0, 0, 64, 205));
        assert_eq!(sprite.dest, Rect::new(320, 320, 64, 205));
        assert_eq!(sprite.flip, Flip::Horizontal);

        let caption = draws[1].call;
        assert_eq!((caption.dest.x, caption.dest.y), (400, 400));
        assert_eq!(caption.angle_deg, 40.0);
        assert_eq!(caption.flip, Flip::None);

        let timer = draws[2].call;
        assert_eq!((timer.dest.x, timer.dest.y), (410, 330));
    }

    #[test]
    fn test_sprite_clip_follows_clock() {
        let mut f = Fixture::new();
        for _ in 0..9 {
            f.clock.advance();
        }
        f.render();
        assert_eq!(f.backend.draws()[0].call.src, Rect::new(128, 0, 64, 205));
    }

    #[test]
    fn test_buttons_draw_state_clip() {
        let mut f = Fixture::new();
        f.buttons[3].handle_event(
            &crate::events::input::InputEvent::PointerMove,
            (700, 700),
        );
        assert_eq!(f.buttons[3].state(), ButtonState::Over);
        f.render();
        let draws = f.backend.draws();
        assert_eq!(draws[3].call.src, Rect::new(0, 0, 300, 200));
        assert_eq!(draws[6].call.src, Rect::new(0, 200, 300, 200));
        assert_eq!((draws[6].call.dest.x, draws[6].call.dest.y), (500, 600));
    }

    #[test]
    fn test_failed_draws_do_not_stop_the_frame() {
        let mut f = Fixture::new();
        f.textures.remove(CAPTION_TEXTURE);
        assert_eq!(f.render(), 1);
        assert_eq!(f.backend.draws().len(), 6);
        assert_eq!(f.backend.frames_presented(), 1);

        f.backend.fail_draws = true;
        assert_eq!(f.render(), 7);
        assert_eq!(f.backend.frames_presented(), 2);
    }
}
