//! Input routing.
//!
//! [`InputRouter::route`] drains one tick of input in arrival order. `Quit`
//! marks the tick as the last one; every other event is broadcast, with no
//! claiming, to the transform controller, every button, the stopwatch reset
//! key and (in pointer drive mode) the animation clock. The modulation keys
//! step one channel of the sprite texture's color modulation by
//! [`MODULATION_STEP`], wrapping around at the ends of the byte range.
use raylib::prelude::{Color, KeyboardKey};

use crate::backend::Backend;
use crate::components::button::Button;
use crate::components::transform::Transform;
use crate::events::input::{InputEvent, InputFrame};
use crate::resources::animationclock::{AnimationClock, ClockDrive};
use crate::resources::gameconfig::AppConfig;
use crate::resources::stopwatch::Stopwatch;
use crate::resources::texture::Texture;
use crate::systems::transform::TransformController;

/// Change of one modulation channel per key press.
pub const MODULATION_STEP: u8 = 32;

/// Whether the loop keeps going after this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Quit,
}

/// State mutated by routed input.
pub struct RouteTargets<'a, B: Backend> {
    pub transform: &'a mut Transform,
    pub buttons: &'a mut [Button],
    pub clock: &'a mut AnimationClock,
    pub stopwatch: &'a mut Stopwatch,
    /// Texture the modulation keys act on; presses are dropped when `None`.
    pub sprite: Option<&'a mut Texture<B>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputRouter {
    controller: TransformController,
    reset_timer: KeyboardKey,
    drive: ClockDrive,
}

impl InputRouter {
    pub fn new(controller: TransformController, reset_timer: KeyboardKey, drive: ClockDrive) -> Self {
        Self {
            controller,
            reset_timer,
            drive,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            TransformController::from_config(config),
            config.controls.keys.reset_timer,
            config.sprite.drive,
        )
    }

    pub fn controller(&self) -> &TransformController {
        &self.controller
    }

    pub fn drive(&self) -> ClockDrive {
        self.drive
    }

    /// Route every event of `frame`. `now_ms` is the backend clock, used when
    /// the stopwatch is restarted.
    pub fn route<B: Backend>(
        &self,
        frame: &InputFrame,
        mut targets: RouteTargets<'_, B>,
        now_ms: u64,
    ) -> TickControl {
        let mut control = TickControl::Continue;
        for event in &frame.events {
            if *event == InputEvent::Quit {
                control = TickControl::Quit;
                continue;
            }

            match *event {
                InputEvent::KeyDown(key) if key == self.reset_timer => targets.stopwatch.reset(now_ms),
                InputEvent::KeyDown(key) => {
                    let current = targets
                        .sprite
                        .as_deref()
                        .map_or(Color::WHITE, |sprite| sprite.modulation());
                    match self.modulate(key, current) {
                        Some(next) => {
                            if let Some(sprite) = targets.sprite.as_deref_mut() {
                                sprite.set_color_mod(next.r, next.g, next.b);
                                sprite.set_alpha_mod(next.a);
                            }
                        }
                        None => self.controller.apply(targets.transform, event),
                    }
                }
                _ => self.controller.apply(targets.transform, event),
            }

            if self.drive == ClockDrive::Pointer && *event == InputEvent::PointerMove {
                targets.clock.advance();
            }

            for button in targets.buttons.iter_mut() {
                button.handle_event(event, frame.pointer);
            }
        }
        control
    }

    /// The modulation after pressing `key`, or `None` when `key` is not a
    /// modulation key.
    pub fn modulate(&self, key: KeyboardKey, current: Color) -> Option<Color> {
        let keys = &self.controller.bindings;
        let mut next = current;
        let channel = if key == keys.red_up || key == keys.red_down {
            &mut next.r
        } else if key == keys.green_up || key == keys.green_down {
            &mut next.g
        } else if key == keys.blue_up || key == keys.blue_down {
            &mut next.b
        } else if key == keys.alpha_up || key == keys.alpha_down {
            &mut next.a
        } else {
            return None;
        };
        let raise = key == keys.red_up
            || key == keys.green_up
            || key == keys.blue_up
            || key == keys.alpha_up;
        *channel = if raise {
            channel.wrapping_add(MODULATION_STEP)
        } else {
            channel.wrapping_sub(MODULATION_STEP)
        };
        Some(next)
    }
}
