//! Input-to-transform controller.
//!
//! Applies routed [`InputEvent`]s to the sprite's
//! [`Transform`](crate::components::transform::Transform):
//!
//! - movement keys step one axis and wrap around the surface edges
//! - the wheel rotates by a fixed step per notch direction
//! - left/right button presses set the flip
//! - the middle button and the reset key snap back to rest
use crate::components::transform::{Flip, Transform};
use crate::events::input::{InputEvent, PointerButton};
use crate::resources::gameconfig::AppConfig;
use crate::resources::input::KeyBindings;

/// Step toward 0: kept while it stays above 0, otherwise wrap to `bound`.
pub fn wrap_decrement(value: i32, step: i32, bound: i32) -> i32 {
    match value.checked_sub(step) {
        Some(next) if next > 0 => next,
        _ => bound,
    }
}

/// Step toward `bound`: kept while it stays below `bound`, otherwise wrap to 0.
pub fn wrap_increment(value: i32, step: i32, bound: i32) -> i32 {
    match value.checked_add(step) {
        Some(next) if next < bound => next,
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformController {
    pub bindings: KeyBindings,
    pub step: i32,
    pub rotation_step: f64,
    /// Surface size the position wraps within.
    pub bounds: (i32, i32),
    pub rest: (i32, i32),
    pub reset_position: bool,
}

impl TransformController {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            bindings: config.controls.keys,
            step: config.controls.step,
            rotation_step: config.controls.rotation_step,
            bounds: config.surface_size(),
            rest: config.rest_position(),
            reset_position: config.controls.reset_position,
        }
    }

    /// Apply one event. Events the controller does not care about are ignored.
    pub fn apply(&self, transform: &mut Transform, event: &InputEvent) {
        let (width, height) = self.bounds;
        match *event {
            InputEvent::KeyDown(key) if key == self.bindings.up => {
                transform.y = wrap_decrement(transform.y, self.step, height);
            }
            InputEvent::KeyDown(key) if key == self.bindings.down => {
                transform.y = wrap_increment(transform.y, self.step, height);
            }
            InputEvent::KeyDown(key) if key == self.bindings.left => {
                transform.x = wrap_decrement(transform.x, self.step, width);
            }
            InputEvent::KeyDown(key) if key == self.bindings.right => {
                transform.x = wrap_increment(transform.x, self.step, width);
            }
            InputEvent::KeyDown(key) if key == self.bindings.reset => self.snap(transform),
            InputEvent::Wheel(delta) if delta > 0.0 => transform.angle_deg += self.rotation_step,
            InputEvent::Wheel(delta) if delta < 0.0 => transform.angle_deg -= self.rotation_step,
            InputEvent::PointerButtonDown(PointerButton::Left) => {
                transform.flip = Flip::Horizontal;
            }
            InputEvent::PointerButtonDown(PointerButton::Right) => {
                transform.flip = Flip::Vertical;
            }
            InputEvent::PointerButtonDown(PointerButton::Middle) => self.snap(transform),
            _ => {}
        }
    }

    fn snap(&self, transform: &mut Transform) {
        transform.snap_to_rest(self.reset_position.then_some(self.rest));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::KeyboardKey;

    fn controller() -> TransformController {
        TransformController::from_config(&AppConfig::new())
    }

    fn key(k: KeyboardKey) -> InputEvent {
        InputEvent::KeyDown(k)
    }

    #[test]
    fn test_wrap_helpers() {
        assert_eq!(wrap_decrement(30, 10, 800), 20);
        assert_eq!(wrap_decrement(10, 10, 800), 800);
        assert_eq!(wrap_decrement(0, 10, 800), 800);
        assert_eq!(wrap_increment(780, 10, 800), 790);
        assert_eq!(wrap_increment(790, 10, 800), 0);
    }

    #[test]
    fn test_wrap_helpers_saturate_to_wrap_target() {
        assert_eq!(wrap_increment(320, i32::MAX, 800), 0);
        assert_eq!(wrap_decrement(-10, i32::MAX, 800), 800);
        assert_eq!(wrap_decrement(i32::MIN, 1, 800), 800);
    }

    #[test]
    fn test_huge_step_keeps_position_on_surface() {
        let mut c = controller();
        c.step = i32::MAX;
        let mut t = Transform::new(320, 320);
        c.apply(&mut t, &key(KeyboardKey::KEY_D));
        assert_eq!(t.x, 0);
        c.apply(&mut t, &key(KeyboardKey::KEY_W));
        assert_eq!(t.y, 800);
        c.apply(&mut t, &key(KeyboardKey::KEY_S));
        assert_eq!(t.y, 0);
    }

    #[test]
    fn test_left_at_origin_wraps_to_width() {
        let c = controller();
        let mut t = Transform::new(0, 100);
        c.apply(&mut t, &key(KeyboardKey::KEY_A));
        assert_eq!(t.position(), (800, 100));
    }

    #[test]
    fn test_right_wraps_to_zero_then_steps() {
        let c = controller();
        let mut t = Transform::new(790, 100);
        c.apply(&mut t, &key(KeyboardKey::KEY_D));
        assert_eq!(t.x, 0);
        c.apply(&mut t, &key(KeyboardKey::KEY_D));
        assert_eq!(t.x, 10);
    }

    #[test]
    fn test_vertical_movement_wraps() {
        let c = controller();
        let mut t = Transform::new(100, 5);
        c.apply(&mut t, &key(KeyboardKey::KEY_W));
        assert_eq!(t.y, 800);
        c.apply(&mut t, &key(KeyboardKey::KEY_S));
        assert_eq!(t.y, 0);
        c.apply(&mut t, &key(KeyboardKey::KEY_S));
        assert_eq!(t.y, 10);
    }

    #[test]
    fn test_wheel_rotation_accumulates() {
        let c = controller();
        let mut t = Transform::new(0, 0);
        for _ in 0..20 {
            c.apply(&mut t, &InputEvent::Wheel(1.0));
        }
        assert_eq!(t.angle_deg, 400.0);
        c.apply(&mut t, &InputEvent::Wheel(-3.0));
        assert_eq!(t.angle_deg, 380.0);
        c.apply(&mut t, &InputEvent::Wheel(0.0));
        assert_eq!(t.angle_deg, 380.0);
    }

    #[test]
    fn test_middle_button_resets_to_rest() {
        let c = controller();
        let mut t = Transform::new(5, 5);
        c.apply(&mut t, &InputEvent::Wheel(1.0));
        c.apply(&mut t, &InputEvent::PointerButtonDown(PointerButton::Left));
        c.apply(&mut t, &InputEvent::PointerButtonDown(PointerButton::Middle));
        assert_eq!(t.angle_deg, 0.0);
        assert_eq!(t.flip, Flip::None);
        assert_eq!(t.position(), (320, 320));
    }

    #[test]
    fn test_reset_key_matches_middle_button() {
        let mut c = controller();
        c.reset_position = false;
        let mut t = Transform::new(5, 5);
        c.apply(&mut t, &InputEvent::Wheel(-1.0));
        c.apply(&mut t, &InputEvent::PointerButtonDown(PointerButton::Right));
        c.apply(&mut t, &key(KeyboardKey::KEY_R));
        assert_eq!(t.angle_deg, 0.0);
        assert_eq!(t.flip, Flip::None);
        assert_eq!(t.position(), (5, 5));
    }

    #[test]
    fn test_flip_last_write_wins() {
        let c = controller();
        let mut t = Transform::new(0, 0);
        c.apply(&mut t, &InputEvent::PointerButtonDown(PointerButton::Left));
        c.apply(&mut t, &InputEvent::PointerButtonDown(PointerButton::Right));
        assert_eq!(t.flip, Flip::Vertical);
        c.apply(&mut t, &InputEvent::PointerButtonDown(PointerButton::Left));
        assert_eq!(t.flip, Flip::Horizontal);
    }

    #[test]
    fn test_releases_and_motion_are_ignored() {
        let c = controller();
        let mut t = Transform::new(40, 40);
        let before = t;
        c.apply(&mut t, &InputEvent::PointerButtonUp(PointerButton::Left));
        c.apply(&mut t, &InputEvent::PointerMove);
        c.apply(&mut t, &key(KeyboardKey::KEY_Q));
        assert_eq!(t, before);
    }
}
