//! Keyboard bindings.
//!
//! [`KeyBindings`] names the keys the engine reacts to. Defaults use WASD for
//! movement, `R` to snap the sprite back to rest and `Enter` to restart the
//! stopwatch. The sprite's color modulation is raised and lowered with the
//! key pairs `U`/`J` (red), `I`/`K` (green), `O`/`L` (blue) and `Y`/`H`
//! (alpha). Keys are written in the config file by the names of
//! [`key_from_name`].
use raylib::prelude::*;

/// Keys that drive the sprite and the stopwatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBindings {
    pub up: KeyboardKey,
    pub down: KeyboardKey,
    pub left: KeyboardKey,
    pub right: KeyboardKey,
    /// Snap flip, rotation and position back to rest.
    pub reset: KeyboardKey,
    /// Restart the stopwatch.
    pub reset_timer: KeyboardKey,
    pub red_up: KeyboardKey,
    pub red_down: KeyboardKey,
    pub green_up: KeyboardKey,
    pub green_down: KeyboardKey,
    pub blue_up: KeyboardKey,
    pub blue_down: KeyboardKey,
    pub alpha_up: KeyboardKey,
    pub alpha_down: KeyboardKey,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: KeyboardKey::KEY_W,
            down: KeyboardKey::KEY_S,
            left: KeyboardKey::KEY_A,
            right: KeyboardKey::KEY_D,
            reset: KeyboardKey::KEY_R,
            reset_timer: KeyboardKey::KEY_ENTER,
            red_up: KeyboardKey::KEY_U,
            red_down: KeyboardKey::KEY_J,
            green_up: KeyboardKey::KEY_I,
            green_down: KeyboardKey::KEY_K,
            blue_up: KeyboardKey::KEY_O,
            blue_down: KeyboardKey::KEY_L,
            alpha_up: KeyboardKey::KEY_Y,
            alpha_down: KeyboardKey::KEY_H,
        }
    }
}

const KEY_NAMES: &[(&str, KeyboardKey)] = &[
    ("a", KeyboardKey::KEY_A),
    ("b", KeyboardKey::KEY_B),
    ("c", KeyboardKey::KEY_C),
    ("d", KeyboardKey::KEY_D),
    ("e", KeyboardKey::KEY_E),
    ("f", KeyboardKey::KEY_F),
    ("g", KeyboardKey::KEY_G),
    ("h", KeyboardKey::KEY_H),
    ("i", KeyboardKey::KEY_I),
    ("j", KeyboardKey::KEY_J),
    ("k", KeyboardKey::KEY_K),
    ("l", KeyboardKey::KEY_L),
    ("m", KeyboardKey::KEY_M),
    ("n", KeyboardKey::KEY_N),
    ("o", KeyboardKey::KEY_O),
    ("p", KeyboardKey::KEY_P),
    ("q", KeyboardKey::KEY_Q),
    ("r", KeyboardKey::KEY_R),
    ("s", KeyboardKey::KEY_S),
    ("t", KeyboardKey::KEY_T),
    ("u", KeyboardKey::KEY_U),
    ("v", KeyboardKey::KEY_V),
    ("w", KeyboardKey::KEY_W),
    ("x", KeyboardKey::KEY_X),
    ("y", KeyboardKey::KEY_Y),
    ("z", KeyboardKey::KEY_Z),
    ("0", KeyboardKey::KEY_ZERO),
    ("1", KeyboardKey::KEY_ONE),
    ("2", KeyboardKey::KEY_TWO),
    ("3", KeyboardKey::KEY_THREE),
    ("4", KeyboardKey::KEY_FOUR),
    ("5", KeyboardKey::KEY_FIVE),
    ("6", KeyboardKey::KEY_SIX),
    ("7", KeyboardKey::KEY_SEVEN),
    ("8", KeyboardKey::KEY_EIGHT),
    ("9", KeyboardKey::KEY_NINE),
    ("up", KeyboardKey::KEY_UP),
    ("down", KeyboardKey::KEY_DOWN),
    ("left", KeyboardKey::KEY_LEFT),
    ("right", KeyboardKey::KEY_RIGHT),
    ("enter", KeyboardKey::KEY_ENTER),
    ("space", KeyboardKey::KEY_SPACE),
    ("tab", KeyboardKey::KEY_TAB),
    ("backspace", KeyboardKey::KEY_BACKSPACE),
    ("escape", KeyboardKey::KEY_ESCAPE),
];

/// Parse a key name, case-insensitive.
pub fn key_from_name(name: &str) -> Option<KeyboardKey> {
    let name = name.trim().to_ascii_lowercase();
    KEY_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, key)| *key)
}

/// Config file name of `key`, if it is one of the named keys.
pub fn key_name(key: KeyboardKey) -> Option<&'static str> {
    KEY_NAMES.iter().find(|(_, k)| *k == key).map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.up, KeyboardKey::KEY_W);
        assert_eq!(keys.down, KeyboardKey::KEY_S);
        assert_eq!(keys.left, KeyboardKey::KEY_A);
        assert_eq!(keys.right, KeyboardKey::KEY_D);
        assert_eq!(keys.reset, KeyboardKey::KEY_R);
        assert_eq!(keys.reset_timer, KeyboardKey::KEY_ENTER);
        assert_eq!(keys.red_up, KeyboardKey::KEY_U);
        assert_eq!(keys.alpha_down, KeyboardKey::KEY_H);
    }

    #[test]
    fn test_default_bindings_do_not_collide() {
        let keys = KeyBindings::default();
        let all = [
            keys.up,
            keys.down,
            keys.left,
            keys.right,
            keys.reset,
            keys.reset_timer,
            keys.red_up,
            keys.red_down,
            keys.green_up,
            keys.green_down,
            keys.blue_up,
            keys.blue_down,
            keys.alpha_up,
            keys.alpha_down,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_key_from_name_ignores_case_and_spaces() {
        assert_eq!(key_from_name("W"), Some(KeyboardKey::KEY_W));
        assert_eq!(key_from_name(" Enter "), Some(KeyboardKey::KEY_ENTER));
        assert_eq!(key_from_name("9"), Some(KeyboardKey::KEY_NINE));
        assert_eq!(key_from_name("f13"), None);
    }

    #[test]
    fn test_key_name_inverts_lookup() {
        for (name, key) in KEY_NAMES {
            assert_eq!(key_name(*key), Some(*name));
            assert_eq!(key_from_name(name), Some(*key));
        }
        assert_eq!(key_name(KeyboardKey::KEY_F1), None);
    }
}
