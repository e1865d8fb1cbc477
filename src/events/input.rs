//! Input events.
//!
//! The backend translates its native input into an ordered list of
//! [`InputEvent`]s once per tick and hands them over in an [`InputFrame`],
//! together with the pointer position sampled for that tick. The core never
//! talks to the input hardware itself.

use raylib::prelude::KeyboardKey;

/// Physical pointer buttons the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// A single input event, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The user asked to close the window.
    Quit,
    /// A key was pressed.
    KeyDown(KeyboardKey),
    PointerButtonDown(PointerButton),
    PointerButtonUp(PointerButton),
    /// The pointer moved. The new position is [`InputFrame::pointer`].
    PointerMove,
    /// Wheel scrolled; positive is away from the user.
    Wheel(f32),
}

/// Everything the backend observed since the previous tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    /// Pending events in arrival order.
    pub events: Vec<InputEvent>,
    /// Pointer position in surface pixels, sampled once for the whole tick.
    pub pointer: (i32, i32),
}

impl InputFrame {
    pub fn new(pointer: (i32, i32), events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            pointer,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_keeps_arrival_order() {
        let frame = InputFrame::new(
            (5, 6),
            [
                InputEvent::PointerMove,
                InputEvent::KeyDown(KeyboardKey::KEY_A),
                InputEvent::Quit,
            ],
        );
        assert_eq!(frame.pointer, (5, 6));
        assert_eq!(frame.events[0], InputEvent::PointerMove);
        assert_eq!(frame.events[1], InputEvent::KeyDown(KeyboardKey::KEY_A));
        assert_eq!(frame.events[2], InputEvent::Quit);
    }

    #[test]
    fn test_default_frame_is_empty() {
        let frame = InputFrame::default();
        assert!(frame.is_empty());
        assert_eq!(frame.pointer, (0, 0));
    }
}
