//! Hit-tested UI button.
//!
//! A [`Button`] re-evaluates its [`ButtonState`] on every routed event:
//!
//! 1. The tick's pointer position is hit-tested against the button rectangle.
//!    Outside means [`ButtonState::Out`], whatever the event was. A press or
//!    release outside the button therefore never reaches `Down`/`Up`.
//! 2. Inside, the event kind picks the state: press → `Down`, release → `Up`,
//!    motion → `Over`. Other events leave the state alone.
//!
//! Rendering draws the [`ButtonSprites`] entry of the current state.

use crate::backend::Backend;
use crate::components::sprite::Rect;
use crate::error::DrawError;
use crate::events::input::InputEvent;
use crate::resources::texture::{RenderOptions, Texture};

/// Visual state of a button, in sprite-sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    Out = 0,
    Over = 1,
    Down = 2,
    Up = 3,
}

impl ButtonState {
    pub const ALL: [ButtonState; 4] = [
        ButtonState::Out,
        ButtonState::Over,
        ButtonState::Down,
        ButtonState::Up,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One clip rectangle per [`ButtonState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSprites([Rect; 4]);

impl ButtonSprites {
    pub fn new(clips: [Rect; 4]) -> Self {
        Self(clips)
    }

    /// States stacked top to bottom, each `w x h`.
    pub fn vertical_strip(w: i32, h: i32) -> Self {
        Self(ButtonState::ALL.map(|s| Rect::new(0, s.index() as i32 * h, w, h)))
    }

    pub fn clip(&self, state: ButtonState) -> Rect {
        self.0[state.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    position: (i32, i32),
    size: (i32, i32),
    state: ButtonState,
}

impl Button {
    pub fn new(position: (i32, i32), size: (i32, i32)) -> Self {
        Self {
            position,
            size,
            state: ButtonState::Out,
        }
    }

    /// Four buttons pinned to the corners of a `surface`, in the order
    /// top-left, top-right, bottom-left, bottom-right.
    pub fn corners(surface: (i32, i32), size: (i32, i32)) -> [Button; 4] {
        let (sw, sh) = surface;
        let (bw, bh) = size;
        [
            Button::new((0, 0), size),
            Button::new((sw - bw, 0), size),
            Button::new((0, sh - bh), size),
            Button::new((sw - bw, sh - bh), size),
        ]
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = (x, y);
    }

    pub fn size(&self) -> (i32, i32) {
        self.size
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.0, self.position.1, self.size.0, self.size.1)
    }

    pub fn contains(&self, pointer: (i32, i32)) -> bool {
        self.rect().contains(pointer.0, pointer.1)
    }

    pub fn handle_event(&mut self, event: &InputEvent, pointer: (i32, i32)) {
        if !self.contains(pointer) {
            self.state = ButtonState::Out;
            return;
        }
        match event {
            InputEvent::PointerButtonDown(_) => self.state = ButtonState::Down,
            InputEvent::PointerButtonUp(_) => self.state = ButtonState::Up,
            InputEvent::PointerMove => self.state = ButtonState::Over,
            _ => {}
        }
    }

    pub fn render<B: Backend>(
        &self,
        backend: &mut B,
        texture: &Texture<B>,
        sprites: &ButtonSprites,
    ) -> Result<(), DrawError> {
        texture.render(
            backend,
            self.position.0,
            self.position.1,
            &RenderOptions::clipped(sprites.clip(self.state)),
        )
    }
}
