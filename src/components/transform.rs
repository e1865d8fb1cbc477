//! 2D placement of the animated sprite.
//!
//! The [`Transform`] is plain data. It is mutated only by the
//! [`TransformController`](crate::systems::transform::TransformController) in
//! response to routed input, and read by the render pass.

/// Mirror applied when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Position, rotation and flip of the sprite.
///
/// The angle accumulates without being reduced modulo 360.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub x: i32,
    pub y: i32,
    pub angle_deg: f64,
    pub flip: Flip,
}

impl Transform {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Clear flip and rotation; move to `rest` when given.
    pub fn snap_to_rest(&mut self, rest: Option<(i32, i32)>) {
        self.flip = Flip::None;
        self.angle_deg = 0.0;
        if let Some((x, y)) = rest {
            self.x = x;
            self.y = y;
        }
    }
}
