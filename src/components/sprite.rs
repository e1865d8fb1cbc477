use smallvec::SmallVec;

/// Axis-aligned integer rectangle in pixels.
///
/// Used both as a clip rectangle into a texture's pixel space and as a
/// destination rectangle on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: `[x, x + w) x [y, y + h)`.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// Ordered, index-addressed set of clip rectangles into one texture.
///
/// Frame geometry is explicit per frame; the strip constructors only cover the
/// common case of equally sized frames laid out in a row or a column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpriteSheet {
    frames: SmallVec<[Rect; 4]>,
}

impl SpriteSheet {
    pub fn new(frames: impl IntoIterator<Item = Rect>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// `count` frames of `w x h`, left to right, starting at `(x, y)`.
    pub fn horizontal_strip(x: i32, y: i32, w: i32, h: i32, count: usize) -> Self {
        Self::new((0..count).map(|i| Rect::new(x + i as i32 * w, y, w, h)))
    }

    /// `count` frames of `w x h`, top to bottom, starting at `(x, y)`.
    pub fn vertical_strip(x: i32, y: i32, w: i32, h: i32, count: usize) -> Self {
        Self::new((0..count).map(|i| Rect::new(x, y + i as i32 * h, w, h)))
    }

    pub fn get(&self, index: usize) -> Option<&Rect> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(0, 0, 300, 200);
        assert!(r.contains(0, 0));
        assert!(r.contains(299, 199));
        assert!(!r.contains(300, 50));
        assert!(!r.contains(50, 200));
        assert!(!r.contains(-1, 10));
    }

    #[test]
    fn test_horizontal_strip_matches_walk_cycle_layout() {
        let sheet = SpriteSheet::horizontal_strip(0, 0, 64, 205, 4);
        assert_eq!(sheet.len(), 4);
        assert_eq!(sheet.get(0), Some(&Rect::new(0, 0, 64, 205)));
        assert_eq!(sheet.get(1), Some(&Rect::new(64, 0, 64, 205)));
        assert_eq!(sheet.get(2), Some(&Rect::new(128, 0, 64, 205)));
        assert_eq!(sheet.get(3), Some(&Rect::new(192, 0, 64, 205)));
        assert_eq!(sheet.get(4), None);
    }

    #[test]
    fn test_vertical_strip() {
        let sheet = SpriteSheet::vertical_strip(0, 0, 300, 200, 4);
        let ys: Vec<i32> = sheet.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![0, 200, 400, 600]);
    }

    #[test]
    fn test_explicit_frames_keep_order() {
        let sheet = SpriteSheet::new([Rect::new(10, 0, 5, 5), Rect::new(0, 0, 5, 5)]);
        assert_eq!(sheet.get(0).map(|r| r.x), Some(10));
        assert_eq!(sheet.get(1).map(|r| r.x), Some(0));
        assert!(!sheet.is_empty());
    }
}
