//! Frame-indexed animation clock.
//!
//! The clock counts rendered ticks, not elapsed time: playback speed is a pure
//! function of the render rate and `ticks_per_frame`.

use std::num::NonZeroU32;

/// What advances the [`AnimationClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockDrive {
    /// One tick per rendered frame.
    #[default]
    Frame,
    /// One tick per pointer motion event.
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClock {
    tick_count: u64,
    ticks_per_frame: NonZeroU32,
    frame_count: NonZeroU32,
}

impl AnimationClock {
    pub fn new(ticks_per_frame: NonZeroU32, frame_count: NonZeroU32) -> Self {
        Self {
            tick_count: 0,
            ticks_per_frame,
            frame_count,
        }
    }

    pub fn advance(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    /// `(tick_count / ticks_per_frame) mod frame_count`.
    pub fn current_frame(&self) -> usize {
        let logical = self.tick_count / u64::from(self.ticks_per_frame.get());
        (logical % u64::from(self.frame_count.get())) as usize
    }

    pub fn reset(&mut self) {
        self.tick_count = 0;
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count.get()
    }

    pub fn ticks_per_frame(&self) -> u32 {
        self.ticks_per_frame.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(d: u32, f: u32) -> AnimationClock {
        AnimationClock::new(NonZeroU32::new(d).unwrap(), NonZeroU32::new(f).unwrap())
    }

    fn advanced(mut c: AnimationClock, n: u64) -> AnimationClock {
        for _ in 0..n {
            c.advance();
        }
        c
    }

    #[test]
    fn test_starts_at_frame_zero() {
        let c = clock(4, 4);
        assert_eq!(c.tick_count(), 0);
        assert_eq!(c.current_frame(), 0);
    }

    #[test]
    fn test_frame_changes_every_ticks_per_frame() {
        let mut c = clock(4, 4);
        let mut frames = Vec::new();
        for _ in 0..16 {
            frames.push(c.current_frame());
            c.advance();
        }
        assert_eq!(frames, vec![0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]);
    }

    #[test]
    fn test_wraps_after_last_frame() {
        let c = clock(4, 4);
        assert_eq!(advanced(c, 16).current_frame(), 0);
        assert_eq!(advanced(c, 17).current_frame(), 0);
        assert_eq!(advanced(c, 18).current_frame(), 0);
        assert_eq!(advanced(c, 19).current_frame(), 0);
        assert_eq!(advanced(c, 20).current_frame(), 1);
    }

    #[test]
    fn test_frame_always_in_range() {
        let mut c = clock(3, 5);
        for _ in 0..200 {
            assert!(c.current_frame() < 5);
            c.advance();
        }
    }

    #[test]
    fn test_reset() {
        let mut c = advanced(clock(1, 4), 7);
        assert_eq!(c.current_frame(), 3);
        c.reset();
        assert_eq!(c.tick_count(), 0);
        assert_eq!(c.current_frame(), 0);
    }
}
