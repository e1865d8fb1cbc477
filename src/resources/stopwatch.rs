//! Wall-clock stopwatch shown next to the sprite.
//!
//! Times are backend milliseconds passed in by the caller, so the stopwatch
//! has no clock of its own.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stopwatch {
    started_ms: u64,
}

impl Stopwatch {
    pub fn started_at(now_ms: u64) -> Self {
        Self { started_ms: now_ms }
    }

    pub fn reset(&mut self, now_ms: u64) {
        self.started_ms = now_ms;
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_ms)
    }

    pub fn caption(&self, now_ms: u64) -> String {
        format!("{} ms passed.", self.elapsed_ms(now_ms))
    }
}
