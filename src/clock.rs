use std::time::Instant;

/// Milliseconds elapsed from `since` to `now` on a wrapping 32-bit counter.
///
/// Correct across a single overflow of the counter, which happens after
/// roughly 49.7 days of uptime.
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Wrapping 32-bit millisecond counter started at construction.
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    pub fn now_ms(&self) -> u32 {
        // Truncation is the wraparound
        self.start.elapsed().as_millis() as u32
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
