//! Frame clock measuring wall-clock time since setup

use std::time::{Duration, Instant};

/// Tracks elapsed animation time, sampled once per frame.
///
/// Elapsed time is measured against the start instant rather than summed from
/// per-frame deltas, so a stalled frame never shifts the animation cycle.
pub struct FrameClock {
    /// Seconds since the clock started, as of the last tick
    pub total_time: f64,
    /// Seconds between the last two ticks
    pub delta_time: f64,
    /// Number of ticks so far
    pub frame_count: u64,
    start_instant: Instant,
    last_instant: Instant,
    /// Added to every elapsed reading
    offset: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::starting_at(Instant::now())
    }
}

impl FrameClock {
    /// Start a clock now
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a clock at a given instant
    pub fn starting_at(start: Instant) -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            start_instant: start,
            last_instant: start,
            offset: 0.0,
        }
    }

    /// Begin reporting time as if the clock had already run for `seconds`
    pub fn with_offset(mut self, seconds: f64) -> Self {
        self.offset = seconds.max(0.0);
        self.total_time = self.offset;
        self
    }

    /// Advance the clock. Call once per frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance the clock to a specific instant
    pub fn tick_at(&mut self, now: Instant) {
        let now = now.max(self.last_instant);
        self.delta_time = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.total_time = self.offset + now.duration_since(self.start_instant).as_secs_f64();
        self.frame_count += 1;
    }

    /// Seconds since the clock started, as of the last tick
    pub fn elapsed(&self) -> f64 {
        self.total_time
    }

    /// Average frames per second since the clock started
    pub fn average_fps(&self) -> f64 {
        let running = self.last_instant.duration_since(self.start_instant);
        if running < Duration::from_millis(1) {
            0.0
        } else {
            self.frame_count as f64 / running.as_secs_f64()
        }
    }
}
