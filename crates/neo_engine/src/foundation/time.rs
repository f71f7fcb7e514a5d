//! Frame clock

use std::time::{Duration, Instant};

/// Longest frame delta handed to the visualizer, in seconds
///
/// A loop that stalled (debugger, suspended host) resumes with this delta
/// instead of the whole pause.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Measures time between render loop iterations
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
    last_tick: Instant,
    ticks: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
            ticks: 0,
        }
    }

    /// Seconds since the previous tick, capped at [`MAX_FRAME_DELTA`]
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.ticks += 1;
        delta.as_secs_f32().min(MAX_FRAME_DELTA)
    }

    /// Ticks so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Wall time since the clock started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
