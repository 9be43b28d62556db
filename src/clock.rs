//! Frame clock driving every per-frame update.
//!
//! The clock is started when the scene is mounted and produces one
//! [`FrameContext`] per tick. Elapsed time is kept as a [`Duration`] and only
//! narrowed to `f32` per frame, so it stays exact over long sessions while
//! manually advanced clocks and wall-clock ticks follow the same rules.

use std::time::{Duration, Instant};

/// Timing information handed to every shape node once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameContext {
    /// Seconds since the scene was mounted
    pub elapsed_time: f32,
    /// Seconds since the previous tick
    pub delta: f32,
}

impl FrameContext {
    pub fn new(elapsed_time: f32, delta: f32) -> Self {
        Self {
            elapsed_time,
            delta,
        }
    }
}

/// Monotonic frame clock.
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
    elapsed: Duration,
    frame_count: u64,
}

impl FrameClock {
    /// Start a clock at zero elapsed time.
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Measure the wall-clock time since the previous tick and advance by it.
    pub fn tick(&mut self) -> FrameContext {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.advance(delta)
    }

    /// Advance the clock by a fixed amount of time.
    pub fn advance(&mut self, delta: Duration) -> FrameContext {
        self.elapsed += delta;
        self.frame_count += 1;
        FrameContext::new(self.elapsed_time(), delta.as_secs_f32())
    }

    /// Advance the clock by `delta` seconds. Negative or non-finite deltas
    /// count as zero.
    pub fn advance_secs(&mut self, delta: f32) -> FrameContext {
        let delta = Duration::try_from_secs_f32(delta).unwrap_or(Duration::ZERO);
        self.advance(delta)
    }

    /// Seconds since the clock was started or last reset.
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Number of ticks produced since the clock was started or last reset.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Restart from zero, as on a full remount of the scene.
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.elapsed = Duration::ZERO;
        self.frame_count = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
