#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Wall-clock timer for hosts that drive frames in real time.
///
/// Animation code never reads this directly; the host ticks it and passes
/// [`Timer::elapsed_seconds`] into the frame update.
pub struct Timer {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

/// Deterministic clock advancing by a fixed step per frame.
///
/// Used by headless runs and tests so that elapsed time is exactly
/// `frame * step`, independent of how fast frames are produced.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    step: f64,
    frame: u64,
}

impl FixedStepClock {
    /// A clock ticking at `fps` frames per second. Non-positive rates fall
    /// back to 60.
    #[must_use]
    pub fn new(fps: f64) -> Self {
        let fps = if fps > 0.0 { fps } else { 60.0 };
        Self { step: 1.0 / fps, frame: 0 }
    }

    /// Elapsed time of the frame about to be produced, then advances.
    pub fn advance(&mut self) -> (u64, f64) {
        let frame = self.frame;
        self.frame += 1;
        (frame, frame as f64 * self.step)
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Rolling frame-rate measurement, reported once per second.
pub struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
    accumulated_time: Duration,
    pub current_fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
            accumulated_time: Duration::ZERO,
            current_fps: 0.0,
        }
    }

    /// Counts one frame. Refreshes [`FpsCounter::current_fps`] once a full
    /// second has accumulated.
    pub fn update(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        self.accumulated_time += now - self.last_update;
        self.last_update = now;

        if self.accumulated_time.as_secs_f32() >= 1.0 {
            self.current_fps = self.frame_count as f32 / self.accumulated_time.as_secs_f32();
            self.accumulated_time = Duration::ZERO;
            self.frame_count = 0;
            log::debug!("fps: {:.1}", self.current_fps);
        }
    }
}
