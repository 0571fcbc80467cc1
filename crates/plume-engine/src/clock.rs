//! Frame-rate capping and FPS reporting.
//!
//! [`FrameClock`] derives the real-time step fed to
//! [`Simulation::step()`](crate::Simulation::step): a frame that finishes
//! early sleeps out its budget and reports the budget, a frame that runs
//! long reports its actual duration so simulated time keeps pace with
//! the wall clock.

use std::time::{Duration, Instant};

/// Frame limiter and rate counter.
#[derive(Clone, Debug)]
pub struct FrameClock {
    budget: Duration,
    started: Instant,
    frame_start: Instant,
    window_start: Instant,
    window_frames: u64,
    total_frames: u64,
    time_step: f32,
}

impl FrameClock {
    /// A clock capped at `max_frame_rate` frames per second.
    ///
    /// A rate of 0 is treated as 1.
    pub fn new(max_frame_rate: u32) -> Self {
        let budget = Self::budget_for(max_frame_rate);
        let now = Instant::now();
        Self {
            budget,
            started: now,
            frame_start: now,
            window_start: now,
            window_frames: 0,
            total_frames: 0,
            time_step: budget.as_secs_f32(),
        }
    }

    fn budget_for(max_frame_rate: u32) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(max_frame_rate.max(1)))
    }

    /// Change the frame-rate cap.
    pub fn set_frame_rate(&mut self, max_frame_rate: u32) {
        self.budget = Self::budget_for(max_frame_rate);
    }

    /// The per-frame budget.
    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Mark the start of a frame.
    pub fn start_frame(&mut self) {
        self.frame_start = Instant::now();
        self.window_frames += 1;
        self.total_frames += 1;
    }

    /// Finish the frame, sleeping out any remaining budget, and return
    /// the time step in seconds.
    pub fn end_frame(&mut self) -> f32 {
        let elapsed = self.frame_start.elapsed();
        if let Some(remaining) = self.budget.checked_sub(elapsed) {
            std::thread::sleep(remaining);
        }
        self.time_step = self.step_for(elapsed);
        self.time_step
    }

    /// Time step reported for a frame that took `elapsed`:
    /// `max(budget, elapsed)` in seconds.
    pub fn step_for(&self, elapsed: Duration) -> f32 {
        self.budget.max(elapsed).as_secs_f32()
    }

    /// Time step returned by the most recent [`end_frame`](Self::end_frame).
    #[inline]
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Frames started since construction.
    #[inline]
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frame rate over the window since the last
    /// [`take_window_fps`](Self::take_window_fps), then restart the window.
    pub fn take_window_fps(&mut self) -> f32 {
        let secs = self.window_start.elapsed().as_secs_f32();
        let fps = if secs > 0.0 {
            self.window_frames as f32 / secs
        } else {
            0.0
        };
        self.window_frames = 0;
        self.window_start = Instant::now();
        fps
    }

    /// Mean frame rate since construction.
    pub fn average_fps(&self) -> f32 {
        let secs = self.started.elapsed().as_secs_f32();
        if secs > 0.0 {
            self.total_frames as f32 / secs
        } else {
            0.0
        }
    }
}
