//! Frame schedulers.
//!
//! A scheduler only records that another frame was asked for. The host
//! decides when that frame actually runs: the browser's animation callback,
//! a timer deadline, or a test calling `tick` by hand.

use std::time::{Duration, Instant};

use glyph_loop_types::FRAME_MS;

pub trait FrameScheduler {
    /// Ask for one more frame after the current one.
    fn request_frame(&mut self);
}

/// Scheduler for tests and single-stepping: requests are counted and the
/// caller runs frames explicitly.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total requests ever made.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Consume the pending request, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}

/// Fixed-interval pacing for the terminal host.
///
/// The next deadline is one interval after the request. Late frames are not
/// made up for: a slow frame simply pushes the following ones back.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    interval: Duration,
    deadline: Option<Instant>,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Request the very first frame to run immediately.
    pub fn request_now(&mut self, now: Instant) {
        self.deadline = Some(now);
    }

    /// Record a request made at `now`.
    pub fn request_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// How long the host may wait for input before the next frame is due.
    /// `None` when no frame has been requested.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Consume the request if its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(FRAME_MS as u64))
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) {
        self.request_at(Instant::now());
    }
}
