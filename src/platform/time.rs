//! Frame pacing
//!
//! The event loop sleeps until the next deadline and only then asks for a
//! redraw, which caps both rendering and simulation at the tick rate.

use std::time::{Duration, Instant};

/// Fixed-rate frame scheduler
#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Duration,
    next_frame: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new(rate_hz: u32, now: Instant) -> Self {
        Self {
            period: Duration::from_secs(1) / rate_hz.max(1),
            next_frame: now,
            frames: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the next frame is due
    pub fn next_deadline(&self) -> Instant {
        self.next_frame
    }

    /// Frames handed out so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Claim a frame if one is due at `now`
    ///
    /// After a stall the schedule restarts from `now` instead of bursting
    /// through the missed frames.
    pub fn try_frame(&mut self, now: Instant) -> bool {
        if now < self.next_frame {
            return false;
        }
        self.next_frame += self.period;
        if self.next_frame <= now {
            self.next_frame = now + self.period;
        }
        self.frames += 1;
        true
    }
}
