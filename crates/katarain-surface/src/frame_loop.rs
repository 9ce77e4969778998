//! Explicit frame scheduling with cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared flag that stops a [`FrameLoop`].
///
/// Clones observe the same flag. Cancelling is permanent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Decides when the next animation frame is due.
///
/// The first frame is due immediately. After a frame runs, the next one is
/// due one interval later; late frames are not made up.
#[derive(Debug)]
pub struct FrameLoop {
    interval: Duration,
    next_frame: Instant,
    token: CancelToken,
}

impl FrameLoop {
    pub fn new(interval: Duration, token: CancelToken, now: Instant) -> Self {
        Self {
            interval,
            next_frame: now,
            token,
        }
    }

    /// Frame loop running at `fps` frames per second (at least one).
    pub fn with_rate(fps: u32, token: CancelToken, now: Instant) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1), token, now)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether a frame should run at `now`. Schedules the following frame when
    /// it returns `true`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_cancelled() || now < self.next_frame {
            return false;
        }
        self.next_frame = now + self.interval;
        true
    }

    /// How long the caller may wait for input before the next frame is due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        if self.is_cancelled() {
            return self.interval;
        }
        self.next_frame.saturating_duration_since(now)
    }
}
