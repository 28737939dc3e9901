//! Frame scheduling.
//!
//! A [`FrameScheduler`] hands out [`FrameHandle`]s for callbacks that should
//! run about once per display refresh, and can cancel a pending one. The
//! [`FrameClock`] is the implementation used by the terminal host: it paces
//! frames against [`Instant`]s at a fixed target rate.

use std::time::{Duration, Instant};

use nexum_core::DEFAULT_FRAME_RATE;

/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// The host's frame-timing primitive.
pub trait FrameScheduler {
    /// Arrange for one callback at the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a pending callback. Unknown or already delivered handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Paces frame callbacks at a target rate.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    next_id: u64,
    pending: Vec<FrameHandle>,
    last_delivery: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

impl FrameClock {
    /// Create a clock targeting `frame_rate` frames per second (clamped to 1..=240).
    pub fn new(frame_rate: u32) -> Self {
        let rate = frame_rate.clamp(1, 240);
        Self {
            interval: Duration::from_secs_f64(1.0 / rate as f64),
            next_id: 1,
            pending: Vec::new(),
            last_delivery: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn due_at(&self, now: Instant) -> Instant {
        self.last_delivery
            .map(|last| last + self.interval)
            .unwrap_or(now)
    }

    /// How long the host may block before the next frame is due.
    ///
    /// `None` when nothing is pending.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if self.pending.is_empty() {
            return None;
        }
        Some(self.due_at(now).saturating_duration_since(now))
    }

    /// Deliver every pending handle if a frame is due at `now`.
    ///
    /// Delivered handles are no longer pending; callers request a new frame
    /// to keep a loop going.
    pub fn poll(&mut self, now: Instant) -> Vec<FrameHandle> {
        if self.pending.is_empty() || now < self.due_at(now) {
            return Vec::new();
        }
        self.last_delivery = Some(now);
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}
