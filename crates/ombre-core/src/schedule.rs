//! Deferred-update primitives.
//!
//! Two small owned values realize the component's write-rate discipline:
//!
//! - [`FrameSlot`]: at most one pending value per logical channel, latest
//!   wins, drained once per redraw. Each control owns one slot per edited
//!   dimension.
//! - [`Debounce`]: delays outbound emissions by a configurable window,
//!   restarting on every new value. One instance per emission channel; no
//!   global timer registry, so multiple picker instances never interfere.
//!
//! Time is passed in as [`Instant`] rather than read internally, keeping
//! both types deterministic under test.

use std::time::{Duration, Instant};

// ── FrameSlot ─────────────────────────────────────────────────────────────

/// Single-slot pending-task register: the newest scheduled value replaces
/// any previous one, and [`take`](FrameSlot::take) drains it at the redraw
/// boundary.
#[derive(Debug)]
pub struct FrameSlot<T> {
    pending: Option<T>,
}

impl<T> FrameSlot<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedules `value`, replacing any not-yet-drained one.
    #[inline]
    pub fn schedule(&mut self, value: T) {
        self.pending = Some(value);
    }

    /// Drains the pending value, if any. Called once per frame.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending value without running it.
    #[inline]
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Debounce ──────────────────────────────────────────────────────────────

/// Trailing-edge debouncer owned by one emission channel.
///
/// Every [`push`](Debounce::push) replaces the pending value and restarts
/// the delay window. A zero delay is due immediately, but the value still waits
/// for the next [`poll`](Debounce::poll), i.e. the next frame boundary, so
/// bursts within one frame coalesce even at delay 0.
#[derive(Debug)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Stores `value` and (re)starts the delay window at `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Returns the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if due {
            self.pending.take().map(|(v, _)| v)
        } else {
            None
        }
    }

    /// Delivers the pending value immediately, ignoring the deadline.
    /// Used on teardown so the last edit is not lost.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    #[inline]
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
