//! Animation clock: the periodic timer and the rotation counter it advances.
//!
//! Nothing here sleeps or spawns. The host's event loop asks the clock how long it
//! may wait ([`AnimationClock::time_until_tick`]) and hands it the current instant
//! ([`AnimationClock::poll`]); a due tick is handled to completion on that thread.

use std::time::{Duration, Instant};
use tracing::trace;

use crate::config::MAX_TICK_INTERVAL;

/// Spin state of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockState {
    #[default]
    Stopped,
    Spinning,
}

/// A deadline-based periodic timer.
///
/// Intervals longer than [`MAX_TICK_INTERVAL`] are shortened to it.
#[derive(Debug, Clone)]
pub struct Timer {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl Timer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.min(MAX_TICK_INTERVAL),
            next_deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval. An active timer restarts its period from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval.min(MAX_TICK_INTERVAL);
        if self.is_active() {
            self.next_deadline = Some(now + self.interval);
        }
    }

    pub fn is_active(&self) -> bool {
        self.next_deadline.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        self.next_deadline = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_deadline = None;
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// Fire at most once if the deadline has passed.
    ///
    /// Missed periods are dropped rather than replayed: after a long stall the next
    /// deadline is one interval from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.next_deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let next = deadline + self.interval;
        self.next_deadline = Some(if next <= now { now + self.interval } else { next });
        true
    }
}

/// Spin state, rotation counter and the timer that advances it.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    state: ClockState,
    counter: usize,
    timer: Timer,
}

impl AnimationClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: ClockState::Stopped,
            counter: 0,
            timer: Timer::new(interval),
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == ClockState::Spinning
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn interval(&self) -> Duration {
        self.timer.interval()
    }

    /// Raw counter value. May be stale (>= line count) right after a reconfiguration;
    /// readers that index lines should use [`AnimationClock::lead_line`].
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Current lead line index, re-clamped to 0 when the counter is out of range.
    pub fn lead_line(&self, number_of_lines: usize) -> usize {
        if self.counter >= number_of_lines {
            0
        } else {
            self.counter
        }
    }

    /// Arm the timer and enter `Spinning`.
    ///
    /// Returns `false` (and leaves the counter alone) if the timer was already armed.
    pub fn start(&mut self, interval: Duration, now: Instant) -> bool {
        self.state = ClockState::Spinning;
        if self.timer.is_active() {
            return false;
        }
        self.timer.set_interval(interval, now);
        self.timer.start(now);
        self.counter = 0;
        true
    }

    /// Disarm the timer and enter `Stopped`. Returns `false` if it was not armed.
    pub fn stop(&mut self) -> bool {
        self.state = ClockState::Stopped;
        if !self.timer.is_active() {
            return false;
        }
        self.timer.stop();
        self.counter = 0;
        true
    }

    /// Apply a new interval. An armed timer keeps running with the new period.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.timer.set_interval(interval, now);
    }

    pub fn reset_counter(&mut self) {
        self.counter = 0;
    }

    /// One tick: advance the lead line, wrapping to 0 at `number_of_lines`.
    pub fn advance(&mut self, number_of_lines: usize) -> usize {
        self.counter += 1;
        if self.counter >= number_of_lines {
            self.counter = 0;
        }
        trace!(counter = self.counter, "tick");
        self.counter
    }

    /// Run a tick if one is due. Returns whether a tick happened.
    pub fn poll(&mut self, now: Instant, number_of_lines: usize) -> bool {
        if self.timer.poll(now) {
            self.advance(number_of_lines);
            true
        } else {
            false
        }
    }

    /// How long the event loop may block before the next tick is due.
    ///
    /// `None` while the timer is disarmed.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
