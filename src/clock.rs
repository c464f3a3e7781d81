//! Match clock: the single tournament-wide countdown timer.
//!
//! Remaining time is derived from `Instant` arithmetic rather than an
//! accumulated tick count, so the one-second presentation tick cannot
//! drift. Purely in-memory; nothing survives a process restart.

use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ClockState {
    Stopped {
        remaining: Duration,
    },
    Running {
        started_at: Instant,
        remaining_at_start: Duration,
    },
}

/// State reported to the presentation layer on every tick.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ClockSnapshot {
    pub match_number: Option<u32>,
    pub remaining_seconds: u64,
    pub running: bool,
    /// True from the moment the clock ran out until the next start/reset.
    pub expired: bool,
}

/// The one countdown clock, explicitly bound to whichever match it is
/// currently timing. Starting it for another match retargets it; the
/// prior match's running time is abandoned.
#[derive(Clone, Copy, Debug)]
pub struct MatchClock {
    state: ClockState,
    bound_match: Option<u32>,
    expired: bool,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Stopped {
                remaining: Duration::ZERO,
            },
            bound_match: None,
            expired: false,
        }
    }

    /// Start counting down `duration` for the given match, retargeting the
    /// clock if it was bound elsewhere.
    pub fn start(&mut self, match_number: u32, duration: Duration, now: Instant) {
        self.bound_match = Some(match_number);
        self.expired = false;
        self.state = ClockState::Running {
            started_at: now,
            remaining_at_start: duration,
        };
    }

    /// Halt the countdown, keeping the elapsed state.
    pub fn pause(&mut self, now: Instant) {
        if let ClockState::Running { .. } = self.state {
            self.state = ClockState::Stopped {
                remaining: self.remaining(now),
            };
        }
    }

    /// Continue from the paused value. No-op while running, expired, or
    /// before any match was bound.
    pub fn resume(&mut self, now: Instant) {
        if self.bound_match.is_none() {
            return;
        }
        if let ClockState::Stopped { remaining } = self.state {
            if remaining > Duration::ZERO {
                self.state = ClockState::Running {
                    started_at: now,
                    remaining_at_start: remaining,
                };
            }
        }
    }

    /// Stop and set the remaining time back to a fresh duration. The match
    /// binding is kept.
    pub fn reset(&mut self, duration: Duration) {
        self.expired = false;
        self.state = ClockState::Stopped {
            remaining: duration,
        };
    }

    pub fn bound_match(&self) -> Option<u32> {
        self.bound_match
    }

    /// Remaining time; never negative.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.state {
            ClockState::Stopped { remaining } => remaining,
            ClockState::Running {
                started_at,
                remaining_at_start,
            } => remaining_at_start.saturating_sub(now.duration_since(started_at)),
        }
    }

    pub fn is_running(&self, now: Instant) -> bool {
        matches!(self.state, ClockState::Running { .. }) && self.remaining(now) > Duration::ZERO
    }

    /// Check for expiry: when a running clock has reached zero it stops
    /// and this returns true exactly once. Callers poll this from their
    /// per-second tick.
    pub fn poll_expiry(&mut self, now: Instant) -> bool {
        if let ClockState::Running { .. } = self.state {
            if self.remaining(now) == Duration::ZERO {
                self.state = ClockState::Stopped {
                    remaining: Duration::ZERO,
                };
                self.expired = true;
                return true;
            }
        }
        false
    }

    /// Current state for the API. Also settles a pending expiry so the
    /// snapshot never reports a running clock at zero.
    pub fn snapshot(&mut self, now: Instant) -> ClockSnapshot {
        self.poll_expiry(now);
        ClockSnapshot {
            match_number: self.bound_match,
            remaining_seconds: self.remaining(now).as_secs(),
            running: self.is_running(now),
            expired: self.expired,
        }
    }
}

/// Format seconds as zero-padded `MM:SS` (presentation helper).
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
