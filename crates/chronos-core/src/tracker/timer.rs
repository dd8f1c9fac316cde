//! The per-timer record and its segment arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock;

/// Placeholder used when a timer is created or renamed with a blank name.
pub const DEFAULT_TIMER_NAME: &str = "Unnamed timer";

/// One tracked activity.
///
/// Elapsed time lives in two places: `accumulated_secs` banks whole seconds
/// from closed run segments, and `segment_started_at` anchors the currently
/// open segment (present iff `running`). Live elapsed is always derived from
/// the wall clock, never from tick counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    pub id: Uuid,
    pub name: String,
    /// Target duration in seconds; 0 means unbounded (no completion state).
    pub target_secs: u64,
    /// Whole seconds banked from closed run segments.
    #[serde(default)]
    pub accumulated_secs: u64,
    #[serde(default)]
    pub running: bool,
    /// Epoch ms when the open segment began. `Some` iff `running`.
    #[serde(default)]
    pub segment_started_at: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Timer {
    pub fn new(name: &str, target_secs: u64, now_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: normalize_name(name),
            target_secs,
            accumulated_secs: 0,
            running: false,
            segment_started_at: None,
            created_at: clock::to_datetime(now_ms),
        }
    }

    /// Elapsed seconds including the open segment, floored to whole seconds.
    ///
    /// A clock that moved backward contributes nothing (saturating), and a
    /// bounded timer never reads past its target.
    pub fn live_elapsed(&self, now_ms: u64) -> u64 {
        let mut secs = self.accumulated_secs;
        if self.running {
            if let Some(started) = self.segment_started_at {
                secs = secs.saturating_add(now_ms.saturating_sub(started) / 1000);
            }
        }
        if self.target_secs > 0 {
            secs.min(self.target_secs)
        } else {
            secs
        }
    }

    /// A timer is completed iff it has a target and has reached it.
    pub fn is_completed(&self, now_ms: u64) -> bool {
        self.target_secs > 0 && self.live_elapsed(now_ms) >= self.target_secs
    }

    /// Open a run segment. No-op when already running or completed.
    /// Returns whether the timer transitioned.
    pub(crate) fn start_at(&mut self, now_ms: u64) -> bool {
        if self.running || self.is_completed(now_ms) {
            return false;
        }
        self.running = true;
        self.segment_started_at = Some(now_ms);
        true
    }

    /// Close the open run segment, banking its length. No-op when paused.
    /// Returns whether the timer transitioned.
    pub(crate) fn pause_at(&mut self, now_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        self.accumulated_secs = self.live_elapsed(now_ms);
        self.running = false;
        self.segment_started_at = None;
        true
    }

    /// Zero all elapsed accounting (rollover and reset both end here).
    pub(crate) fn zero(&mut self) {
        self.accumulated_secs = 0;
        self.running = false;
        self.segment_started_at = None;
    }

    /// Copy of this timer as it should appear in a closed-day snapshot:
    /// live elapsed folded into `accumulated_secs`, forced non-running.
    pub(crate) fn day_close_snapshot(&self, now_ms: u64) -> Timer {
        let mut snapshot = self.clone();
        snapshot.accumulated_secs = self.live_elapsed(now_ms);
        snapshot.running = false;
        snapshot.segment_started_at = None;
        snapshot
    }
}

/// Trim a display name, falling back to the placeholder when blank.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_TIMER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000_000;

    #[test]
    fn live_elapsed_floors_to_whole_seconds() {
        let mut t = Timer::new("focus", 0, T0);
        t.start_at(T0);
        assert_eq!(t.live_elapsed(T0 + 4_999), 4);
        assert_eq!(t.live_elapsed(T0 + 5_000), 5);
    }

    #[test]
    fn backward_clock_contributes_nothing() {
        let mut t = Timer::new("focus", 0, T0);
        t.start_at(T0);
        assert_eq!(t.live_elapsed(T0 - 60_000), 0);
        t.pause_at(T0 - 60_000);
        assert_eq!(t.accumulated_secs, 0);
    }

    #[test]
    fn bounded_timer_clamps_at_target() {
        let mut t = Timer::new("pomodoro", 60, T0);
        t.start_at(T0);
        assert_eq!(t.live_elapsed(T0 + 90_000), 60);
        assert!(t.is_completed(T0 + 90_000));
    }

    #[test]
    fn start_is_rejected_when_completed() {
        let mut t = Timer::new("pomodoro", 60, T0);
        t.start_at(T0);
        t.pause_at(T0 + 60_000);
        assert_eq!(t.accumulated_secs, 60);
        assert!(!t.start_at(T0 + 61_000));
        assert!(!t.running);
    }

    #[test]
    fn pause_banks_the_segment_once() {
        let mut t = Timer::new("focus", 0, T0);
        t.start_at(T0);
        assert!(t.pause_at(T0 + 5_000));
        assert_eq!(t.accumulated_secs, 5);
        assert!(t.segment_started_at.is_none());
        assert!(!t.pause_at(T0 + 9_000));
        assert_eq!(t.accumulated_secs, 5);
    }

    #[test]
    fn blank_names_fall_back_to_placeholder() {
        assert_eq!(normalize_name("  "), DEFAULT_TIMER_NAME);
        assert_eq!(normalize_name(" Deep Work "), "Deep Work");
    }
}
