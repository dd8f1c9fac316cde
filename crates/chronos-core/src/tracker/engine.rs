//! Timer accounting engine.
//!
//! The engine is a wall-clock-based state machine over the timer collection.
//! It does not use internal threads - the caller is responsible for calling
//! `tick()` periodically (about 1 Hz) and after loading persisted state.
//!
//! ## Time accounting
//!
//! Elapsed time is always derived from `now - segment_started_at`, never from
//! counted ticks, so suspended or missed ticks cause no drift. Every mutating
//! operation has an `*_at(..., now_ms)` form; the plain wrappers read the
//! real clock. Unknown timer ids are no-ops, not errors.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TrackerEngine::from_state(db.load_state());
//! engine.tick(); // rollover check + completion detection
//! engine.add_timer("Deep Work", 25);
//! db.save_state(engine.state());
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::clock;
use crate::events::Event;
use crate::history::{self, DailyRecord};
use crate::state::AppState;

use super::timer::{normalize_name, Timer};

/// Read-only view of one timer with its live elapsed resolved.
#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub id: Uuid,
    pub name: String,
    pub target_secs: u64,
    pub elapsed_secs: u64,
    pub running: bool,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Single-writer owner of the whole application state.
///
/// All mutations go through engine operations; each produces a consistent
/// state before returning, so persistence can snapshot at any point.
#[derive(Debug, Clone, Default)]
pub struct TrackerEngine {
    state: AppState,
}

impl TrackerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: AppState) -> Self {
        Self { state }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn timers(&self) -> &[Timer] {
        &self.state.timers
    }

    pub fn history(&self) -> &[DailyRecord] {
        &self.state.history
    }

    pub fn banked_secs(&self) -> u64 {
        self.state.banked_secs
    }

    pub fn last_active_day(&self) -> &str {
        &self.state.last_active_day
    }

    pub fn any_running(&self) -> bool {
        self.state.timers.iter().any(|t| t.running)
    }

    /// Today's aggregate: banked seconds plus every timer's live elapsed.
    /// Recomputed on demand so it is always consistent with running timers.
    pub fn total_today_at(&self, now_ms: u64) -> u64 {
        self.state
            .timers
            .iter()
            .fold(self.state.banked_secs, |acc, t| {
                acc.saturating_add(t.live_elapsed(now_ms))
            })
    }

    pub fn total_today(&self) -> u64 {
        self.total_today_at(clock::now_ms())
    }

    pub fn snapshots_at(&self, now_ms: u64) -> Vec<TimerSnapshot> {
        self.state
            .timers
            .iter()
            .map(|t| TimerSnapshot {
                id: t.id,
                name: t.name.clone(),
                target_secs: t.target_secs,
                elapsed_secs: t.live_elapsed(now_ms),
                running: t.running,
                completed: t.is_completed(now_ms),
                created_at: t.created_at,
            })
            .collect()
    }

    pub fn snapshots(&self) -> Vec<TimerSnapshot> {
        self.snapshots_at(clock::now_ms())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Create a timer. Blank names fall back to the placeholder; 0 minutes
    /// means unbounded.
    pub fn add_timer_at(&mut self, name: &str, minutes: u64, now_ms: u64) -> Event {
        let timer = Timer::new(name, minutes.saturating_mul(60), now_ms);
        let event = Event::TimerAdded {
            timer_id: timer.id,
            name: timer.name.clone(),
            target_secs: timer.target_secs,
            at: clock::to_datetime(now_ms),
        };
        self.state.timers.push(timer);
        event
    }

    pub fn add_timer(&mut self, name: &str, minutes: u64) -> Event {
        self.add_timer_at(name, minutes, clock::now_ms())
    }

    /// Remove a timer, banking its live elapsed so the daily total is
    /// unaffected by the deletion.
    pub fn remove_timer_at(&mut self, id: Uuid, now_ms: u64) -> Option<Event> {
        let index = self.state.timers.iter().position(|t| t.id == id)?;
        let timer = self.state.timers.remove(index);
        let banked = timer.live_elapsed(now_ms);
        self.state.banked_secs = self.state.banked_secs.saturating_add(banked);
        Some(Event::TimerRemoved {
            timer_id: id,
            banked_secs: banked,
            at: clock::to_datetime(now_ms),
        })
    }

    pub fn remove_timer(&mut self, id: Uuid) -> Option<Event> {
        self.remove_timer_at(id, clock::now_ms())
    }

    /// Open a run segment. Rejected while completed.
    pub fn start_at(&mut self, id: Uuid, now_ms: u64) -> Option<Event> {
        let timer = self.state.timers.iter_mut().find(|t| t.id == id)?;
        if !timer.start_at(now_ms) {
            return None;
        }
        Some(Event::TimerStarted {
            timer_id: id,
            at: clock::to_datetime(now_ms),
        })
    }

    pub fn start(&mut self, id: Uuid) -> Option<Event> {
        self.start_at(id, clock::now_ms())
    }

    /// Close the open run segment. A segment that crossed its target while
    /// running surfaces as the completion event instead of a plain pause.
    pub fn pause_at(&mut self, id: Uuid, now_ms: u64) -> Option<Event> {
        let timer = self.state.timers.iter_mut().find(|t| t.id == id)?;
        Self::close_segment(timer, now_ms)
    }

    pub fn pause(&mut self, id: Uuid) -> Option<Event> {
        self.pause_at(id, clock::now_ms())
    }

    /// Pause when running, start when paused.
    pub fn toggle_at(&mut self, id: Uuid, now_ms: u64) -> Option<Event> {
        let running = self.state.timers.iter().find(|t| t.id == id)?.running;
        if running {
            self.pause_at(id, now_ms)
        } else {
            self.start_at(id, now_ms)
        }
    }

    pub fn toggle(&mut self, id: Uuid) -> Option<Event> {
        self.toggle_at(id, clock::now_ms())
    }

    /// Bank live elapsed into the day accumulator, then zero the timer.
    /// Reopens a completed timer (the completion signal re-arms).
    pub fn reset_timer_at(&mut self, id: Uuid, now_ms: u64) -> Option<Event> {
        let timer = self.state.timers.iter_mut().find(|t| t.id == id)?;
        let banked = timer.live_elapsed(now_ms);
        timer.zero();
        self.state.banked_secs = self.state.banked_secs.saturating_add(banked);
        Some(Event::TimerReset {
            timer_id: id,
            banked_secs: banked,
            at: clock::to_datetime(now_ms),
        })
    }

    pub fn reset_timer(&mut self, id: Uuid) -> Option<Event> {
        self.reset_timer_at(id, clock::now_ms())
    }

    /// Update name and/or target duration. Rejected while running.
    ///
    /// Lowering the target to or below the banked elapsed clamps the elapsed
    /// to the new target (the timer lands in the completed sub-state without
    /// a completion signal - that signal is for running timers reaching
    /// their target).
    pub fn edit_timer_at(
        &mut self,
        id: Uuid,
        name: Option<&str>,
        minutes: Option<u64>,
        now_ms: u64,
    ) -> Option<Event> {
        let timer = self.state.timers.iter_mut().find(|t| t.id == id)?;
        if timer.running {
            return None;
        }
        if let Some(name) = name {
            timer.name = normalize_name(name);
        }
        if let Some(minutes) = minutes {
            timer.target_secs = minutes.saturating_mul(60);
            if timer.target_secs > 0 {
                timer.accumulated_secs = timer.accumulated_secs.min(timer.target_secs);
            }
        }
        Some(Event::TimerEdited {
            timer_id: id,
            at: clock::to_datetime(now_ms),
        })
    }

    pub fn edit_timer(&mut self, id: Uuid, name: Option<&str>, minutes: Option<u64>) -> Option<Event> {
        self.edit_timer_at(id, name, minutes, clock::now_ms())
    }

    /// Pause every running timer, each with the single-pause segment-close
    /// logic, independently per timer. Completion events for timers that
    /// crossed their target come first, then the summary event.
    pub fn stop_all_at(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        let mut stopped = 0;
        for timer in &mut self.state.timers {
            if let Some(event) = Self::close_segment(timer, now_ms) {
                stopped += 1;
                if matches!(event, Event::TimerCompleted { .. }) {
                    events.push(event);
                }
            }
        }
        events.push(Event::AllTimersStopped {
            stopped,
            at: clock::to_datetime(now_ms),
        });
        events
    }

    pub fn stop_all(&mut self) -> Vec<Event> {
        self.stop_all_at(clock::now_ms())
    }

    /// Periodic evaluation: day rollover first, then completion detection.
    ///
    /// Call about once per second while anything is running, and once right
    /// after loading persisted state. Completion fires exactly once per
    /// transition into the completed sub-state: only a *running* timer can
    /// cross its target, and crossing force-pauses it.
    pub fn tick_at(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(event) = self.roll_day_at(now_ms) {
            events.push(event);
        }
        for timer in &mut self.state.timers {
            if timer.running && timer.is_completed(now_ms) {
                if let Some(event) = Self::close_segment(timer, now_ms) {
                    events.push(event);
                }
            }
        }
        events
    }

    pub fn tick(&mut self) -> Vec<Event> {
        self.tick_at(clock::now_ms())
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Close a timer's open segment, reporting completion when the segment
    /// crossed the target. `None` when the timer was not running.
    fn close_segment(timer: &mut Timer, now_ms: u64) -> Option<Event> {
        let completed = timer.running && timer.is_completed(now_ms);
        if !timer.pause_at(now_ms) {
            return None;
        }
        if completed {
            Some(Event::TimerCompleted {
                timer_id: timer.id,
                target_secs: timer.target_secs,
                at: clock::to_datetime(now_ms),
            })
        } else {
            Some(Event::TimerPaused {
                timer_id: timer.id,
                elapsed_secs: timer.accumulated_secs,
                at: clock::to_datetime(now_ms),
            })
        }
    }

    /// Close out the previous calendar day when `now_ms` lands on a new one.
    ///
    /// Idempotent: the ledger append is guarded by an existence check, and
    /// once `last_active_day` is advanced the branch is not taken again.
    /// Live elapsed of running timers is read before anything is zeroed, so
    /// time in flight at the boundary lands in the closed day's record.
    fn roll_day_at(&mut self, now_ms: u64) -> Option<Event> {
        let today = clock::day_key(now_ms);
        if self.state.last_active_day == today {
            return None;
        }

        let closing_day = std::mem::replace(&mut self.state.last_active_day, today);
        let total_secs = self.total_today_at(now_ms);

        let mut event = None;
        if (total_secs > 0 || !self.state.timers.is_empty())
            && !history::contains_day(&self.state.history, &closing_day)
        {
            let snapshots = self
                .state
                .timers
                .iter()
                .map(|t| t.day_close_snapshot(now_ms))
                .collect();
            self.state.history.push(DailyRecord {
                date: closing_day.clone(),
                total_secs,
                timers: snapshots,
            });
            event = Some(Event::DayClosed {
                date: closing_day,
                total_secs,
                at: clock::to_datetime(now_ms),
            });
        }

        for timer in &mut self.state.timers {
            timer.zero();
        }
        self.state.banked_secs = 0;
        event
    }
}
