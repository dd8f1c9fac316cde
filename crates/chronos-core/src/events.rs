use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every observable state transition in the engine produces an `Event`.
///
/// The CLI prints them; the alarm collaborator listens for
/// [`Event::TimerCompleted`], which fires exactly once per transition into
/// the completed sub-state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerAdded {
        timer_id: Uuid,
        name: String,
        target_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        timer_id: Uuid,
        at: DateTime<Utc>,
    },
    TimerPaused {
        timer_id: Uuid,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// A timer with a target reached it and was force-paused.
    TimerCompleted {
        timer_id: Uuid,
        target_secs: u64,
        at: DateTime<Utc>,
    },
    /// Elapsed time was banked into the day accumulator and the timer zeroed.
    TimerReset {
        timer_id: Uuid,
        banked_secs: u64,
        at: DateTime<Utc>,
    },
    /// Elapsed time was banked into the day accumulator and the timer removed.
    TimerRemoved {
        timer_id: Uuid,
        banked_secs: u64,
        at: DateTime<Utc>,
    },
    TimerEdited {
        timer_id: Uuid,
        at: DateTime<Utc>,
    },
    AllTimersStopped {
        stopped: usize,
        at: DateTime<Utc>,
    },
    /// A calendar day was closed out into the history ledger.
    DayClosed {
        date: String,
        total_secs: u64,
        at: DateTime<Utc>,
    },
}
