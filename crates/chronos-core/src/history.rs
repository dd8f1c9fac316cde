//! History ledger: closed-out daily records and their summary statistics.
//!
//! Records are append-only; the only writer is the engine's day rollover,
//! which guards on [`contains_day`] so a day is never recorded twice.

use serde::{Deserialize, Serialize};

use crate::tracker::Timer;

/// Immutable snapshot of one past day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar day key (`YYYY-MM-DD`, local time zone), unique in history.
    pub date: String,
    /// Total seconds attributed to the day, banked accumulator included.
    pub total_secs: u64,
    /// The timer collection as it stood at day close, all non-running.
    pub timers: Vec<Timer>,
}

impl DailyRecord {
    /// Number of timers tracked that day (displayed as "sessions").
    pub fn session_count(&self) -> usize {
        self.timers.len()
    }
}

/// Summary statistics over the whole ledger.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HistoryStats {
    pub days: usize,
    pub total_secs: u64,
    /// `total_secs / days`, rounded; 0 when the ledger is empty.
    pub average_secs_per_day: u64,
}

/// Whether the ledger already holds a record for `date`.
pub fn contains_day(history: &[DailyRecord], date: &str) -> bool {
    history.iter().any(|r| r.date == date)
}

/// Records ordered most recent first. Day keys sort lexicographically.
pub fn sorted_desc(history: &[DailyRecord]) -> Vec<DailyRecord> {
    let mut records = history.to_vec();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

pub fn stats(history: &[DailyRecord]) -> HistoryStats {
    let days = history.len();
    let total_secs: u64 = history.iter().map(|r| r.total_secs).sum();
    let average_secs_per_day = if days == 0 {
        0
    } else {
        (total_secs + days as u64 / 2) / days as u64
    };
    HistoryStats {
        days,
        total_secs,
        average_secs_per_day,
    }
}
