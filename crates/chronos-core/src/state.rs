//! The persisted application state.
//!
//! `AppState` is the single aggregate the store serializes. The schema is
//! explicitly versioned; fields added after the first release carry
//! `#[serde(default)]` so blobs written by earlier revisions still load
//! (missing fields default to zero/empty/today).

use serde::{Deserialize, Serialize};

use crate::clock;
use crate::history::DailyRecord;
use crate::tracker::Timer;

/// Current persisted-schema version.
pub const STATE_VERSION: u32 = 1;

/// Everything Chronos persists under the `app-data` slot.
///
/// Owned exclusively by the engine; the store treats it as an opaque blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub timers: Vec<Timer>,
    #[serde(default)]
    pub history: Vec<DailyRecord>,
    /// Day key the live timers belong to; a mismatch with "today" triggers
    /// rollover.
    #[serde(default = "clock::today_key")]
    pub last_active_day: String,
    /// Seconds orphaned by delete/reset within the current day.
    #[serde(default)]
    pub banked_secs: u64,
}

fn default_version() -> u32 {
    STATE_VERSION
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            timers: Vec::new(),
            history: Vec::new(),
            last_active_day: clock::today_key(),
            banked_secs: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_versioned_blob_defaults_missing_fields() {
        // The earliest revision persisted neither `version` nor `banked_secs`.
        let json = r#"{"timers": [], "history": [], "last_active_day": "2026-06-01"}"#;
        let state: AppState = serde_json::from_str(json).unwrap();
        assert_eq!(state.version, STATE_VERSION);
        assert_eq!(state.banked_secs, 0);
        assert_eq!(state.last_active_day, "2026-06-01");
    }

    #[test]
    fn default_state_is_zero_valued_today() {
        let state = AppState::default();
        assert!(state.timers.is_empty());
        assert!(state.history.is_empty());
        assert_eq!(state.banked_secs, 0);
        assert_eq!(state.last_active_day, clock::today_key());
    }
}
