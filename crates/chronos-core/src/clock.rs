//! Wall-clock reads, day keys, and duration formatting.
//!
//! Everything time-related the engine consumes goes through this module so
//! tests can drive the `*_at` engine operations with simulated epoch-ms
//! values and still agree with the engine about day boundaries.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Convert an epoch-ms instant to a UTC datetime (for event timestamps).
pub fn to_datetime(now_ms: u64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(now_ms as i64).unwrap_or_else(Utc::now)
}

/// Calendar day key (`YYYY-MM-DD`, local time zone) for an epoch-ms instant.
///
/// Day boundaries follow the local time zone: a timer running at 23:59 local
/// belongs to that local day regardless of the UTC date.
pub fn day_key(now_ms: u64) -> String {
    to_datetime(now_ms)
        .with_timezone(&Local)
        .format("%Y-%m-%d")
        .to_string()
}

/// Day key for the current instant.
pub fn today_key() -> String {
    day_key(now_ms())
}

/// Compact clock format: `MM:SS`, or `HH:MM:SS` once there is a full hour.
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Human format: `42s`, `5min`, `2h`, or `2h 5min`.
pub fn format_verbose(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    match (hours, minutes) {
        (0, 0) => format!("{total_secs}s"),
        (0, m) => format!("{m}min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}min"),
    }
}

/// Display form of a `YYYY-MM-DD` day key, e.g. `Thu 07 Jun`.
///
/// Returns the key unchanged if it does not parse.
pub fn format_day_key(key: &str) -> String {
    match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
        Ok(date) => date.format("%a %d %b").to_string(),
        Err(_) => key.to_string(),
    }
}
