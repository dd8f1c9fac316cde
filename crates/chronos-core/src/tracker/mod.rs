mod engine;
mod timer;

pub use engine::{TimerSnapshot, TrackerEngine};
pub use timer::{normalize_name, Timer, DEFAULT_TIMER_NAME};
