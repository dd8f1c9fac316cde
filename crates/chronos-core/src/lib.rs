//! # Chronos Core Library
//!
//! Core business logic for Chronos, a personal time tracker: named timers
//! with start/pause/reset, a live "total today" aggregate, day rollover into
//! a per-day history ledger, and durable local persistence. The CLI binary is
//! a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Tracker Engine**: a wall-clock-based state machine over the timer
//!   collection; the caller invokes `tick()` periodically (about 1 Hz) for
//!   completion detection and day rollover
//! - **History Ledger**: append-only daily records with summary statistics
//! - **Storage**: SQLite key-value slots for application state and sound
//!   settings, TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TrackerEngine`]: owner of the timer collection and the persisted state
//! - [`Database`]: key-value persistence for state snapshots
//! - [`Config`]: application configuration management
//! - [`Event`]: one variant per observable state transition

pub mod clock;
pub mod error;
pub mod events;
pub mod history;
pub mod sound;
pub mod state;
pub mod storage;
pub mod ticker;
pub mod tracker;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use history::{DailyRecord, HistoryStats};
pub use sound::SoundSettings;
pub use state::AppState;
pub use storage::{Config, Database};
pub use tracker::{Timer, TimerSnapshot, TrackerEngine};
