pub mod config;
pub mod history;
pub mod sound;
pub mod stats;
pub mod timer;
pub mod watch;

use chronos_core::{Database, Event, TrackerEngine};

/// Load the engine from the state slot and run one rollover-aware tick, so
/// every command sees day boundaries and completions that happened while no
/// process was alive. Returns the events that tick produced.
pub(crate) fn load_engine(db: &Database) -> (TrackerEngine, Vec<Event>) {
    let mut engine = TrackerEngine::from_state(db.load_state());
    let events = engine.tick();
    (engine, events)
}

pub(crate) fn save_engine(db: &Database, engine: &TrackerEngine) {
    db.save_state(engine.state());
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
