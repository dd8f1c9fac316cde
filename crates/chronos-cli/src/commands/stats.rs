use clap::Subcommand;
use serde::Serialize;

use chronos_core::{history, Database};

use super::{load_engine, print_json, save_engine};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's running total
    Today,
    /// All-time ledger statistics
    History,
}

#[derive(Serialize)]
struct TodayView {
    date: String,
    banked_secs: u64,
    live_secs: u64,
    total_secs: u64,
    timers: usize,
    running: usize,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let (engine, _) = load_engine(&db);

    match action {
        StatsAction::Today => {
            let total_secs = engine.total_today();
            let view = TodayView {
                date: engine.last_active_day().to_string(),
                banked_secs: engine.banked_secs(),
                live_secs: total_secs - engine.banked_secs(),
                total_secs,
                timers: engine.timers().len(),
                running: engine.timers().iter().filter(|t| t.running).count(),
            };
            print_json(&view)?;
        }
        StatsAction::History => {
            let stats = history::stats(engine.history());
            print_json(&stats)?;
        }
    }

    // The load tick may have rolled the day or completed timers.
    save_engine(&db, &engine);
    Ok(())
}
