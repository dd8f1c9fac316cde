use clap::Subcommand;
use serde::Serialize;
use uuid::Uuid;

use chronos_core::storage::Config;
use chronos_core::{clock, Database, Event, TimerSnapshot, TrackerEngine};

use super::{load_engine, print_json, save_engine};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Create a timer (0 or omitted minutes = unbounded)
    Add {
        /// Display name (blank falls back to a placeholder)
        name: String,
        /// Target duration in minutes; negatives clamp to 0
        #[arg(long, allow_negative_numbers = true)]
        minutes: Option<i64>,
    },
    /// List timers with live elapsed
    List {
        #[arg(long)]
        json: bool,
    },
    /// Open a run segment
    Start { id: String },
    /// Close the open run segment
    Pause { id: String },
    /// Pause when running, start when paused
    Toggle { id: String },
    /// Bank elapsed into the day accumulator and zero the timer
    Reset { id: String },
    /// Remove the timer, banking its elapsed into the day accumulator
    Remove { id: String },
    /// Update name and/or target duration (rejected while running)
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        minutes: Option<i64>,
    },
    /// Pause every running timer
    StopAll,
    /// Tick, then print the current state as JSON
    Status,
}

#[derive(Serialize)]
struct StatusView {
    date: String,
    total_secs: u64,
    running: usize,
    timers: Vec<TimerSnapshot>,
}

/// Resolve a full UUID or a unique id prefix against the live timers.
fn resolve_id(engine: &TrackerEngine, arg: &str) -> Result<Uuid, Box<dyn std::error::Error>> {
    if let Ok(id) = Uuid::parse_str(arg) {
        if engine.timers().iter().any(|t| t.id == id) {
            return Ok(id);
        }
        return Err(format!("unknown timer id: {arg}").into());
    }

    let needle = arg.to_lowercase();
    let matches: Vec<Uuid> = engine
        .timers()
        .iter()
        .filter(|t| t.id.to_string().starts_with(&needle))
        .map(|t| t.id)
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(format!("unknown timer id: {arg}").into()),
        _ => Err(format!("ambiguous timer id prefix: {arg}").into()),
    }
}

fn clamp_minutes(minutes: i64) -> u64 {
    minutes.max(0) as u64
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let (mut engine, tick_events) = load_engine(&db);

    match action {
        TimerAction::Add { name, minutes } => {
            let minutes = minutes.map(clamp_minutes).unwrap_or_else(|| {
                Config::load_or_default().timer.default_duration_min
            });
            let event = engine.add_timer(&name, minutes);
            print_json(&event)?;
        }
        TimerAction::List { json } => {
            let snapshots = engine.snapshots();
            if json {
                print_json(&snapshots)?;
            } else if snapshots.is_empty() {
                println!("no timers");
            } else {
                for s in &snapshots {
                    let state = if s.running {
                        "running"
                    } else if s.completed {
                        "done"
                    } else {
                        "paused"
                    };
                    let short = &s.id.to_string()[..8];
                    println!(
                        "{short}  {:>9}  [{state}]  {}",
                        clock::format_clock(s.elapsed_secs),
                        s.name
                    );
                }
            }
        }
        TimerAction::Start { id } => {
            let id = resolve_id(&engine, &id)?;
            match engine.start(id) {
                Some(event) => print_json(&event)?,
                None => println!("timer is already running or completed"),
            }
        }
        TimerAction::Pause { id } => {
            let id = resolve_id(&engine, &id)?;
            match engine.pause(id) {
                Some(event) => print_json(&event)?,
                None => println!("timer is not running"),
            }
        }
        TimerAction::Toggle { id } => {
            let id = resolve_id(&engine, &id)?;
            match engine.toggle(id) {
                Some(event) => print_json(&event)?,
                None => println!("timer is completed; reset it to start again"),
            }
        }
        TimerAction::Reset { id } => {
            let id = resolve_id(&engine, &id)?;
            if let Some(event) = engine.reset_timer(id) {
                print_json(&event)?;
            }
        }
        TimerAction::Remove { id } => {
            let id = resolve_id(&engine, &id)?;
            if let Some(event) = engine.remove_timer(id) {
                print_json(&event)?;
            }
        }
        TimerAction::Edit { id, name, minutes } => {
            let id = resolve_id(&engine, &id)?;
            match engine.edit_timer(id, name.as_deref(), minutes.map(clamp_minutes)) {
                Some(event) => print_json(&event)?,
                None => return Err("timer is running; pause it before editing".into()),
            }
        }
        TimerAction::StopAll => {
            for event in engine.stop_all() {
                print_json(&event)?;
            }
        }
        TimerAction::Status => {
            for event in &tick_events {
                if matches!(event, Event::TimerCompleted { .. }) {
                    print_json(event)?;
                }
            }
            let view = StatusView {
                date: engine.last_active_day().to_string(),
                total_secs: engine.total_today(),
                running: engine.timers().iter().filter(|t| t.running).count(),
                timers: engine.snapshots(),
            };
            print_json(&view)?;
        }
    }

    save_engine(&db, &engine);
    Ok(())
}
