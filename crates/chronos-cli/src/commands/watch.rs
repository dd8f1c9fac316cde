use std::ops::ControlFlow;

use tokio::time::Duration;

use chronos_core::{clock, ticker, Config, Database, Event};

use super::{load_engine, print_json, save_engine};

/// Drive the engine at the tick period while anything is running.
///
/// The loop tears itself down when the last timer stops or completes; the
/// next `watch` (or any mutating command followed by `watch`) restarts it.
/// Events go to stdout as JSON lines; the live total goes to stderr so the
/// event stream stays machine-readable.
pub fn run(interval_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let (mut engine, events) = load_engine(&db);
    let config = Config::load_or_default();

    for event in &events {
        report(event, &config);
    }
    save_engine(&db, &engine);

    if !engine.any_running() {
        println!("no running timers");
        return Ok(());
    }

    let period = Duration::from_secs(interval_secs.max(1));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(ticker::run(period, |now_ms| {
        for event in engine.tick_at(now_ms) {
            report(&event, &config);
        }
        save_engine(&db, &engine);

        if engine.any_running() {
            eprint!(
                "\r{} today ",
                clock::format_clock(engine.total_today_at(now_ms))
            );
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    }));

    eprintln!();
    println!("all timers stopped");
    Ok(())
}

fn report(event: &Event, config: &Config) {
    // Terminal bell stands in for the alarm collaborator; actual playback
    // is outside this binary.
    if matches!(event, Event::TimerCompleted { .. }) && config.alarm.enabled {
        eprint!("\x07");
    }
    let _ = print_json(event);
}
