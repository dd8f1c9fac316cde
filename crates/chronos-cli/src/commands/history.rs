use clap::Subcommand;

use chronos_core::{clock, history, Database};

use super::{load_engine, print_json, save_engine};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Closed-out days, most recent first
    List {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let (engine, _) = load_engine(&db);

    match action {
        HistoryAction::List { json } => {
            let records = history::sorted_desc(engine.history());
            if json {
                print_json(&records)?;
            } else if records.is_empty() {
                println!("no history yet");
            } else {
                for record in &records {
                    let sessions = record.session_count();
                    let plural = if sessions == 1 { "session" } else { "sessions" };
                    println!(
                        "{}  {:>9}  {sessions} {plural}",
                        clock::format_day_key(&record.date),
                        clock::format_clock(record.total_secs),
                    );
                }
            }
        }
    }

    save_engine(&db, &engine);
    Ok(())
}
