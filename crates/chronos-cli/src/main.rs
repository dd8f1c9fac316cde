use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "chronos-cli", version, about = "Chronos CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Tick running timers every second until none are left running
    Watch {
        /// Seconds between ticks
        #[arg(long, default_value = "1")]
        interval_secs: u64,
    },
    /// Daily and historical totals
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Closed-out day records
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Alarm sound settings
    Sound {
        #[command(subcommand)]
        action: commands::sound::SoundAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Watch { interval_secs } => commands::watch::run(interval_secs),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Sound { action } => commands::sound::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
