use clap::Subcommand;

use chronos_core::Database;

use super::print_json;

#[derive(Subcommand)]
pub enum SoundAction {
    /// Print the current sound settings
    Show,
    /// Set the volume (clamped to [0, 1]; positive values unmute)
    Volume {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Toggle mute
    Mute,
    /// Volume one step up
    Up,
    /// Volume one step down
    Down,
}

pub fn run(action: SoundAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut sound = db.load_sound();

    match action {
        SoundAction::Show => {}
        SoundAction::Volume { value } => sound.set_volume(value),
        SoundAction::Mute => sound.toggle_mute(),
        SoundAction::Up => sound.increase(),
        SoundAction::Down => sound.decrease(),
    }

    db.save_sound(&sound);
    print_json(&sound)?;
    Ok(())
}
