//! Sound-settings state for the alarm collaborator.
//!
//! The engine only signals completion; whether and how loud anything plays
//! is this collaborator's business. Persisted under the `sound-settings`
//! key-value slot.

use serde::{Deserialize, Serialize};

const VOLUME_STEP: f64 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundSettings {
    /// Volume in `[0, 1]`.
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub muted: bool,
}

fn default_volume() -> f64 {
    0.7
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            muted: false,
        }
    }
}

impl SoundSettings {
    /// Clamp into `[0, 1]`; setting a positive volume unmutes.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        if volume > 0.0 {
            self.muted = false;
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// One step up, rounded to a single decimal to keep repeated steps off
    /// float dust. Unmutes, since the result is always positive.
    pub fn increase(&mut self) {
        self.volume = round1((self.volume + VOLUME_STEP).min(1.0));
        self.muted = false;
    }

    /// One step down, rounded to a single decimal. Does not unmute.
    pub fn decrease(&mut self) {
        self.volume = round1((self.volume - VOLUME_STEP).max(0.0));
    }

    /// What playback should actually use: 0 while muted.
    pub fn effective_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = SoundSettings::default();
        assert_eq!(s.volume, 0.7);
        assert!(!s.muted);
        assert_eq!(s.effective_volume(), 0.7);
    }

    #[test]
    fn set_volume_clamps_and_unmutes() {
        let mut s = SoundSettings::default();
        s.muted = true;
        s.set_volume(1.5);
        assert_eq!(s.volume, 1.0);
        assert!(!s.muted);
        s.set_volume(-0.2);
        assert_eq!(s.volume, 0.0);
    }

    #[test]
    fn stepping_stays_on_tenths() {
        let mut s = SoundSettings::default();
        s.decrease();
        s.decrease();
        assert_eq!(s.volume, 0.5);
        for _ in 0..10 {
            s.increase();
        }
        assert_eq!(s.volume, 1.0);
        for _ in 0..12 {
            s.decrease();
        }
        assert_eq!(s.volume, 0.0);
    }

    #[test]
    fn mute_zeroes_effective_volume_only() {
        let mut s = SoundSettings::default();
        s.toggle_mute();
        assert_eq!(s.effective_volume(), 0.0);
        assert_eq!(s.volume, 0.7);
        s.increase();
        assert!(!s.muted);
        assert_eq!(s.volume, 0.8);
    }
}
