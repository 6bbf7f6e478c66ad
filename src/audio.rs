//! Sound events reported by the simulation
//!
//! The core never plays audio itself. Controllers queue [`SoundType`]s during a
//! frame and the orchestrator hands them to an [`AudioService`] once the frame
//! has been resolved.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundType {
    /// A timed power-up was switched on (or the bomb went off)
    PowerupEnabled,
    /// A timed power-up ran out
    PowerupDisabled,
    /// Player fired (once per trigger pull, not per bullet)
    BulletFire,
    /// Enemy destroyed
    Explosion,
}

/// Audio collaborator: fire-and-forget sound playback
pub trait AudioService {
    fn play_sound(&mut self, sound: SoundType);
}

/// Records every sound in order; used by tests and the headless runner
#[derive(Debug, Clone, Default)]
pub struct SoundLog {
    pub played: Vec<SoundType>,
}

impl SoundLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `sound` was played
    pub fn count(&self, sound: SoundType) -> usize {
        self.played.iter().filter(|&&s| s == sound).count()
    }

    pub fn clear(&mut self) {
        self.played.clear();
    }
}

impl AudioService for SoundLog {
    fn play_sound(&mut self, sound: SoundType) {
        self.played.push(sound);
    }
}

/// Audio backend that only writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioService for LogAudio {
    fn play_sound(&mut self, sound: SoundType) {
        log::trace!("play sound {:?}", sound);
    }
}
