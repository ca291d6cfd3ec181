//! Sound cues for gameplay events
//!
//! The native backend has no mixer: every cue rings the terminal bell.

use std::io::Write;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet destroyed an obstacle
    Hit,
    /// Player flew into an obstacle
    Collision,
    /// Ground crash or last life lost
    Crash,
    /// Winning score reached
    Victory,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ObstacleHit { .. } => Some(Self::Hit),
            GameEvent::PlayerHit { .. } => Some(Self::Collision),
            GameEvent::Crashed | GameEvent::OutOfLives => Some(Self::Crash),
            GameEvent::Won { .. } => Some(Self::Victory),
            GameEvent::BulletFired { .. }
            | GameEvent::ObstacleSpawned { .. }
            | GameEvent::SpeedChanged { .. } => None,
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Default)]
pub struct AudioManager {
    muted: bool,
    played: u64,
}

impl AudioManager {
    pub fn new(muted: bool) -> Self {
        if muted {
            log::debug!("Audio muted");
        }
        Self { muted, played: 0 }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Cues played so far (muted cues are not counted)
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::trace!("Playing {effect:?}");

        // A missing or closed terminal just means no sound
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }

    /// Play the cue for `event`, if any
    pub fn on_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}
