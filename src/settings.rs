//! Game settings and tuning
//!
//! Loaded from an optional JSON file; any missing field keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::START_SPEED;

/// Errors reading a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Steering ===
    /// Fraction of the pointer's target turn applied per tick
    pub steer_rate: f32,
    /// Radians of yaw per pixel of horizontal pointer offset
    pub yaw_sensitivity: f32,
    /// Radians of pitch per pixel of vertical pointer offset
    pub pitch_sensitivity: f32,

    // === Flight ===
    pub start_speed: f32,
    /// Speed change per `+`/`-` key press
    pub speed_step: f32,

    // === Spawning ===
    /// An obstacle spawns with probability 1/N per tick (0 disables spawning)
    pub spawn_one_in: u32,
    /// Fixed RNG seed; the wall clock is used when absent
    pub seed: Option<u64>,

    // === Frontend ===
    /// Delay between frames in milliseconds
    pub frame_delay_ms: u64,
    /// PPM image shown on the win screen
    pub win_image: Option<PathBuf>,
    /// Ring the terminal bell on hits and crashes
    pub sound: bool,
    /// Let the simulation fly itself
    pub autopilot: bool,
    /// Quit after this many ticks
    pub tick_limit: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            steer_rate: 0.06,
            yaw_sensitivity: 0.0008,
            pitch_sensitivity: 0.0006,

            start_speed: START_SPEED,
            speed_step: 0.5,

            spawn_one_in: 40,
            seed: None,

            frame_delay_ms: 12,
            win_image: None,
            sound: true,
            autopilot: false,
            tick_limit: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings from {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Seed for a new session: the configured one, else derived from the clock
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
