//! Wireflight - native entry point
//!
//! There is no window backend: the binary plays an unattended session on the
//! headless canvas with the autopilot at the controls, logging as it goes.
//! Set `RUST_LOG=info` to follow the flight.

use std::path::PathBuf;

use wireflight::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use wireflight::platform::{RecordingCanvas, ScriptedInput};
use wireflight::session::WINDOW_TITLE;
use wireflight::{Session, Settings};

/// Ticks the demo flies when the settings give no limit (about two simulated minutes)
const DEMO_TICK_LIMIT: u64 = 10_000;

fn main() {
    env_logger::init();
    log::info!("Wireflight (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WIREFLIGHT_SETTINGS").ok())
        .map(PathBuf::from);
    let mut settings = Settings::load_or_default(settings_path.as_deref());

    settings.autopilot = true;
    settings.frame_delay_ms = 0;
    settings.tick_limit.get_or_insert(DEMO_TICK_LIMIT);

    let canvas = RecordingCanvas::open(SCREEN_WIDTH, SCREEN_HEIGHT, WINDOW_TITLE);
    let mut session = Session::new(settings, canvas, ScriptedInput::centered());
    let summary = session.run();

    log::info!("Outcome: {:?} after {} ticks", summary.phase, summary.ticks);
    println!("Final Score: {}", summary.final_score);
}
