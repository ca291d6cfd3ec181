//! Frame loop: input, tick, render, pace
//!
//! A `Session` drives one `GameState` against a `Canvas` and an
//! `InputSource`. While flying it never blocks except for the frame delay;
//! once the game is won or lost it shows the terminal screen and blocks on
//! input until the player restarts or quits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audio::AudioManager;
use crate::format_clock;
use crate::platform::{Canvas, InputEvent, InputSource};
use crate::renderer::{PpmImage, draw_frame, draw_lose_screen, draw_win_screen};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

pub const WINDOW_TITLE: &str = "Wireflight - fly toward the pointer, click to shoot";

/// What the caller should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// A fresh game replaced the finished one
    Restart,
    Quit,
}

/// Outcome of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Score of the game in progress when the session ended
    pub final_score: u32,
    /// Best score across all games, restarts included
    pub best_score: u32,
    pub restarts: u32,
    /// Simulation ticks run across all games
    pub ticks: u64,
    pub phase: GamePhase,
}

pub struct Session<C: Canvas, I: InputSource> {
    state: GameState,
    settings: Settings,
    canvas: C,
    input: I,
    audio: AudioManager,
    win_image: Option<PpmImage>,
    ticks: u64,
    restarts: u32,
    best_score: u32,
}

impl<C: Canvas, I: InputSource> Session<C, I> {
    pub fn new(settings: Settings, canvas: C, input: I) -> Self {
        let seed = settings.session_seed();
        log::info!("Game initialized with seed: {seed}");

        let win_image = settings.win_image.as_deref().and_then(|path| {
            PpmImage::load(path)
                .map_err(|e| log::warn!("Win image {} unavailable: {e}", path.display()))
                .ok()
        });

        Self {
            state: GameState::with_start_speed(seed, settings.start_speed),
            audio: AudioManager::new(!settings.sound),
            settings,
            canvas,
            input,
            win_image,
            ticks: 0,
            restarts: 0,
            best_score: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    /// Run frames until the player quits, the input closes or the tick limit is hit
    pub fn run(&mut self) -> SessionSummary {
        log::info!("Wireflight running!");
        while self.frame() != Flow::Quit {}
        let summary = self.summary();
        log::info!(
            "Session over: score {} (best {}), {} restart(s), {} ticks",
            summary.final_score,
            summary.best_score,
            summary.restarts,
            summary.ticks
        );
        summary
    }

    /// Advance one frame
    pub fn frame(&mut self) -> Flow {
        if self.state.is_terminal() {
            return self.wait_for_choice();
        }

        if self
            .settings
            .tick_limit
            .is_some_and(|limit| self.ticks >= limit)
        {
            log::info!("Tick limit reached");
            return Flow::Quit;
        }

        let Some(mut input) = self.poll_input() else {
            return Flow::Quit;
        };
        input.pointer = Some(self.input.pointer());
        input.autopilot = self.settings.autopilot;

        tick(&mut self.state, &input, &self.settings);
        self.ticks += 1;
        self.best_score = self.best_score.max(self.state.score);
        self.dispatch_events();

        match self.state.phase() {
            GamePhase::Flying => {
                draw_frame(&mut self.canvas, &self.state);
                self.canvas.flush();
                if self.settings.frame_delay_ms > 0 {
                    std::thread::sleep(Duration::from_millis(self.settings.frame_delay_ms));
                }
            }
            GamePhase::GameOver => {
                draw_lose_screen(&mut self.canvas, &self.state);
                self.canvas.flush();
            }
            GamePhase::Won => {
                draw_win_screen(&mut self.canvas, &self.state, self.win_image.as_ref());
                self.canvas.flush();
            }
        }
        Flow::Continue
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            final_score: self.state.score,
            best_score: self.best_score,
            restarts: self.restarts,
            ticks: self.ticks,
            phase: self.state.phase(),
        }
    }

    /// Collect this frame's queued events. `None` means quit.
    fn poll_input(&mut self) -> Option<TickInput> {
        let mut input = TickInput::default();
        while self.input.event_pending() {
            match self.input.poll_event() {
                Some(InputEvent::PrimaryClick) => input.fire = true,
                Some(InputEvent::Key('+' | '=')) => input.speed_presses.push(1),
                Some(InputEvent::Key('-' | '_')) => input.speed_presses.push(-1),
                Some(InputEvent::Key('q' | 'Q')) => return None,
                Some(InputEvent::Key(_)) => {}
                None => break,
            }
        }
        Some(input)
    }

    /// Block on the terminal screen until restart or quit
    fn wait_for_choice(&mut self) -> Flow {
        loop {
            match self.input.wait_event() {
                Some(InputEvent::Key('r' | 'R')) => {
                    self.state.restart();
                    self.restarts += 1;
                    self.canvas.clear_color(crate::renderer::palette::BACKGROUND);
                    return Flow::Restart;
                }
                Some(InputEvent::Key('q' | 'Q')) | None => return Flow::Quit,
                Some(_) => {}
            }
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Crashed | GameEvent::OutOfLives => {
                    log::info!("GAME OVER! Final Score: {}", self.state.score);
                }
                GameEvent::Won { ticks, .. } => {
                    log::info!(
                        "CONGRATULATIONS! You won in {}!",
                        format_clock(self.state.elapsed_seconds())
                    );
                    log::debug!("Won after {ticks} ticks");
                }
                _ => log::trace!("{event:?}"),
            }
            self.audio.on_event(&event);
        }
    }
}
