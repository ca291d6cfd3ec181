//! Platform abstraction layer
//!
//! The simulation never talks to a window directly. Frontends provide:
//! - `Canvas`: a fixed-size drawing surface with line/circle/text/pixel primitives
//! - `InputSource`: pointer position plus a queue of key/click events
//!
//! `headless` has in-memory implementations for tests and unattended runs.

pub mod headless;

pub use headless::{DrawCommand, RecordingCanvas, ScriptedInput};

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// Drawing surface. Coordinates are screen pixels, y grows downward.
pub trait Canvas {
    /// Width and height in pixels
    fn size(&self) -> IVec2;
    /// Set the colour `clear` fills with
    fn clear_color(&mut self, color: Rgb);
    /// Fill the whole surface with the clear colour
    fn clear(&mut self);
    /// Set the colour for subsequent primitives
    fn color(&mut self, color: Rgb);
    fn line(&mut self, from: IVec2, to: IVec2);
    fn circle(&mut self, center: IVec2, radius: i32);
    fn text(&mut self, at: IVec2, text: &str);
    fn point(&mut self, at: IVec2);
    /// Present the frame
    fn flush(&mut self);
}

/// Discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(char),
    PrimaryClick,
}

/// Pointer and event source
pub trait InputSource {
    /// Current pointer position in screen pixels
    fn pointer(&self) -> Vec2;
    /// Whether an event is ready without blocking
    fn event_pending(&self) -> bool;
    /// Next event if one is ready
    fn poll_event(&mut self) -> Option<InputEvent>;
    /// Block until an event arrives; `None` means the source is closed
    fn wait_event(&mut self) -> Option<InputEvent>;
}
