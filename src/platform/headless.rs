//! In-memory canvas and scripted input
//!
//! `RecordingCanvas` keeps the draw commands of the frame being built and of
//! the last flushed frame, so renderer output can be inspected. `ScriptedInput`
//! replays a queue of events and reports itself closed once it runs dry.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};

use super::{Canvas, InputEvent, InputSource, Rgb};

/// A recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    Line { from: IVec2, to: IVec2, color: Rgb },
    Circle { center: IVec2, radius: i32, color: Rgb },
    Text { at: IVec2, text: String, color: Rgb },
    Point { at: IVec2, color: Rgb },
}

/// Canvas that records instead of displaying
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    pub title: String,
    size: IVec2,
    background: Rgb,
    current: Rgb,
    pending: Vec<DrawCommand>,
    presented: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingCanvas {
    /// Open a canvas of the given size
    pub fn open(width: i32, height: i32, title: &str) -> Self {
        log::debug!("Opened {width}x{height} headless canvas \"{title}\"");
        Self {
            title: title.to_string(),
            size: IVec2::new(width, height),
            background: Rgb::BLACK,
            current: Rgb::WHITE,
            pending: Vec::new(),
            presented: Vec::new(),
            frames: 0,
        }
    }

    /// Commands of the most recently flushed frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.presented
    }

    /// Commands drawn since the last flush
    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    /// Number of frames flushed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Lines in the last flushed frame drawn in `color`
    pub fn lines_in(&self, color: Rgb) -> usize {
        self.presented
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { color: drawn, .. } if *drawn == color))
            .count()
    }

    /// Text strings in the last flushed frame
    pub fn texts(&self) -> Vec<&str> {
        self.presented
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> IVec2 {
        self.size
    }

    fn clear_color(&mut self, color: Rgb) {
        self.background = color;
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.pending.push(DrawCommand::Clear(self.background));
    }

    fn color(&mut self, color: Rgb) {
        self.current = color;
    }

    fn line(&mut self, from: IVec2, to: IVec2) {
        self.pending.push(DrawCommand::Line {
            from,
            to,
            color: self.current,
        });
    }

    fn circle(&mut self, center: IVec2, radius: i32) {
        self.pending.push(DrawCommand::Circle {
            center,
            radius,
            color: self.current,
        });
    }

    fn text(&mut self, at: IVec2, text: &str) {
        self.pending.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            color: self.current,
        });
    }

    fn point(&mut self, at: IVec2) {
        self.pending.push(DrawCommand::Point {
            at,
            color: self.current,
        });
    }

    fn flush(&mut self) {
        self.presented = std::mem::take(&mut self.pending);
        self.frames += 1;
    }
}

/// Input replayed from a queue
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pub pointer: Vec2,
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    /// Pointer resting at `pointer`, no events queued
    pub fn new(pointer: Vec2) -> Self {
        Self {
            pointer,
            events: VecDeque::new(),
        }
    }

    /// Pointer at the centre of the default screen
    pub fn centered() -> Self {
        use crate::consts::{SCREEN_CX, SCREEN_CY};
        Self::new(Vec2::new(SCREEN_CX as f32, SCREEN_CY as f32))
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.events.extend(events);
        self
    }
}

impl InputSource for ScriptedInput {
    fn pointer(&self) -> Vec2 {
        self.pointer
    }

    fn event_pending(&self) -> bool {
        !self.events.is_empty()
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    fn wait_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}
