//! Wireframe rendering
//!
//! Everything is drawn as lines, circles and text on a `Canvas`; the
//! renderer only reads `GameState` and never mutates it.

pub mod ppm;
pub mod scene;
pub mod screens;

pub use ppm::{PpmError, PpmImage, draw_ppm_scaled};
pub use scene::draw_frame;
pub use screens::{draw_lose_screen, draw_win_screen};

use crate::platform::Rgb;

/// Palette
pub mod palette {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb(0, 0, 0);
    pub const SKY_LINES: Rgb = Rgb(30, 30, 80);
    pub const SUN: Rgb = Rgb(255, 200, 50);
    pub const TERRAIN: Rgb = Rgb(100, 255, 100);
    pub const OBSTACLE: Rgb = Rgb(255, 100, 100);
    pub const BULLET: Rgb = Rgb(255, 255, 0);
    pub const CROSSHAIR: Rgb = Rgb(255, 255, 0);
    pub const HUD: Rgb = Rgb(0, 255, 0);
    pub const GOLD: Rgb = Rgb(255, 215, 0);
    pub const LIVES: Rgb = Rgb(255, 100, 100);

    pub const LOSE_BACKGROUND: Rgb = Rgb(60, 20, 20);
    pub const LOSE_TITLE: Rgb = Rgb(255, 50, 50);
    pub const LOSE_STATS: Rgb = Rgb(255, 200, 100);
    pub const HINT: Rgb = Rgb(150, 150, 150);

    pub const WIN_BACKGROUND: Rgb = Rgb(20, 20, 50);
    pub const WIN_BANNER: Rgb = Rgb(255, 255, 0);
    pub const WIN_STATS: Rgb = Rgb(100, 255, 100);
}

/// Colour used when no other applies
pub const DEFAULT_COLOR: Rgb = Rgb::WHITE;
