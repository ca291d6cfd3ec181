//! Terminal win/lose screens

use glam::IVec2;

use super::palette;
use super::ppm::PpmImage;
use crate::consts::*;
use crate::format_clock;
use crate::platform::Canvas;
use crate::sim::GameState;

/// Edge length of the win-screen portrait
const PORTRAIT_SIZE: i32 = 220;

pub const WIN_BANNER_TEXT: &str = "Thanks for flying! Every target down.";
pub const LOSE_HINT_TEXT: &str = "R to Restart | Q to Quit";

/// Dark red "GAME OVER" screen with score and frozen time
pub fn draw_lose_screen(canvas: &mut impl Canvas, state: &GameState) {
    canvas.clear_color(palette::LOSE_BACKGROUND);
    canvas.clear();

    canvas.color(palette::LOSE_TITLE);
    canvas.text(IVec2::new(SCREEN_CX - 40, SCREEN_CY - 60), "GAME OVER");

    canvas.color(palette::LOSE_STATS);
    canvas.text(
        IVec2::new(SCREEN_CX - 35, SCREEN_CY + 80),
        &format!("Score: {}", state.score),
    );
    canvas.text(
        IVec2::new(SCREEN_CX - 35, SCREEN_CY + 100),
        &format!("Time: {}", format_clock(state.elapsed_seconds())),
    );

    canvas.color(palette::HINT);
    canvas.text(IVec2::new(SCREEN_CX - 75, SCREEN_CY + 140), LOSE_HINT_TEXT);
}

/// Win screen: banner, optional framed portrait, and the winning time
pub fn draw_win_screen(canvas: &mut impl Canvas, state: &GameState, image: Option<&PpmImage>) {
    let size = canvas.size();

    canvas.clear_color(palette::WIN_BACKGROUND);
    canvas.clear();

    canvas.color(palette::WIN_BANNER);
    canvas.text(IVec2::new(size.x / 2 - 250, 25), WIN_BANNER_TEXT);

    let origin = IVec2::new(
        size.x / 2 - PORTRAIT_SIZE / 2,
        size.y / 2 - PORTRAIT_SIZE / 2 + 5,
    );
    if let Some(image) = image {
        image.blit_scaled(canvas, origin, IVec2::splat(PORTRAIT_SIZE));
    }

    // Gold frame, 3px outside the portrait
    let lo = origin - IVec2::splat(3);
    let hi = origin + IVec2::splat(PORTRAIT_SIZE + 3);
    canvas.color(palette::GOLD);
    canvas.line(lo, IVec2::new(hi.x, lo.y));
    canvas.line(IVec2::new(hi.x, lo.y), hi);
    canvas.line(hi, IVec2::new(lo.x, hi.y));
    canvas.line(IVec2::new(lo.x, hi.y), lo);

    canvas.color(palette::WIN_STATS);
    canvas.text(
        IVec2::new(size.x / 2 - 100, size.y - 8),
        &format!(
            "Won in {}! R=Restart Q=Quit",
            format_clock(state.elapsed_seconds())
        ),
    );
}
