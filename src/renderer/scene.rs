//! In-flight frame: sky, terrain grid, obstacles, bullets, crosshair and HUD

use glam::IVec2;

use super::{DEFAULT_COLOR, palette};
use crate::consts::*;
use crate::platform::Canvas;
use crate::sim::{Camera, GameState, Obstacle, grid_edges};
use crate::{Point3D, format_clock, planar_distance_sq};

/// Terrain edges are kept while both ends fall within this margin of the screen (x only)
const TERRAIN_X_MARGIN: i32 = 200;

/// Cube corner pairs forming the 12 edges
const CUBE_EDGES: [[usize; 2]; 12] = [
    [0, 1], [1, 2], [2, 3], [3, 0],
    [4, 5], [5, 6], [6, 7], [7, 4],
    [0, 4], [1, 5], [2, 6], [3, 7],
];

/// Unit cube corners (scaled by half the edge length)
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0],
];

/// Compose a complete in-flight frame (without flushing)
pub fn draw_frame(canvas: &mut impl Canvas, state: &GameState) {
    canvas.clear_color(palette::BACKGROUND);
    canvas.clear();
    draw_sky(canvas);
    draw_terrain(canvas, &state.camera);
    draw_obstacles(canvas, state);
    draw_bullets(canvas, state);
    draw_crosshair(canvas);
    draw_hud(canvas, state);
}

/// Horizon lines and a wireframe sun
pub fn draw_sky(canvas: &mut impl Canvas) {
    let horizon = SCREEN_CY + 50;

    canvas.color(palette::SKY_LINES);
    for y in (0..horizon).step_by(40) {
        canvas.line(IVec2::new(0, y), IVec2::new(SCREEN_WIDTH, y));
    }

    let sun = IVec2::new(650, 80);
    canvas.color(palette::SUN);
    canvas.circle(sun, 40);
    canvas.circle(sun, 35);
    for i in 0..8 {
        let angle = i as f32 * std::f32::consts::FRAC_PI_4;
        let dir = glam::Vec2::new(angle.cos(), angle.sin());
        let inner = (dir * 45.0).round().as_ivec2();
        let outer = (dir * 60.0).round().as_ivec2();
        canvas.line(sun + inner, sun + outer);
    }
}

/// Terrain wireframe around the camera
pub fn draw_terrain(canvas: &mut impl Canvas, camera: &Camera) {
    let on_screen = |p: IVec2| p.x > -TERRAIN_X_MARGIN && p.x < SCREEN_WIDTH + TERRAIN_X_MARGIN;

    canvas.color(palette::TERRAIN);
    for (a, b) in grid_edges(camera.position) {
        if let (Some(pa), Some(pb)) = (camera.project(a), camera.project(b)) {
            if on_screen(pa) && on_screen(pb) {
                canvas.line(pa, pb);
            }
        }
    }
    canvas.color(DEFAULT_COLOR);
}

/// World-space corners of an obstacle cube, spun about the vertical axis
pub fn cube_corners(obstacle: &Obstacle) -> [Point3D; 8] {
    let half = obstacle.size * 0.5;
    let (sin_r, cos_r) = obstacle.rotation.sin_cos();
    CUBE_CORNERS.map(|[x, y, z]| {
        let (lx, ly, lz) = (x * half, y * half, z * half);
        obstacle.position + Point3D::new(lx * cos_r - lz * sin_r, ly, lx * sin_r + lz * cos_r)
    })
}

/// Draw one cube; cubes closer than 1.5x their size are skipped
pub fn draw_cube(canvas: &mut impl Canvas, obstacle: &Obstacle, camera: &Camera) {
    let min_dist = obstacle.size * 1.5;
    if planar_distance_sq(obstacle.position, camera.position) < min_dist * min_dist {
        return;
    }

    let projected = cube_corners(obstacle).map(|corner| camera.project(corner));
    for [a, b] in CUBE_EDGES {
        if let (Some(pa), Some(pb)) = (projected[a], projected[b]) {
            canvas.line(pa, pb);
        }
    }
}

pub fn draw_obstacles(canvas: &mut impl Canvas, state: &GameState) {
    canvas.color(palette::OBSTACLE);
    for (_, obstacle) in state.obstacles.iter() {
        draw_cube(canvas, obstacle, &state.camera);
    }
    canvas.color(DEFAULT_COLOR);
}

/// Bullets as small crosses, only when strictly inside the screen
pub fn draw_bullets(canvas: &mut impl Canvas, state: &GameState) {
    canvas.color(palette::BULLET);
    for (_, bullet) in state.bullets.iter() {
        let Some(p) = state.camera.project(bullet.position) else {
            continue;
        };
        if p.x > 0 && p.x < SCREEN_WIDTH && p.y > 0 && p.y < SCREEN_HEIGHT {
            canvas.line(p - IVec2::new(3, 0), p + IVec2::new(3, 0));
            canvas.line(p - IVec2::new(0, 3), p + IVec2::new(0, 3));
        }
    }
    canvas.color(DEFAULT_COLOR);
}

pub fn draw_crosshair(canvas: &mut impl Canvas) {
    let c = IVec2::new(SCREEN_CX, SCREEN_CY);
    canvas.color(palette::CROSSHAIR);
    for dir in [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y] {
        canvas.line(c + dir * 5, c + dir * 15);
    }
    canvas.color(DEFAULT_COLOR);
}

/// Score bar, score text, clock, win marker and lives
pub fn draw_hud(canvas: &mut impl Canvas, state: &GameState) {
    canvas.color(palette::HUD);

    let bar_len = (state.score / 5).min(200) as i32;
    for y in 10..=12 {
        canvas.line(IVec2::new(10, y), IVec2::new(10 + bar_len, y));
    }
    canvas.text(IVec2::new(220, 12), &format!("{}/{}", state.score, WIN_SCORE));
    canvas.text(
        IVec2::new(10, 25),
        &format!("Time: {}", format_clock(state.elapsed_seconds())),
    );

    if state.score >= WIN_SCORE {
        canvas.color(palette::GOLD);
        canvas.line(IVec2::new(10, 35), IVec2::new(100, 35));
        canvas.line(IVec2::new(10, 36), IVec2::new(100, 36));
    }

    canvas.color(palette::LIVES);
    canvas.text(IVec2::new(SCREEN_WIDTH - 100, 12), "Lives:");
    for i in 0..state.lives as i32 {
        canvas.circle(IVec2::new(SCREEN_WIDTH - 45 + i * 15, 15), 5);
    }

    canvas.color(DEFAULT_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCommand, RecordingCanvas};
    use glam::Vec3;

    fn canvas() -> RecordingCanvas {
        RecordingCanvas::open(SCREEN_WIDTH, SCREEN_HEIGHT, "test")
    }

    #[test]
    fn test_frame_has_terrain_and_hud() {
        let state = GameState::new(1);
        let mut canvas = canvas();
        draw_frame(&mut canvas, &state);
        canvas.flush();

        assert!(canvas.lines_in(palette::TERRAIN) > 100);
        assert_eq!(canvas.lines_in(palette::CROSSHAIR), 4);
        assert!(canvas.texts().contains(&"0/1000"));
        assert!(canvas.texts().contains(&"Time: 0:00"));
        let lives = canvas
            .last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { radius: 5, .. }))
            .count();
        assert_eq!(lives, START_LIVES as usize);
    }

    #[test]
    fn test_cube_in_view_draws_all_edges() {
        let mut state = GameState::new(1);
        let ahead = state.camera.position + Vec3::Z * 400.0;
        state.obstacles.acquire(Obstacle::new(ahead, 40.0));
        let mut canvas = canvas();
        draw_obstacles(&mut canvas, &state);
        canvas.flush();
        assert_eq!(canvas.lines_in(palette::OBSTACLE), 12);
    }

    #[test]
    fn test_cube_too_close_or_behind_is_skipped() {
        let mut state = GameState::new(1);
        let pos = state.camera.position;
        state.obstacles.acquire(Obstacle::new(pos + Vec3::Z * 40.0, 40.0));
        state.obstacles.acquire(Obstacle::new(pos - Vec3::Z * 400.0, 40.0));
        let mut canvas = canvas();
        draw_obstacles(&mut canvas, &state);
        canvas.flush();
        assert_eq!(canvas.lines_in(palette::OBSTACLE), 0);
    }

    #[test]
    fn test_cube_corners_follow_rotation() {
        let mut obstacle = Obstacle::new(Point3D::ZERO, 2.0);
        let straight = cube_corners(&obstacle);
        assert_eq!(straight[6], Point3D::new(1.0, 1.0, 1.0));
        obstacle.rotation = std::f32::consts::FRAC_PI_2;
        let turned = cube_corners(&obstacle);
        // (1, 1, 1) spun a quarter turn lands on (-1, 1, 1)
        assert!((turned[6] - Point3D::new(-1.0, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_bullet_cross() {
        let mut state = GameState::new(1);
        let pos = state.camera.position;
        state.fire_bullet();
        state.bullets.get_mut(0).unwrap().position = pos + Vec3::Z * 100.0;
        let mut canvas = canvas();
        draw_bullets(&mut canvas, &state);
        canvas.flush();
        assert_eq!(canvas.lines_in(palette::BULLET), 2);
    }

    #[test]
    fn test_win_marker() {
        let mut state = GameState::new(1);
        state.score = WIN_SCORE;
        let mut canvas = canvas();
        draw_hud(&mut canvas, &state);
        canvas.flush();
        assert_eq!(canvas.lines_in(palette::GOLD), 2);
        assert!(canvas.texts().contains(&"1000/1000"));
    }
}
