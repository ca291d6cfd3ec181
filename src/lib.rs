//! Wireflight - a first-person wireframe flight shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (camera, terrain, entity pools, collisions)
//! - `renderer`: Wireframe scene composition onto a drawing surface
//! - `platform`: Drawing surface / input source boundary
//! - `session`: Frame loop tying input, simulation and rendering together
//! - `settings`: Runtime tuning loaded from JSON

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, SessionSummary};
pub use settings::Settings;

use glam::Vec3;

/// World-space point. Plain value type, freely copied.
pub type Point3D = Vec3;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;
    pub const SCREEN_CX: i32 = SCREEN_WIDTH / 2;
    pub const SCREEN_CY: i32 = SCREEN_HEIGHT / 2;

    /// Terrain wireframe: lines per side of the camera, and world units between lines
    pub const GRID_SIZE: i32 = 20;
    pub const GRID_SPACING: f32 = 25.0;
    pub const RENDER_DISTANCE: f32 = 1200.0;
    pub const RENDER_DIST_SQ: f32 = RENDER_DISTANCE * RENDER_DISTANCE;

    /// Projection
    pub const FOV_SCALE: f32 = 0.8;
    pub const PROJ_DISTANCE: f32 = 300.0;
    /// Camera-space depth below which a point counts as behind the camera
    pub const NEAR_PLANE: f32 = 20.0;

    /// Camera defaults
    pub const START_HEIGHT: f32 = 300.0;
    pub const START_SPEED: f32 = 1.5;
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 10.0;
    pub const MIN_PITCH: f32 = -1.2;
    pub const MAX_PITCH: f32 = 0.8;
    /// Minimum clearance above the terrain before the player crashes
    pub const GROUND_CLEARANCE: f32 = 15.0;

    /// Entity pools
    pub const MAX_OBSTACLES: usize = 15;
    pub const MAX_BULLETS: usize = 10;
    /// Spawner stops once this many obstacles are alive
    pub const MAX_ACTIVE_OBSTACLES: usize = 8;
    /// Planar distance beyond which obstacles are recycled
    pub const OBSTACLE_CULL_DISTANCE: f32 = 1500.0;
    /// Cosmetic spin per tick (radians)
    pub const OBSTACLE_SPIN: f32 = 0.02;
    /// Extra radius added to an obstacle when testing against the player
    pub const PLAYER_RADIUS: f32 = 20.0;
    /// Bullet speed in units per tick
    pub const BULLET_SPEED: f32 = 15.0;

    /// Scoring
    pub const HIT_SCORE: u32 = 100;
    pub const WIN_SCORE: u32 = 1000;
    pub const START_LIVES: u8 = 3;

    /// Duration of one simulation tick (12 ms frame pacing)
    pub const FRAME_SECONDS: f32 = 0.012;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Squared distance on the ground plane (ignores height)
#[inline]
pub fn planar_distance_sq(a: Point3D, b: Point3D) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

/// Squared 3D distance
#[inline]
pub fn distance_sq(a: Point3D, b: Point3D) -> f32 {
    (a - b).length_squared()
}

/// Format whole seconds as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
