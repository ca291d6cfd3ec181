//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod pool;
pub mod state;
pub mod terrain;
pub mod tick;

pub use camera::Camera;
pub use collision::{bullet_hits_obstacle, player_hits_obstacle, resolve_bullet_hits, resolve_player_hits};
pub use pool::Pool;
pub use state::{Bullet, GameEvent, GamePhase, GameState, Obstacle};
pub use terrain::{grid_edges, terrain_height};
pub use tick::{TickInput, tick, update_bullets, update_obstacles};
