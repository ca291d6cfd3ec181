//! Collision detection and scoring
//!
//! Two brute-force passes per tick, sized for at most 10 bullets and 15
//! obstacles: bullets against obstacles (scores), then the camera against
//! obstacles (costs lives). All tests compare squared distances with a
//! strict `<`, so touching exactly at the radius is a miss.

use super::state::{GameEvent, GameState, Obstacle};
use crate::consts::{HIT_SCORE, PLAYER_RADIUS};
use crate::{Point3D, distance_sq};

/// Whether a bullet at `bullet` is inside `obstacle`'s hit sphere
#[inline]
pub fn bullet_hits_obstacle(bullet: Point3D, obstacle: &Obstacle) -> bool {
    distance_sq(bullet, obstacle.position) < obstacle.size * obstacle.size
}

/// Whether the camera at `camera` touches `obstacle`
#[inline]
pub fn player_hits_obstacle(camera: Point3D, obstacle: &Obstacle) -> bool {
    let reach = obstacle.size + PLAYER_RADIUS;
    distance_sq(camera, obstacle.position) < reach * reach
}

/// Resolve bullet/obstacle hits. Returns the number of hits.
///
/// Each bullet scores at most once per tick: it is matched against the first
/// active obstacle (in slot order) that it overlaps, and both are removed.
pub fn resolve_bullet_hits(state: &mut GameState) -> u32 {
    let mut hits = 0;

    let bullets: Vec<(usize, Point3D)> = state
        .bullets
        .iter()
        .map(|(slot, b)| (slot, b.position))
        .collect();

    for (bullet_slot, position) in bullets {
        let target = state
            .obstacles
            .iter()
            .find(|(_, obstacle)| bullet_hits_obstacle(position, obstacle))
            .map(|(slot, _)| slot);

        if let Some(obstacle_slot) = target {
            state.bullets.release(bullet_slot);
            state.obstacles.release(obstacle_slot);
            state.score += HIT_SCORE;
            hits += 1;
            log::info!("HIT! Score: {}", state.score);
            state.push_event(GameEvent::ObstacleHit {
                slot: obstacle_slot,
                score: state.score,
            });
        }
    }

    hits
}

/// Resolve camera/obstacle contacts. Returns the number of lives lost.
///
/// Every touching obstacle is destroyed and costs one life. Running out of
/// lives ends the session once the whole pass is done.
pub fn resolve_player_hits(state: &mut GameState) -> u32 {
    let mut lost = 0;
    let camera = state.camera.position;

    let touching: Vec<usize> = state
        .obstacles
        .iter()
        .filter(|(_, obstacle)| player_hits_obstacle(camera, obstacle))
        .map(|(slot, _)| slot)
        .collect();

    for slot in touching {
        state.obstacles.release(slot);
        state.lives = state.lives.saturating_sub(1);
        lost += 1;
        log::info!("COLLISION! Lives remaining: {}", state.lives);
        state.push_event(GameEvent::PlayerHit {
            slot,
            lives: state.lives,
        });
    }

    if lost > 0 && state.lives == 0 {
        log::info!("Out of lives");
        state.end_game(GameEvent::OutOfLives);
    }

    lost
}
