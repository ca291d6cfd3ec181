//! Demo-mode pilot
//!
//! Produces the pointer/fire input a player would: keep clear of the
//! terrain, turn toward the nearest obstacle ahead and shoot once it sits
//! under the crosshair.

use glam::Vec2;

use super::state::GameState;
use super::terrain::terrain_height;
use super::tick::TickInput;
use crate::consts::*;
use crate::settings::Settings;
use crate::{normalize_angle, planar_distance_sq};

/// Below this height above the terrain the pilot only climbs
const SAFE_ALTITUDE: f32 = 90.0;
/// Above this height above the terrain the pilot noses down
const CEILING_ALTITUDE: f32 = 420.0;
/// Only obstacles within this bearing of the nose are considered
const TARGET_CONE: f32 = 1.0;
/// Aim error (radians) tolerated before firing
const FIRE_TOLERANCE: f32 = 0.06;
/// Ticks between shots
const FIRE_INTERVAL: u64 = 5;

/// Compute this tick's input for the current state
pub fn pilot(state: &GameState, settings: &Settings) -> TickInput {
    let camera = &state.camera;
    let pos = camera.position;
    let altitude = pos.y - terrain_height(pos.x, pos.z);

    // Nearest obstacle inside the forward cone: (distance², yaw error, desired pitch)
    let target = state
        .obstacles
        .iter()
        .filter_map(|(_, obstacle)| {
            let dx = obstacle.position.x - pos.x;
            let dz = obstacle.position.z - pos.z;
            let yaw_error = normalize_angle(dx.atan2(dz) - camera.yaw());
            if yaw_error.abs() > TARGET_CONE {
                return None;
            }
            let planar_sq = planar_distance_sq(obstacle.position, pos);
            let pitch = (obstacle.position.y - pos.y).atan2(planar_sq.sqrt());
            Some((planar_sq, yaw_error, pitch))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0));

    let (yaw_error, mut desired_pitch) = match target {
        Some((_, yaw_error, pitch)) => (yaw_error, pitch),
        None => (0.0, 0.0),
    };

    if altitude < SAFE_ALTITUDE {
        desired_pitch = MAX_PITCH * 0.6;
    } else if altitude > CEILING_ALTITUDE && target.is_none() {
        desired_pitch = -0.2;
    }
    desired_pitch = desired_pitch.clamp(MIN_PITCH * 0.5, MAX_PITCH);
    let pitch_error = desired_pitch - camera.pitch();

    let pointer = Vec2::new(
        SCREEN_CX as f32 + pointer_offset(yaw_error, settings.yaw_sensitivity, settings, SCREEN_CX),
        SCREEN_CY as f32
            + pointer_offset(pitch_error, settings.pitch_sensitivity, settings, SCREEN_CY),
    );

    let aimed = target.is_some()
        && yaw_error.abs() < FIRE_TOLERANCE
        && pitch_error.abs() < FIRE_TOLERANCE;

    TickInput {
        pointer: Some(pointer),
        fire: aimed && state.time_ticks % FIRE_INTERVAL == 0,
        ..Default::default()
    }
}

/// Pointer offset from centre that corrects `error` radians in one tick, clamped to the screen
fn pointer_offset(error: f32, sensitivity: f32, settings: &Settings, half_extent: i32) -> f32 {
    let gain = sensitivity * settings.steer_rate;
    if gain <= 0.0 {
        return 0.0;
    }
    let limit = half_extent as f32;
    (error / gain).clamp(-limit, limit)
}
