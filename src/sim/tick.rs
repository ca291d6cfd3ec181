//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame, in a fixed order:
//! steer, refresh trig, fly forward, ground check, terminal checks, then
//! bullets, obstacles, collisions, and finally the frame's fire/speed input.

use glam::Vec2;

use super::autopilot;
use super::collision::{resolve_bullet_hits, resolve_player_hits};
use super::state::{GameEvent, GameState};
use super::terrain::terrain_height;
use crate::consts::*;
use crate::settings::Settings;
use crate::{distance_sq, planar_distance_sq};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in screen pixels; `None` holds the current heading
    pub pointer: Option<Vec2>,
    /// Primary click this frame
    pub fire: bool,
    /// Speed key presses this frame in arrival order (`+` is 1, `-` is -1).
    /// Each press is clamped on its own.
    pub speed_presses: Vec<i8>,
    /// Let the autopilot steer and fire
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings) {
    // Win/lose screens freeze the simulation until restart
    if state.is_terminal() {
        return;
    }

    // Speed keys stay with the player even under the autopilot
    let speed_presses = &input.speed_presses;

    let piloted;
    let input = if input.autopilot {
        piloted = autopilot::pilot(state, settings);
        &piloted
    } else {
        input
    };

    state.time_ticks += 1;

    match input.pointer {
        Some(pointer) => state.camera.steer(pointer, settings),
        None => state.camera.update_trig(),
    }
    state.camera.advance();

    let cam = state.camera.position;
    if cam.y < terrain_height(cam.x, cam.z) + GROUND_CLEARANCE {
        log::info!("CRASHED INTO GROUND at ({:.0}, {:.0}, {:.0})", cam.x, cam.y, cam.z);
        state.end_game(GameEvent::Crashed);
        return;
    }

    if state.check_win() {
        return;
    }

    update_bullets(state);
    update_obstacles(state, settings);
    resolve_bullet_hits(state);
    resolve_player_hits(state);

    if state.game_over {
        return;
    }
    if state.check_win() {
        log::info!("Score {WIN_SCORE} reached");
        return;
    }

    if input.fire {
        state.fire_bullet();
    }
    for &press in speed_presses {
        state.adjust_speed(f32::from(press) * settings.speed_step);
        log::info!("Speed: {:.1}", state.camera.speed());
    }
}

/// Integrate bullets and drop those out of range or under the terrain
pub fn update_bullets(state: &mut GameState) {
    let cam = state.camera.position;
    let max_dist_sq = (2.0 * RENDER_DISTANCE) * (2.0 * RENDER_DISTANCE);

    state.bullets.retain(|bullet| {
        bullet.advance();
        let p = bullet.position;
        distance_sq(p, cam) <= max_dist_sq && p.y >= terrain_height(p.x, p.z)
    });
}

/// Spin obstacles, recycle distant ones, and maybe spawn a new one
pub fn update_obstacles(state: &mut GameState, settings: &Settings) {
    let cam = state.camera.position;
    let max_dist_sq = OBSTACLE_CULL_DISTANCE * OBSTACLE_CULL_DISTANCE;

    let culled = state.obstacles.retain(|obstacle| {
        obstacle.spin();
        planar_distance_sq(obstacle.position, cam) <= max_dist_sq
    });
    if culled > 0 {
        log::debug!("Recycled {culled} distant obstacle(s)");
    }

    if !state.show_win_screen
        && state.obstacles.active_count() < MAX_ACTIVE_OBSTACLES
        && state.roll(settings.spawn_one_in)
    {
        if let Some(slot) = state.spawn_obstacle() {
            log::debug!("Spawned obstacle in slot {slot}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point3D;
    use crate::sim::state::{Bullet, GamePhase, Obstacle};
    use glam::Vec3;

    /// Settings with the spawner disabled so scenarios stay controlled
    fn quiet_settings() -> Settings {
        Settings {
            spawn_one_in: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_flies_forward() {
        let settings = quiet_settings();
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.time_ticks, 1);
        assert!((state.camera.position.z - START_SPEED).abs() < 1e-5);
        assert_eq!(state.phase(), GamePhase::Flying);
    }

    #[test]
    fn test_shooting_scenario() {
        // Obstacle 500 units straight ahead; keep firing until it is hit
        let settings = quiet_settings();
        let mut state = GameState::new(1);
        let ahead = state.camera.position + Vec3::Z * 500.0;
        let target = state.obstacles.acquire(Obstacle::new(ahead, 40.0)).unwrap();

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let mut hit_tick = None;
        for t in 1..=40 {
            tick(&mut state, &fire, &settings);
            if state.score > 0 {
                hit_tick = Some(t);
                break;
            }
        }

        let hit_tick = hit_tick.expect("obstacle was never hit");
        assert!((30..=36).contains(&hit_tick), "hit on tick {hit_tick}");
        assert_eq!(state.score, HIT_SCORE);
        assert!(!state.obstacles.is_active(target));
        // The scoring bullet's slot was freed and refilled by this tick's shot
        let refill = state.bullets.get(0).unwrap();
        assert_eq!(refill.position, state.camera.position);
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_ground_crash_on_exact_tick() {
        let settings = quiet_settings();
        let mut state = GameState::new(5);
        // Dive steeply from low altitude
        state.camera.position = Point3D::new(0.0, 40.0, 0.0);
        state.camera.set_orientation(-1.2, 0.0);
        state.camera.adjust_speed(10.0);

        let mut crash_tick = None;
        for t in 1..=20u64 {
            let before = state.camera.position + state.camera.forward() * state.camera.speed();
            let will_crash = before.y < terrain_height(before.x, before.z) + GROUND_CLEARANCE;
            tick(&mut state, &TickInput::default(), &settings);
            assert_eq!(state.game_over, will_crash, "tick {t}");
            if will_crash {
                crash_tick = Some(t);
                break;
            }
        }

        let crash_tick = crash_tick.expect("never crashed");
        assert_eq!(state.final_ticks, Some(crash_tick));
        assert!(state.drain_events().contains(&GameEvent::Crashed));

        // Frozen afterwards
        let frozen = state.camera.position;
        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.camera.position, frozen);
        assert_eq!(state.time_ticks, crash_tick);
    }

    #[test]
    fn test_win_freezes_session() {
        let settings = quiet_settings();
        let mut state = GameState::new(8);
        state.score = WIN_SCORE - HIT_SCORE;
        let ahead = state.camera.position + Vec3::Z * 100.0;
        state.obstacles.acquire(Obstacle::new(ahead, 40.0));
        state.bullets.acquire(Bullet {
            position: ahead - Vec3::Z * 20.0,
            velocity: Vec3::Z * BULLET_SPEED,
        });

        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.score, WIN_SCORE);
        assert!(state.show_win_screen);
        assert_eq!(state.final_ticks, Some(1));

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), &settings);
        }
        assert_eq!(state.final_ticks, Some(1));
        assert_eq!(state.elapsed_ticks(), 1);
        assert!(state.show_win_screen);
    }

    #[test]
    fn test_bullets_culled_by_range_and_terrain() {
        let settings = quiet_settings();
        let mut state = GameState::new(2);
        let cam = state.camera.position;
        // Far beyond twice the render distance
        state.bullets.acquire(Bullet {
            position: cam + Vec3::X * 2500.0,
            velocity: Vec3::ZERO,
        });
        // Heading into the ground
        state.bullets.acquire(Bullet {
            position: Point3D::new(500.0, 50.0, 500.0),
            velocity: Vec3::new(0.0, -100.0, 0.0),
        });
        // Harmless, stays
        state.bullets.acquire(Bullet {
            position: cam + Vec3::Z * 200.0,
            velocity: Vec3::Z,
        });

        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.bullets.active_count(), 1);
        assert!(state.bullets.is_active(2));
    }

    #[test]
    fn test_obstacles_spin_and_recycle() {
        let settings = quiet_settings();
        let mut state = GameState::new(2);
        let cam = state.camera.position;
        let near = state.obstacles.acquire(Obstacle::new(cam + Vec3::new(300.0, 0.0, 300.0), 30.0)).unwrap();
        let far = state.obstacles.acquire(Obstacle::new(cam + Vec3::X * 1600.0, 30.0)).unwrap();

        tick(&mut state, &TickInput::default(), &settings);
        assert!(state.obstacles.is_active(near));
        assert!(!state.obstacles.is_active(far));
        assert!((state.obstacles.get(near).unwrap().rotation - OBSTACLE_SPIN).abs() < 1e-6);
    }

    #[test]
    fn test_spawner_respects_active_cap() {
        let settings = Settings {
            spawn_one_in: 1,
            ..Default::default()
        };
        let mut state = GameState::new(77);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), &settings);
        }
        assert_eq!(state.obstacles.active_count(), MAX_ACTIVE_OBSTACLES);
    }

    #[test]
    fn test_speed_presses() {
        let settings = quiet_settings();
        let mut state = GameState::new(2);
        let faster = TickInput {
            speed_presses: vec![1; 3],
            ..Default::default()
        };
        tick(&mut state, &faster, &settings);
        assert!((state.camera.speed() - (START_SPEED + 1.5)).abs() < 1e-6);

        let slower = TickInput {
            speed_presses: vec![-1; 100],
            ..Default::default()
        };
        tick(&mut state, &slower, &settings);
        assert_eq!(state.camera.speed(), MIN_SPEED);
    }

    #[test]
    fn test_each_speed_press_clamps() {
        let settings = quiet_settings();
        let mut state = GameState::new(2);
        state.camera.adjust_speed(MAX_SPEED);
        state.drain_events();

        let input = TickInput {
            speed_presses: vec![1, -1],
            ..Default::default()
        };
        tick(&mut state, &input, &settings);

        // `+` is lost against the ceiling, `-` still takes effect
        assert_eq!(state.camera.speed(), MAX_SPEED - settings.speed_step);
        let changes: Vec<_> = state
            .events()
            .iter()
            .filter_map(|e| match e {
                GameEvent::SpeedChanged { speed } => Some(*speed),
                _ => None,
            })
            .collect();
        assert_eq!(changes, vec![MAX_SPEED, MAX_SPEED - settings.speed_step]);
    }

    #[test]
    fn test_speed_presses_survive_autopilot() {
        let settings = quiet_settings();
        let mut state = GameState::new(2);
        let input = TickInput {
            autopilot: true,
            speed_presses: vec![1],
            ..Default::default()
        };
        tick(&mut state, &input, &settings);
        assert_eq!(state.camera.speed(), START_SPEED + settings.speed_step);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                pointer: Some(Vec2::new(500.0, 320.0)),
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                pointer: Some(Vec2::new(200.0, 280.0)),
                speed_presses: vec![1],
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, &settings);
                tick(&mut state2, input, &settings);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.camera, state2.camera);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.events(), state2.events());
        let o1: Vec<_> = state1.obstacles.iter().map(|(i, o)| (i, *o)).collect();
        let o2: Vec<_> = state2.obstacles.iter().map(|(i, o)| (i, *o)).collect();
        assert_eq!(o1, o2);
    }
}
