//! Game state and core simulation types
//!
//! One `GameState` owns everything a session mutates: the camera, both entity
//! pools, score/lives and the terminal flags. Restart replaces it wholesale.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::pool::Pool;
use super::terrain::terrain_height;
use crate::Point3D;
use crate::consts::*;

/// Current phase of the session, derived from the terminal flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Flying,
    /// Crashed or out of lives
    GameOver,
    /// Reached the winning score
    Won,
}

/// Gameplay events recorded during a tick, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletFired { slot: usize },
    ObstacleSpawned { slot: usize, position: Point3D, size: f32 },
    /// A bullet destroyed an obstacle; carries the new score
    ObstacleHit { slot: usize, score: u32 },
    /// The player flew into an obstacle; carries the remaining lives
    PlayerHit { slot: usize, lives: u8 },
    /// Dropped below the ground clearance
    Crashed,
    OutOfLives,
    Won { score: u32, ticks: u64 },
    SpeedChanged { speed: f32 },
}

/// A spinning wireframe cube
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Point3D,
    /// Edge length, also the bullet hit radius
    pub size: f32,
    /// Cosmetic rotation about the vertical axis (radians)
    pub rotation: f32,
}

impl Obstacle {
    pub fn new(position: Point3D, size: f32) -> Self {
        Self {
            position,
            size,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn spin(&mut self) {
        self.rotation += OBSTACLE_SPIN;
    }
}

/// A projectile travelling in a straight line
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub position: Point3D,
    /// Displacement per tick
    pub velocity: Point3D,
}

impl Bullet {
    /// Bullet leaving the camera along its current facing at `BULLET_SPEED`
    pub fn fired_from(camera: &Camera) -> Self {
        Self {
            position: camera.position,
            velocity: camera.forward() * BULLET_SPEED,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this session was created from
    pub seed: u64,
    /// Spawn randomness
    pub(crate) rng: Pcg32,
    pub camera: Camera,
    pub obstacles: Pool<Obstacle, MAX_OBSTACLES>,
    pub bullets: Pool<Bullet, MAX_BULLETS>,
    pub score: u32,
    pub lives: u8,
    pub game_over: bool,
    /// Sticky once set; freezes the clock
    pub show_win_screen: bool,
    /// Ticks simulated since the session started
    pub time_ticks: u64,
    /// Elapsed ticks captured when the session ended
    pub final_ticks: Option<u64>,
    start_speed: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session at the default start speed
    pub fn new(seed: u64) -> Self {
        Self::with_start_speed(seed, START_SPEED)
    }

    /// Fresh session whose camera starts at `start_speed`
    pub fn with_start_speed(seed: u64, start_speed: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            camera: Camera::new(Point3D::new(0.0, START_HEIGHT, 0.0), start_speed),
            obstacles: Pool::new(),
            bullets: Pool::new(),
            score: 0,
            lives: START_LIVES,
            game_over: false,
            show_win_screen: false,
            time_ticks: 0,
            final_ticks: None,
            start_speed,
            events: Vec::new(),
        }
    }

    /// Discard this session and start another, seeded from the current RNG
    pub fn restart(&mut self) {
        let seed = self.rng.next_u64();
        log::info!("Restarting session with seed {seed}");
        *self = Self::with_start_speed(seed, self.start_speed);
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.show_win_screen {
            GamePhase::Won
        } else {
            GamePhase::Flying
        }
    }

    /// True once the session has been lost or won
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.phase() != GamePhase::Flying
    }

    /// Elapsed ticks, frozen once the session ends
    pub fn elapsed_ticks(&self) -> u64 {
        self.final_ticks.unwrap_or(self.time_ticks)
    }

    /// Elapsed simulated time in whole seconds
    pub fn elapsed_seconds(&self) -> u32 {
        (self.elapsed_ticks() as f32 * FRAME_SECONDS) as u32
    }

    fn freeze_clock(&mut self) {
        if self.final_ticks.is_none() {
            self.final_ticks = Some(self.time_ticks);
        }
    }

    /// Lose the session, recording `cause` (`Crashed` or `OutOfLives`)
    pub fn end_game(&mut self, cause: GameEvent) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.freeze_clock();
        self.events.push(cause);
    }

    /// Enter the win state if the score allows it. Returns true on the transition.
    pub fn check_win(&mut self) -> bool {
        if self.game_over || self.show_win_screen || self.score < WIN_SCORE {
            return false;
        }
        self.show_win_screen = true;
        self.freeze_clock();
        self.events.push(GameEvent::Won {
            score: self.score,
            ticks: self.elapsed_ticks(),
        });
        true
    }

    /// Fire from the first free bullet slot; a full pool is a silent no-op
    pub fn fire_bullet(&mut self) -> Option<usize> {
        let slot = self.bullets.acquire(Bullet::fired_from(&self.camera))?;
        self.events.push(GameEvent::BulletFired { slot });
        Some(slot)
    }

    /// Change camera speed by `delta` within its clamp range
    pub fn adjust_speed(&mut self, delta: f32) {
        let speed = self.camera.adjust_speed(delta);
        self.events.push(GameEvent::SpeedChanged { speed });
    }

    /// Place a new obstacle in the cone ahead of the camera.
    ///
    /// Distance 400-1000 units, bearing within 60 degrees of the camera's
    /// yaw, 30-130 units above the terrain, size 30-60.
    pub fn spawn_obstacle(&mut self) -> Option<usize> {
        self.obstacles.first_free()?;

        let distance: f32 = self.rng.random_range(400.0..1000.0);
        let offset_deg: f32 = self.rng.random_range(-60.0..60.0);
        let lift: f32 = self.rng.random_range(30.0..130.0);
        let size: f32 = self.rng.random_range(30.0..60.0);

        let bearing = self.camera.yaw() + offset_deg.to_radians();
        let x = self.camera.position.x + distance * bearing.sin();
        let z = self.camera.position.z + distance * bearing.cos();
        let position = Point3D::new(x, terrain_height(x, z) + lift, z);

        let slot = self.obstacles.acquire(Obstacle::new(position, size))?;
        self.events.push(GameEvent::ObstacleSpawned { slot, position, size });
        Some(slot)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True with probability `1 / one_in`; zero never fires
    pub(crate) fn roll(&mut self, one_in: u32) -> bool {
        match one_in {
            0 => false,
            1 => true,
            n => self.rng.random_range(0..n) == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planar_distance_sq;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.phase(), GamePhase::Flying);
        assert_eq!(state.obstacles.active_count(), 0);
        assert_eq!(state.bullets.active_count(), 0);
        assert_eq!(state.camera.position, Point3D::new(0.0, START_HEIGHT, 0.0));
    }

    #[test]
    fn test_spawn_within_cone() {
        let mut state = GameState::new(42);
        for _ in 0..MAX_OBSTACLES {
            assert!(state.spawn_obstacle().is_some());
        }
        assert_eq!(state.spawn_obstacle(), None);

        let cam = state.camera.position;
        for (_, obs) in state.obstacles.iter() {
            let dist = planar_distance_sq(obs.position, cam).sqrt();
            assert!((400.0 - 1e-2..=1000.0 + 1e-2).contains(&dist), "distance {dist}");
            let bearing = (obs.position.x - cam.x).atan2(obs.position.z - cam.z);
            assert!(bearing.abs() <= 60f32.to_radians() + 1e-4);
            let lift = obs.position.y - terrain_height(obs.position.x, obs.position.z);
            assert!((30.0 - 1e-3..=130.0 + 1e-3).contains(&lift));
            assert!((30.0..60.0).contains(&obs.size));
            assert_eq!(obs.rotation, 0.0);
        }
    }

    #[test]
    fn test_fire_uses_camera_facing() {
        let mut state = GameState::new(1);
        let slot = state.fire_bullet().unwrap();
        let bullet = state.bullets.get(slot).unwrap();
        assert_eq!(bullet.position, state.camera.position);
        assert!((bullet.velocity.length() - BULLET_SPEED).abs() < 1e-4);
        assert_eq!(state.events(), &[GameEvent::BulletFired { slot }]);
    }

    #[test]
    fn test_fire_pool_exhaustion() {
        let mut state = GameState::new(1);
        for _ in 0..MAX_BULLETS * 3 {
            state.fire_bullet();
        }
        assert_eq!(state.bullets.active_count(), MAX_BULLETS);
    }

    #[test]
    fn test_win_freezes_clock() {
        let mut state = GameState::new(3);
        state.time_ticks = 500;
        state.score = WIN_SCORE;
        assert!(state.check_win());
        assert!(!state.check_win());
        state.time_ticks = 900;
        assert_eq!(state.elapsed_ticks(), 500);
        assert_eq!(state.phase(), GamePhase::Won);
    }

    #[test]
    fn test_game_over_beats_win() {
        let mut state = GameState::new(3);
        state.end_game(GameEvent::Crashed);
        state.score = WIN_SCORE;
        assert!(!state.check_win());
        assert!(!state.show_win_screen);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::with_start_speed(9, 4.0);
        state.spawn_obstacle();
        state.fire_bullet();
        state.score = 700;
        state.lives = 1;
        state.time_ticks = 1234;
        state.end_game(GameEvent::OutOfLives);

        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert!(!state.game_over);
        assert!(!state.show_win_screen);
        assert_eq!(state.final_ticks, None);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.obstacles.active_count(), 0);
        assert_eq!(state.bullets.active_count(), 0);
        assert_eq!(state.camera.speed(), 4.0);
        assert!(state.events().is_empty());
        assert_ne!(state.seed, 9);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(2024);
        let mut b = GameState::new(2024);
        for _ in 0..5 {
            a.spawn_obstacle();
            b.spawn_obstacle();
        }
        let pa: Vec<_> = a.obstacles.iter().map(|(_, o)| *o).collect();
        let pb: Vec<_> = b.obstacles.iter().map(|(_, o)| *o).collect();
        assert_eq!(pa, pb);
    }
}
