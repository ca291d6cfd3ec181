//! First-person camera: orientation, kinematic motion and perspective projection
//!
//! Orientation is stored as pitch/yaw with the four trig values cached. The
//! angles are only mutable through methods that refresh the cache, so the
//! cached values always match the current angles when `project` runs.

use glam::{IVec2, Vec2, Vec3};

use crate::Point3D;
use crate::consts::*;
use crate::settings::Settings;

/// Largest projected offset from the screen centre, in pixels
const MAX_SCREEN_OFFSET: f32 = 1.0e9;

/// Player camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3D,
    pitch: f32,
    yaw: f32,
    cos_pitch: f32,
    sin_pitch: f32,
    cos_yaw: f32,
    sin_yaw: f32,
    /// Forward distance covered per tick, within [MIN_SPEED, MAX_SPEED]
    speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3D::new(0.0, START_HEIGHT, 0.0), START_SPEED)
    }
}

impl Camera {
    /// Camera at `position` looking along +Z
    pub fn new(position: Point3D, speed: f32) -> Self {
        let mut camera = Self {
            position,
            pitch: 0.0,
            yaw: 0.0,
            cos_pitch: 1.0,
            sin_pitch: 0.0,
            cos_yaw: 1.0,
            sin_yaw: 0.0,
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
        };
        camera.update_trig();
        camera
    }

    /// Camera at `position` with an explicit orientation
    pub fn looking(position: Point3D, pitch: f32, yaw: f32) -> Self {
        let mut camera = Self::new(position, START_SPEED);
        camera.set_orientation(pitch, yaw);
        camera
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Recompute the cached trig values from the current angles
    pub fn update_trig(&mut self) {
        (self.sin_pitch, self.cos_pitch) = self.pitch.sin_cos();
        (self.sin_yaw, self.cos_yaw) = self.yaw.sin_cos();
    }

    /// Set pitch (clamped to the allowed range) and yaw, then refresh trig
    pub fn set_orientation(&mut self, pitch: f32, yaw: f32) {
        self.pitch = pitch.clamp(MIN_PITCH, MAX_PITCH);
        self.yaw = yaw;
        self.update_trig();
    }

    /// Turn toward the pointer.
    ///
    /// The pointer's offset from screen centre is scaled by the pointer
    /// sensitivity and the steer rate and added to yaw/pitch. A pointer below
    /// the centre pitches the nose up. Yaw is unbounded.
    pub fn steer(&mut self, pointer: Vec2, settings: &Settings) {
        let target_yaw = (pointer.x - SCREEN_CX as f32) * settings.yaw_sensitivity;
        let target_pitch = (pointer.y - SCREEN_CY as f32) * settings.pitch_sensitivity;
        self.set_orientation(
            self.pitch + target_pitch * settings.steer_rate,
            self.yaw + target_yaw * settings.steer_rate,
        );
    }

    /// Unit vector the camera is facing
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.sin_yaw * self.cos_pitch,
            self.sin_pitch,
            self.cos_yaw * self.cos_pitch,
        )
    }

    /// Move `speed` units along the facing vector
    pub fn advance(&mut self) {
        self.position += self.forward() * self.speed;
    }

    /// Change speed by `delta`, clamped to [MIN_SPEED, MAX_SPEED]. Returns the new speed.
    pub fn adjust_speed(&mut self, delta: f32) -> f32 {
        self.speed = (self.speed + delta).clamp(MIN_SPEED, MAX_SPEED);
        self.speed
    }

    /// Transform a world point into camera space.
    ///
    /// Yaw is applied first (about the vertical axis), then pitch (about the
    /// resulting horizontal axis). The returned `z` is depth along the view.
    pub fn to_camera_space(&self, point: Point3D) -> Vec3 {
        let d = point - self.position;

        let rx = d.x * self.cos_yaw - d.z * self.sin_yaw;
        let rz = d.x * self.sin_yaw + d.z * self.cos_yaw;
        let ry = d.y;

        Vec3::new(
            rx,
            ry * self.cos_pitch - rz * self.sin_pitch,
            ry * self.sin_pitch + rz * self.cos_pitch,
        )
    }

    /// Project a world point to screen pixels.
    ///
    /// Returns `None` when the point is closer than the near plane (behind or
    /// too near the camera), so depth is never zero or negative when divided.
    pub fn project(&self, point: Point3D) -> Option<IVec2> {
        let v = self.to_camera_space(point);
        if v.z < NEAR_PLANE {
            return None;
        }
        let scale = PROJ_DISTANCE / v.z * FOV_SCALE;
        // Far off-axis points land well off screen but must stay in i32 range
        let offset = |d: f32| (d * scale).clamp(-MAX_SCREEN_OFFSET, MAX_SCREEN_OFFSET) as i32;
        Some(IVec2::new(
            offset(v.x) + SCREEN_CX,
            offset(-v.y) + SCREEN_CY,
        ))
    }
}
