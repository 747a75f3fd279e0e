//! Orbit camera around the world origin.

use crate::matrix::Matrix4;
use crate::vector::Vector3;

pub const MIN_RADIUS: f64 = 1.0;
pub const MAX_RADIUS: f64 = 50.0;
/// Pitch is kept strictly inside ±90° so the view direction never lines up
/// with the world up vector.
pub const PITCH_LIMIT_DEG: f64 = 89.0;
pub const DEFAULT_RADIUS: f64 = 6.0;
pub const DEFAULT_YAW_DEG: f64 = 35.0;
pub const DEFAULT_PITCH_DEG: f64 = 20.0;
/// Radians of orbit per pixel of pointer drag.
pub const DEFAULT_DRAG_SENSITIVITY: f64 = 0.008;

/// World up, shared by every view matrix.
pub const WORLD_UP: Vector3 = Vector3::UNIT_Y;

/// A camera on a sphere around the origin, always looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    radius: f64,
    /// Azimuth around +Y, radians.
    yaw: f64,
    /// Elevation above the XZ plane, radians.
    pitch: f64,
}

impl OrbitCamera {
    /// Non-finite inputs fall back to the default orbit.
    pub fn new(radius: f64, yaw: f64, pitch: f64) -> Self {
        Self {
            radius: clamp_radius(finite_or(radius, DEFAULT_RADIUS)),
            yaw: finite_or(yaw, DEFAULT_YAW_DEG.to_radians()),
            pitch: clamp_pitch(finite_or(pitch, DEFAULT_PITCH_DEG.to_radians())),
        }
    }

    pub fn from_degrees(radius: f64, yaw_deg: f64, pitch_deg: f64) -> Self {
        Self::new(radius, yaw_deg.to_radians(), pitch_deg.to_radians())
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Eye position from the spherical coordinates.
    pub fn eye(&self) -> Vector3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw) * self.radius
    }

    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::look_at(self.eye(), Vector3::ZERO, WORLD_UP)
    }

    /// Adds to yaw and pitch (radians); pitch is clamped. Non-finite deltas
    /// are ignored.
    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.yaw += finite_or(delta_yaw, 0.0);
        self.pitch = clamp_pitch(self.pitch + finite_or(delta_pitch, 0.0));
    }

    /// Pointer drag of `dx`, `dy` pixels. Dragging right or down moves the
    /// camera the opposite way so the scene follows the pointer.
    pub fn drag(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        self.orbit(-dx * sensitivity, -dy * sensitivity);
    }

    pub fn zoom(&mut self, delta: f64) {
        self.radius = clamp_radius(self.radius + finite_or(delta, 0.0));
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_degrees(DEFAULT_RADIUS, DEFAULT_YAW_DEG, DEFAULT_PITCH_DEG)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn clamp_radius(radius: f64) -> f64 {
    radius.clamp(MIN_RADIUS, MAX_RADIUS)
}

fn clamp_pitch(pitch: f64) -> f64 {
    let limit = PITCH_LIMIT_DEG.to_radians();
    pitch.clamp(-limit, limit)
}
