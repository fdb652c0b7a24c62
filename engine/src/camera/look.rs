//! Mouse Look
//!
//! Raw per-tick mouse deltas rotate the view with no smoothing:
//! - X turns the whole body about world up (unbounded yaw)
//! - Y tilts only the camera (pitch, clamped to `±pitch_limit_degrees`)

use glam::Vec3;

use crate::config::LookConfig;

/// Pitch accumulator and sensitivity for first-person mouse look.
#[derive(Clone, Debug)]
pub struct LookController {
    /// Camera pitch in degrees, positive looks up
    pitch_degrees: f32,
    /// Degrees per mouse axis unit
    sensitivity: f32,
    pitch_limit_degrees: f32,
}

impl Default for LookController {
    fn default() -> Self {
        Self::new(&LookConfig::default())
    }
}

impl LookController {
    pub fn new(config: &LookConfig) -> Self {
        Self {
            pitch_degrees: 0.0,
            sensitivity: config.sensitivity,
            pitch_limit_degrees: config.pitch_limit_degrees.abs(),
        }
    }

    #[inline]
    pub fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }

    /// Set the pitch directly (clamped to the limit)
    #[inline]
    pub fn set_pitch_degrees(&mut self, pitch: f32) {
        self.pitch_degrees = pitch.clamp(-self.pitch_limit_degrees, self.pitch_limit_degrees);
    }

    #[inline]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    #[inline]
    pub fn pitch_limit_degrees(&self) -> f32 {
        self.pitch_limit_degrees
    }

    /// Apply one tick of mouse movement.
    ///
    /// # Arguments
    /// * `dx` - Look axis X. Positive = look right
    /// * `dy` - Look axis Y. Positive = look up
    ///
    /// # Returns
    /// Yaw change in radians for the caller to apply to the body.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) -> f32 {
        self.set_pitch_degrees(self.pitch_degrees + dy * self.sensitivity);
        (dx * self.sensitivity).to_radians()
    }

    /// Reset pitch to level
    pub fn reset(&mut self) {
        self.pitch_degrees = 0.0;
    }
}

/// View direction for a body yaw (radians) and camera pitch (degrees).
///
/// When yaw=0 and pitch=0 the view looks toward -Z.
pub fn look_direction(yaw: f32, pitch_degrees: f32) -> Vec3 {
    let pitch = pitch_degrees.to_radians();
    Vec3::new(
        yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
    .normalize()
}
