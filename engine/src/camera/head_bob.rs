//! Procedural head-bob.
//!
//! While grounded and moving, the camera's local Y follows
//! `base_y + sin(phase) * amplitude`, with the phase advancing at a frequency
//! picked by the speed mode. The phase is never reset, so stopping and
//! starting again resumes mid-cycle.

use glam::Vec3;

use crate::config::HeadBobConfig;
use crate::locomotion::SpeedMode;

#[derive(Debug, Clone)]
pub struct HeadBob {
    config: HeadBobConfig,
    phase: f32,
    base_y: f32,
}

impl HeadBob {
    /// `base_y` is the camera's resting local height.
    pub fn new(config: &HeadBobConfig, base_y: f32) -> Self {
        Self {
            config: *config,
            phase: 0.0,
            base_y,
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn base_y(&self) -> f32 {
        self.base_y
    }

    /// Frequency and amplitude for a speed mode.
    pub fn profile(&self, mode: SpeedMode) -> (f32, f32) {
        match mode {
            SpeedMode::Crouch => (self.config.crouch_frequency, self.config.crouch_amplitude),
            SpeedMode::Sprint => (self.config.sprint_frequency, self.config.sprint_amplitude),
            SpeedMode::Walk => (self.config.walk_frequency, self.config.walk_amplitude),
        }
    }

    /// Grounded and moving faster than the dead zone on either planar axis.
    pub fn is_active(&self, grounded: bool, velocity: Vec3) -> bool {
        grounded
            && (velocity.x.abs() > self.config.speed_dead_zone
                || velocity.z.abs() > self.config.speed_dead_zone)
    }

    /// Advance the bob. Returns the new camera local Y when active.
    pub fn update(
        &mut self,
        delta_time: f32,
        grounded: bool,
        velocity: Vec3,
        mode: SpeedMode,
    ) -> Option<f32> {
        if !self.is_active(grounded, velocity) {
            return None;
        }
        let (frequency, amplitude) = self.profile(mode);
        self.phase += delta_time * frequency;
        Some(self.base_y + self.phase.sin() * amplitude)
    }
}
