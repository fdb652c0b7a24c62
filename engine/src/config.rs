//! Controller Configuration
//!
//! Centralized tuning for the first-person controller. Every value the
//! locomotion, camera and health systems read lives here, so a single JSON
//! file can retune the feel without touching code. `Default` returns the
//! shipped values.
//!
//! # Loading
//!
//! ```rust,ignore
//! use firstperson_engine::ControllerConfig;
//!
//! let config = ControllerConfig::load("settings/controller.json")?;
//! let sprint = config.movement.sprint_speed;
//! ```
//!
//! Missing fields fall back to their defaults, so partial files are fine.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading or validating a [`ControllerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read controller config: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid JSON for this schema.
    #[error("failed to parse controller config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside the range the controller can run with.
    #[error("invalid controller config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Mouse look parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees of rotation per mouse axis unit.
    pub sensitivity: f32,
    /// Pitch is clamped to `[-limit, +limit]` degrees.
    pub pitch_limit_degrees: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 5.0,
            pitch_limit_degrees: 45.0,
        }
    }
}

/// Planar movement and slope sliding.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walk speed in m/s
    pub walk_speed: f32,
    /// Sprint speed in m/s
    pub sprint_speed: f32,
    /// Scale of the down-slope push added while sliding
    pub slope_falloff: f32,
    /// Steepest walkable surface, in degrees from world up
    pub slope_limit_degrees: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 10.0,
            slope_falloff: 8.0,
            slope_limit_degrees: 45.0,
        }
    }
}

/// Jump impulse and gravity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Vertical velocity set on jump, m/s
    pub jump_impulse: f32,
    /// Downward acceleration while airborne, m/s^2
    pub gravity: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_impulse: 7.0,
            gravity: 15.0,
        }
    }
}

/// Crouch stance presets and transition timing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrouchConfig {
    /// Planar speed while crouched, m/s
    pub crouch_speed: f32,
    /// Capsule height while crouched
    pub crouch_height: f32,
    /// Capsule height while standing
    pub stand_height: f32,
    /// Seconds for a full crouch or stand transition
    pub time_to_crouch: f32,
    /// Capsule center offset while crouched
    pub crouch_center: Vec3,
    /// Capsule center offset while standing
    pub stand_center: Vec3,
    /// Length of the upward ray that blocks standing up
    pub ceiling_probe_distance: f32,
}

impl Default for CrouchConfig {
    fn default() -> Self {
        Self {
            crouch_speed: 2.5,
            crouch_height: 0.7,
            stand_height: 2.0,
            time_to_crouch: 0.25,
            crouch_center: Vec3::new(0.0, 0.5, 0.0),
            stand_center: Vec3::ZERO,
            ceiling_probe_distance: 1.0,
        }
    }
}

/// Procedural head-bob frequencies (radians/s of phase) and amplitudes (m).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBobConfig {
    pub walk_frequency: f32,
    pub walk_amplitude: f32,
    pub sprint_frequency: f32,
    pub sprint_amplitude: f32,
    pub crouch_frequency: f32,
    pub crouch_amplitude: f32,
    /// Horizontal velocity (either axis) below which bob is paused
    pub speed_dead_zone: f32,
}

impl Default for HeadBobConfig {
    fn default() -> Self {
        Self {
            walk_frequency: 10.0,
            walk_amplitude: 0.05,
            sprint_frequency: 15.0,
            sprint_amplitude: 0.12,
            crouch_frequency: 5.0,
            crouch_amplitude: 0.025,
            speed_dead_zone: 0.1,
        }
    }
}

/// FOV zoom.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Field of view while zoomed, degrees
    pub zoom_fov: f32,
    /// Seconds for each zoom-in or zoom-out transition
    pub time_to_zoom: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            zoom_fov: 30.0,
            time_to_zoom: 0.3,
        }
    }
}

/// Downward ground probe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Maximum distance of the downward slope ray
    pub probe_distance: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self { probe_distance: 2.0 }
    }
}

/// Health pool and regeneration pacing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub max_health: f32,
    /// Idle seconds after damage before regeneration starts
    pub time_before_regen: f32,
    /// Seconds between regeneration steps
    pub health_time_increment: f32,
    /// Health restored per regeneration step
    pub health_amount_increment: f32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            time_before_regen: 3.0,
            health_time_increment: 0.1,
            health_amount_increment: 1.0,
        }
    }
}

/// Feature toggles, each checked once at the top of its component's tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub can_move: bool,
    pub can_crouch: bool,
    pub can_jump: bool,
    pub can_sprint: bool,
    pub can_head_bob: bool,
    pub can_slide_on_slope: bool,
    pub can_zoom: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            can_move: true,
            can_crouch: true,
            can_jump: true,
            can_sprint: true,
            can_head_bob: true,
            can_slide_on_slope: true,
            can_zoom: true,
        }
    }
}

/// Complete controller configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub look: LookConfig,
    pub movement: MovementConfig,
    pub jump: JumpConfig,
    pub crouch: CrouchConfig,
    pub head_bob: HeadBobConfig,
    pub zoom: ZoomConfig,
    pub ground: GroundConfig,
    pub health: HealthConfig,
    pub capabilities: Capabilities,
    /// Largest frame delta fed to locomotion and camera, seconds
    pub max_frame_delta: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            look: LookConfig::default(),
            movement: MovementConfig::default(),
            jump: JumpConfig::default(),
            crouch: CrouchConfig::default(),
            head_bob: HeadBobConfig::default(),
            zoom: ZoomConfig::default(),
            ground: GroundConfig::default(),
            health: HealthConfig::default(),
            capabilities: Capabilities::default(),
            max_frame_delta: 0.1,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded controller config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be positive",
                })
            }
        }
        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value >= 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must not be negative",
                })
            }
        }

        non_negative("look.sensitivity", self.look.sensitivity)?;
        if !(self.look.pitch_limit_degrees > 0.0 && self.look.pitch_limit_degrees <= 90.0) {
            return Err(ConfigError::Invalid {
                field: "look.pitch_limit_degrees",
                reason: "must be in (0, 90]",
            });
        }

        non_negative("movement.walk_speed", self.movement.walk_speed)?;
        non_negative("movement.sprint_speed", self.movement.sprint_speed)?;
        non_negative("movement.slope_falloff", self.movement.slope_falloff)?;
        non_negative("movement.slope_limit_degrees", self.movement.slope_limit_degrees)?;

        non_negative("jump.jump_impulse", self.jump.jump_impulse)?;
        non_negative("jump.gravity", self.jump.gravity)?;

        non_negative("crouch.crouch_speed", self.crouch.crouch_speed)?;
        positive("crouch.crouch_height", self.crouch.crouch_height)?;
        positive("crouch.stand_height", self.crouch.stand_height)?;
        positive("crouch.time_to_crouch", self.crouch.time_to_crouch)?;
        non_negative(
            "crouch.ceiling_probe_distance",
            self.crouch.ceiling_probe_distance,
        )?;

        positive("head_bob.walk_frequency", self.head_bob.walk_frequency)?;
        positive("head_bob.sprint_frequency", self.head_bob.sprint_frequency)?;
        positive("head_bob.crouch_frequency", self.head_bob.crouch_frequency)?;
        non_negative("head_bob.speed_dead_zone", self.head_bob.speed_dead_zone)?;

        positive("zoom.zoom_fov", self.zoom.zoom_fov)?;
        positive("zoom.time_to_zoom", self.zoom.time_to_zoom)?;

        positive("ground.probe_distance", self.ground.probe_distance)?;

        positive("health.max_health", self.health.max_health)?;
        non_negative("health.time_before_regen", self.health.time_before_regen)?;
        positive(
            "health.health_time_increment",
            self.health.health_time_increment,
        )?;
        positive(
            "health.health_amount_increment",
            self.health.health_amount_increment,
        )?;

        positive("max_frame_delta", self.max_frame_delta)?;
        Ok(())
    }
}
