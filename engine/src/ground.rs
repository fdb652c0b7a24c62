//! Ground Sensor
//!
//! Reads the body's grounded flag and, while grounded, probes straight down
//! for the surface normal under the character.

use glam::Vec3;
use log::trace;

use crate::config::GroundConfig;
use crate::physics::CharacterBody;

/// Result of one ground probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    /// Taken verbatim from the body
    pub grounded: bool,
    /// Surface normal under the body; last known value if the ray missed
    pub normal: Vec3,
}

impl GroundProbe {
    /// Angle between the surface normal and world up, degrees.
    pub fn slope_angle_degrees(&self) -> f32 {
        slope_angle_degrees(self.normal)
    }
}

/// Angle between `normal` and world up, degrees.
pub fn slope_angle_degrees(normal: Vec3) -> f32 {
    normal
        .normalize_or(Vec3::Y)
        .dot(Vec3::Y)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees()
}

/// True iff grounded and the surface is steeper than `slope_limit_degrees`.
pub fn is_sliding(normal: Vec3, grounded: bool, slope_limit_degrees: f32) -> bool {
    grounded && slope_angle_degrees(normal) > slope_limit_degrees
}

#[derive(Debug, Clone)]
pub struct GroundSensor {
    probe_distance: f32,
    last_normal: Vec3,
}

impl Default for GroundSensor {
    fn default() -> Self {
        Self::new(&GroundConfig::default())
    }
}

impl GroundSensor {
    pub fn new(config: &GroundConfig) -> Self {
        Self {
            probe_distance: config.probe_distance,
            last_normal: Vec3::Y,
        }
    }

    pub fn probe_distance(&self) -> f32 {
        self.probe_distance
    }

    pub fn probe(&mut self, body: &impl CharacterBody) -> GroundProbe {
        let grounded = body.is_grounded();
        if grounded {
            if let Some(hit) = body.raycast(body.position(), Vec3::NEG_Y, self.probe_distance) {
                self.last_normal = hit.normal;
            }
        }
        trace!("ground probe: grounded={grounded} normal={:?}", self.last_normal);
        GroundProbe {
            grounded,
            normal: self.last_normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{CollisionWorld, KinematicCapsule};

    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_flat_ground_angle_is_zero() {
        assert!(slope_angle_degrees(Vec3::Y).abs() < EPSILON);
    }

    #[test]
    fn test_sliding_requires_grounded() {
        let steep = Vec3::new(0.0, 0.5, 0.75_f32.sqrt());
        assert!(is_sliding(steep, true, 45.0));
        assert!(!is_sliding(steep, false, 45.0));
    }

    #[test]
    fn test_gentle_slope_does_not_slide() {
        let angle = 20.0_f32.to_radians();
        let gentle = Vec3::new(0.0, angle.cos(), angle.sin());
        assert!(!is_sliding(gentle, true, 45.0));
        assert!((slope_angle_degrees(gentle) - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_probe_reads_incline_normal() {
        let mut world = CollisionWorld::new();
        world.add_incline(60.0, Vec3::ZERO);
        let body = KinematicCapsule::new(world, Vec3::new(0.0, 1.5, 0.0));

        let mut sensor = GroundSensor::default();
        let probe = sensor.probe(&body);
        assert!(probe.grounded);
        assert!((probe.slope_angle_degrees() - 60.0).abs() < EPSILON);
    }

    #[test]
    fn test_airborne_probe_keeps_last_normal() {
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
        let body = KinematicCapsule::new(world, Vec3::new(0.0, 10.0, 0.0));

        let mut sensor = GroundSensor::default();
        let probe = sensor.probe(&body);
        assert!(!probe.grounded);
        assert_eq!(probe.normal, Vec3::Y);
    }
}
