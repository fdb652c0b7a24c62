//! Camera Rig
//!
//! Runs after locomotion each tick: mouse look, head-bob, then zoom.
//!
//! Zoom is a [`TransitionChannel`] with the replace policy. Pressing or
//! releasing the zoom button cancels any running zoom and starts a new one
//! from the FOV the camera has at that moment, so rapid toggling never snaps
//! back to the original starting FOV.

use log::debug;

use super::head_bob::HeadBob;
use super::look::LookController;
use super::CameraView;
use crate::config::{Capabilities, ControllerConfig, ZoomConfig};
use crate::input::InputSnapshot;
use crate::locomotion::LocomotionEngine;
use crate::physics::CharacterBody;
use crate::transition::{ChannelPolicy, TimedTransition, TransitionChannel};

#[derive(Debug, Clone)]
pub struct CameraRig {
    look: LookController,
    head_bob: HeadBob,
    zoom: TransitionChannel<f32>,
    zoom_config: ZoomConfig,
    /// FOV the camera had when the rig was created
    default_fov: f32,
    capabilities: Capabilities,
}

impl CameraRig {
    /// Capture the camera's current FOV and local height as the defaults.
    pub fn new(config: &ControllerConfig, camera: &impl CameraView) -> Self {
        Self {
            look: LookController::new(&config.look),
            head_bob: HeadBob::new(&config.head_bob, camera.local_position_y()),
            zoom: TransitionChannel::new("zoom", ChannelPolicy::Replace),
            zoom_config: config.zoom,
            default_fov: camera.field_of_view(),
            capabilities: config.capabilities,
        }
    }

    pub fn look(&self) -> &LookController {
        &self.look
    }

    pub fn head_bob(&self) -> &HeadBob {
        &self.head_bob
    }

    pub fn default_fov(&self) -> f32 {
        self.default_fov
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.look.pitch_degrees()
    }

    pub fn is_zooming(&self) -> bool {
        self.zoom.is_active()
    }

    /// Start a zoom toward the zoomed FOV (`zoom_in`) or back to the default,
    /// replacing any zoom in flight.
    pub fn start_zoom(&mut self, zoom_in: bool, camera: &impl CameraView) {
        let target = if zoom_in {
            self.zoom_config.zoom_fov
        } else {
            self.default_fov
        };
        debug!("zoom {}", if zoom_in { "in" } else { "out" });
        self.zoom.request(TimedTransition::new(
            camera.field_of_view(),
            target,
            self.zoom_config.time_to_zoom,
        ));
    }

    pub fn tick(
        &mut self,
        delta_time: f32,
        input: &InputSnapshot,
        locomotion: &LocomotionEngine,
        body: &mut impl CharacterBody,
        camera: &mut impl CameraView,
    ) {
        if self.capabilities.can_move {
            let yaw_delta = self
                .look
                .apply_mouse_delta(input.mouse_delta_x, input.mouse_delta_y);
            body.set_yaw(body.yaw() + yaw_delta);
            camera.set_local_pitch_degrees(self.look.pitch_degrees());
        }

        if self.capabilities.can_head_bob {
            let bob = self.head_bob.update(
                delta_time,
                locomotion.is_grounded(),
                locomotion.velocity(),
                locomotion.speed_mode(),
            );
            if let Some(y) = bob {
                camera.set_local_position_y(y);
            }
        }

        if self.capabilities.can_zoom {
            if input.zoom_pressed_this_tick {
                self.start_zoom(true, camera);
            }
            if input.zoom_released_this_tick {
                self.start_zoom(false, camera);
            }
            if let Some(step) = self.zoom.tick(delta_time) {
                camera.set_field_of_view(step.value());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraState;
    use crate::ground::GroundProbe;
    use crate::physics::{CollisionWorld, KinematicCapsule};
    use glam::Vec3;

    const DT: f32 = 0.05;
    const EPSILON: f32 = 1e-3;

    fn body() -> KinematicCapsule {
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::new(-50.0, -1.0, -50.0), Vec3::new(50.0, 0.0, 50.0));
        KinematicCapsule::new(world, Vec3::new(0.0, 1.0, 0.0))
    }

    #[test]
    fn test_captures_camera_defaults() {
        let camera = CameraState::new(70.0, 0.8);
        let rig = CameraRig::new(&ControllerConfig::default(), &camera);
        assert_eq!(rig.default_fov(), 70.0);
        assert_eq!(rig.head_bob().base_y(), 0.8);
    }

    #[test]
    fn test_look_turns_body_and_pitches_camera() {
        let mut camera = CameraState::default();
        let mut rig = CameraRig::new(&ControllerConfig::default(), &camera);
        let mut body = body();
        let locomotion = LocomotionEngine::default();
        let input = InputSnapshot {
            mouse_delta_x: 18.0,
            mouse_delta_y: -2.0,
            ..Default::default()
        };

        rig.tick(DT, &input, &locomotion, &mut body, &mut camera);
        assert!((body.yaw() - 90.0_f32.to_radians()).abs() < EPSILON);
        assert!((camera.local_pitch_degrees + 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_zoom_reaches_target_and_back() {
        let mut camera = CameraState::new(60.0, 0.6);
        let mut rig = CameraRig::new(&ControllerConfig::default(), &camera);
        let mut body = body();
        let locomotion = LocomotionEngine::default();

        let press = InputSnapshot {
            zoom_pressed_this_tick: true,
            ..Default::default()
        };
        rig.tick(DT, &press, &locomotion, &mut body, &mut camera);
        for _ in 0..10 {
            rig.tick(DT, &InputSnapshot::default(), &locomotion, &mut body, &mut camera);
        }
        assert_eq!(camera.field_of_view, 30.0);
        assert!(!rig.is_zooming());

        let release = InputSnapshot {
            zoom_released_this_tick: true,
            ..Default::default()
        };
        rig.tick(DT, &release, &locomotion, &mut body, &mut camera);
        for _ in 0..10 {
            rig.tick(DT, &InputSnapshot::default(), &locomotion, &mut body, &mut camera);
        }
        assert_eq!(camera.field_of_view, 60.0);
    }

    #[test]
    fn test_bob_moves_camera_while_walking() {
        let mut camera = CameraState::new(60.0, 0.6);
        let config = ControllerConfig::default();
        let mut rig = CameraRig::new(&config, &camera);
        let mut body = body();
        let mut locomotion = LocomotionEngine::new(&config);
        let walk = InputSnapshot {
            forward_axis: 1.0,
            ..Default::default()
        };
        let ground = GroundProbe {
            grounded: true,
            normal: Vec3::Y,
        };

        locomotion.tick(DT, &walk, ground, &mut body, camera.local_position_y);
        rig.tick(DT, &walk, &locomotion, &mut body, &mut camera);

        let expected = 0.6 + (DT * 10.0).sin() * 0.05;
        assert!((camera.local_position_y - expected).abs() < EPSILON);
    }

    #[test]
    fn test_capabilities_disable_look_and_zoom() {
        let mut config = ControllerConfig::default();
        config.capabilities.can_move = false;
        config.capabilities.can_zoom = false;
        let mut camera = CameraState::new(60.0, 0.6);
        let mut rig = CameraRig::new(&config, &camera);
        let mut body = body();
        let locomotion = LocomotionEngine::new(&config);
        let input = InputSnapshot {
            mouse_delta_x: 5.0,
            zoom_pressed_this_tick: true,
            ..Default::default()
        };

        rig.tick(DT, &input, &locomotion, &mut body, &mut camera);
        assert_eq!(body.yaw(), 0.0);
        assert_eq!(camera.field_of_view, 60.0);
        assert!(!rig.is_zooming());
    }
}
