//! First-Person Controller
//!
//! Runs one tick of the whole character in a fixed order:
//!
//! ```text
//! InputSnapshot -> GroundSensor -> LocomotionEngine -> CameraRig
//!                                                    -> HealthSystem regen
//! ```
//!
//! The host owns the body and the camera and lends them to [`tick`]. Damage
//! arrives through the shared [`EventBus`], not through this type.
//!
//! [`tick`]: FirstPersonController::tick

use std::rc::Rc;

use glam::Vec3;
use log::{trace, warn};

use crate::camera::{CameraRig, CameraView, look_direction};
use crate::config::ControllerConfig;
use crate::events::EventBus;
use crate::ground::{GroundProbe, GroundSensor};
use crate::health::HealthSystem;
use crate::input::InputSnapshot;
use crate::locomotion::{LocomotionEngine, SpeedMode};
use crate::physics::CharacterBody;

/// Read-only view of the controller after a tick, for HUDs and debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerStatus {
    pub velocity: Vec3,
    pub grounded: bool,
    pub crouching: bool,
    pub crouch_transitioning: bool,
    pub sliding: bool,
    pub sprinting: bool,
    pub speed_mode: SpeedMode,
    /// Camera pitch, degrees
    pub pitch_degrees: f32,
    /// Unit view direction including pitch
    pub look_direction: Vec3,
    pub field_of_view: f32,
    pub health: f32,
    pub alive: bool,
}

#[derive(Debug)]
pub struct FirstPersonController {
    config: ControllerConfig,
    ground: GroundSensor,
    locomotion: LocomotionEngine,
    camera: CameraRig,
    health: HealthSystem,
    last_probe: GroundProbe,
    last_yaw: f32,
    last_fov: f32,
}

impl FirstPersonController {
    /// Build a controller and activate its health system on `bus`.
    ///
    /// The camera's current FOV and local height become the zoom-out and
    /// head-bob baselines.
    pub fn new(config: ControllerConfig, bus: Rc<EventBus>, camera: &impl CameraView) -> Self {
        let mut health = HealthSystem::new(&config.health, bus);
        health.activate();
        Self {
            ground: GroundSensor::new(&config.ground),
            locomotion: LocomotionEngine::new(&config),
            camera: CameraRig::new(&config, camera),
            health,
            last_probe: GroundProbe {
                grounded: false,
                normal: Vec3::Y,
            },
            last_yaw: 0.0,
            last_fov: camera.field_of_view(),
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn locomotion(&self) -> &LocomotionEngine {
        &self.locomotion
    }

    pub fn camera_rig(&self) -> &CameraRig {
        &self.camera
    }

    pub fn health(&self) -> &HealthSystem {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut HealthSystem {
        &mut self.health
    }

    pub fn last_ground_probe(&self) -> GroundProbe {
        self.last_probe
    }

    /// Clamp a frame delta to `[0, max_frame_delta]`; non-finite becomes 0.
    fn clamp_delta(&self, delta_time: f32) -> f32 {
        if !delta_time.is_finite() {
            warn!("controller: non-finite delta time {delta_time}, skipping motion");
            return 0.0;
        }
        delta_time.clamp(0.0, self.config.max_frame_delta)
    }

    /// Advance the character by one frame.
    pub fn tick(
        &mut self,
        delta_time: f32,
        input: &InputSnapshot,
        body: &mut impl CharacterBody,
        camera: &mut impl CameraView,
    ) {
        let dt = self.clamp_delta(delta_time);

        let probe = self.ground.probe(body);
        self.last_probe = probe;

        self.locomotion
            .tick(dt, input, probe, body, camera.local_position_y());
        self.camera.tick(dt, input, &self.locomotion, body, camera);

        if delta_time.is_finite() {
            self.health.tick(delta_time.max(0.0));
        }

        self.last_yaw = body.yaw();
        self.last_fov = camera.field_of_view();
        trace!(
            "controller: v={:?} grounded={} mode={:?}",
            self.locomotion.velocity(),
            probe.grounded,
            self.locomotion.speed_mode()
        );
    }

    pub fn snapshot(&self) -> ControllerStatus {
        let pitch = self.camera.pitch_degrees();
        ControllerStatus {
            velocity: self.locomotion.velocity(),
            grounded: self.locomotion.is_grounded(),
            crouching: self.locomotion.is_crouching(),
            crouch_transitioning: self.locomotion.is_crouch_transitioning(),
            sliding: self.locomotion.is_sliding(),
            sprinting: self.locomotion.is_sprinting(),
            speed_mode: self.locomotion.speed_mode(),
            pitch_degrees: pitch,
            look_direction: look_direction(self.last_yaw, pitch),
            field_of_view: self.last_fov,
            health: self.health.current(),
            alive: self.health.is_alive(),
        }
    }
}
