//! Locomotion Engine
//!
//! Owns the character's velocity and runs the per-tick movement pipeline:
//!
//! 1. Pick the speed mode (crouch, sprint or walk). Sprint needs ground.
//! 2. Replace horizontal velocity from the input axes.
//! 3. Jump impulse, or reset vertical velocity on ground contact.
//! 4. Gravity while airborne.
//! 5. Crouch / stand toggle request.
//! 6. Down-slope push while sliding.
//! 7. Commit `velocity * dt` to the body with collision.
//!
//! Only vertical velocity carries over between ticks.
//!
//! # Crouching
//!
//! Crouch and stand are a timed morph of the capsule height and center offset.
//! While one is in flight further toggle requests are dropped. Standing up is
//! refused while a ray cast upward from the eye hits something.

use glam::Vec3;
use log::debug;

use crate::config::{Capabilities, ControllerConfig, CrouchConfig, JumpConfig, MovementConfig};
use crate::ground::{GroundProbe, is_sliding};
use crate::input::InputSnapshot;
use crate::physics::CharacterBody;
use crate::transition::{ChannelPolicy, Lerp, TimedTransition, TransitionChannel};

/// Which planar speed applies this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedMode {
    #[default]
    Walk,
    Sprint,
    Crouch,
}

/// Capsule dimensions animated by the crouch transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleShape {
    pub height: f32,
    pub center: Vec3,
}

impl Lerp for CapsuleShape {
    fn lerp_to(self, target: Self, t: f32) -> Self {
        Self {
            height: self.height.lerp_to(target.height, t),
            center: self.center.lerp_to(target.center, t),
        }
    }
}

/// Movement state after the most recent tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionState {
    /// World-space velocity committed last tick
    pub velocity: Vec3,
    pub grounded: bool,
    pub is_crouching: bool,
    pub is_sprinting: bool,
    pub is_sliding: bool,
    /// Surface normal driving the slide; only meaningful while sliding
    pub slope_normal: Vec3,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: false,
            is_crouching: false,
            is_sprinting: false,
            is_sliding: false,
            slope_normal: Vec3::Y,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocomotionEngine {
    movement: MovementConfig,
    jump: JumpConfig,
    crouch: CrouchConfig,
    capabilities: Capabilities,
    state: LocomotionState,
    crouch_transition: TransitionChannel<CapsuleShape>,
}

impl Default for LocomotionEngine {
    fn default() -> Self {
        Self::new(&ControllerConfig::default())
    }
}

impl LocomotionEngine {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            movement: config.movement,
            jump: config.jump,
            crouch: config.crouch,
            capabilities: config.capabilities,
            state: LocomotionState::default(),
            crouch_transition: TransitionChannel::new("crouch", ChannelPolicy::IgnoreWhileActive),
        }
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    pub fn is_crouching(&self) -> bool {
        self.state.is_crouching
    }

    pub fn is_sprinting(&self) -> bool {
        self.state.is_sprinting
    }

    pub fn is_sliding(&self) -> bool {
        self.state.is_sliding
    }

    /// Slope normal while sliding.
    pub fn slope_normal(&self) -> Option<Vec3> {
        self.state.is_sliding.then_some(self.state.slope_normal)
    }

    pub fn is_crouch_transitioning(&self) -> bool {
        self.crouch_transition.is_active()
    }

    /// Crouch transition progress (0.0 to 1.0), if one is in flight.
    pub fn crouch_progress(&self) -> Option<f32> {
        self.crouch_transition.active().map(|t| t.progress())
    }

    pub fn speed_mode(&self) -> SpeedMode {
        if self.state.is_crouching {
            SpeedMode::Crouch
        } else if self.state.is_sprinting {
            SpeedMode::Sprint
        } else {
            SpeedMode::Walk
        }
    }

    pub fn speed(&self, mode: SpeedMode) -> f32 {
        match mode {
            SpeedMode::Walk => self.movement.walk_speed,
            SpeedMode::Sprint => self.movement.sprint_speed,
            SpeedMode::Crouch => self.crouch.crouch_speed,
        }
    }

    fn stand_shape(&self) -> CapsuleShape {
        CapsuleShape {
            height: self.crouch.stand_height,
            center: self.crouch.stand_center,
        }
    }

    fn crouch_shape(&self) -> CapsuleShape {
        CapsuleShape {
            height: self.crouch.crouch_height,
            center: self.crouch.crouch_center,
        }
    }

    /// Something within the probe distance above the eye.
    pub fn is_ceiling_blocked(&self, body: &impl CharacterBody, eye_height: f32) -> bool {
        let eye = body.position() + Vec3::Y * eye_height;
        body.raycast(eye, Vec3::Y, self.crouch.ceiling_probe_distance)
            .is_some()
    }

    /// Request a crouch if standing or a stand if crouched.
    ///
    /// Returns `false` when the request is dropped: a transition is already in
    /// flight, or standing up is blocked overhead.
    pub fn request_crouch_toggle(&mut self, body: &impl CharacterBody, eye_height: f32) -> bool {
        if self.state.is_crouching
            && !self.crouch_transition.is_active()
            && self.is_ceiling_blocked(body, eye_height)
        {
            debug!("crouch: stand-up blocked overhead");
            return false;
        }

        let start = CapsuleShape {
            height: body.capsule_height(),
            center: body.capsule_center(),
        };
        let target = if self.state.is_crouching {
            self.stand_shape()
        } else {
            self.crouch_shape()
        };
        self.crouch_transition
            .request(TimedTransition::new(start, target, self.crouch.time_to_crouch))
    }

    fn advance_crouch(&mut self, delta_time: f32, body: &mut impl CharacterBody) {
        let Some(step) = self.crouch_transition.tick(delta_time) else {
            return;
        };
        let shape = step.value();
        body.set_capsule_height(shape.height);
        body.set_capsule_center(shape.center);

        if step.is_finished() {
            self.state.is_crouching = !self.state.is_crouching;
            debug!(
                "crouch: now {}",
                if self.state.is_crouching { "crouching" } else { "standing" }
            );
        }
    }

    /// Run one locomotion tick and move the body.
    ///
    /// `eye_height` is the camera's local Y, used for the overhead check.
    pub fn tick(
        &mut self,
        delta_time: f32,
        input: &InputSnapshot,
        ground: GroundProbe,
        body: &mut impl CharacterBody,
        eye_height: f32,
    ) {
        let grounded = ground.grounded;
        self.state.grounded = grounded;
        self.state.is_sliding = self.capabilities.can_slide_on_slope
            && is_sliding(ground.normal, grounded, self.movement.slope_limit_degrees);
        self.state.slope_normal = ground.normal;

        if !self.capabilities.can_move {
            self.state.is_sprinting = false;
            self.state.velocity = Vec3::ZERO;
            return;
        }

        // 1. Speed mode
        self.state.is_sprinting = self.capabilities.can_sprint
            && grounded
            && input.sprint_held
            && !self.state.is_crouching;
        let speed = self.speed(self.speed_mode());

        // 2. Horizontal velocity replaces last tick's
        let planar = body.forward() * (input.forward_axis * speed)
            + body.right() * (input.strafe_axis * speed);

        // 3. Jump or ground-contact reset
        let mut vertical = self.state.velocity.y;
        if grounded && vertical < 0.0 {
            vertical = 0.0;
        }
        if self.capabilities.can_jump && grounded && input.jump_pressed {
            vertical = self.jump.jump_impulse;
            if self.state.is_crouching {
                self.request_crouch_toggle(body, eye_height);
            }
        }

        // 4. Gravity
        if !grounded {
            vertical -= self.jump.gravity * delta_time;
        }

        // 5. Crouch toggle
        if self.capabilities.can_crouch
            && grounded
            && input.crouch_held
            && !self.crouch_transition.is_active()
        {
            self.request_crouch_toggle(body, eye_height);
        }
        self.advance_crouch(delta_time, body);

        // 6. Slope slide
        let mut velocity = Vec3::new(planar.x, vertical, planar.z);
        if self.state.is_sliding {
            let n = ground.normal;
            velocity += Vec3::new(n.x, -n.y, n.z) * self.movement.slope_falloff;
        }
        self.state.velocity = velocity;

        // 7. Commit
        body.move_and_collide(velocity * delta_time);
    }
}
