//! Locomotion Tests - Gravity, Sprint, Crouch and Slopes
//!
//! Drives the full controller against the reference capsule and collision
//! world.

use std::rc::Rc;

use firstperson_engine::camera::CameraState;
use firstperson_engine::{
    CharacterBody, CollisionWorld, ControllerConfig, EventBus, FirstPersonController,
    InputSnapshot, KinematicCapsule,
};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn floor_world() -> CollisionWorld {
    let mut world = CollisionWorld::new();
    world.add_box(Vec3::new(-50.0, -1.0, -50.0), Vec3::new(50.0, 0.0, 50.0));
    world
}

struct Rig {
    controller: FirstPersonController,
    body: KinematicCapsule,
    camera: CameraState,
}

impl Rig {
    fn new(world: CollisionWorld, position: Vec3) -> Self {
        Self::with_config(world, position, ControllerConfig::default())
    }

    fn with_config(world: CollisionWorld, position: Vec3, config: ControllerConfig) -> Self {
        let camera = CameraState::default();
        let controller = FirstPersonController::new(config, Rc::new(EventBus::new()), &camera);
        Self {
            controller,
            body: KinematicCapsule::new(world, position),
            camera,
        }
    }

    fn tick(&mut self, input: &InputSnapshot) {
        self.tick_with(DT, input);
    }

    fn tick_with(&mut self, dt: f32, input: &InputSnapshot) {
        self.controller
            .tick(dt, input, &mut self.body, &mut self.camera);
    }
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn crouch_tap() -> InputSnapshot {
    InputSnapshot {
        crouch_held: true,
        ..Default::default()
    }
}

// ============================================================================
// Vertical velocity
// ============================================================================

#[test]
fn test_vertical_velocity_monotonic_while_falling() {
    let mut rig = Rig::new(floor_world(), Vec3::new(0.0, 4.0, 0.0));

    let mut previous = 0.0;
    let mut landed = false;
    for _ in 0..120 {
        rig.tick(&idle());
        let status = rig.controller.snapshot();
        if status.grounded {
            assert_eq!(status.velocity.y, 0.0, "ground contact resets vertical velocity");
            landed = true;
            break;
        }
        assert!(status.velocity.y < previous, "airborne vertical velocity must decrease");
        previous = status.velocity.y;
    }
    assert!(landed);
    assert!(approx_eq(rig.body.bottom().y, 0.0));
}

#[test]
fn test_jump_arc_then_landing_reset() {
    let mut rig = Rig::new(floor_world(), Vec3::new(0.0, 1.0, 0.0));
    let jump = InputSnapshot {
        jump_pressed: true,
        ..Default::default()
    };

    rig.tick(&jump);
    let status = rig.controller.snapshot();
    assert_eq!(status.velocity.y, 7.0);

    let mut previous = status.velocity.y;
    let mut airborne_ticks = 0;
    loop {
        rig.tick(&idle());
        let status = rig.controller.snapshot();
        if status.grounded {
            assert_eq!(status.velocity.y, 0.0);
            break;
        }
        assert!(status.velocity.y < previous);
        previous = status.velocity.y;
        airborne_ticks += 1;
        assert!(airborne_ticks < 200, "never landed");
    }
    // 2 * 7 / 15 seconds of flight
    assert!(airborne_ticks > 50);
}

// ============================================================================
// Sprint
// ============================================================================

#[test]
fn test_sprint_forced_off_while_airborne() {
    let mut rig = Rig::new(floor_world(), Vec3::new(0.0, 1.0, 0.0));
    let sprint_jump = InputSnapshot {
        forward_axis: 1.0,
        sprint_held: true,
        jump_pressed: true,
        ..Default::default()
    };
    let sprint = InputSnapshot {
        jump_pressed: false,
        ..sprint_jump
    };

    rig.tick(&sprint_jump);
    assert!(rig.controller.snapshot().sprinting);

    let mut saw_airborne = false;
    for _ in 0..90 {
        rig.tick(&sprint);
        let status = rig.controller.snapshot();
        assert_eq!(status.sprinting, status.grounded);
        saw_airborne |= !status.grounded;
    }
    assert!(saw_airborne);
    assert!(rig.controller.snapshot().sprinting);
}

// ============================================================================
// Crouch
// ============================================================================

#[test]
fn test_crouch_lands_exactly_on_tick_n() {
    let config = ControllerConfig::default();
    let duration = config.crouch.time_to_crouch;
    let ticks = 10;
    let dt = duration / ticks as f32;
    let mut rig = Rig::with_config(floor_world(), Vec3::new(0.0, 1.0, 0.0), config);

    let mut previous = rig.body.capsule_height();
    for tick in 1..=ticks {
        let input = if tick == 1 { crouch_tap() } else { idle() };
        rig.tick_with(dt, &input);
        let height = rig.body.capsule_height();

        if tick < ticks {
            assert!(height < previous, "tick {tick}: height must shrink");
            assert!(height > 0.7, "tick {tick}: overshot");
            assert!(!rig.controller.snapshot().crouching);
        } else {
            assert_eq!(height, 0.7);
            assert_eq!(rig.body.capsule_center(), Vec3::new(0.0, 0.5, 0.0));
            assert!(rig.controller.snapshot().crouching);
            assert!(!rig.controller.snapshot().crouch_transitioning);
        }
        previous = height;
    }
}

#[test]
fn test_crouch_requests_ignored_while_in_flight() {
    let mut rig = Rig::new(floor_world(), Vec3::new(0.0, 1.0, 0.0));

    rig.tick(&crouch_tap());
    let progress = rig.controller.locomotion().crouch_progress().unwrap();
    rig.tick(&crouch_tap());
    let after = rig.controller.locomotion().crouch_progress().unwrap();

    // Still the same transition, just one tick further along
    assert!(after > progress);
    assert!(!rig.controller.snapshot().crouching);
}

#[test]
fn test_stand_up_blocked_under_ceiling() {
    let mut world = floor_world();
    world.add_box(Vec3::new(5.0, 1.2, -5.0), Vec3::new(15.0, 2.0, 5.0));
    let mut rig = Rig::new(world, Vec3::new(0.0, 1.0, 0.0));

    rig.tick(&crouch_tap());
    for _ in 0..60 {
        rig.tick(&idle());
    }
    assert!(rig.controller.snapshot().crouching);

    let position = rig.body.position();
    rig.body.set_position(Vec3::new(10.0, position.y, 0.0));
    for _ in 0..10 {
        rig.tick(&idle());
    }

    let height = rig.body.capsule_height();
    let center = rig.body.capsule_center();
    for _ in 0..5 {
        rig.tick(&crouch_tap());
        let status = rig.controller.snapshot();
        assert!(status.crouching);
        assert!(!status.crouch_transitioning);
        assert_eq!(rig.body.capsule_height(), height);
        assert_eq!(rig.body.capsule_center(), center);
    }

    // Out in the open, standing works again
    let position = rig.body.position();
    rig.body.set_position(Vec3::new(0.0, position.y, 0.0));
    rig.tick(&idle());
    rig.tick(&crouch_tap());
    assert!(rig.controller.snapshot().crouch_transitioning);
}

#[test]
fn test_crouch_then_stand_on_flat_ground() {
    let mut rig = Rig::new(floor_world(), Vec3::new(0.0, 1.0, 0.0));

    rig.tick(&crouch_tap());
    for _ in 0..60 {
        rig.tick(&idle());
    }
    let status = rig.controller.snapshot();
    assert!(status.crouching);
    assert!(status.grounded);
    assert!(!status.sliding);
    assert!(status.velocity.y <= 0.0);

    rig.tick(&crouch_tap());
    for _ in 0..60 {
        rig.tick(&idle());
    }
    let status = rig.controller.snapshot();
    assert!(!status.crouching);
    assert!(status.grounded);
    assert!(!status.sliding);
    assert_eq!(rig.body.capsule_height(), 2.0);
    assert!((rig.body.position().y - 1.0).abs() < 1e-3);
}

#[test]
fn test_stand_lands_exactly_on_tick_n() {
    let config = ControllerConfig::default();
    let ticks = 10;
    let dt = config.crouch.time_to_crouch / ticks as f32;
    let mut rig = Rig::with_config(floor_world(), Vec3::new(0.0, 1.0, 0.0), config);

    rig.tick_with(dt, &crouch_tap());
    for _ in 0..40 {
        rig.tick_with(dt, &idle());
    }
    assert!(rig.controller.snapshot().crouching);
    assert!(rig.controller.snapshot().grounded);

    let mut previous = rig.body.capsule_height();
    assert_eq!(previous, 0.7);
    for tick in 1..=ticks {
        let input = if tick == 1 { crouch_tap() } else { idle() };
        rig.tick_with(dt, &input);
        let height = rig.body.capsule_height();

        if tick < ticks {
            assert!(height > previous, "tick {tick}: height must grow");
            assert!(height < 2.0, "tick {tick}: overshot");
            assert!(rig.controller.snapshot().crouching);
        } else {
            assert_eq!(height, 2.0);
            assert_eq!(rig.body.capsule_center(), Vec3::ZERO);
            assert!(!rig.controller.snapshot().crouching);
            assert!(!rig.controller.snapshot().crouch_transitioning);
        }
        previous = height;
    }
}

#[test]
fn test_crouched_speed() {
    let mut rig = Rig::new(floor_world(), Vec3::new(0.0, 1.0, 0.0));
    rig.tick(&crouch_tap());
    for _ in 0..60 {
        rig.tick(&idle());
    }

    let walk = InputSnapshot {
        forward_axis: 1.0,
        sprint_held: true,
        ..Default::default()
    };
    rig.tick(&walk);
    let status = rig.controller.snapshot();
    assert!(!status.sprinting);
    assert!(approx_eq(status.velocity.z, -2.5));
}

// ============================================================================
// Slopes
// ============================================================================

#[test]
fn test_steep_slope_slides_without_input() {
    let mut world = CollisionWorld::new();
    world.add_incline(60.0, Vec3::ZERO);
    let mut rig = Rig::new(world, Vec3::new(0.0, 1.5, 0.0));
    assert!(rig.body.is_grounded());

    let start_z = rig.body.position().z;
    let mut previous_z = start_z;
    let mut slid_ticks = 0;
    for _ in 0..30 {
        rig.tick(&idle());
        let z = rig.body.position().z;
        assert!(z >= previous_z, "slide must never move uphill");
        previous_z = z;
        if rig.controller.snapshot().sliding {
            slid_ticks += 1;
        }
    }
    assert!(slid_ticks > 0);
    assert!(previous_z - start_z > 0.5);
}

#[test]
fn test_gentle_slope_holds_still() {
    let mut world = CollisionWorld::new();
    world.add_incline(20.0, Vec3::ZERO);
    let mut rig = Rig::new(world, Vec3::new(0.0, 1.5, 0.0));

    for _ in 0..60 {
        rig.tick(&idle());
    }
    assert!(rig.controller.snapshot().grounded);
    let settled = rig.body.position();

    for _ in 0..30 {
        rig.tick(&idle());
        assert!(!rig.controller.snapshot().sliding);
    }
    assert!((rig.body.position() - settled).length() < EPSILON);
}

#[test]
fn test_sprint_down_walkable_slope_stays_grounded() {
    let mut world = CollisionWorld::new();
    world.add_incline(40.0, Vec3::ZERO);
    let mut rig = Rig::new(world, Vec3::new(0.0, 1.5, 0.0));
    for _ in 0..60 {
        rig.tick(&idle());
    }
    assert!(rig.controller.snapshot().grounded);

    // Face downhill (+Z)
    rig.body.set_yaw(std::f32::consts::PI);
    let sprint = InputSnapshot {
        forward_axis: 1.0,
        sprint_held: true,
        ..Default::default()
    };
    let start_z = rig.body.position().z;
    for tick in 0..60 {
        rig.tick(&sprint);
        let status = rig.controller.snapshot();
        assert!(status.grounded, "tick {tick}: left the slope");
        assert!(status.sprinting, "tick {tick}: sprint dropped");
        assert!(!status.sliding);
    }
    assert!(rig.body.position().z - start_z > 5.0);
}

#[test]
fn test_slide_disabled_by_capability() {
    let mut config = ControllerConfig::default();
    config.capabilities.can_slide_on_slope = false;
    let mut world = CollisionWorld::new();
    world.add_incline(60.0, Vec3::ZERO);
    let mut rig = Rig::with_config(world, Vec3::new(0.0, 1.5, 0.0), config);

    rig.tick(&idle());
    assert!(!rig.controller.snapshot().sliding);
}
