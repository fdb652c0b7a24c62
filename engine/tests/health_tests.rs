//! Health Tests - Damage, Death and Regeneration over the event bus

use std::cell::RefCell;
use std::rc::Rc;

use firstperson_engine::camera::CameraState;
use firstperson_engine::game::{DamageTrigger, HealthReadout};
use firstperson_engine::{
    Channel, CharacterBody, CollisionWorld, ControllerConfig, EventBus, FirstPersonController,
    HealthState, InputSnapshot, KinematicCapsule, Subscription,
};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

fn record(channel: &Channel<f32>) -> (Rc<RefCell<Vec<f32>>>, Subscription) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let token = channel.subscribe(move |v| sink.borrow_mut().push(v));
    (log, token)
}

fn setup() -> (FirstPersonController, KinematicCapsule, CameraState, Rc<EventBus>) {
    let mut world = CollisionWorld::new();
    world.add_box(Vec3::new(-50.0, -1.0, -50.0), Vec3::new(50.0, 0.0, 50.0));
    let body = KinematicCapsule::new(world, Vec3::new(0.0, 1.0, 0.0));
    let camera = CameraState::default();
    let bus = Rc::new(EventBus::new());
    let controller =
        FirstPersonController::new(ControllerConfig::default(), Rc::clone(&bus), &camera);
    (controller, body, camera, bus)
}

fn idle_for(
    seconds: f32,
    controller: &mut FirstPersonController,
    body: &mut KinematicCapsule,
    camera: &mut CameraState,
) {
    let ticks = (seconds / DT).round() as u32;
    for _ in 0..ticks {
        controller.tick(DT, &InputSnapshot::default(), body, camera);
    }
}

// ============================================================================
// Damage
// ============================================================================

#[test]
fn test_damage_then_regen_after_delay() {
    let (mut controller, mut body, mut camera, bus) = setup();
    let (applied, _applied_token) = record(&bus.damage_applied);
    let (healed, _healed_token) = record(&bus.healing_applied);

    bus.damage_taken.publish(40.0);
    assert_eq!(controller.health().current(), 60.0);
    assert_eq!(*applied.borrow(), vec![60.0]);

    // Still inside the 3 s delay
    idle_for(2.9, &mut controller, &mut body, &mut camera);
    assert_eq!(controller.health().current(), 60.0);
    assert!(healed.borrow().is_empty());

    // Past it: healing in unit steps
    idle_for(0.5, &mut controller, &mut body, &mut camera);
    let current = controller.health().current();
    assert!(current > 60.0 && current < 100.0);
    let steps = healed.borrow().clone();
    assert!(!steps.is_empty());
    for pair in steps.windows(2) {
        assert!((pair[1] - pair[0] - 1.0).abs() < 1e-4);
    }
}

#[test]
fn test_lethal_damage_kills_without_regen() {
    let (mut controller, mut body, mut camera, bus) = setup();
    let (applied, _applied_token) = record(&bus.damage_applied);
    let (healed, _healed_token) = record(&bus.healing_applied);

    bus.damage_taken.publish(150.0);
    assert_eq!(controller.health().current(), 0.0);
    assert_eq!(controller.health().state(), HealthState::Dead);
    assert_eq!(*applied.borrow(), vec![0.0]);
    assert!(!controller.snapshot().alive);

    idle_for(10.0, &mut controller, &mut body, &mut camera);
    bus.damage_taken.publish(10.0);
    assert_eq!(controller.health().current(), 0.0);
    assert!(healed.borrow().is_empty());
    assert_eq!(applied.borrow().len(), 1);
}

#[test]
fn test_regen_stops_at_max() {
    let (mut controller, mut body, mut camera, bus) = setup();
    let (healed, _token) = record(&bus.healing_applied);

    bus.damage_taken.publish(10.0);
    idle_for(6.0, &mut controller, &mut body, &mut camera);

    assert_eq!(controller.health().current(), 100.0);
    assert!(!controller.health().is_regenerating());
    let count = healed.borrow().len();
    assert_eq!(count, 10);
    assert_eq!(healed.borrow().last().copied(), Some(100.0));

    idle_for(2.0, &mut controller, &mut body, &mut camera);
    assert_eq!(healed.borrow().len(), count);
}

#[test]
fn test_damage_during_regen_restarts_delay() {
    let (mut controller, mut body, mut camera, bus) = setup();

    bus.damage_taken.publish(50.0);
    idle_for(3.5, &mut controller, &mut body, &mut camera);
    let partly_healed = controller.health().current();
    assert!(partly_healed > 50.0);

    bus.damage_taken.publish(5.0);
    let after_hit = controller.health().current();
    idle_for(2.5, &mut controller, &mut body, &mut camera);
    assert_eq!(controller.health().current(), after_hit);
}

// ============================================================================
// Trigger and readout
// ============================================================================

#[test]
fn test_trigger_damage_reaches_readout() {
    let (mut controller, mut body, mut camera, bus) = setup();
    let readout = HealthReadout::new(Rc::clone(&bus), controller.health().max());
    let mut trigger = DamageTrigger::new(
        Vec3::new(-1.0, 0.0, -4.0),
        Vec3::new(1.0, 3.0, -2.0),
        Rc::clone(&bus),
    );
    assert_eq!(readout.text(), "100");

    let walk = InputSnapshot {
        forward_axis: 1.0,
        ..Default::default()
    };
    let mut hits = 0;
    for _ in 0..60 {
        controller.tick(DT, &walk, &mut body, &mut camera);
        if trigger.update(body.position()) {
            hits += 1;
        }
    }

    // Walked clean through the volume: exactly one hit
    assert_eq!(hits, 1);
    assert_eq!(controller.health().current(), 85.0);
    assert_eq!(readout.value(), 85.0);
    assert_eq!(readout.text(), "85");
}

#[test]
fn test_readout_pads_single_digits() {
    let (controller, _body, _camera, bus) = setup();
    let readout = HealthReadout::new(Rc::clone(&bus), controller.health().max());

    bus.damage_taken.publish(95.0);
    assert_eq!(readout.text(), "05");
}
