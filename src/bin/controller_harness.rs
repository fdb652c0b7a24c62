//! Controller Harness - headless scripted run
//!
//! Run with: `RUST_LOG=debug cargo run --bin controller_harness [config.json]`
//!
//! Builds a small test course and drives the controller through a fixed input
//! script at 60 Hz, logging state as it goes:
//! - walk forward, crouch, and creep under a low ceiling
//! - try to stand while under it (refused), walk out and stand
//! - jump, walk through a damage trigger, flick the zoom button
//! - drop onto a ramp steeper than the slope limit and slide off it
//! - idle while health regenerates

use std::rc::Rc;

use anyhow::Context;
use glam::Vec3;
use log::info;

use firstperson_engine::camera::CameraState;
use firstperson_engine::game::{DamageTrigger, HealthReadout};
use firstperson_engine::input::{InputSampler, KeyCode, MouseButton};
use firstperson_engine::{
    CharacterBody, CollisionWorld, ControllerConfig, EventBus, FirstPersonController, InputSource,
    KinematicCapsule,
};

const TICK_RATE: f32 = 60.0;
const RUN_SECONDS: f32 = 14.0;
const STATUS_INTERVAL_TICKS: u32 = 30;

/// Time at which the body is dropped onto the ramp.
const RAMP_DROP_AT: f32 = 8.0;

/// Key held over `[start, end)` seconds.
struct Hold {
    start: f32,
    end: f32,
    key: KeyCode,
}

const SCRIPT: &[Hold] = &[
    Hold { start: 0.0, end: 2.5, key: KeyCode::W },
    Hold { start: 0.5, end: 0.51, key: KeyCode::ControlLeft },
    Hold { start: 2.6, end: 2.61, key: KeyCode::ControlLeft },
    Hold { start: 2.7, end: 3.7, key: KeyCode::W },
    Hold { start: 3.8, end: 3.81, key: KeyCode::ControlLeft },
    Hold { start: 4.3, end: 4.31, key: KeyCode::Space },
    Hold { start: 4.5, end: 5.5, key: KeyCode::W },
    Hold { start: 4.5, end: 5.0, key: KeyCode::ShiftLeft },
];

/// Zoom button held over these windows.
const ZOOM_WINDOWS: &[(f32, f32)] = &[(5.8, 5.95), (6.5, 7.2)];

/// Mouse turn: raw device units per tick over `[start, end)`.
const TURN: (f32, f32, f32) = (6.0, 6.5, 15.0);

fn build_course() -> CollisionWorld {
    let mut world = CollisionWorld::new();
    // Floor
    world.add_box(Vec3::new(-50.0, -1.0, -50.0), Vec3::new(50.0, 0.0, 50.0));
    // Low ceiling: only passable crouched
    world.add_box(Vec3::new(-3.0, 1.2, -9.0), Vec3::new(3.0, 2.0, -6.0));
    // 60 degree ramp rising toward -Z, off to the side
    let angle = 60.0_f32.to_radians();
    world.add_bounded_plane(
        Vec3::new(0.0, angle.cos(), angle.sin()),
        Vec3::new(20.0, 0.0, -16.0),
        Vec3::new(17.0, -0.1, -19.0),
        Vec3::new(23.0, 5.5, -16.0),
    );
    world
}

fn apply_script(time: f32, sampler: &mut InputSampler) {
    for hold in SCRIPT {
        // A key with several windows stays down while any of them is active
        let down = SCRIPT
            .iter()
            .any(|h| h.key == hold.key && time >= h.start && time < h.end);
        sampler.keyboard_mut().handle_key(hold.key, down);
    }

    let zoom = ZOOM_WINDOWS
        .iter()
        .any(|(start, end)| time >= *start && time < *end);
    sampler.mouse_mut().set_button(MouseButton::Right, zoom);

    let (start, end, rate) = TURN;
    if time >= start && time < end {
        sampler.mouse_mut().accumulate_delta(rate, 0.0);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => ControllerConfig::load(&path)
            .with_context(|| format!("loading controller config from {path}"))?,
        None => ControllerConfig::default(),
    };

    println!("===========================================");
    println!("   First-Person Controller - Harness");
    println!("===========================================");
    println!();

    let bus = Rc::new(EventBus::new());
    let mut camera = CameraState::default();
    let mut body = KinematicCapsule::new(build_course(), Vec3::new(0.0, 1.0, 0.0));
    let mut controller = FirstPersonController::new(config, Rc::clone(&bus), &camera);
    let readout = HealthReadout::new(Rc::clone(&bus), controller.health().max());
    let mut trigger = DamageTrigger::new(
        Vec3::new(-1.5, 0.0, -13.0),
        Vec3::new(1.5, 3.0, -11.0),
        Rc::clone(&bus),
    );
    let mut sampler = InputSampler::default();

    let dt = 1.0 / TICK_RATE;
    let total_ticks = (RUN_SECONDS * TICK_RATE) as u32;
    let mut dropped_on_ramp = false;

    for tick in 0..total_ticks {
        let time = tick as f32 * dt;

        if !dropped_on_ramp && time >= RAMP_DROP_AT {
            info!("dropping onto the ramp");
            body.set_position(Vec3::new(20.0, 5.5, -17.5));
            dropped_on_ramp = true;
        }

        apply_script(time, &mut sampler);
        let input = sampler.sample();
        controller.tick(dt, &input, &mut body, &mut camera);
        trigger.update(body.position());

        if tick % STATUS_INTERVAL_TICKS == 0 {
            let status = controller.snapshot();
            info!(
                "t={time:5.2}s pos=({:6.2}, {:5.2}, {:6.2}) mode={:?} grounded={} crouching={} sliding={} fov={:4.1} health={}",
                body.position().x,
                body.position().y,
                body.position().z,
                status.speed_mode,
                status.grounded,
                status.crouching,
                status.sliding,
                status.field_of_view,
                readout.text(),
            );
        }
    }

    let status = controller.snapshot();
    println!();
    println!("Final position: {:?}", body.position());
    println!("Final health:   {} ({:?})", readout.text(), controller.health().state());
    println!("Alive:          {}", status.alive);
    Ok(())
}
