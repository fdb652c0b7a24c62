//! First-Person Controller Library
//!
//! Turns raw keyboard and mouse input into avatar motion, camera behaviour and a
//! simple health/damage lifecycle inside a host physics simulation.
//!
//! # Modules
//!
//! - [`input`] - Platform-agnostic key/mouse state and the per-tick [`InputSnapshot`]
//! - [`physics`] - The [`CharacterBody`] collaborator trait plus a reference collision world
//! - [`ground`] - Grounded flag, contact normal and slope classification
//! - [`transition`] - Timed, per-channel interpolations (crouch, zoom)
//! - [`locomotion`] - Velocity, jump, gravity, crouch and slope sliding
//! - [`camera`] - Look rotation, head-bob and FOV zoom
//! - [`health`] - Damage, death and stepped regeneration
//! - [`events`] - Broadcast channels connecting health to damage sources and UI
//! - [`controller`] - Fixed-order per-tick orchestration of all of the above
//! - [`config`] - Serializable tuning values and capability toggles
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use firstperson_engine::{ControllerConfig, EventBus, FirstPersonController, InputSnapshot};
//! use firstperson_engine::camera::CameraState;
//! use firstperson_engine::physics::{CollisionWorld, KinematicCapsule};
//! use glam::Vec3;
//!
//! let bus = Rc::new(EventBus::new());
//! let mut world = CollisionWorld::new();
//! world.add_box(Vec3::new(-50.0, -1.0, -50.0), Vec3::new(50.0, 0.0, 50.0));
//! let mut body = KinematicCapsule::new(world, Vec3::new(0.0, 1.0, 0.0));
//! let mut camera = CameraState::new(60.0, 0.6);
//! let mut controller =
//!     FirstPersonController::new(ControllerConfig::default(), bus, &camera);
//!
//! // Each frame:
//! let input = InputSnapshot { forward_axis: 1.0, ..Default::default() };
//! controller.tick(1.0 / 60.0, &input, &mut body, &mut camera);
//! ```

pub mod camera;
pub mod config;
pub mod controller;
pub mod events;
pub mod ground;
pub mod health;
pub mod input;
pub mod locomotion;
pub mod physics;
pub mod transition;

// Game-level collaborators (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use camera::{CameraRig, CameraState, CameraView};
pub use config::{Capabilities, ConfigError, ControllerConfig};
pub use controller::{ControllerStatus, FirstPersonController};
pub use events::{Channel, EventBus, Subscription};
pub use health::{HealthState, HealthSystem, RegenTransition};
pub use input::{InputSnapshot, InputSource};
pub use locomotion::{LocomotionEngine, SpeedMode};
pub use physics::{CharacterBody, CollisionWorld, KinematicCapsule, RayHit};
pub use transition::{ChannelPolicy, TimedTransition, TransitionChannel};
