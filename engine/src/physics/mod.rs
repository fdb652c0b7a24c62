//! Physics module
//!
//! The controller does not simulate rigid bodies itself. It drives a
//! [`CharacterBody`] supplied by the host: a capsule that can report whether it
//! is grounded, sweep-move with collision, cast rays into the world and change
//! its own height.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, velocities in m/s, angles in radians unless a name
//! says `_degrees`.
//!
//! # Submodules
//!
//! - [`collision`] - Ray/AABB, ray/plane and capsule contact primitives
//! - [`world`] - [`CollisionWorld`], a static set of boxes and planes
//! - [`capsule`] - [`KinematicCapsule`], a reference `CharacterBody` over a `CollisionWorld`
//!
//! The reference implementations exist so the controller can run headless in
//! tests and the harness binary; a game would implement `CharacterBody` on top
//! of its own physics engine.

pub mod capsule;
pub mod collision;
pub mod world;

use glam::Vec3;

pub use capsule::KinematicCapsule;
pub use collision::{aabb_surface_normal, ray_aabb_intersect, ray_plane_intersect};
pub use world::{Collider, CollisionWorld};

/// Result of a successful ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space position where the ray hit
    pub point: Vec3,
    /// Surface normal at the hit point (normalized)
    pub normal: Vec3,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

impl RayHit {
    pub fn new(point: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            point,
            normal,
            distance,
        }
    }
}

/// The physical-world collaborator the controller drives.
pub trait CharacterBody {
    /// Whether the last move left the body standing on something.
    fn is_grounded(&self) -> bool;

    /// Transform origin in world space.
    fn position(&self) -> Vec3;

    /// Heading about world up, radians. 0 faces `-Z`.
    fn yaw(&self) -> f32;

    fn set_yaw(&mut self, yaw: f32);

    /// Sweep the collider by `displacement`, resolving collisions.
    fn move_and_collide(&mut self, displacement: Vec3);

    /// Cast a ray against the static world.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    fn capsule_height(&self) -> f32;

    fn set_capsule_height(&mut self, height: f32);

    /// Capsule center relative to the transform origin.
    fn capsule_center(&self) -> Vec3;

    fn set_capsule_center(&mut self, center: Vec3);

    /// Unit forward vector on the horizontal plane.
    fn forward(&self) -> Vec3 {
        let yaw = self.yaw();
        Vec3::new(yaw.sin(), 0.0, -yaw.cos())
    }

    /// Unit right vector on the horizontal plane.
    fn right(&self) -> Vec3 {
        let forward = self.forward();
        Vec3::new(-forward.z, 0.0, forward.x)
    }
}
