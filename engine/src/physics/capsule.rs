//! Kinematic capsule
//!
//! Reference [`CharacterBody`] backed by a [`CollisionWorld`]. Movement is
//! sub-stepped so no step exceeds half the capsule radius, and each step is
//! followed by depenetration against every collider. The body counts as
//! grounded when an upward-facing surface lies within `skin_width` below it.
//!
//! A body that was grounded before a non-rising move is snapped back down onto
//! the ground afterwards, as long as the drop fits a slope of at most
//! `snap_slope_degrees` over the horizontal distance covered. This keeps it
//! on walkable downhill slopes instead of leaving them every tick.

use glam::Vec3;
use log::{trace, warn};

use super::{CharacterBody, CollisionWorld, RayHit};

/// Default capsule radius (meters)
pub const DEFAULT_RADIUS: f32 = 0.5;

/// Default ground-contact tolerance (meters)
pub const DEFAULT_SKIN_WIDTH: f32 = 0.08;

/// Default standing capsule height (meters)
pub const DEFAULT_HEIGHT: f32 = 2.0;

/// Steepest downhill the body stays glued to while moving (degrees)
pub const DEFAULT_SNAP_SLOPE_DEGREES: f32 = 45.0;

const MAX_SUBSTEPS: usize = 64;
const RESOLVE_ITERATIONS: usize = 4;

/// Contacts with a normal this far up or more count as ground.
const GROUND_NORMAL_MIN_Y: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct KinematicCapsule {
    world: CollisionWorld,
    position: Vec3,
    yaw: f32,
    height: f32,
    center: Vec3,
    radius: f32,
    skin_width: f32,
    snap_slope_degrees: f32,
    grounded: bool,
}

impl KinematicCapsule {
    /// Standing capsule (height 2, centered on `position`) in `world`.
    pub fn new(world: CollisionWorld, position: Vec3) -> Self {
        let mut body = Self {
            world,
            position,
            yaw: 0.0,
            height: DEFAULT_HEIGHT,
            center: Vec3::ZERO,
            radius: DEFAULT_RADIUS,
            skin_width: DEFAULT_SKIN_WIDTH,
            snap_slope_degrees: DEFAULT_SNAP_SLOPE_DEGREES,
            grounded: false,
        };
        body.grounded = body.touches_ground();
        body
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius.max(0.01);
        self.grounded = self.touches_ground();
        self
    }

    pub fn with_skin_width(mut self, skin_width: f32) -> Self {
        self.skin_width = skin_width.max(0.0);
        self.grounded = self.touches_ground();
        self
    }

    /// Steepest downhill to stay on; 0 disables ground snapping.
    pub fn with_snap_slope(mut self, degrees: f32) -> Self {
        self.snap_slope_degrees = degrees.clamp(0.0, 89.0);
        self
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut CollisionWorld {
        &mut self.world
    }

    /// Teleport without collision. Ground state refreshes immediately.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.grounded = self.touches_ground();
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Radius actually swept; a capsule shorter than its diameter is a sphere
    /// of half its height.
    fn effective_radius(&self) -> f32 {
        self.radius.min(self.height * 0.5)
    }

    /// World-space core segment and radius.
    pub fn segment(&self) -> (Vec3, Vec3, f32) {
        let radius = self.effective_radius();
        let half_segment = (self.height * 0.5 - radius).max(0.0);
        let center = self.position + self.center;
        (
            center - Vec3::Y * half_segment,
            center + Vec3::Y * half_segment,
            radius,
        )
    }

    /// Lowest point of the capsule in world space.
    pub fn bottom(&self) -> Vec3 {
        let (a, _, radius) = self.segment();
        a - Vec3::Y * radius
    }

    fn resolve_penetration(&mut self) {
        for _ in 0..RESOLVE_ITERATIONS {
            let (a, b, radius) = self.segment();
            let contacts = self.world.capsule_contacts(a, b, radius);
            if contacts.is_empty() {
                break;
            }
            // Push out of the deepest contact first, then re-query
            if let Some(deepest) = contacts
                .iter()
                .max_by(|x, y| x.depth.total_cmp(&y.depth))
            {
                self.position += deepest.normal * deepest.depth;
            }
        }
    }

    /// Lower the body by at most `max_drop` until it touches ground.
    /// Leaves it where it was if nothing is in reach.
    fn snap_to_ground(&mut self, max_drop: f32) -> bool {
        let start = self.position;
        // Steps no longer than the skin never sink the body into the surface
        let step = self.skin_width.max(1e-3);
        let mut dropped = 0.0;
        while dropped < max_drop {
            let delta = step.min(max_drop - dropped);
            self.position -= Vec3::Y * delta;
            dropped += delta;
            if self.touches_ground() {
                self.resolve_penetration();
                return true;
            }
        }
        self.position = start;
        false
    }

    fn touches_ground(&self) -> bool {
        let (a, b, radius) = self.segment();
        let probe = Vec3::Y * self.skin_width;
        self.world
            .capsule_contacts(a - probe, b - probe, radius)
            .iter()
            .any(|contact| contact.normal.y > GROUND_NORMAL_MIN_Y)
    }
}

impl CharacterBody for KinematicCapsule {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    fn move_and_collide(&mut self, displacement: Vec3) {
        if !displacement.is_finite() {
            warn!("KinematicCapsule: ignoring non-finite displacement {displacement:?}");
            return;
        }

        let max_step = (self.effective_radius() * 0.5).max(1e-3);
        let steps = ((displacement.length() / max_step).ceil() as usize).clamp(1, MAX_SUBSTEPS);
        let step = displacement / steps as f32;

        let was_grounded = self.grounded;
        let before = self.position;
        for _ in 0..steps {
            self.position += step;
            self.resolve_penetration();
        }

        self.grounded = self.touches_ground();
        if !self.grounded
            && was_grounded
            && displacement.y <= 0.0
            && self.snap_slope_degrees > 0.0
        {
            let travelled = (self.position - before).with_y(0.0).length();
            let max_drop =
                self.skin_width + travelled * self.snap_slope_degrees.to_radians().tan();
            self.grounded = self.snap_to_ground(max_drop);
            if self.grounded {
                trace!("KinematicCapsule: snapped to ground");
            }
        }
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.world.raycast(origin, direction, max_distance)
    }

    fn capsule_height(&self) -> f32 {
        self.height
    }

    fn set_capsule_height(&mut self, height: f32) {
        self.height = height.max(0.0);
    }

    fn capsule_center(&self) -> Vec3 {
        self.center
    }

    fn set_capsule_center(&mut self, center: Vec3) {
        self.center = center;
    }
}
