//! Static collision world
//!
//! A flat list of boxes and one-sided planes. Planes may be bounded by an AABB
//! so they can stand in for ramps; outside the bounds they neither block
//! movement nor answer ray casts.

use glam::Vec3;

use super::RayHit;
use super::collision::{
    Contact, aabb_surface_normal, capsule_aabb_contact, capsule_plane_contact, ray_aabb_intersect,
    ray_plane_intersect,
};

/// Slack around a bounded plane's extent when testing contact points.
const BOUNDS_TOLERANCE: f32 = 1e-3;

/// A static collision shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Axis-aligned solid box
    Box { min: Vec3, max: Vec3 },
    /// Solid half-space `dot(normal, p) < offset`, optionally limited to `bounds`
    Plane {
        normal: Vec3,
        offset: f32,
        bounds: Option<(Vec3, Vec3)>,
    },
}

impl Collider {
    fn in_bounds(bounds: Option<(Vec3, Vec3)>, point: Vec3) -> bool {
        match bounds {
            Some((min, max)) => {
                let tolerance = Vec3::splat(BOUNDS_TOLERANCE);
                point.cmpge(min - tolerance).all() && point.cmple(max + tolerance).all()
            }
            None => true,
        }
    }

    /// Nearest ray hit against this collider within `max_distance`.
    ///
    /// A box containing `origin` is not hit.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        match *self {
            Collider::Box { min, max } => {
                if origin.cmpge(min).all() && origin.cmple(max).all() {
                    return None;
                }
                let t = ray_aabb_intersect(origin, direction, min, max)?;
                if t > max_distance {
                    return None;
                }
                let point = origin + direction * t;
                Some(RayHit::new(point, aabb_surface_normal(point, min, max), t))
            }
            Collider::Plane {
                normal,
                offset,
                bounds,
            } => {
                let t = ray_plane_intersect(origin, direction, normal, offset)?;
                if t > max_distance {
                    return None;
                }
                let point = origin + direction * t;
                Self::in_bounds(bounds, point).then(|| RayHit::new(point, normal, t))
            }
        }
    }

    /// Overlap between this collider and the capsule `a..b` of `radius`.
    pub fn capsule_contact(&self, a: Vec3, b: Vec3, radius: f32) -> Option<Contact> {
        match *self {
            Collider::Box { min, max } => capsule_aabb_contact(a, b, radius, min, max),
            Collider::Plane {
                normal,
                offset,
                bounds,
            } => {
                let contact = capsule_plane_contact(a, b, radius, normal, offset)?;
                Self::in_bounds(bounds, contact.point).then_some(contact)
            }
        }
    }
}

/// Container for the static colliders a character moves through.
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    colliders: Vec<Collider>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid box spanning `min..max`.
    pub fn add_box(&mut self, min: Vec3, max: Vec3) -> &mut Self {
        self.colliders.push(Collider::Box {
            min: min.min(max),
            max: min.max(max),
        });
        self
    }

    /// Add an infinite one-sided plane through `point` facing `normal`.
    pub fn add_plane(&mut self, normal: Vec3, point: Vec3) -> &mut Self {
        let normal = normal.normalize_or(Vec3::Y);
        self.colliders.push(Collider::Plane {
            normal,
            offset: normal.dot(point),
            bounds: None,
        });
        self
    }

    /// Add a plane that only exists inside the `min..max` box, e.g. a ramp.
    pub fn add_bounded_plane(&mut self, normal: Vec3, point: Vec3, min: Vec3, max: Vec3) -> &mut Self {
        let normal = normal.normalize_or(Vec3::Y);
        self.colliders.push(Collider::Plane {
            normal,
            offset: normal.dot(point),
            bounds: Some((min.min(max), min.max(max))),
        });
        self
    }

    /// Add a plane through `point` inclined `angle_degrees` from horizontal,
    /// rising toward `-Z`.
    pub fn add_incline(&mut self, angle_degrees: f32, point: Vec3) -> &mut Self {
        let angle = angle_degrees.to_radians();
        self.add_plane(Vec3::new(0.0, angle.cos(), angle.sin()), point)
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Nearest hit along the ray among all colliders.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }
        self.colliders
            .iter()
            .filter_map(|collider| collider.raycast(origin, direction, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Every contact the capsule `a..b` currently has.
    pub fn capsule_contacts(&self, a: Vec3, b: Vec3, radius: f32) -> Vec<Contact> {
        self.colliders
            .iter()
            .filter_map(|collider| collider.capsule_contact(a, b, radius))
            .collect()
    }
}
