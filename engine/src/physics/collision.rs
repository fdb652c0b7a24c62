//! Collision detection module
//!
//! Geometric primitives used by the reference collision world: ray casts
//! against boxes and planes, and capsule contact generation.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Capsule Contacts
//!
//! A capsule is a segment `a..b` swept by `radius`. A contact is reported
//! when the shape overlaps a collider, with the normal pointing out of the
//! collider and the depth needed to separate them.

use glam::Vec3;

/// Penetrations shallower than this are treated as touching, not overlapping.
pub const CONTACT_EPSILON: f32 = 1e-5;

/// Overlap between a capsule and a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing out of the collider, toward the capsule
    pub normal: Vec3,
    /// Distance to push the capsule along `normal` to separate
    pub depth: f32,
    /// Approximate contact point on the collider surface
    pub point: Vec3,
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Handle near-zero directions by using large values
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;

    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;

    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;

    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

/// Computes the outward normal of the AABB face a surface point lies on.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = (aabb_max - aabb_min) * 0.5;
    let local = point - center;

    // Normalize to unit cube space
    let normalized = Vec3::new(
        local.x / half_extents.x,
        local.y / half_extents.y,
        local.z / half_extents.z,
    );

    // Closest face = highest absolute normalized coordinate
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.x && abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Intersects a ray with the front face of a plane `dot(normal, p) == offset`.
///
/// Only hits from the side the normal points to count; the plane is one-sided.
pub fn ray_plane_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    normal: Vec3,
    offset: f32,
) -> Option<f32> {
    let denom = normal.dot(ray_dir);
    if denom > -1e-6 {
        return None;
    }
    let height = normal.dot(ray_origin) - offset;
    if height < 0.0 {
        return None;
    }
    Some(height / -denom)
}

/// Closest point on segment `a..b` to `point`.
pub fn closest_point_on_segment(a: Vec3, b: Vec3, point: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-12 {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Contact between a capsule and an axis-aligned box.
pub fn capsule_aabb_contact(
    a: Vec3,
    b: Vec3,
    radius: f32,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<Contact> {
    let center = (aabb_min + aabb_max) * 0.5;

    // Alternate closest-point queries between the segment and the box; two
    // rounds settle for the axis-aligned, vertical capsules used here.
    let mut on_segment = closest_point_on_segment(a, b, center);
    let mut on_box = on_segment.clamp(aabb_min, aabb_max);
    for _ in 0..2 {
        on_segment = closest_point_on_segment(a, b, on_box);
        on_box = on_segment.clamp(aabb_min, aabb_max);
    }

    let offset = on_segment - on_box;
    let distance = offset.length();

    if distance > 1e-6 {
        let depth = radius - distance;
        if depth <= CONTACT_EPSILON {
            return None;
        }
        return Some(Contact {
            normal: offset / distance,
            depth,
            point: on_box,
        });
    }

    // Segment point is inside the box: push out through the nearest face
    let to_min = on_segment - aabb_min;
    let to_max = aabb_max - on_segment;
    let faces = [
        (to_min.x, Vec3::NEG_X),
        (to_max.x, Vec3::X),
        (to_min.y, Vec3::NEG_Y),
        (to_max.y, Vec3::Y),
        (to_min.z, Vec3::NEG_Z),
        (to_max.z, Vec3::Z),
    ];
    let (face_distance, normal) = faces
        .iter()
        .copied()
        .fold((f32::MAX, Vec3::Y), |best, face| if face.0 < best.0 { face } else { best });

    Some(Contact {
        normal,
        depth: face_distance + radius,
        point: on_segment + normal * face_distance,
    })
}

/// Contact between a capsule and the front face of a plane.
///
/// Capsules more than one radius behind the plane are ignored so a bounded
/// plane does not grab bodies passing underneath it.
pub fn capsule_plane_contact(
    a: Vec3,
    b: Vec3,
    radius: f32,
    normal: Vec3,
    offset: f32,
) -> Option<Contact> {
    let height_a = normal.dot(a) - offset;
    let height_b = normal.dot(b) - offset;
    let (deepest, height) = if height_a <= height_b {
        (a, height_a)
    } else {
        (b, height_b)
    };

    if height < -radius {
        return None;
    }
    let depth = radius - height;
    if depth <= CONTACT_EPSILON {
        return None;
    }
    Some(Contact {
        normal,
        depth,
        point: deepest - normal * height,
    })
}
