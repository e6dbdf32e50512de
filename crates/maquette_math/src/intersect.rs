//! Ray intersection queries used for picking and gizmo hit testing.
//!
//! All routines return the parametric distance along the ray, or `None`
//! when there is no hit. Degenerate rays (zero-length or non-finite
//! direction) miss everything.

use glam::Vec3;

use crate::bounds::Aabb;
use crate::ray::Ray;
use crate::EPSILON;

/// Slab-method ray/AABB intersection.
///
/// Computes per-axis entry and exit distances from the inverse ray
/// direction; the valid interval is `[max(entries, 0), min(exits)]` and
/// the hit distance is the interval start. A ray starting inside the box
/// therefore reports distance 0.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    if !ray.is_valid() {
        return None;
    }

    let inv_dir = ray.inverse_direction();

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6)).max(0.0);
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmin <= tmax {
        Some(tmin)
    } else {
        None
    }
}

/// Ray/plane intersection.
///
/// `None` when the ray is near-parallel to the plane or the hit lies
/// behind the origin.
pub fn ray_plane(ray: &Ray, plane_point: Vec3, plane_normal: Vec3) -> Option<f32> {
    if !ray.is_valid() {
        return None;
    }

    let denom = plane_normal.dot(ray.direction);
    if denom.abs() < EPSILON {
        return None;
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(t)
}

/// Ray/sphere intersection via the quadratic formulation.
///
/// Returns the nearest hit in front of the origin; a ray starting inside
/// the sphere reports the exit distance.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    if !ray.is_valid() {
        return None;
    }

    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = (-b - sqrt_d) / (2.0 * a);
    if near >= 0.0 {
        return Some(near);
    }
    let far = (-b + sqrt_d) / (2.0 * a);
    if far >= 0.0 {
        return Some(far);
    }
    None
}

/// Ray intersection with a finite cylinder around an axis segment.
///
/// The cylinder runs from `base` along the unit `axis` for `height`
/// units with the given `radius`; the quadratic is solved against the
/// infinite cylinder and hits are clipped to the segment's extent.
/// Rays parallel to the axis are rejected.
pub fn ray_cylinder(
    ray: &Ray,
    base: Vec3,
    axis: Vec3,
    radius: f32,
    height: f32,
) -> Option<f32> {
    if !ray.is_valid() {
        return None;
    }

    let m = ray.origin - base;
    let d_perp = ray.direction - axis * ray.direction.dot(axis);
    let m_perp = m - axis * m.dot(axis);

    let a = d_perp.length_squared();
    if a < EPSILON {
        return None;
    }
    let b = 2.0 * m_perp.dot(d_perp);
    let c = m_perp.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    for t in [(-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a)] {
        if t < 0.0 {
            continue;
        }
        let along = (m + ray.direction * t).dot(axis);
        if (0.0..=height).contains(&along) {
            return Some(t);
        }
    }
    None
}

/// Ray/ring intersection: hit the plane through `center` with the given
/// `normal`, then require the planar hit point to lie within a thin
/// annulus of the given `radius` and `thickness`.
pub fn ray_ring(ray: &Ray, center: Vec3, normal: Vec3, radius: f32, thickness: f32) -> Option<f32> {
    let t = ray_plane(ray, center, normal)?;
    let hit = ray.at(t);
    let dist_from_center = (hit - center).length();
    if (dist_from_center - radius).abs() < thickness {
        Some(t)
    } else {
        None
    }
}
