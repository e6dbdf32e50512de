//! # maquette_math - Picking and gizmo geometry
//!
//! Ray and bounding-volume primitives used by the editor's picking and
//! gizmo interaction code. Vector and matrix types come from [`glam`];
//! this crate adds the editor-specific intersection queries on top.

pub mod bounds;
pub mod intersect;
pub mod ray;

pub use bounds::Aabb;
pub use intersect::*;
pub use ray::Ray;

/// Tolerance used by the intersection routines when rejecting
/// near-parallel or degenerate configurations.
pub const EPSILON: f32 = 1e-6;

/// Convert degrees to radians.
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Convert radians to degrees.
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians.to_degrees()
}
