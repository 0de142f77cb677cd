//! Vector aliases and the two reflection formulas used by the tracer.
//!
//! One 3-component f64 vector type serves as point, direction and RGB color.
//! Color channels are unbounded until explicitly clipped.
//!
//! `normalize()` on a zero-length vector is not guarded: the result is
//! non-finite and propagates through whatever consumes it.

use glam::DVec3;

/// Direction or general-purpose vector.
pub type Vec3 = DVec3;

/// Position in world or object space.
pub type Point3 = DVec3;

/// Linear RGB color.
pub type Color = DVec3;

/// Phong reflection of a light vector about a normal.
///
/// R = 2N·max(0, L·N) − L. A light below the surface reflects as −L.
#[inline]
pub fn phong_reflect(light: Vec3, normal: Vec3) -> Vec3 {
    let light_dot_normal = light.dot(normal).max(0.0);
    normal * (2.0 * light_dot_normal) - light
}

/// Reflection direction for a ray arriving along `incoming`.
///
/// Computes `d + 2N·min(0, d·N)`. The inward-facing component is tripled
/// rather than negated, so the result keeps heading into the surface; a
/// direction already leaving the surface comes back unchanged.
#[inline]
pub fn mirror_reflect(incoming: Vec3, normal: Vec3) -> Vec3 {
    let d = incoming.dot(normal).min(0.0);
    incoming + normal * (2.0 * d)
}
