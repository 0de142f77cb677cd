//! Hittable trait and hit results for ray-object intersection.

use lumen_math::{Color, Point3, Ray, Vec3};

/// Parameter reported for a ray that misses a shape.
pub const NO_HIT: f64 = -1.0;

/// Parameter reported for a shadow ray that is blocked.
pub const IS_SHADOWED: f64 = 1.0;

/// Outcome of testing a ray against one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    /// The ray does not intersect the shape.
    Miss,
    /// A shadow ray is blocked by the shape.
    Shadowed,
    /// The ray intersects the shape at `t` and the surface shades to `color`.
    Surface { t: f64, color: Color },
}

impl Hit {
    /// Ray parameter with the in-band sentinels: `NO_HIT` for a miss and
    /// `IS_SHADOWED` for a blocked shadow ray.
    pub fn t(&self) -> f64 {
        match self {
            Hit::Miss => NO_HIT,
            Hit::Shadowed => IS_SHADOWED,
            Hit::Surface { t, .. } => *t,
        }
    }

    /// Shaded color. Misses and shadow hits carry no color.
    pub fn color(&self) -> Color {
        match self {
            Hit::Surface { color, .. } => *color,
            _ => Color::ZERO,
        }
    }
}

/// Trait for geometry that can be hit by rays.
///
/// Implementations work in the shape's own coordinate frame; transforms are
/// applied by the tracer before and after these calls.
pub trait Hittable: Send + Sync {
    /// Ray parameter of the intersection, or `None` when the ray misses.
    ///
    /// The parameter may be negative: intersections behind the ray origin
    /// are reported and callers decide whether to accept them.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Surface normal at a point on the shape. Not necessarily unit length
    /// for points off the surface.
    fn normal_at(&self, point: Point3) -> Vec3;
}
