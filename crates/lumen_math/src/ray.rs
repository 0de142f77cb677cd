use crate::{Point3, Vec3};

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length. Intersection code is
/// written so the parameter `t` scales with `|direction|`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray starting at `from` and passing through `to` at t = 1.
    pub fn through(from: Point3, to: Point3) -> Self {
        Self::new(from, to - from)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
