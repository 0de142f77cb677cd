//! Triangle primitive for ray tracing.
//!
//! Intersects the ray with the triangle's plane, then keeps the point only
//! if it lies on the inner side of all three edges.

use crate::hittable::Hittable;
use lumen_math::{Point3, Ray, Vec3};

/// A triangle primitive.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// Vertices
    a: Point3,
    b: Point3,
    c: Point3,
    /// Pre-computed face normal (unit length, NaN for degenerate triangles)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The normal follows the winding `(b - a) × (c - a)`.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        let normal = (b - a).cross(c - a).normalize();
        Self { a, b, c, normal }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Same-side test against each edge.
    fn contains(&self, point: Point3) -> bool {
        let edges = [(self.a, self.b), (self.b, self.c), (self.c, self.a)];
        edges
            .iter()
            .all(|&(from, to)| self.normal.dot((to - from).cross(point - from)) >= 0.0)
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let plane_offset = -self.normal.dot(self.a);
        let t = -(self.normal.dot(ray.origin) + plane_offset) / self.normal.dot(ray.direction);

        // Parallel ray or degenerate triangle
        if !t.is_finite() {
            return None;
        }

        self.contains(ray.at(t)).then_some(t)
    }

    fn normal_at(&self, _point: Point3) -> Vec3 {
        self.normal
    }
}
