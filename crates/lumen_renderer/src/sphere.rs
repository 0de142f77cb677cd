//! Sphere primitive for ray tracing.

use crate::hittable::Hittable;
use lumen_math::{Point3, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    /// Solves `a·t² + b·t + c = 0` and returns the smaller root, which may
    /// lie behind the ray origin.
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let t_neg = (-b - sqrtd) / (2.0 * a);
        let t_pos = (-b + sqrtd) / (2.0 * a);
        let t = t_neg.min(t_pos);

        // Zero-length direction
        t.is_finite().then_some(t)
    }

    fn normal_at(&self, point: Point3) -> Vec3 {
        (point - self.center) / self.radius
    }
}
