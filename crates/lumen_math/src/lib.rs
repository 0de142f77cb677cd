//! Lumen math types.
//!
//! Double-precision vector algebra on top of glam, plus the ray, interval
//! and affine transform types used by the scene model and the renderer.

// Re-export the glam types we build on
pub use glam::{DMat4, DVec3};

mod interval;
mod ray;
mod transform;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::Transform;
pub use vector::{mirror_reflect, phong_reflect, Color, Point3, Vec3};
