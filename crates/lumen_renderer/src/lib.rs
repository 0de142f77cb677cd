//! Lumen Renderer - Whitted-style CPU ray tracing.
//!
//! One primary ray per pixel, Phong shading with binary shadows, and
//! depth-limited mirror reflections. Buckets of samples are rendered in
//! parallel with rayon.

mod bucket;
mod canvas;
mod hittable;
mod reflection;
mod renderer;
mod sampler;
mod shading;
mod shadow;
mod sphere;
mod tracer;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use canvas::{clip, color_to_rgba, quantize, Canvas, PixelWrite, BACKGROUND};
pub use hittable::{Hit, Hittable, IS_SHADOWED, NO_HIT};
pub use reflection::{reflected_color, ReflectionSelection};
pub use renderer::{render, render_sample, render_with, RenderConfig, DEFAULT_MAX_DEPTH};
pub use sampler::{image_plane_point, pixel_coords, sample_at, Sample, SampleGrid};
pub use shading::{ambient, diffuse, direct_color, specular};
pub use shadow::{is_shadowed, shadow_ray};
pub use sphere::Sphere;
pub use tracer::{SceneObject, SurfacePoint, Tracer, TransformMode};
pub use triangle::Triangle;

/// Re-export common math types from lumen_math
pub use lumen_math::{Color, Interval, Point3, Ray, Vec3};
