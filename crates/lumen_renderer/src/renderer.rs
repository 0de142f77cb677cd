//! Render entry point.
//!
//! One primary ray per sample, from the eye through the image plane. The
//! nearest hit is shaded, clipped, quantized and written to the canvas.
//! A sample that misses writes the background, so when several samples
//! share a pixel the last one in sample order wins.

use std::time::Instant;

use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::canvas::{color_to_rgba, Canvas, PixelWrite, BACKGROUND};
use crate::reflection::ReflectionSelection;
use crate::sampler::{pixel_coords, Sample, SampleGrid};
use crate::tracer::{TransformMode, Tracer};
use lumen_core::Scene;
use lumen_math::Ray;

/// Reflection depth of primary rays.
pub const DEFAULT_MAX_DEPTH: i32 = 3;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Reflection depth of primary rays
    pub max_depth: i32,
    /// Bucket size in samples per side (parallel mode)
    pub bucket_size: u32,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
    /// Which reflected hit contributes color
    pub reflection: ReflectionSelection,
    /// How shape transforms are applied
    pub transforms: TransformMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
            reflection: ReflectionSelection::default(),
            transforms: TransformMode::default(),
        }
    }
}

/// Trace one sample. Returns the pixel write, or `None` when the sample lands
/// outside the canvas. A ray that misses every shape writes `BACKGROUND`.
pub fn render_sample(tracer: &Tracer<'_>, sample: &Sample, depth: i32) -> Option<PixelWrite> {
    let scene = tracer.scene();
    let resolution = scene.resolution;
    let (x, y) = pixel_coords(sample.point, resolution, resolution)?;

    let ray = Ray::through(scene.camera.eye, sample.point);
    let rgba = tracer.trace(&ray, depth).map_or(BACKGROUND, color_to_rgba);

    Some(PixelWrite {
        sequence: sample.sequence(resolution),
        x,
        y,
        rgba,
    })
}

/// Render a scene to an `N × N` canvas.
pub fn render(scene: &Scene, config: &RenderConfig) -> Canvas {
    let tracer = Tracer::new(scene, config);
    render_with(&tracer, config)
}

/// Render with a prepared tracer.
///
/// Parallel and sequential rendering produce identical canvases: parallel
/// writes are applied in sample order.
pub fn render_with(tracer: &Tracer<'_>, config: &RenderConfig) -> Canvas {
    let scene = tracer.scene();
    let resolution = scene.resolution;
    let mut canvas = Canvas::new(resolution, resolution);

    log::info!(
        "Rendering '{}' at {}x{} ({} shapes, {} lights, depth {})",
        scene.name,
        resolution,
        resolution,
        tracer.objects().len(),
        scene.light_count(),
        config.max_depth
    );
    let start = Instant::now();

    if config.parallel {
        let buckets = generate_buckets(resolution, resolution, config.bucket_size);
        log::debug!("Rendering {} buckets", buckets.len());

        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| render_bucket(bucket, tracer, config))
            .collect();

        let mut writes: Vec<PixelWrite> = results.into_iter().flat_map(|r| r.writes).collect();
        writes.sort_unstable_by_key(|write| write.sequence);
        for write in &writes {
            canvas.apply(write);
        }
    } else {
        for sample in SampleGrid::new(scene.camera, resolution) {
            if let Some(write) = render_sample(tracer, &sample, config.max_depth) {
                canvas.apply(&write);
            }
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::sample_at;
    use lumen_core::{ImagePlane, Light, Material, Primitive};
    use lumen_math::{Color, Point3, Transform, Vec3};

    fn plane() -> ImagePlane {
        ImagePlane {
            eye: Point3::ZERO,
            lower_left: Point3::new(-10.0, -10.0, 10.0),
            lower_right: Point3::new(10.0, -10.0, 10.0),
            upper_left: Point3::new(-10.0, 10.0, 10.0),
            upper_right: Point3::new(10.0, 10.0, 10.0),
        }
    }

    fn single_sphere_scene() -> Scene {
        let mut scene = Scene::new("single", 20);
        scene.camera = plane();
        scene.add_light(Light::Point {
            position: Point3::ZERO,
            color: Color::ONE,
        });
        let material = scene.add_material(Material::matte(Color::splat(0.1), Color::ONE));
        scene.add_shape(
            Primitive::Sphere {
                center: Point3::new(0.0, 0.0, 5.0),
                radius: 1.0,
            },
            material,
            None,
        );
        scene
    }

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.bucket_size, 64);
        assert!(config.parallel);
        assert_eq!(config.reflection, ReflectionSelection::Literal);
        assert_eq!(config.transforms, TransformMode::Literal);
    }

    #[test]
    fn test_single_sphere_end_to_end() {
        let scene = single_sphere_scene();
        let canvas = render(&scene, &RenderConfig::default());

        assert_eq!(canvas.width(), 20);
        assert_eq!(canvas.height(), 20);

        // Sample (9, 9) sits at (0.5, 0.5) on the plane, inside the silhouette
        let center = canvas.get(10, 9).unwrap();
        let corner = canvas.get(0, 0).unwrap();

        assert_eq!(corner, BACKGROUND);
        assert_ne!(center, BACKGROUND);
        let brightness = |px: [u8; 4]| px[..3].iter().map(|&c| c as u32).sum::<u32>();
        assert!(brightness(center) > brightness(corner));
    }

    #[test]
    fn test_sample_outside_canvas_is_dropped() {
        let scene = single_sphere_scene();
        let tracer = Tracer::new(&scene, &RenderConfig::default());
        let sample = Sample {
            i: 0,
            j: 0,
            point: Point3::new(50.0, 0.0, 250.0),
        };
        // Ray hits the sphere but the plane point maps far off the canvas
        assert!(tracer
            .trace(&Ray::through(Point3::ZERO, sample.point), 3)
            .is_some());
        assert_eq!(render_sample(&tracer, &sample, 3), None);
    }

    fn busy_scene() -> Scene {
        let mut scene = Scene::new("busy", 40);
        scene.camera = plane();
        scene.ambient_light = Color::splat(0.2);
        scene.add_light(Light::Point {
            position: Point3::new(-5.0, 5.0, 0.0),
            color: Color::new(0.8, 0.7, 0.6),
        });
        scene.add_light(Light::Directional {
            direction: Vec3::new(1.0, -1.0, 1.0),
            color: Color::splat(0.3),
        });

        let shiny = scene.add_material(Material {
            ambient: Color::splat(0.1),
            diffuse: Color::new(0.7, 0.2, 0.2),
            specular: Color::splat(0.5),
            shininess: 12.0,
            reflective: Color::splat(0.3),
        });
        let matte = scene.add_material(Material::matte(
            Color::splat(0.05),
            Color::new(0.2, 0.6, 0.3),
        ));

        scene.add_shape(
            Primitive::Sphere {
                center: Point3::new(-2.0, 0.0, 20.0),
                radius: 3.0,
            },
            shiny,
            None,
        );
        scene.add_shape(
            Primitive::Sphere {
                center: Point3::ZERO,
                radius: 2.0,
            },
            shiny,
            Some(Transform::translation(Vec3::new(3.0, 2.0, 25.0))),
        );
        scene.add_shape(
            Primitive::Triangle {
                a: Point3::new(-20.0, -5.0, 40.0),
                b: Point3::new(20.0, -5.0, 40.0),
                c: Point3::new(0.0, 15.0, 40.0),
            },
            matte,
            None,
        );
        scene
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scene = busy_scene();
        let sequential = RenderConfig {
            parallel: false,
            ..Default::default()
        };
        let parallel = RenderConfig {
            bucket_size: 7,
            ..Default::default()
        };

        let a = render(&scene, &sequential);
        let b = render(&scene, &parallel);

        assert_eq!(a.to_rgba(), b.to_rgba());
    }

    /// Half-size image plane: pairs of neighbouring samples share a pixel.
    fn crowded_scene() -> Scene {
        let mut scene = Scene::new("crowded", 20);
        scene.camera = ImagePlane {
            eye: Point3::ZERO,
            lower_left: Point3::new(-5.0, -5.0, 10.0),
            lower_right: Point3::new(5.0, -5.0, 10.0),
            upper_left: Point3::new(-5.0, 5.0, 10.0),
            upper_right: Point3::new(5.0, 5.0, 10.0),
        };
        scene.ambient_light = Color::ONE;
        let white = scene.add_material(Material::matte(Color::ONE, Color::ZERO));
        // Covers the plane for x >= 4.5 around y = 0
        scene.add_shape(
            Primitive::Triangle {
                a: Point3::new(4.5, -50.0, 10.0),
                b: Point3::new(100.0, 0.0, 10.0),
                c: Point3::new(4.5, 50.0, 10.0),
            },
            white,
            None,
        );
        scene
    }

    #[test]
    fn test_miss_writes_background() {
        let scene = crowded_scene();
        let tracer = Tracer::new(&scene, &RenderConfig::default());

        let hit = sample_at(&scene.camera, 20, 0, 10);
        let miss = sample_at(&scene.camera, 20, 1, 11);
        let hit_write = render_sample(&tracer, &hit, 3).unwrap();
        let miss_write = render_sample(&tracer, &miss, 3).unwrap();

        assert_eq!((hit_write.x, hit_write.y), (14, 10));
        assert_eq!((miss_write.x, miss_write.y), (14, 10));
        assert_eq!(hit_write.rgba, [255, 255, 255, 255]);
        assert_eq!(miss_write.rgba, BACKGROUND);
    }

    #[test]
    fn test_last_sample_wins_shared_pixel() {
        let scene = crowded_scene();
        let sequential = RenderConfig {
            parallel: false,
            ..Default::default()
        };
        let parallel = RenderConfig {
            bucket_size: 1,
            ..Default::default()
        };

        // Samples i = 0 (hit) and i = 1 (miss) both land on column 14
        let a = render(&scene, &sequential);
        let b = render(&scene, &parallel);

        assert_eq!(a.get(14, 10), Some(BACKGROUND));
        assert_eq!(b.get(14, 10), Some(BACKGROUND));
        assert_eq!(a.to_rgba(), b.to_rgba());
    }

    #[test]
    fn test_empty_scene_is_black() {
        let mut scene = Scene::new("empty", 8);
        scene.camera = plane();
        let canvas = render(&scene, &RenderConfig::default());

        assert!(canvas.to_rgba().chunks(4).all(|px| px == BACKGROUND));
    }
}
