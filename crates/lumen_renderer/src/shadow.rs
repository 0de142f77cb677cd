//! Binary shadow test against the rest of the scene.

use crate::hittable::Hit;
use crate::tracer::Tracer;
use lumen_core::{Light, ShapeId};
use lumen_math::{Point3, Ray};

/// Ray from a surface point toward a light: toward the position of a point
/// light, along the negated direction of a directional light.
pub fn shadow_ray(light: &Light, point: Point3) -> Ray {
    match light {
        Light::Point { position, .. } => Ray::through(point, *position),
        Light::Directional { direction, .. } => Ray::new(point, -*direction),
    }
}

/// Whether any other shape blocks any light at `point`.
///
/// A single blocked light shadows the point for every light.
pub fn is_shadowed(tracer: &Tracer<'_>, id: ShapeId, point: Point3) -> bool {
    tracer.scene().lights.iter().any(|light| {
        let ray = shadow_ray(light, point);
        tracer
            .objects()
            .iter()
            .filter(|object| object.id != id)
            .any(|object| matches!(tracer.hit_object(object, &ray, true, 1), Hit::Shadowed))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderConfig;
    use lumen_core::{Material, Primitive, Scene};
    use lumen_math::{Color, Vec3};

    fn sphere(scene: &mut Scene, center: Point3) -> ShapeId {
        let material = scene.add_material(Material::matte(Color::splat(0.1), Color::ONE));
        scene.add_shape(Primitive::Sphere { center, radius: 1.0 }, material, None)
    }

    #[test]
    fn test_shadow_ray_targets() {
        let point = Point3::new(1.0, 2.0, 3.0);
        let to_point = shadow_ray(
            &Light::Point {
                position: Point3::ZERO,
                color: Color::ONE,
            },
            point,
        );
        assert_eq!(to_point.origin, point);
        assert_eq!(to_point.direction, -point);

        let to_sun = shadow_ray(
            &Light::Directional {
                direction: Vec3::new(0.0, -1.0, 0.0),
                color: Color::ONE,
            },
            point,
        );
        assert_eq!(to_sun.direction, Vec3::Y);
    }

    #[test]
    fn test_occluder_between_point_and_light() {
        let mut scene = Scene::new("shadow", 10);
        scene.add_light(Light::Point {
            position: Point3::ZERO,
            color: Color::ONE,
        });
        let target = sphere(&mut scene, Point3::new(0.0, 0.0, 10.0));
        sphere(&mut scene, Point3::new(0.0, 0.0, 5.0));

        let tracer = Tracer::new(&scene, &RenderConfig::default());
        assert!(is_shadowed(&tracer, target, Point3::new(0.0, 0.0, 9.0)));
    }

    #[test]
    fn test_shape_does_not_shadow_itself() {
        let mut scene = Scene::new("self", 10);
        scene.add_light(Light::Point {
            position: Point3::ZERO,
            color: Color::ONE,
        });
        let target = sphere(&mut scene, Point3::new(0.0, 0.0, 10.0));

        let tracer = Tracer::new(&scene, &RenderConfig::default());
        // The far side of the sphere faces away from the light
        assert!(!is_shadowed(&tracer, target, Point3::new(0.0, 0.0, 11.0)));
    }

    #[test]
    fn test_occluder_behind_light_does_not_shadow() {
        let mut scene = Scene::new("behind", 10);
        scene.add_light(Light::Directional {
            direction: Vec3::new(0.0, 0.0, 1.0),
            color: Color::ONE,
        });
        let target = sphere(&mut scene, Point3::new(0.0, 0.0, 10.0));
        // Lies along +z from the target, while the light is toward -z
        sphere(&mut scene, Point3::new(0.0, 0.0, 20.0));

        let tracer = Tracer::new(&scene, &RenderConfig::default());
        assert!(!is_shadowed(&tracer, target, Point3::new(0.0, 0.0, 9.0)));
    }

    #[test]
    fn test_identical_shapes_shadow_each_other() {
        let mut scene = Scene::new("twins", 10);
        scene.add_light(Light::Point {
            position: Point3::new(0.0, 0.0, 20.0),
            color: Color::ONE,
        });
        let first = sphere(&mut scene, Point3::new(0.0, 0.0, 10.0));
        sphere(&mut scene, Point3::new(0.0, 0.0, 10.0));

        let tracer = Tracer::new(&scene, &RenderConfig::default());
        // Only the twin is tested, and it sits between the point and the light
        assert!(is_shadowed(&tracer, first, Point3::new(0.0, 0.0, 8.0)));
    }
}
