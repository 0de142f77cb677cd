//! Ray tracer: per-shape hits, nearest-hit selection and the recursive
//! shading pipeline (direct light, shadows, reflections).

use crate::hittable::{Hit, Hittable, NO_HIT};
use crate::reflection::{reflected_color, ReflectionSelection};
use crate::shading::direct_color;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use crate::RenderConfig;
use lumen_core::{Material, Primitive, Scene, Shape, ShapeId};
use lumen_math::{Color, Interval, Point3, Ray, Transform, Vec3};

/// How a shape's transform is applied to rays and hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformMode {
    /// The ray is mapped into the shape's frame with the inverse matrix, and
    /// the resulting hit point is mapped through that same matrix once more.
    /// That point, the shape's normal there and the mapped ray are used for
    /// shading, shadows and reflections.
    #[default]
    Literal,
    /// The ray is mapped into the shape's frame with the inverse matrix; the
    /// hit point goes back with the forward matrix and the normal with the
    /// inverse-transpose. Shading uses the world-space ray.
    ObjectSpace,
}

/// Shading frame at an intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub point: Point3,
    pub normal: Vec3,
    /// Ray the surface is viewed along: its origin is the viewer and its
    /// direction is mirrored for reflections.
    pub incoming: Ray,
}

/// A shape prepared for tracing.
pub struct SceneObject {
    pub id: ShapeId,
    pub geometry: Box<dyn Hittable>,
    pub material: Material,
    pub transform: Option<Transform>,
}

impl SceneObject {
    /// Build the geometry for a scene shape.
    pub fn from_shape(shape: &Shape, material: Material) -> Self {
        let geometry: Box<dyn Hittable> = match shape.primitive {
            Primitive::Sphere { center, radius } => Box::new(Sphere::new(center, radius)),
            Primitive::Triangle { a, b, c } => Box::new(Triangle::new(a, b, c)),
        };

        Self {
            id: shape.id,
            geometry,
            material,
            transform: shape.transform,
        }
    }
}

/// Traces rays through a scene.
pub struct Tracer<'a> {
    scene: &'a Scene,
    objects: Vec<SceneObject>,
    reflection: ReflectionSelection,
    transforms: TransformMode,
}

impl<'a> Tracer<'a> {
    /// Create a tracer over every shape of `scene`.
    pub fn new(scene: &'a Scene, config: &RenderConfig) -> Self {
        let objects = scene
            .shapes
            .iter()
            .map(|shape| SceneObject::from_shape(shape, scene.material_for(shape.id)))
            .collect();
        Self::with_objects(scene, objects, config)
    }

    /// Create a tracer over custom objects. Lights and ambient light still
    /// come from `scene`.
    pub fn with_objects(
        scene: &'a Scene,
        objects: Vec<SceneObject>,
        config: &RenderConfig,
    ) -> Self {
        Self {
            scene,
            objects,
            reflection: config.reflection,
            transforms: config.transforms,
        }
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn reflection(&self) -> ReflectionSelection {
        self.reflection
    }

    fn object(&self, id: ShapeId) -> Option<&SceneObject> {
        self.objects
            .get(id.0)
            .filter(|object| object.id == id)
            .or_else(|| self.objects.iter().find(|object| object.id == id))
    }

    /// Test `ray` against one shape.
    ///
    /// Shadow rays report `Hit::Shadowed` for a hit in front of the origin
    /// and never shade. Other rays shade the surface; at `depth == 0` the
    /// surface is shaded as seen along a reflected ray, and for `depth > 0`
    /// reflections are traced at `depth - 1`.
    pub fn hit(&self, id: ShapeId, ray: &Ray, is_shadow_ray: bool, depth: i32) -> Hit {
        match self.object(id) {
            Some(object) => self.hit_object(object, ray, is_shadow_ray, depth),
            None => Hit::Miss,
        }
    }

    pub(crate) fn hit_object(
        &self,
        object: &SceneObject,
        ray: &Ray,
        is_shadow_ray: bool,
        depth: i32,
    ) -> Hit {
        let local = to_local(object.transform.as_ref(), ray);
        let Some(t) = object.geometry.intersect(&local) else {
            return Hit::Miss;
        };

        if is_shadow_ray {
            return if t > 0.0 { Hit::Shadowed } else { Hit::Miss };
        }

        let surface = self.surface_point(object, ray, &local, t);
        let material = &object.material;
        let mut color = direct_color(self, object.id, &surface, material, depth == 0);

        if depth > 0 && material.is_reflective() {
            color += reflected_color(self, object.id, &surface, depth - 1) * material.reflective;
        }

        Hit::Surface { t, color }
    }

    /// Intersection parameter and shading frame of `ray` on one shape.
    pub fn locate(&self, id: ShapeId, ray: &Ray) -> Option<(f64, SurfacePoint)> {
        let object = self.object(id)?;
        let local = to_local(object.transform.as_ref(), ray);
        let t = object.geometry.intersect(&local)?;
        Some((t, self.surface_point(object, ray, &local, t)))
    }

    fn surface_point(
        &self,
        object: &SceneObject,
        world: &Ray,
        local: &Ray,
        t: f64,
    ) -> SurfacePoint {
        let local_point = local.at(t);

        match (object.transform, self.transforms) {
            (None, _) => SurfacePoint {
                point: local_point,
                normal: object.geometry.normal_at(local_point),
                incoming: *world,
            },
            (Some(transform), TransformMode::Literal) => {
                let point = transform.inverse_transform_point(local_point);
                SurfacePoint {
                    point,
                    normal: object.geometry.normal_at(point),
                    incoming: *local,
                }
            }
            (Some(transform), TransformMode::ObjectSpace) => SurfacePoint {
                point: transform.transform_point(local_point),
                normal: transform
                    .transform_normal(object.geometry.normal_at(local_point))
                    .normalize(),
                incoming: *world,
            },
        }
    }

    /// Color of the nearest shape along a primary ray, or `None` when every
    /// shape misses.
    ///
    /// The nearest hit is the smallest `t` other than `NO_HIT`; hits behind
    /// the ray origin take part in the comparison.
    pub fn trace(&self, ray: &Ray, depth: i32) -> Option<Color> {
        let mut window = Interval::new(f64::NEG_INFINITY, f64::MAX);
        let mut nearest = None;

        for object in &self.objects {
            if let Hit::Surface { t, color } = self.hit_object(object, ray, false, depth) {
                if t != NO_HIT && window.surrounds(t) {
                    window.max = t;
                    nearest = Some(color);
                }
            }
        }

        nearest
    }
}

fn to_local(transform: Option<&Transform>, ray: &Ray) -> Ray {
    match transform {
        Some(transform) => Ray::new(
            transform.inverse_transform_point(ray.origin),
            transform.inverse_transform_vector(ray.direction),
        ),
        None => *ray,
    }
}
