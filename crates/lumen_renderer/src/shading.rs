//! Phong shading: ambient, diffuse and specular terms summed over every
//! light in the scene.

use crate::shadow::is_shadowed;
use crate::tracer::{SurfacePoint, Tracer};
use lumen_core::{Light, Material, ShapeId};
use lumen_math::{phong_reflect, Color, Point3, Vec3};

/// Vector used for the diffuse term: the direction as given for
/// directional lights, point-to-light for point lights.
fn diffuse_vector(light: &Light, point: Point3) -> Vec3 {
    match light {
        Light::Directional { direction, .. } => *direction,
        Light::Point { position, .. } => *position - point,
    }
}

/// Ambient term: every light's color plus the global ambient light,
/// each weighted by the material's ambient coefficient.
pub fn ambient(material: &Material, lights: &[Light], global: Color) -> Color {
    let from_lights = lights
        .iter()
        .fold(Color::ZERO, |acc, light| acc + light.color() * material.ambient);
    from_lights + global * material.ambient
}

/// Lambertian diffuse term.
pub fn diffuse(material: &Material, lights: &[Light], point: Point3, normal: Vec3) -> Color {
    lights.iter().fold(Color::ZERO, |acc, light| {
        let theta = normal.dot(diffuse_vector(light, point).normalize()).max(0.0);
        acc + material.diffuse * theta * light.color()
    })
}

/// Phong specular term.
///
/// `view_origin` is the origin of the ray being shaded. When the surface is
/// shaded along a reflected ray (`is_reflection`), point lights clamp
/// `R·V` to `min(0, R·V)` instead of `max(0, R·V)`; directional lights
/// always use `max`.
pub fn specular(
    material: &Material,
    lights: &[Light],
    point: Point3,
    normal: Vec3,
    view_origin: Point3,
    is_reflection: bool,
) -> Color {
    let view = (view_origin - point).normalize();

    lights.iter().fold(Color::ZERO, |acc, light| {
        let (incoming, clamp_below) = match light {
            Light::Directional { direction, .. } => (-*direction, false),
            Light::Point { position, .. } => (*position - point, is_reflection),
        };
        let reflected = phong_reflect(incoming, normal).normalize();
        let alignment = reflected.dot(view);
        let term = if clamp_below {
            alignment.min(0.0)
        } else {
            alignment.max(0.0)
        };
        acc + material.specular * light.color() * term.powf(material.shininess)
    })
}

/// Direct illumination at a surface point: ambient only when any light is
/// blocked, otherwise ambient + diffuse + specular.
pub fn direct_color(
    tracer: &Tracer<'_>,
    id: ShapeId,
    surface: &SurfacePoint,
    material: &Material,
    is_reflection: bool,
) -> Color {
    let scene = tracer.scene();
    let ambient_color = ambient(material, &scene.lights, scene.ambient_light);

    if is_shadowed(tracer, id, surface.point) {
        return ambient_color;
    }

    ambient_color
        + diffuse(material, &scene.lights, surface.point, surface.normal)
        + specular(
            material,
            &scene.lights,
            surface.point,
            surface.normal,
            surface.incoming.origin,
            is_reflection,
        )
}
