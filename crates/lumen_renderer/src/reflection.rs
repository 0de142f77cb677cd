//! Mirror reflections traced recursively through the other shapes.

use crate::hittable::{Hit, NO_HIT};
use crate::tracer::{SurfacePoint, Tracer};
use lumen_core::ShapeId;
use lumen_math::{mirror_reflect, Color, Interval, Ray};

/// Rule for choosing which reflected hit contributes color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReflectionSelection {
    /// Accept hits with a negative `t` (other than `NO_HIT`) greater than
    /// the best so far, i.e. the negative hit closest to the surface.
    #[default]
    Literal,
    /// Accept the hit with the smallest positive `t`.
    NearestPositive,
}

impl ReflectionSelection {
    /// Open window of acceptable `t` before any hit is seen.
    fn window(&self) -> Interval {
        match self {
            ReflectionSelection::Literal => Interval::new(-f64::MAX, 0.0),
            ReflectionSelection::NearestPositive => Interval::new(0.0, f64::INFINITY),
        }
    }

    fn accepts(&self, t: f64, window: &Interval) -> bool {
        t != NO_HIT && window.surrounds(t)
    }

    /// Shrink the window so only hits beating `t` qualify.
    fn narrow(&self, window: &mut Interval, t: f64) {
        match self {
            ReflectionSelection::Literal => window.min = t,
            ReflectionSelection::NearestPositive => window.max = t,
        }
    }
}

/// Color gathered along the mirror reflection of `surface.incoming` about
/// the surface normal.
///
/// Every other shape is hit at `depth`; the caller passes its own depth
/// minus one. Returns black when nothing qualifies.
pub fn reflected_color(
    tracer: &Tracer<'_>,
    id: ShapeId,
    surface: &SurfacePoint,
    depth: i32,
) -> Color {
    let selection = tracer.reflection();
    let direction = mirror_reflect(surface.incoming.direction, surface.normal);
    let ray = Ray::new(surface.point, direction);

    let mut window = selection.window();
    let mut color = Color::ZERO;

    for object in tracer.objects().iter().filter(|object| object.id != id) {
        let hit = tracer.hit_object(object, &ray, false, depth);
        if let Hit::Surface { t, color: hit_color } = hit {
            if selection.accepts(t, &window) {
                selection.narrow(&mut window, t);
                color = hit_color;
            }
        }
    }

    color
}
