//! Scene model for Lumen.
//!
//! A `Scene` is built once by the parser and is read-only for the duration
//! of a render. Shapes and lights live in ordered collections; every shape
//! carries a `ShapeId` so two geometrically identical shapes stay distinct.

use lumen_math::{Color, Point3, Transform, Vec3};

/// Phong material with a mirror-reflection coefficient.
///
/// All coefficients are per channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f64,
    pub reflective: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            shininess: 0.0,
            reflective: Color::ZERO,
        }
    }
}

impl Material {
    /// Create a material with only ambient and diffuse terms.
    pub fn matte(ambient: Color, diffuse: Color) -> Self {
        Self {
            ambient,
            diffuse,
            ..Default::default()
        }
    }

    /// Check if this material contributes a reflected color.
    pub fn is_reflective(&self) -> bool {
        self.reflective != Color::ZERO
    }
}

/// A light source. The scene-wide ambient light is stored on `Scene`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Point { position: Point3, color: Color },
    Directional { direction: Vec3, color: Color },
}

impl Light {
    pub fn color(&self) -> Color {
        match self {
            Light::Point { color, .. } | Light::Directional { color, .. } => *color,
        }
    }
}

/// Identity token of a shape: its insertion index in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub usize);

/// Geometry of a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Sphere { center: Point3, radius: f64 },
    Triangle { a: Point3, b: Point3, c: Point3 },
}

/// A shape with its material and optional transform.
#[derive(Clone, Debug)]
pub struct Shape {
    pub id: ShapeId,
    pub primitive: Primitive,
    /// Index into `Scene::materials`
    pub material_id: usize,
    /// `None` means no transform is applied
    pub transform: Option<Transform>,
}

/// The virtual screen: eye position and the four image-plane corners.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ImagePlane {
    pub eye: Point3,
    pub lower_left: Point3,
    pub lower_right: Point3,
    pub upper_left: Point3,
    pub upper_right: Point3,
}

/// A complete scene ready to be rendered.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    pub camera: ImagePlane,

    /// Global ambient light
    pub ambient_light: Color,

    pub lights: Vec<Light>,

    pub materials: Vec<Material>,

    pub shapes: Vec<Shape>,

    /// Output pixels per axis
    pub resolution: u32,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>, resolution: u32) -> Self {
        Self {
            name: name.into(),
            camera: ImagePlane::default(),
            ambient_light: Color::ZERO,
            lights: Vec::new(),
            materials: Vec::new(),
            shapes: Vec::new(),
            resolution,
        }
    }

    /// Add a material to the scene and return its ID.
    pub fn add_material(&mut self, material: Material) -> usize {
        let id = self.materials.len();
        self.materials.push(material);
        id
    }

    /// Add a shape and return its identity.
    pub fn add_shape(
        &mut self,
        primitive: Primitive,
        material_id: usize,
        transform: Option<Transform>,
    ) -> ShapeId {
        let id = ShapeId(self.shapes.len());
        self.shapes.push(Shape {
            id,
            primitive,
            material_id,
            transform,
        });
        id
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Get a shape by ID.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    /// Material of a shape. Shapes pointing at a missing material get the
    /// all-zero default.
    pub fn material_for(&self, id: ShapeId) -> Material {
        self.shape(id)
            .and_then(|shape| self.materials.get(shape.material_id))
            .copied()
            .unwrap_or_default()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Count shapes of each kind: (spheres, triangles).
    pub fn primitive_counts(&self) -> (usize, usize) {
        self.shapes
            .iter()
            .fold((0, 0), |(spheres, triangles), shape| match shape.primitive {
                Primitive::Sphere { .. } => (spheres + 1, triangles),
                Primitive::Triangle { .. } => (spheres, triangles + 1),
            })
    }
}
