//! Scene description parser.
//!
//! The format is line oriented. Each record starts with a tag followed by
//! whitespace-separated numeric fields:
//!
//! - `cam ex ey ez  llx lly llz  lrx lry lrz  ulx uly ulz  urx ury urz`
//! - `lta r g b` (global ambient light)
//! - `ltp x y z r g b` (point light)
//! - `ltd dx dy dz r g b` (directional light)
//! - `mat ka(3) kd(3) ks(3) shininess kr(3)`
//! - `xft tx ty tz`, `xfs sx sy sz`, `xfr ax ay az` (degrees), `xfz` (reset)
//! - `sph cx cy cz radius`
//! - `tri ax ay az bx by bz cx cy cz`
//! - `obj path/to/mesh.obj`
//! - `# comment`
//!
//! Materials and transforms are sticky: they apply to every shape that
//! follows until replaced (`mat`) or reset (`xfz`). All spatial quantities
//! are multiplied by `SceneOptions::scale_factor` on ingestion.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;

use lumen_math::{Color, Transform, Vec3};
use thiserror::Error;

use crate::mesh::{Mesh, MeshError};
use crate::scene::{ImagePlane, Light, Material, Primitive, Scene};

/// Uniform scale applied to every spatial quantity read from a scene file.
pub const DEFAULT_SCALE_FACTOR: f64 = 10.0;

/// Default output resolution (pixels per axis).
pub const DEFAULT_RESOLUTION: u32 = 1000;

/// Errors that can occur during scene parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid number format at line {line}: {token}")]
    InvalidNumber { line: usize, token: String },

    #[error("Mesh error at line {line}: {source}")]
    Mesh {
        line: usize,
        #[source]
        source: MeshError,
    },

    #[error("Scene has no camera (cam) record")]
    MissingCamera,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Options applied while building a scene.
#[derive(Debug, Clone)]
pub struct SceneOptions {
    /// Multiplier for positions, radii, translations and light vectors
    pub scale_factor: f64,
    /// Output pixels per axis
    pub resolution: u32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

/// Load a scene file.
///
/// Relative `obj` paths are resolved against the scene file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P, options: &SceneOptions) -> LoadResult<Scene> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let mut parser = SceneParser::new(options.clone());
    if let Some(dir) = path.parent() {
        parser = parser.with_base_dir(dir);
    }

    let scene = parser.parse(name, &content)?;
    log::info!(
        "Loaded scene '{}': {} shapes, {} lights, {} materials",
        scene.name,
        scene.shape_count(),
        scene.light_count(),
        scene.material_count()
    );
    Ok(scene)
}

/// Parse a scene from a string. Relative `obj` paths resolve against the
/// working directory.
pub fn parse_scene(content: &str, options: &SceneOptions) -> ParseResult<Scene> {
    SceneParser::new(options.clone()).parse("unnamed", content)
}

/// Scene file parser.
pub struct SceneParser {
    options: SceneOptions,
    base_dir: Option<PathBuf>,
}

/// Per-parse mutable state: the scene under construction plus the sticky
/// material and transform.
struct ParseState {
    scene: Scene,
    has_camera: bool,
    material_id: Option<usize>,
    transform: Option<Transform>,
}

impl SceneParser {
    pub fn new(options: SceneOptions) -> Self {
        Self {
            options,
            base_dir: None,
        }
    }

    /// Resolve relative mesh paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Parse scene file contents into a `Scene`.
    pub fn parse(&self, name: &str, content: &str) -> ParseResult<Scene> {
        let mut state = ParseState {
            scene: Scene::new(name, self.options.resolution),
            has_camera: false,
            material_id: None,
            transform: None,
        };

        for (index, raw) in content.lines().enumerate() {
            let line = index + 1;
            let text = raw.split('#').next().unwrap_or("");
            let mut tokens = text.split_whitespace();
            let tag = match tokens.next() {
                Some(tag) => tag,
                None => continue,
            };

            let mut fields = Fields { line, tag, tokens };
            self.parse_record(&mut state, &mut fields)?;
            fields.finish();
        }

        if !state.has_camera {
            return Err(ParseError::MissingCamera);
        }

        Ok(state.scene)
    }

    fn parse_record(&self, state: &mut ParseState, fields: &mut Fields<'_>) -> ParseResult<()> {
        let scale = self.options.scale_factor;

        match fields.tag {
            "cam" => {
                state.scene.camera = ImagePlane {
                    eye: fields.vec3()? * scale,
                    lower_left: fields.vec3()? * scale,
                    lower_right: fields.vec3()? * scale,
                    upper_left: fields.vec3()? * scale,
                    upper_right: fields.vec3()? * scale,
                };
                state.has_camera = true;
            }
            "lta" => {
                state.scene.ambient_light = fields.vec3()?;
            }
            "ltp" => {
                let position = fields.vec3()? * scale;
                let color = fields.vec3()?;
                state.scene.add_light(Light::Point { position, color });
            }
            "ltd" => {
                let direction = fields.vec3()? * scale;
                let color = fields.vec3()?;
                state.scene.add_light(Light::Directional { direction, color });
            }
            "mat" => {
                let material = Material {
                    ambient: fields.vec3()?,
                    diffuse: fields.vec3()?,
                    specular: fields.vec3()?,
                    shininess: fields.number()?,
                    reflective: fields.vec3()?,
                };
                state.material_id = Some(state.scene.add_material(material));
            }
            "xft" => {
                let offset = fields.vec3()? * scale;
                self.push_transform(state, Transform::translation(offset));
            }
            "xfs" => {
                let factors = fields.vec3()?;
                if factors.cmpeq(Vec3::ZERO).any() {
                    return Err(fields.error("scale factors must be non-zero"));
                }
                self.push_transform(state, Transform::scaling(factors));
            }
            "xfr" => {
                let angles = fields.vec3()?;
                self.push_transform(state, Transform::rotation_degrees(angles));
            }
            "xfz" => {
                state.transform = None;
            }
            "sph" => {
                let center = fields.vec3()? * scale;
                let radius = fields.number()? * scale;
                let material_id = Self::current_material(state);
                state.scene.add_shape(
                    Primitive::Sphere { center, radius },
                    material_id,
                    state.transform,
                );
            }
            "tri" => {
                let a = fields.vec3()? * scale;
                let b = fields.vec3()? * scale;
                let c = fields.vec3()? * scale;
                let material_id = Self::current_material(state);
                state
                    .scene
                    .add_shape(Primitive::Triangle { a, b, c }, material_id, state.transform);
            }
            "obj" => {
                let path = self.resolve(fields.word()?);
                let mesh = Mesh::load_obj(&path, scale).map_err(|source| ParseError::Mesh {
                    line: fields.line,
                    source,
                })?;
                let material_id = Self::current_material(state);
                for [a, b, c] in mesh.extract_triangle_vertices() {
                    state
                        .scene
                        .add_shape(Primitive::Triangle { a, b, c }, material_id, state.transform);
                }
            }
            other => {
                log::warn!("Skipping unknown record '{}' at line {}", other, fields.line);
                fields.skip_rest();
            }
        }

        Ok(())
    }

    /// Compose a new transform onto the current one.
    fn push_transform(&self, state: &mut ParseState, transform: Transform) {
        let composed = match state.transform {
            Some(current) => current.then(&transform),
            None => transform,
        };
        log::debug!("Current transform: {:?}", composed.matrix());
        state.transform = Some(composed);
    }

    /// The sticky material, registering the all-zero default on first use.
    fn current_material(state: &mut ParseState) -> usize {
        match state.material_id {
            Some(id) => id,
            None => {
                let id = state.scene.add_material(Material::default());
                state.material_id = Some(id);
                id
            }
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Cursor over the fields of one record.
struct Fields<'a> {
    line: usize,
    tag: &'a str,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn error(&self, message: &str) -> ParseError {
        ParseError::Parse {
            line: self.line,
            message: format!("'{}' record: {}", self.tag, message),
        }
    }

    fn word(&mut self) -> ParseResult<&'a str> {
        self.tokens
            .next()
            .ok_or_else(|| self.error("missing fields"))
    }

    fn number(&mut self) -> ParseResult<f64> {
        let token = self.word()?;
        token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            token: token.to_string(),
        })
    }

    fn vec3(&mut self) -> ParseResult<Color> {
        Ok(Vec3::new(self.number()?, self.number()?, self.number()?))
    }

    fn skip_rest(&mut self) {
        self.tokens.by_ref().for_each(drop);
    }

    /// Warn about any tokens the record did not consume.
    fn finish(mut self) {
        let extra: Vec<&str> = self.tokens.by_ref().collect();
        if !extra.is_empty() {
            log::warn!(
                "Ignoring {} extra field(s) on '{}' record at line {}",
                extra.len(),
                self.tag,
                self.line
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ShapeId;
    use lumen_math::Point3;

    const CAMERA: &str = "cam 0 0 150 -50 -50 50 50 -50 50 -50 50 50 50 50 50\n";

    fn unscaled() -> SceneOptions {
        SceneOptions {
            scale_factor: 1.0,
            resolution: 100,
        }
    }

    #[test]
    fn test_parse_camera_scaled() {
        let scene = parse_scene(CAMERA, &SceneOptions::default()).unwrap();

        assert_eq!(scene.resolution, DEFAULT_RESOLUTION);
        assert_eq!(scene.camera.eye, Point3::new(0.0, 0.0, 1500.0));
        assert_eq!(scene.camera.lower_left, Point3::new(-500.0, -500.0, 500.0));
        assert_eq!(scene.camera.lower_right, Point3::new(500.0, -500.0, 500.0));
        assert_eq!(scene.camera.upper_left, Point3::new(-500.0, 500.0, 500.0));
        assert_eq!(scene.camera.upper_right, Point3::new(500.0, 500.0, 500.0));
    }

    #[test]
    fn test_missing_camera() {
        let result = parse_scene("sph 0 0 0 1\n", &unscaled());
        assert!(matches!(result, Err(ParseError::MissingCamera)));
    }

    #[test]
    fn test_parse_lights_and_material() {
        let content = format!(
            "{CAMERA}lta 0.1 0.2 0.3\nltp 1 2 3 0.5 0.5 0.5\nltd 0 -1 0 1 1 1\n\
             mat 0.1 0.1 0.1 0.9 0.8 0.7 0.5 0.5 0.5 16 0.2 0.2 0.2\nsph 0 0 -10 2\n"
        );
        let scene = parse_scene(&content, &SceneOptions::default()).unwrap();

        assert_eq!(scene.ambient_light, Color::new(0.1, 0.2, 0.3));
        assert_eq!(
            scene.lights[0],
            Light::Point {
                position: Point3::new(10.0, 20.0, 30.0),
                color: Color::splat(0.5)
            }
        );
        assert_eq!(
            scene.lights[1],
            Light::Directional {
                direction: Vec3::new(0.0, -10.0, 0.0),
                color: Color::ONE
            }
        );

        let material = scene.material_for(ShapeId(0));
        assert_eq!(material.diffuse, Color::new(0.9, 0.8, 0.7));
        assert_eq!(material.shininess, 16.0);
        assert_eq!(material.reflective, Color::splat(0.2));

        assert_eq!(
            scene.shapes[0].primitive,
            Primitive::Sphere {
                center: Point3::new(0.0, 0.0, -100.0),
                radius: 20.0
            }
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let content = format!("# header\n\n{CAMERA}sph 0 0 0 1 # trailing comment\n   \n");
        let scene = parse_scene(&content, &unscaled()).unwrap();
        assert_eq!(scene.shape_count(), 1);
    }

    #[test]
    fn test_shape_before_material_gets_default() {
        let content = format!("{CAMERA}tri 0 0 0 1 0 0 0 1 0\n");
        let scene = parse_scene(&content, &unscaled()).unwrap();

        assert_eq!(scene.material_for(ShapeId(0)), Material::default());
    }

    #[test]
    fn test_sticky_transform_and_reset() {
        let content = format!(
            "{CAMERA}xft 1 2 3\nsph 0 0 0 1\nxft 1 0 0\nsph 0 0 0 1\nxfz\nsph 0 0 0 1\n"
        );
        let scene = parse_scene(&content, &unscaled()).unwrap();

        let first = scene.shapes[0].transform.unwrap();
        assert_eq!(first.transform_point(Point3::ZERO), Point3::new(1.0, 2.0, 3.0));
        // Ray matrix of a translation is the negated translation
        assert_eq!(first.inverse_transform_point(Point3::ZERO), Point3::new(-1.0, -2.0, -3.0));

        let second = scene.shapes[1].transform.unwrap();
        assert_eq!(second.transform_point(Point3::ZERO), Point3::new(2.0, 2.0, 3.0));

        assert!(scene.shapes[2].transform.is_none());
    }

    #[test]
    fn test_translation_is_scaled() {
        let content = format!("{CAMERA}xft 1 0 0\nsph 0 0 0 1\n");
        let scene = parse_scene(&content, &SceneOptions::default()).unwrap();

        let transform = scene.shapes[0].transform.unwrap();
        assert_eq!(transform.transform_point(Point3::ZERO), Point3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let content = format!("{CAMERA}xfs 1 0 1\n");
        let result = parse_scene(&content, &unscaled());
        assert!(matches!(result, Err(ParseError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_missing_fields() {
        let content = format!("{CAMERA}sph 0 0 0\n");
        match parse_scene(&content, &unscaled()) {
            Err(ParseError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("sph"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_number() {
        let content = format!("{CAMERA}ltp 1 two 3 1 1 1\n");
        match parse_scene(&content, &unscaled()) {
            Err(ParseError::InvalidNumber { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "two");
            }
            other => panic!("expected invalid number, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_and_extra_fields_ignored() {
        let content = format!("{CAMERA}foo 1 2 3\nsph 0 0 0 1 99\n");
        let scene = parse_scene(&content, &unscaled()).unwrap();
        assert_eq!(scene.shape_count(), 1);
    }

    #[test]
    fn test_obj_relative_to_scene_file() {
        let dir = std::env::temp_dir().join("lumen_parser_obj_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("tri.obj"),
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\nf 2 4 3\n",
        )
        .unwrap();
        let scene_path = dir.join("mesh_scene.txt");
        fs::write(
            &scene_path,
            format!("{CAMERA}mat 0.1 0.1 0.1 1 1 1 0 0 0 1 0 0 0\nobj tri.obj\n"),
        )
        .unwrap();

        let scene = load_scene(&scene_path, &SceneOptions::default()).unwrap();

        assert_eq!(scene.name, "mesh_scene");
        assert_eq!(scene.shape_count(), 2);
        assert_eq!(scene.primitive_counts(), (0, 2));
        assert_eq!(scene.shapes[0].material_id, scene.shapes[1].material_id);
        match scene.shapes[0].primitive {
            Primitive::Triangle { b, .. } => assert_eq!(b, Point3::new(10.0, 0.0, 0.0)),
            other => panic!("expected triangle, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_scene("/no/such/scene.txt", &SceneOptions::default());
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
