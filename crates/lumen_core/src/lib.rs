//! Lumen Core - Scene model and scene file loading.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Shape`, `Light`, `Material`, `ImagePlane`
//! - **Scene files**: line-oriented record parser with sticky materials and transforms
//! - **Meshes**: OBJ ingestion, split into individual triangle shapes
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{load_scene, SceneOptions};
//!
//! let scene = load_scene("scenes/demo.txt", &SceneOptions::default())?;
//! println!("Loaded {} shapes, {} lights",
//!     scene.shape_count(),
//!     scene.light_count());
//! ```

pub mod mesh;
pub mod parser;
pub mod scene;

// Re-export commonly used types
pub use mesh::{Mesh, MeshError};
pub use parser::{
    load_scene, parse_scene, LoadError, ParseError, SceneOptions, SceneParser,
    DEFAULT_RESOLUTION, DEFAULT_SCALE_FACTOR,
};
pub use scene::{ImagePlane, Light, Material, Primitive, Scene, Shape, ShapeId};
