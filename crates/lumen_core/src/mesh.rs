//! Triangle mesh geometry loaded from OBJ files.
//!
//! A mesh is only an ingestion format: the parser splits it into individual
//! triangle shapes, each with its own identity.

use std::path::Path;

use lumen_math::Point3;
use thiserror::Error;

/// Errors that can occur while loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Failed to load OBJ file {path}: {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("No models found in OBJ file {0}")]
    Empty(String),
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// A mesh consisting of vertex positions and triangle indices.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Vertex positions (one Point3 per vertex)
    pub positions: Vec<Point3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh from positions and indices.
    pub fn new(positions: Vec<Point3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Load every model of an OBJ file into one mesh, scaling positions by
    /// `scale`. Faces with more than three vertices are triangulated.
    pub fn load_obj<P: AsRef<Path>>(path: P, scale: f64) -> MeshResult<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )
        .map_err(|source| MeshError::Obj {
            path: path.display().to_string(),
            source,
        })?;

        if models.is_empty() {
            return Err(MeshError::Empty(path.display().to_string()));
        }

        let mut mesh = Mesh::default();
        for model in &models {
            let base = mesh.positions.len() as u32;
            mesh.positions.extend(model.mesh.positions.chunks_exact(3).map(|p| {
                Point3::new(p[0] as f64, p[1] as f64, p[2] as f64) * scale
            }));
            mesh.indices
                .extend(model.mesh.indices.iter().map(|index| base + index));
        }

        log::debug!(
            "Loaded {} with {} vertices, {} triangles",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Extract triangle vertices as [a, b, c] triplets.
    ///
    /// Triangles referencing a vertex that does not exist are skipped.
    pub fn extract_triangle_vertices(&self) -> Vec<[Point3; 3]> {
        let mut triangles = Vec::with_capacity(self.triangle_count());

        for chunk in self.indices.chunks(3) {
            if chunk.len() < 3 {
                continue;
            }

            let i0 = chunk[0] as usize;
            let i1 = chunk[1] as usize;
            let i2 = chunk[2] as usize;

            // Bounds check
            if i0 >= self.positions.len()
                || i1 >= self.positions.len()
                || i2 >= self.positions.len()
            {
                log::warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    i0,
                    i1,
                    i2,
                    self.positions.len()
                );
                continue;
            }

            triangles.push([self.positions[i0], self.positions[i1], self.positions[i2]]);
        }

        triangles
    }
}
