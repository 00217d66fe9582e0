//! # Procedural Geometry Generation
//!
//! This module provides functions to generate common 3D primitive shapes procedurally,
//! so scenes and tests can be built without external model files.
//!
//! ## Supported Primitives
//!
//! - **Cube**: Unit cube spanning `[-0.5, 0.5]` on every axis
//! - **Wire cube**: Line-list cube spanning `[-1, 1]`, used for bounding box overlays
//! - **Sphere**: UV sphere with configurable resolution
//! - **Plane**: Flat grid in the XZ plane
//!
//! ## Usage
//!
//! ```rust
//! use thistle::gfx::geometry::{generate_cube, generate_sphere, generate_plane};
//!
//! let cube_data = generate_cube();
//! let sphere_data = generate_sphere(32, 16);
//! let plane_data = generate_plane(10.0, 10.0, 4, 4);
//! assert_eq!(cube_data.triangle_count(), 12);
//! ```

pub mod primitives;

pub use primitives::*;

/// Generated geometry data ready to be wrapped in a [`Mesh`](crate::gfx::rendering::Mesh)
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z), one per vertex
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding), or line pairs for wire shapes
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Build geometry from the flat `[x, y, z, x, y, z, ...]` arrays produced by model loaders
    pub fn from_flat(positions: &[f32], normals: &[f32], indices: Vec<u32>) -> Self {
        let vertices = positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect::<Vec<_>>();
        let normals = normals
            .chunks_exact(3)
            .map(|n| [n[0], n[1], n[2]])
            .collect();

        Self {
            vertices,
            normals,
            indices,
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Component-wise minimum and maximum over all vertex positions
    ///
    /// Returns `None` for geometry without vertices.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.vertices.first()?;
        let bounds = self
            .vertices
            .iter()
            .skip(1)
            .fold((first, first), |(mut min, mut max), v| {
                for axis in 0..3 {
                    min[axis] = min[axis].min(v[axis]);
                    max[axis] = max[axis].max(v[axis]);
                }
                (min, max)
            });
        Some(bounds)
    }
}
