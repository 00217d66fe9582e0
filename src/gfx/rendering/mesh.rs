//! CPU-side meshes
//!
//! A [`Mesh`] keeps interleaved vertices and indices in memory together with its
//! object-space bounds. Backends upload [`Mesh::vertex_bytes`] and
//! [`Mesh::index_bytes`] once and replay draws by label.

use cgmath::{InnerSpace, Vector3};

use super::traits::{Drawable, FrameEncoder};
use crate::gfx::{geometry::GeometryData, scene::AABB};

/// A 3D vertex with position and normal data.
///
/// `#[repr(C)]` keeps the layout identical to the vertex buffer the backend uploads.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
}

pub struct Mesh {
    label: String,
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    index_count: u32,
    bounds: AABB,
}

impl Mesh {
    pub fn new(label: impl Into<String>, positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        Self::from_geometry(label, &GeometryData::from_flat(&positions, &normals, indices))
    }

    pub fn from_geometry(label: impl Into<String>, data: &GeometryData) -> Self {
        let vertices = data
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: data.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect::<Vec<_>>();

        let bounds = match data.bounds() {
            Some((min, max)) => AABB::new(Vector3::from(min), Vector3::from(max)),
            None => AABB::default(),
        };

        Self {
            label: label.into(),
            vertices,
            indices: data.indices.clone(),
            index_count: data.indices.len() as u32,
            bounds,
        }
    }

    /// Smooth per-vertex normals for loaders whose files carry none
    ///
    /// Each vertex gets the normalized average of the face normals of every
    /// triangle that uses it.
    pub fn calculate_face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut normals = vec![Vector3::new(0.0f32, 0.0, 0.0); vertex_count];
        let position = |i: usize| Vector3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]);

        for triangle in indices.chunks_exact(3) {
            let [i0, i1, i2] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
            let v0 = position(i0);
            let face_normal = (position(i1) - v0).cross(position(i2) - v0);

            for vertex_idx in [i0, i1, i2] {
                normals[vertex_idx] += face_normal;
            }
        }

        normals
            .into_iter()
            .flat_map(|n| {
                let n = if n.magnitude2() > 0.0 { n.normalize() } else { n };
                [n.x, n.y, n.z]
            })
            .collect()
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Raw vertex data for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index data for buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl Drawable for Mesh {
    fn label(&self) -> &str {
        &self.label
    }

    fn draw(&self, frame: &mut dyn FrameEncoder) {
        if self.index_count == 0 {
            return; // nothing to submit
        }
        frame.draw_indexed(&self.label, self.index_count);
    }

    fn local_bounding_box(&self) -> AABB {
        self.bounds
    }
}
