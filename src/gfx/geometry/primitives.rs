//! # Primitive Shape Generation
//!
//! Functions generating common 3D primitive shapes with outward normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Faces of an axis-aligned cube as (normal, u, v) with `u x v == normal`,
/// so the quad `-u-v, +u-v, +u+v, -u+v` winds counter-clockwise from outside.
const CUBE_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
];

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes, four vertices per
/// face so every face keeps a flat normal.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    for (normal, u, v) in CUBE_FACES.iter() {
        let base = data.vertices.len() as u32;

        for (a, b) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let mut position = [0.0; 3];
            for axis in 0..3 {
                position[axis] = 0.5 * (normal[axis] + a * u[axis] + b * v[axis]);
            }
            data.vertices.push(position);
            data.normals.push(*normal);
        }

        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate the 12 edges of the cube `[-1, 1]^3` as a line list
///
/// Index pairs describe line segments, not triangles. This is the shape scaled
/// onto a bounding box by [`AABB::global_model_matrix`](crate::gfx::scene::AABB::global_model_matrix).
pub fn generate_wire_cube() -> GeometryData {
    let mut data = GeometryData::new();

    // Corner i has bit 0 -> x, bit 1 -> y, bit 2 -> z set to +1
    for i in 0..8u32 {
        let corner = [
            if i & 1 != 0 { 1.0 } else { -1.0 },
            if i & 2 != 0 { 1.0 } else { -1.0 },
            if i & 4 != 0 { 1.0 } else { -1.0 },
        ];
        let inv_len = 1.0 / 3.0f32.sqrt();
        data.vertices.push(corner);
        data.normals
            .push([corner[0] * inv_len, corner[1] * inv_len, corner[2] * inv_len]);
    }

    // Edges connect corners that differ in exactly one bit
    for i in 0..8u32 {
        for bit in [1u32, 2, 4] {
            if i & bit == 0 {
                data.indices.push(i);
                data.indices.push(i | bit);
            }
        }
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let point = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices.push(point);
            data.normals.push(point);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}

/// Generate a flat grid in the XZ plane with its normal along +Y
///
/// # Arguments
/// * `width` - Extent along X
/// * `depth` - Extent along Z
/// * `width_segments` - Number of subdivisions along X
/// * `depth_segments` - Number of subdivisions along Z
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for z in 0..=d_segs {
        let pos_z = (z as f32 / d_segs as f32 - 0.5) * depth;
        for x in 0..=w_segs {
            let pos_x = (x as f32 / w_segs as f32 - 0.5) * width;
            data.vertices.push([pos_x, 0.0, pos_z]);
            data.normals.push([0.0, 1.0, 0.0]);
        }
    }

    // Counter-clockwise when viewed from +Y
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}
