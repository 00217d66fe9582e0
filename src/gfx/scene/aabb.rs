//! World-space axis-aligned bounding boxes
//!
//! Boxes are stored as homogeneous points (w = 1) so they can be pushed through
//! 4x4 matrices directly. Culling classifies the 8 corners in clip space.

use cgmath::{Matrix4, Vector3, Vector4};

use super::{frustum::Frustum, transform::Transform};

/// Axis-aligned bounding box for culling and debug overlays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner, w = 1
    pub min_point: Vector4<f32>,
    /// Maximum corner, w = 1
    pub max_point: Vector4<f32>,
}

impl Default for AABB {
    /// Degenerate box at the origin
    fn default() -> Self {
        let origin = Vector4::new(0.0, 0.0, 0.0, 1.0);
        Self {
            min_point: origin,
            max_point: origin,
        }
    }
}

impl AABB {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self {
            min_point: min.extend(1.0),
            max_point: max.extend(1.0),
        }
    }

    /// Degenerate box holding a single point
    pub fn from_point(point: Vector3<f32>) -> Self {
        Self::new(point, point)
    }

    pub fn set(&mut self, min: Vector3<f32>, max: Vector3<f32>) {
        *self = Self::new(min, max);
    }

    /// Bounds `local` after moving it into world space with `transform`'s global model
    ///
    /// All 8 corners are transformed and re-boxed, so rotated content stays covered
    /// at the price of a looser fit than an oriented box.
    pub fn set_from_local(&mut self, local: &AABB, transform: &Transform) {
        let model = transform.global_model();
        let mut corners = local.corners().into_iter().map(|corner| model * corner);

        // corners() always yields 8 points
        let first = corners.next().unwrap_or(local.min_point);
        let (min, max) = corners.fold((first, first), |(min, max), p| {
            (Self::axis_aligned_min(min, p), Self::axis_aligned_max(max, p))
        });

        self.min_point = min.truncate().extend(1.0);
        self.max_point = max.truncate().extend(1.0);
    }

    /// The 8 corners, bit 0 selecting max x, bit 1 max y, bit 2 max z
    pub fn corners(&self) -> [Vector4<f32>; 8] {
        let (lo, hi) = (self.min_point, self.max_point);
        std::array::from_fn(|i| {
            Vector4::new(
                if i & 1 != 0 { hi.x } else { lo.x },
                if i & 2 != 0 { hi.y } else { lo.y },
                if i & 4 != 0 { hi.z } else { lo.z },
                1.0,
            )
        })
    }

    pub fn center(&self) -> Vector3<f32> {
        ((self.min_point + self.max_point) * 0.5).truncate()
    }

    /// Half the size along each axis
    pub fn extents(&self) -> Vector3<f32> {
        ((self.max_point - self.min_point) * 0.5).truncate()
    }

    pub fn contains_point(&self, point: Vector3<f32>) -> bool {
        point.x >= self.min_point.x
            && point.x <= self.max_point.x
            && point.y >= self.min_point.y
            && point.y <= self.max_point.y
            && point.z >= self.min_point.z
            && point.z <= self.max_point.z
    }

    pub fn contains(&self, other: &AABB) -> bool {
        self.contains_point(other.min_point.truncate()) && self.contains_point(other.max_point.truncate())
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min_point: Self::axis_aligned_min(self.min_point, other.min_point),
            max_point: Self::axis_aligned_max(self.max_point, other.max_point),
        }
    }

    /// Conservative visibility test against the frustum.
    ///
    /// The box is rejected only when all 8 corners lie outside the same clip plane.
    /// A box whose corners are spread over several outside planes is reported
    /// visible even if it misses the frustum.
    pub fn is_in_frustum(&self, frustum: &Frustum) -> bool {
        let view_projection = frustum.view_projection();
        let clip = self.corners().map(|corner| view_projection * corner);

        // -x, +x, -y, +y, -z, +z against w
        let mut outside = [0usize; 6];
        for p in &clip {
            outside[0] += (p.x < -p.w) as usize;
            outside[1] += (p.x > p.w) as usize;
            outside[2] += (p.y < -p.w) as usize;
            outside[3] += (p.y > p.w) as usize;
            outside[4] += (p.z < -p.w) as usize;
            outside[5] += (p.z > p.w) as usize;
        }

        !outside.iter().any(|&count| count == clip.len())
    }

    /// Matrix mapping the wire cube `[-1, 1]^3` onto this box
    pub fn global_model_matrix(&self) -> Matrix4<f32> {
        let half = self.extents();
        Matrix4::from_translation(self.center()) * Matrix4::from_nonuniform_scale(half.x, half.y, half.z)
    }

    pub fn axis_aligned_min(a: Vector4<f32>, b: Vector4<f32>) -> Vector4<f32> {
        Vector4::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z), a.w.min(b.w))
    }

    pub fn axis_aligned_max(a: Vector4<f32>, b: Vector4<f32>) -> Vector4<f32> {
        Vector4::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z), a.w.max(b.w))
    }
}
