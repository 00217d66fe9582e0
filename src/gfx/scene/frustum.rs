//! Per-frame view volume
//!
//! Built once per frame from the active camera and read-only during traversal.

use cgmath::{Matrix4, SquareMatrix, Vector3, Vector4, Zero};

use crate::gfx::camera::Camera;

/// NDC cube corners, near face first, each face counter-clockwise from bottom-left
const NDC_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    view_projection: Matrix4<f32>,
    points: [Vector3<f32>; 8],
}

impl Frustum {
    pub fn new(view_projection: Matrix4<f32>) -> Self {
        let mut frustum = Self {
            view_projection,
            points: [Vector3::zero(); 8],
        };
        frustum.update_from_matrix(view_projection);
        frustum
    }

    pub fn from_camera(camera: &impl Camera) -> Self {
        Self::new(camera.build_view_projection_matrix())
    }

    /// Pulls the camera's current view-projection; call once per frame
    pub fn update(&mut self, camera: &impl Camera) {
        self.update_from_matrix(camera.build_view_projection_matrix());
    }

    /// Stores `view_projection` and recomputes the world-space corners
    ///
    /// A singular matrix leaves every corner at the origin. Culling only needs
    /// the matrix itself, so it keeps working.
    pub fn update_from_matrix(&mut self, view_projection: Matrix4<f32>) {
        self.view_projection = view_projection;

        let Some(inverse) = view_projection.invert() else {
            log::warn!("view-projection matrix is not invertible, frustum corners reset to origin");
            self.points = [Vector3::zero(); 8];
            return;
        };

        self.points = NDC_CORNERS.map(|[x, y, z]| {
            let world = inverse * Vector4::new(x, y, z, 1.0);
            world.truncate() / world.w
        });
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.view_projection
    }

    /// World-space corners: near plane first, then far plane
    pub fn points(&self) -> &[Vector3<f32>; 8] {
        &self.points
    }
}
