use cgmath::Matrix4;

/// Source of the per-frame view volume.
///
/// Matrices follow OpenGL clip conventions: after the perspective divide the
/// visible volume is the cube `[-1, 1]^3`.
pub trait Camera {
    /// Combined `projection * view` matrix
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;

    /// Inverse of the projection matrix alone, for unprojecting view-space rays
    fn inverse_projection_matrix(&self) -> Matrix4<f32>;
}
