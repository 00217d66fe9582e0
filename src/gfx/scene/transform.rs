//! Per-node placement
//!
//! A [`Transform`] stores local translation, rotation and scale and caches the
//! world-space (global) model matrix derived from them. Setters only mark the
//! cache stale; the scene graph refreshes it during its per-frame update.

use cgmath::{InnerSpace, Matrix3, Matrix4, Quaternion, SquareMatrix, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    local_position: Vector3<f32>,
    local_orientation: Quaternion<f32>,
    local_scale: Vector3<f32>,
    is_dirty: bool,
    global_model: Matrix4<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Identity placement, dirty so the first update computes the global model
    pub fn new() -> Self {
        Self {
            local_position: Vector3::new(0.0, 0.0, 0.0),
            local_orientation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            local_scale: Vector3::new(1.0, 1.0, 1.0),
            is_dirty: true,
            global_model: Matrix4::identity(),
        }
    }

    pub fn local_position(&self) -> Vector3<f32> {
        self.local_position
    }

    pub fn local_orientation(&self) -> Quaternion<f32> {
        self.local_orientation
    }

    pub fn local_scale(&self) -> Vector3<f32> {
        self.local_scale
    }

    pub fn set_local_position(&mut self, position: Vector3<f32>) {
        self.local_position = position;
        self.is_dirty = true;
    }

    /// Stored as given; callers are responsible for passing a unit quaternion
    pub fn set_local_orientation(&mut self, orientation: Quaternion<f32>) {
        self.local_orientation = orientation;
        self.is_dirty = true;
    }

    pub fn set_local_scale(&mut self, scale: Vector3<f32>) {
        self.local_scale = scale;
        self.is_dirty = true;
    }

    /// Replaces the local placement by decomposing an affine matrix into TRS
    ///
    /// Shear and negative-determinant (mirroring) matrices cannot be represented
    /// and decompose to the nearest rotation-plus-positive-scale.
    pub fn set_local_model(&mut self, model: Matrix4<f32>) {
        let x_axis = model.x.truncate();
        let y_axis = model.y.truncate();
        let z_axis = model.z.truncate();

        let scale = Vector3::new(x_axis.magnitude(), y_axis.magnitude(), z_axis.magnitude());
        let rotation = Matrix3::from_cols(x_axis / scale.x, y_axis / scale.y, z_axis / scale.z);

        self.local_position = model.w.truncate();
        self.local_scale = scale;
        self.local_orientation = quaternion_from_rotation(&rotation).normalize();
        self.is_dirty = true;
    }

    /// `Translate * Rotate * Scale`, computed on every call
    pub fn local_model(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.local_position)
            * Matrix4::from(self.local_orientation)
            * Matrix4::from_nonuniform_scale(self.local_scale.x, self.local_scale.y, self.local_scale.z)
    }

    /// Global model for a node without parent
    pub fn update_global_model(&mut self) {
        self.global_model = self.local_model();
        self.is_dirty = false;
    }

    pub fn update_global_model_with_parent(&mut self, parent_global_model: &Matrix4<f32>) {
        self.global_model = parent_global_model * self.local_model();
        self.is_dirty = false;
    }

    pub fn global_model(&self) -> Matrix4<f32> {
        self.global_model
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Force recomputation on the next update
    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    pub fn global_position(&self) -> Vector3<f32> {
        self.global_model.w.truncate()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.global_model.x.truncate()
    }

    pub fn up(&self) -> Vector3<f32> {
        self.global_model.y.truncate()
    }

    /// Viewing direction of camera-like nodes, which look down their local -Z
    pub fn front(&self) -> Vector3<f32> {
        -self.global_model.z.truncate()
    }
}

/// Rotation matrix to quaternion.
///
/// Picks the branch whose denominator is built from the largest of the trace and
/// the three diagonal entries, keeping the square root away from zero.
fn quaternion_from_rotation(m: &Matrix3<f32>) -> Quaternion<f32> {
    // cgmath is column-major: m[col][row]
    let (m00, m11, m22) = (m[0][0], m[1][1], m[2][2]);
    let (m01, m02) = (m[1][0], m[2][0]);
    let (m10, m12) = (m[0][1], m[2][1]);
    let (m20, m21) = (m[0][2], m[1][2]);
    let trace = m00 + m11 + m22;

    if trace > 0.0 {
        let s = (trace + 1.0).sqrt() * 2.0;
        Quaternion::new(0.25 * s, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
    } else if m00 > m11 && m00 > m22 {
        let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
        Quaternion::new((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
    } else if m11 > m22 {
        let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
        Quaternion::new((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
    } else {
        let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
        Quaternion::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::{Deg, Rotation3};

    fn trs(position: Vector3<f32>, rotation: Quaternion<f32>, scale: Vector3<f32>) -> Transform {
        let mut transform = Transform::new();
        transform.set_local_position(position);
        transform.set_local_orientation(rotation);
        transform.set_local_scale(scale);
        transform
    }

    #[test]
    fn test_new_transform_is_dirty_identity() {
        let transform = Transform::new();
        assert!(transform.is_dirty());
        assert_eq!(transform.local_model(), Matrix4::identity());
    }

    #[test]
    fn test_setters_mark_dirty() {
        let mut transform = Transform::new();
        transform.update_global_model();
        assert!(!transform.is_dirty());

        transform.set_local_scale(Vector3::new(2.0, 2.0, 2.0));
        assert!(transform.is_dirty());
    }

    #[test]
    fn test_local_model_applies_scale_then_rotation_then_translation() {
        let transform = trs(
            Vector3::new(1.0, 2.0, 3.0),
            Quaternion::from_angle_z(Deg(90.0)),
            Vector3::new(2.0, 1.0, 1.0),
        );
        // +X scaled to length 2, turned onto +Y, then moved
        let moved = transform.local_model() * cgmath::Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(moved, cgmath::Vector4::new(1.0, 4.0, 3.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_update_with_parent_composes() {
        let mut parent = trs(
            Vector3::new(0.0, 5.0, 0.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        parent.update_global_model();

        let mut child = trs(
            Vector3::new(1.0, 0.0, 0.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        child.update_global_model_with_parent(&parent.global_model());

        assert_eq!(child.global_position(), Vector3::new(1.0, 5.0, 0.0));
        assert!(!child.is_dirty());
    }

    #[test]
    fn test_set_local_model_round_trips_axis_rotations() {
        let rotations = [
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            Quaternion::from_angle_x(Deg(90.0)),
            Quaternion::from_angle_y(Deg(180.0)),
            Quaternion::from_angle_z(Deg(-90.0)),
            Quaternion::from_angle_y(Deg(30.0)) * Quaternion::from_angle_x(Deg(45.0)),
        ];

        for rotation in rotations {
            let source = trs(Vector3::new(-3.0, 0.5, 7.0), rotation, Vector3::new(0.5, 2.0, 3.0));
            let matrix = source.local_model();

            let mut decomposed = Transform::new();
            decomposed.set_local_model(matrix);

            assert_abs_diff_eq!(decomposed.local_model(), matrix, epsilon = 1e-4);
            assert_abs_diff_eq!(decomposed.local_scale(), Vector3::new(0.5, 2.0, 3.0), epsilon = 1e-5);
            assert_abs_diff_eq!(decomposed.local_orientation().magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_quaternion_branches_match_cgmath() {
        // One rotation per branch: positive trace, then each dominant diagonal
        let cases = [
            Quaternion::from_angle_x(Deg(10.0)),
            Quaternion::from_angle_x(Deg(170.0)),
            Quaternion::from_angle_y(Deg(170.0)),
            Quaternion::from_angle_z(Deg(170.0)),
        ];

        for expected in cases {
            let q = quaternion_from_rotation(&Matrix3::from(expected));
            // q and -q encode the same rotation
            let aligned = if q.dot(expected) < 0.0 { -q } else { q };
            assert_abs_diff_eq!(aligned, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_basis_axes() {
        let mut transform = trs(
            Vector3::new(0.0, 0.0, 0.0),
            Quaternion::from_angle_y(Deg(90.0)),
            Vector3::new(1.0, 1.0, 1.0),
        );
        transform.update_global_model();

        assert_abs_diff_eq!(transform.right(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
        assert_abs_diff_eq!(transform.up(), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!(transform.front(), Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
    }
}
