use super::camera_utils::Camera;
use cgmath::*;

#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera for PerspectiveCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_projection_matrix(&self) -> Matrix4<f32> {
        // A perspective matrix with znear != zfar and aspect != 0 is always invertible
        self.projection_matrix()
            .invert()
            .unwrap_or_else(Matrix4::identity)
    }
}

impl PerspectiveCamera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>, aspect: f32, fovy: impl Into<Rad<f32>>) -> Self {
        Self {
            eye,
            target,
            up: Vector3::unit_y(),
            aspect,
            fovy: fovy.into(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn with_clip_planes(mut self, znear: f32, zfar: f32) -> Self {
        self.znear = znear;
        self.zfar = zfar;
        self
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn look_at(&mut self, eye: Point3<f32>, target: Point3<f32>) {
        self.eye = eye;
        self.target = target;
    }

    /// Places the eye on a sphere around `target`
    ///
    /// `yaw` turns around the up axis, `pitch` lifts above the horizon.
    pub fn orbit(&mut self, target: Point3<f32>, distance: f32, pitch: f32, yaw: f32) {
        let pitch = pitch.clamp(
            -std::f32::consts::FRAC_PI_2 + f32::EPSILON,
            std::f32::consts::FRAC_PI_2 - f32::EPSILON,
        );
        self.target = target;
        self.eye = target
            + Vector3::new(
                distance * yaw.sin() * pitch.cos(),
                distance * pitch.sin(),
                distance * yaw.cos() * pitch.cos(),
            );
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}
