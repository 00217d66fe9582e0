//! # Rendering Traits
//!
//! The seams between the scene graph and the graphics API. The scene graph never
//! talks to a device directly: it binds [`Shader`]s, pushes uniforms through them
//! and asks [`Drawable`]s to draw themselves into a [`FrameEncoder`].
//!
//! ## Lifecycle
//!
//! For every visible drawable node in a frame the scene graph issues:
//! 1. **Bind** - [`Shader::bind`] makes the node's shader current
//! 2. **Uniforms** - [`Shader::set_uniform_if_present`] for model, MVP, normal matrix, light, color and material
//! 3. **Draw** - [`Drawable::draw`] records one draw command with the bound state

use cgmath::{Matrix3, Matrix4, Vector3, Vector4};

use crate::gfx::scene::AABB;

/// A value that can be written to a shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat3(Matrix3<f32>),
    Mat4(Matrix4<f32>),
}

/// Immediate-mode command sink for one frame.
///
/// Implemented by the graphics backend. State set through [`bind_shader`](Self::bind_shader)
/// and [`set_uniform`](Self::set_uniform) applies to every following draw until changed.
pub trait FrameEncoder {
    /// Make the named shader program current
    fn bind_shader(&mut self, shader: &str);

    /// Write a uniform of the currently bound shader
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Draw `index_count` indices of the named mesh with the current state
    fn draw_indexed(&mut self, mesh: &str, index_count: u32);
}

/// Something that can be drawn and bounded: meshes, primitives, wire shapes.
pub trait Drawable {
    /// Name used in logs and recorded commands
    fn label(&self) -> &str;

    /// Issue one draw command for the currently bound shader and uniforms
    fn draw(&self, frame: &mut dyn FrameEncoder);

    /// Object-space bounding box of the geometry
    fn local_bounding_box(&self) -> AABB;
}

/// A compiled shader program.
///
/// Different programs expose different uniform subsets while the scene traversal is
/// shader-agnostic, so writing an unknown uniform must be a silent no-op.
pub trait Shader {
    fn name(&self) -> &str;

    /// Bind the program for subsequent draws
    fn bind(&self, frame: &mut dyn FrameEncoder);

    /// Write `value` to the uniform `name` if the program declares it
    fn set_uniform_if_present(&self, frame: &mut dyn FrameEncoder, name: &str, value: UniformValue);
}
