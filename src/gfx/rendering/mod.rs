// src/gfx/rendering/mod.rs
//! Rendering seams and headless implementations
//!
//! Defines the capabilities the scene graph draws through ([`Drawable`], [`Shader`],
//! [`FrameEncoder`]) and the in-crate implementations: CPU [`Mesh`]es, named
//! [`ShaderProgram`]s and the recording [`CommandRecorder`] backend.

pub mod mesh;
pub mod recorder;
pub mod shader;
pub mod traits;

// Re-export main types
pub use mesh::{Mesh, Vertex3D};
pub use recorder::{CommandRecorder, DrawCommand};
pub use shader::ShaderProgram;
pub use traits::{Drawable, FrameEncoder, Shader, UniformValue};
