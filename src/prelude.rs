//! # Thistle Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use thistle::prelude::*;
//!
//! let mut registry = AssetRegistry::new();
//! let cube = registry.add_mesh(Box::new(Mesh::from_geometry("cube", &generate_cube())));
//! let shader = registry.add_shader(Box::new(ShaderProgram::phong("phong")));
//!
//! let mut graph = SceneGraph::new();
//! graph.add_mesh_node("cube", NodeId::ROOT, cube, shader);
//! graph.update(&registry);
//! ```

// Errors
pub use crate::error::{Result, SceneError};

// Camera
pub use crate::gfx::camera::{Camera, PerspectiveCamera};

// Geometry and rendering
pub use crate::gfx::geometry::{generate_cube, generate_plane, generate_sphere, GeometryData};
pub use crate::gfx::rendering::{
    CommandRecorder, Drawable, FrameEncoder, Mesh, Shader, ShaderProgram, UniformValue,
};

// Resources
pub use crate::gfx::resources::{AssetRegistry, Material, MaterialId, MeshId, ShaderId};

// Scene
pub use crate::gfx::scene::{
    Frustum, Node, NodeId, NodeKind, ObjSceneLoader, SceneGraph, SceneGraphSettings, SceneLoader,
    Transform, AABB,
};

// Diagnostics
pub use crate::performance::{PerformanceMetrics, PerformanceMonitor};
