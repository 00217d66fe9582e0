// src/gfx/resources/mod.rs
//! Asset ownership
//!
//! Meshes, shaders and materials are owned here and referenced by id from scenes.

pub mod material;
pub mod registry;

// Re-export main types
pub use material::Material;
pub use registry::{AssetRegistry, MaterialId, MeshId, ShaderId};
