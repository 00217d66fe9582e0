// src/lib.rs
//! Thistle 3D Engine
//!
//! A scene graph with hierarchical transforms, bounding volumes and frustum
//! culling, drawing through an immediate-mode [`FrameEncoder`](gfx::rendering::FrameEncoder).

pub mod error;
pub mod gfx;
pub mod performance;
pub mod prelude;

// Re-export main types for convenience
pub use error::{Result, SceneError};
pub use gfx::scene::SceneGraph;
