//! # Scene Module
//!
//! The node hierarchy and everything that decides, every frame, where each node
//! is and whether it gets drawn.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Owns nodes, transforms and bounding boxes; runs the per-frame update and draw
//! - [`Node`] - Identity, topology and side-table references of one scene entry
//! - [`Transform`] - Local TRS with a cached global model matrix and dirty flag
//! - [`AABB`] - World-space bounding box with the frustum test
//! - [`Frustum`] - Per-frame view volume built from a camera
//! - [`SceneLoader`] - Grows a graph from a scene file; [`ObjSceneLoader`] reads OBJ
//!
//! ## Frame Order
//!
//! 1. Transforms are propagated root to leaf, skipping clean subtrees
//! 2. Bounding boxes are rebuilt leaf to root
//! 3. The tree is walked again, culling whole subtrees whose box misses the frustum

pub mod aabb;
pub mod frustum;
pub mod loader;
pub mod node;
pub mod scene_graph;
pub mod settings;
pub mod transform;

// Re-export main types
pub use aabb::AABB;
pub use frustum::Frustum;
pub use loader::{ObjSceneLoader, SceneLoader};
pub use node::{ColorId, MaterialSlot, Node, NodeId, NodeKind, SceneId};
pub use scene_graph::{LoadedScene, SceneGraph};
pub use settings::SceneGraphSettings;
pub use transform::Transform;
