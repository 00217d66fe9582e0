//! # Graphics Module
//!
//! Scene graph, culling and the rendering seams of the Thistle engine.
//!
//! ## Architecture Overview
//!
//! - **Camera** ([`camera`]) - Camera trait and perspective camera
//! - **Geometry** ([`geometry`]) - Procedural primitives
//! - **Rendering** ([`rendering`]) - Drawable, shader and frame encoder seams plus headless implementations
//! - **Resources** ([`resources`]) - Materials and the asset registry
//! - **Scene** ([`scene`]) - Node hierarchy, transforms, bounding boxes and frustum culling
//!
//! No graphics device is linked. A backend implements
//! [`FrameEncoder`](rendering::FrameEncoder) and receives the draw stream
//! produced by [`SceneGraph::draw`](scene::SceneGraph::draw).

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::PerspectiveCamera;
pub use scene::SceneGraph;
