//! Construction options for [`SceneGraph`](super::SceneGraph)

use cgmath::Vector3;

/// Builder-style options applied when a scene graph is created
///
/// ```
/// use thistle::gfx::scene::{SceneGraph, SceneGraphSettings};
///
/// let settings = SceneGraphSettings::default()
///     .with_light_position(cgmath::Vector3::new(0.0, 10.0, 0.0))
///     .with_node_capacity(256);
/// let graph = SceneGraph::with_settings(settings);
/// assert!(graph.light_node().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraphSettings {
    /// Add a light-carrying node under the root
    pub seed_light: bool,
    pub light_name: String,
    pub light_position: Vector3<f32>,
    pub light_color: [f32; 3],
    /// Draw every node's bounding box, not just selected ones
    pub draw_aabbs: bool,
    /// Pre-reserved length of the node arrays
    pub node_capacity: usize,
}

impl Default for SceneGraphSettings {
    fn default() -> Self {
        Self {
            seed_light: true,
            light_name: "light".to_string(),
            light_position: Vector3::new(4.0, 8.0, 4.0),
            light_color: [1.0, 1.0, 1.0],
            draw_aabbs: false,
            node_capacity: 64,
        }
    }
}

impl SceneGraphSettings {
    pub fn with_seed_light(mut self, seed_light: bool) -> Self {
        self.seed_light = seed_light;
        self
    }

    pub fn with_light_name(mut self, name: &str) -> Self {
        self.light_name = name.to_string();
        self
    }

    pub fn with_light_position(mut self, position: Vector3<f32>) -> Self {
        self.light_position = position;
        self
    }

    pub fn with_light_color(mut self, color: [f32; 3]) -> Self {
        self.light_color = color;
        self
    }

    pub fn with_draw_aabbs(mut self, draw_aabbs: bool) -> Self {
        self.draw_aabbs = draw_aabbs;
        self
    }

    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }
}
