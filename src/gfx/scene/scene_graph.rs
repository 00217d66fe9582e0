//! # Scene Graph
//!
//! Owns the node hierarchy and its per-node transforms and bounding boxes in
//! parallel arrays indexed by [`NodeId`]. Every frame it propagates transforms from
//! the root down, rebuilds bounding boxes from the leaves up, then walks the tree
//! again culling against the camera frustum and drawing what survives.
//!
//! Meshes, shaders and materials belong to an [`AssetRegistry`]; nodes only store
//! ids into it, so the registry passed to [`SceneGraph::update_aabbs`] and
//! [`SceneGraph::draw`] must be the one those ids came from.
//!
//! ## Usage
//!
//! ```
//! use cgmath::{Deg, Point3, Vector3};
//! use thistle::gfx::{
//!     camera::PerspectiveCamera,
//!     geometry::generate_cube,
//!     rendering::{CommandRecorder, Mesh, ShaderProgram},
//!     resources::AssetRegistry,
//!     scene::{Frustum, NodeId, SceneGraph},
//! };
//!
//! let mut registry = AssetRegistry::new();
//! let cube = registry.add_mesh(Box::new(Mesh::from_geometry("cube", &generate_cube())));
//! let phong = registry.add_shader(Box::new(ShaderProgram::phong("phong")));
//!
//! let mut graph = SceneGraph::new();
//! let node = graph.add_mesh_node("crate", NodeId::ROOT, cube, phong);
//! graph.transform_mut(node).set_local_position(Vector3::new(0.0, 0.0, -2.0));
//!
//! let camera = PerspectiveCamera::new(Point3::new(0.0, 0.0, 5.0), Point3::new(0.0, 0.0, 0.0), 1.0, Deg(45.0));
//! let mut recorder = CommandRecorder::new();
//! graph.draw(&Frustum::from_camera(&camera), &registry, &mut recorder);
//! assert_eq!(graph.total_drawn_objects(), 1);
//! ```

use std::ops::{Index, IndexMut};
use std::path::{Path, PathBuf};

use cgmath::{Matrix, Matrix3, Matrix4, SquareMatrix, Vector3};

use crate::error::Result;
use crate::gfx::{
    rendering::{FrameEncoder, UniformValue},
    resources::{AssetRegistry, MaterialId, MeshId, ShaderId},
};

use super::{
    aabb::AABB,
    frustum::Frustum,
    loader::SceneLoader,
    node::{ColorId, MaterialSlot, Node, NodeId, NodeKind, SceneId},
    settings::SceneGraphSettings,
    transform::Transform,
};

const SELECTED_ROOT_COLOR: [f32; 3] = [0.0, 1.0, 1.0];
const SELECTED_CHILD_COLOR: [f32; 3] = [0.0, 0.0, 1.0];
const GROUP_BOX_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
const MESH_BOX_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// A nested scene file attached under a [`NodeKind::SceneRoot`] node
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedScene {
    pub path: PathBuf,
    pub root: NodeId,
    /// Nodes the loader added below `root`
    pub node_count: usize,
}

pub struct SceneGraph {
    nodes: Vec<Node>,
    transforms: Vec<Transform>,
    aabbs: Vec<AABB>,
    colors: Vec<[f32; 3]>,
    materials: Vec<MaterialId>,
    scenes: Vec<LoadedScene>,
    selected_node: Option<NodeId>,
    light_node: Option<NodeId>,
    total_drawn_objects: usize,
    total_culled_nodes: usize,
    are_aabbs_drawn: bool,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Root plus the default light node
    pub fn new() -> Self {
        Self::with_settings(SceneGraphSettings::default())
    }

    pub fn with_settings(settings: SceneGraphSettings) -> Self {
        let capacity = settings.node_capacity.max(1);
        let mut graph = Self {
            nodes: Vec::with_capacity(capacity),
            transforms: Vec::with_capacity(capacity),
            aabbs: Vec::with_capacity(capacity),
            colors: Vec::new(),
            materials: Vec::new(),
            scenes: Vec::new(),
            selected_node: None,
            light_node: None,
            total_drawn_objects: 0,
            total_culled_nodes: 0,
            are_aabbs_drawn: settings.draw_aabbs,
        };

        graph.push_node(Node::new("root", None, NodeKind::Simple));

        if settings.seed_light {
            let light = graph.add_simple_node(&settings.light_name, NodeId::ROOT);
            graph.transform_mut(light).set_local_position(settings.light_position);
            graph.add_color_to_node(light, settings.light_color);
            graph.light_node = Some(light);
        }

        graph
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.transforms.push(Transform::new());
        self.aabbs.push(AABB::default());
        id
    }

    fn add_node(&mut self, name: &str, parent: NodeId, kind: NodeKind) -> NodeId {
        assert!(
            parent.0 < self.nodes.len(),
            "parent {:?} does not exist ({} nodes)",
            parent,
            self.nodes.len()
        );

        let id = self.push_node(Node::new(name, Some(parent), kind));
        self.nodes[parent.0].push_child(id);
        log::debug!("added node {:?} '{}' under {:?}", id, name, parent);
        id
    }

    /// Appends a grouping node under `parent`
    ///
    /// # Panics
    /// If `parent` is not an existing node.
    pub fn add_simple_node(&mut self, name: &str, parent: NodeId) -> NodeId {
        self.add_node(name, parent, NodeKind::Simple)
    }

    /// Appends a node drawing `mesh` with `shader`, both ids of the registry used for drawing
    pub fn add_mesh_node(&mut self, name: &str, parent: NodeId, mesh: MeshId, shader: ShaderId) -> NodeId {
        self.add_node(name, parent, NodeKind::Mesh { mesh, shader })
    }

    /// Creates an attachment node and lets `loader` populate the file at `path` under it
    ///
    /// On failure the empty attachment node stays in the graph.
    pub fn add_scene_node(
        &mut self,
        name: &str,
        parent: NodeId,
        path: impl AsRef<Path>,
        loader: &dyn SceneLoader,
        registry: &mut AssetRegistry,
    ) -> Result<NodeId> {
        let path = path.as_ref();
        let scene = SceneId(self.scenes.len());
        let root = self.add_node(name, parent, NodeKind::SceneRoot { scene });
        self.scenes.push(LoadedScene {
            path: path.to_path_buf(),
            root,
            node_count: 0,
        });

        let node_count = loader.load_into(path, registry, self, root)?;
        self.scenes[scene.0].node_count = node_count;
        log::debug!("loaded '{}' under {:?}: {} nodes", path.display(), root, node_count);

        Ok(root)
    }

    /// Appends `color` to the color table and points `node` at it
    ///
    /// A node's previous color slot is left in the table.
    pub fn add_color_to_node(&mut self, node: NodeId, color: [f32; 3]) -> ColorId {
        let id = ColorId(self.colors.len());
        self.colors.push(color);
        self.nodes[node.0].set_color(id);
        id
    }

    /// Appends a reference to registry material `material` and points `node` at it
    pub fn add_material_to_node(&mut self, node: NodeId, material: MaterialId) -> MaterialSlot {
        let slot = MaterialSlot(self.materials.len());
        self.materials.push(material);
        self.nodes[node.0].set_material(slot);
        slot
    }

    /// Overwrites `is_visible` on `node` and its whole subtree
    pub fn set_visibility(&mut self, node: NodeId, visible: bool) {
        for id in self.descendants(node) {
            self.nodes[id.0].is_visible = visible;
        }
    }

    /// Overwrites `is_selected` on `node` and its whole subtree
    pub fn set_is_selected(&mut self, node: NodeId, selected: bool) {
        for id in self.descendants(node) {
            self.nodes[id.0].is_selected = selected;
        }
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected_node
    }

    /// Moves the selection, clearing the previously selected subtree
    pub fn select(&mut self, node: Option<NodeId>) {
        if let Some(previous) = self.selected_node.take() {
            self.set_is_selected(previous, false);
        }
        if let Some(node) = node {
            self.set_is_selected(node, true);
        }
        self.selected_node = node;
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn light_node(&self) -> Option<NodeId> {
        self.light_node
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn transform(&self, node: NodeId) -> &Transform {
        &self.transforms[node.0]
    }

    pub fn transform_mut(&mut self, node: NodeId) -> &mut Transform {
        &mut self.transforms[node.0]
    }

    /// World-space box as of the last [`update_aabbs`](Self::update_aabbs)
    pub fn aabb(&self, node: NodeId) -> &AABB {
        &self.aabbs[node.0]
    }

    pub fn color(&self, color: ColorId) -> [f32; 3] {
        self.colors[color.0]
    }

    pub fn color_mut(&mut self, color: ColorId) -> &mut [f32; 3] {
        &mut self.colors[color.0]
    }

    pub fn material(&self, slot: MaterialSlot) -> MaterialId {
        self.materials[slot.0]
    }

    pub fn loaded_scene(&self, scene: SceneId) -> &LoadedScene {
        &self.scenes[scene.0]
    }

    pub fn loaded_scenes(&self) -> &[LoadedScene] {
        &self.scenes
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes[node.0].children()
    }

    /// `node` followed by its whole subtree, parents before children
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![node];

        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children().iter().rev());
        }

        order
    }

    /// Recomputes stale global models in the subtree rooted at `start`
    ///
    /// A dirty node forces recomputation of its entire subtree. Clean subtrees
    /// are still walked since a descendant may be dirty on its own.
    pub fn update_transform_and_children(&mut self, start: NodeId) {
        let mut stack = vec![(start, false)];

        while let Some((id, forced)) = stack.pop() {
            let recompute = forced || self.transforms[id.0].is_dirty();

            if recompute {
                match self.nodes[id.0].parent() {
                    Some(parent) => {
                        let parent_model = self.transforms[parent.0].global_model();
                        self.transforms[id.0].update_global_model_with_parent(&parent_model);
                    }
                    None => self.transforms[id.0].update_global_model(),
                }
            }

            stack.extend(self.nodes[id.0].children().iter().rev().map(|&child| (child, recompute)));
        }
    }

    /// Rebuilds every bounding box, children before parents
    pub fn update_aabbs(&mut self, registry: &AssetRegistry) {
        for id in self.descendants(NodeId::ROOT).into_iter().rev() {
            let node = &self.nodes[id.0];
            let aabb = match node.kind() {
                NodeKind::Mesh { mesh, .. } => {
                    let mut world = AABB::default();
                    world.set_from_local(&registry.mesh(mesh).local_bounding_box(), &self.transforms[id.0]);
                    world
                }
                NodeKind::Simple | NodeKind::SceneRoot { .. } => {
                    let mut children = node.children().iter().map(|child| self.aabbs[child.0]);
                    match children.next() {
                        Some(first) => children.fold(first, |acc, child| acc.union(&child)),
                        None => AABB::from_point(self.transforms[id.0].global_position()),
                    }
                }
            };
            self.aabbs[id.0] = aabb;
        }
    }

    /// Transform propagation followed by bounding box rebuild
    pub fn update(&mut self, registry: &AssetRegistry) {
        self.update_transform_and_children(NodeId::ROOT);
        self.update_aabbs(registry);
    }

    /// Updates the graph and draws every visible node inside `frustum`
    pub fn draw(&mut self, frustum: &Frustum, registry: &AssetRegistry, frame: &mut dyn FrameEncoder) {
        self.total_drawn_objects = 0;

        // Taken before the update, so the light lags one frame behind its node
        let (light_color, light_position) = self.light_snapshot();

        self.update(registry);

        let (visited, culled) = self.cull(frustum);
        self.total_culled_nodes = culled;

        let view_projection = frustum.view_projection();

        for id in visited {
            let node = &self.nodes[id.0];

            if let NodeKind::Mesh { mesh, shader } = node.kind() {
                let shader = registry.shader(shader);
                let model = self.transforms[id.0].global_model();

                shader.bind(frame);
                shader.set_uniform_if_present(frame, "u_model", UniformValue::Mat4(model));
                shader.set_uniform_if_present(frame, "u_mvp", UniformValue::Mat4(view_projection * model));
                shader.set_uniform_if_present(frame, "u_normal_matrix", UniformValue::Mat3(normal_matrix(&model)));
                shader.set_uniform_if_present(frame, "u_light_color", UniformValue::Vec3(light_color));
                shader.set_uniform_if_present(frame, "u_light_position", UniformValue::Vec3(light_position));

                if let Some(color) = node.color() {
                    let color = Vector3::from(self.colors[color.0]);
                    shader.set_uniform_if_present(frame, "u_color", UniformValue::Vec3(color));
                }
                if let Some(slot) = node.material() {
                    registry.material(self.materials[slot.0]).apply(shader, frame);
                }

                registry.mesh(mesh).draw(frame);
                self.total_drawn_objects += 1;
            }

            if self.are_aabbs_drawn || node.is_selected {
                self.draw_aabb(id, &view_projection, registry, frame);
            }
        }

        log::trace!(
            "frame drew {} objects, culled {} nodes",
            self.total_drawn_objects,
            self.total_culled_nodes
        );
    }

    /// Drawable nodes that would be drawn against `frustum`, in draw order
    ///
    /// Uses the boxes from the last update and does not touch the counters.
    pub fn collect_visible(&self, frustum: &Frustum) -> Vec<NodeId> {
        let (visited, _) = self.cull(frustum);
        visited
            .into_iter()
            .filter(|id| self.nodes[id.0].is_drawable())
            .collect()
    }

    /// Pre-order walk skipping hidden subtrees and subtrees whose box misses the frustum
    ///
    /// Returns the nodes that passed and the number of nodes rejected by the frustum test.
    fn cull(&self, frustum: &Frustum) -> (Vec<NodeId>, usize) {
        let mut visited = Vec::new();
        let mut culled = 0;
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.is_visible {
                continue;
            }
            if !self.aabbs[id.0].is_in_frustum(frustum) {
                culled += 1;
                continue;
            }

            visited.push(id);
            stack.extend(node.children().iter().rev());
        }

        (visited, culled)
    }

    fn draw_aabb(
        &self,
        id: NodeId,
        view_projection: &Matrix4<f32>,
        registry: &AssetRegistry,
        frame: &mut dyn FrameEncoder,
    ) {
        let shader = registry.shader(registry.debug_shader());
        let mvp = view_projection * self.aabbs[id.0].global_model_matrix();

        shader.bind(frame);
        shader.set_uniform_if_present(frame, "u_mvp", UniformValue::Mat4(mvp));
        shader.set_uniform_if_present(frame, "u_color", UniformValue::Vec3(Vector3::from(self.debug_color(id))));
        registry.mesh(registry.wire_cube()).draw(frame);
    }

    fn debug_color(&self, id: NodeId) -> [f32; 3] {
        let node = &self.nodes[id.0];

        if node.is_selected {
            let parent_selected = node.parent().is_some_and(|parent| self.nodes[parent.0].is_selected);
            if parent_selected {
                SELECTED_CHILD_COLOR
            } else {
                SELECTED_ROOT_COLOR
            }
        } else if node.is_drawable() {
            MESH_BOX_COLOR
        } else {
            GROUP_BOX_COLOR
        }
    }

    fn light_snapshot(&self) -> (Vector3<f32>, Vector3<f32>) {
        match self.light_node {
            Some(light) => {
                let color = self.nodes[light.0]
                    .color()
                    .map_or([1.0, 1.0, 1.0], |color| self.colors[color.0]);
                (Vector3::from(color), self.transforms[light.0].global_position())
            }
            None => (Vector3::new(1.0, 1.0, 1.0), Vector3::new(0.0, 0.0, 0.0)),
        }
    }

    /// Meshes drawn by the last [`draw`](Self::draw), debug boxes excluded
    pub fn total_drawn_objects(&self) -> usize {
        self.total_drawn_objects
    }

    /// Nodes whose box failed the frustum test in the last [`draw`](Self::draw)
    pub fn total_culled_nodes(&self) -> usize {
        self.total_culled_nodes
    }

    pub fn are_aabbs_drawn(&self) -> bool {
        self.are_aabbs_drawn
    }

    pub fn set_aabbs_drawn(&mut self, drawn: bool) {
        self.are_aabbs_drawn = drawn;
    }
}

impl Index<NodeId> for SceneGraph {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for SceneGraph {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

/// Inverse transpose of the linear part; falls back to the linear part when singular
fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
    let linear = Matrix3::from_cols(model.x.truncate(), model.y.truncate(), model.z.truncate());
    linear.invert().map_or(linear, |inverse| inverse.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::PerspectiveCamera,
        geometry::generate_cube,
        rendering::{CommandRecorder, DrawCommand, Mesh, ShaderProgram},
        resources::{registry::WIRE_CUBE_NAME, Material},
    };
    use approx::assert_abs_diff_eq;
    use cgmath::{Deg, EuclideanSpace, InnerSpace, Point3, Quaternion, Rad, Rotation3};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn cube_registry() -> (AssetRegistry, MeshId, ShaderId) {
        let mut registry = AssetRegistry::new();
        let cube = registry.add_mesh(Box::new(Mesh::from_geometry("cube", &generate_cube())));
        let phong = registry.add_shader(Box::new(ShaderProgram::phong("phong")));
        (registry, cube, phong)
    }

    fn bare_graph() -> SceneGraph {
        SceneGraph::with_settings(SceneGraphSettings::default().with_seed_light(false))
    }

    fn camera_frustum(eye: Point3<f32>, fovy: Deg<f32>) -> Frustum {
        Frustum::from_camera(&PerspectiveCamera::new(eye, Point3::origin(), 1.0, fovy))
    }

    fn random_transform(rng: &mut StdRng, transform: &mut Transform) {
        transform.set_local_position(Vector3::new(
            rng.random_range(-5.0f32..5.0),
            rng.random_range(-5.0f32..5.0),
            rng.random_range(-5.0f32..5.0),
        ));
        let axis = Vector3::new(
            rng.random_range(-1.0f32..1.0),
            rng.random_range(-1.0f32..1.0),
            rng.random_range(0.1f32..1.0),
        )
        .normalize();
        transform.set_local_orientation(Quaternion::from_axis_angle(axis, Rad(rng.random_range(-3.0f32..3.0))));
        transform.set_local_scale(Vector3::new(
            rng.random_range(0.5f32..2.0),
            rng.random_range(0.5f32..2.0),
            rng.random_range(0.5f32..2.0),
        ));
    }

    #[test]
    fn test_new_graph_has_root_and_light() {
        let graph = SceneGraph::new();
        let light = graph.light_node().unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph[NodeId::ROOT].parent(), None);
        assert_eq!(graph[light].parent(), Some(NodeId::ROOT));
        assert_eq!(graph.children(NodeId::ROOT), &[light]);
        assert_eq!(graph.color(graph[light].color().unwrap()), [1.0, 1.0, 1.0]);

        let bare = bare_graph();
        assert_eq!(bare.node_count(), 1);
        assert_eq!(bare.light_node(), None);
    }

    #[test]
    fn test_hierarchy_links_parents_and_children() {
        let mut graph = bare_graph();
        let a = graph.add_simple_node("a", NodeId::ROOT);
        let b = graph.add_simple_node("b", NodeId::ROOT);
        let c = graph.add_simple_node("c", a);
        let d = graph.add_simple_node("d", b);
        let e = graph.add_simple_node("e", a);

        for id in [a, b, c, d, e] {
            let parent = graph[id].parent().unwrap();
            assert!(parent.0 < graph.node_count());
            assert!(graph.children(parent).contains(&id));
        }
        assert_eq!(graph.children(a), &[c, e]);
        assert_eq!(graph.descendants(NodeId::ROOT), vec![NodeId::ROOT, a, c, e, b, d]);
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn test_missing_parent_panics() {
        let mut graph = bare_graph();
        graph.add_simple_node("orphan", NodeId(42));
    }

    #[test]
    fn test_transform_chain_composes() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut graph = bare_graph();
        let a = graph.add_simple_node("a", NodeId::ROOT);
        let b = graph.add_simple_node("b", a);
        let c = graph.add_simple_node("c", b);

        for id in [NodeId::ROOT, a, b, c] {
            random_transform(&mut rng, graph.transform_mut(id));
        }
        graph.update_transform_and_children(NodeId::ROOT);

        let expected = graph.transform(NodeId::ROOT).local_model()
            * graph.transform(a).local_model()
            * graph.transform(b).local_model()
            * graph.transform(c).local_model();
        assert_abs_diff_eq!(graph.transform(c).global_model(), expected, epsilon = 1e-3);
    }

    #[test]
    fn test_dirty_parent_updates_clean_children() {
        let mut graph = bare_graph();
        let a = graph.add_simple_node("a", NodeId::ROOT);
        let b = graph.add_simple_node("b", a);
        graph.transform_mut(b).set_local_position(Vector3::new(0.0, 1.0, 0.0));
        graph.update_transform_and_children(NodeId::ROOT);

        graph.transform_mut(a).set_local_position(Vector3::new(3.0, 0.0, 0.0));
        assert!(!graph.transform(b).is_dirty());
        graph.update_transform_and_children(NodeId::ROOT);

        assert_eq!(graph.transform(b).global_position(), Vector3::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut graph = bare_graph();
        let mut parent = NodeId::ROOT;
        for i in 0..6 {
            parent = graph.add_simple_node(&format!("n{i}"), parent);
            random_transform(&mut rng, graph.transform_mut(parent));
        }

        graph.update_transform_and_children(NodeId::ROOT);
        let first: Vec<_> = (0..graph.node_count())
            .map(|i| graph.transform(NodeId(i)).global_model())
            .collect();

        graph.update_transform_and_children(NodeId::ROOT);
        for (i, model) in first.iter().enumerate() {
            assert_eq!(graph.transform(NodeId(i)).global_model(), *model);
            assert!(!graph.transform(NodeId(i)).is_dirty());
        }
    }

    #[test]
    fn test_parent_boxes_contain_children() {
        init_logger();
        let (registry, cube, phong) = cube_registry();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut graph = bare_graph();
        let mut groups = vec![NodeId::ROOT];

        for i in 0..40 {
            let parent = groups[rng.random_range(0..groups.len())];
            let id = if rng.random_bool(0.5) {
                graph.add_mesh_node(&format!("mesh{i}"), parent, cube, phong)
            } else {
                let id = graph.add_simple_node(&format!("group{i}"), parent);
                groups.push(id);
                id
            };
            random_transform(&mut rng, graph.transform_mut(id));
        }
        graph.update(&registry);

        for i in 0..graph.node_count() {
            let id = NodeId(i);
            if graph[id].is_drawable() {
                continue;
            }
            for &child in graph.children(id) {
                assert!(
                    graph.aabb(id).contains(graph.aabb(child)),
                    "{:?} box does not contain child {:?}",
                    id,
                    child
                );
            }
        }
    }

    #[test]
    fn test_childless_group_box_sits_at_its_position() {
        let (registry, _, _) = cube_registry();
        let mut graph = bare_graph();
        let group = graph.add_simple_node("empty", NodeId::ROOT);
        graph.transform_mut(group).set_local_position(Vector3::new(1.0, 2.0, 3.0));
        graph.update(&registry);

        assert_eq!(*graph.aabb(group), AABB::from_point(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(*graph.aabb(NodeId::ROOT), *graph.aabb(group));
    }

    #[test]
    fn test_mesh_box_follows_transform() {
        let (registry, cube, phong) = cube_registry();
        let mut graph = bare_graph();
        let mesh = graph.add_mesh_node("cube", NodeId::ROOT, cube, phong);
        graph.transform_mut(mesh).set_local_position(Vector3::new(5.0, 0.0, 0.0));
        graph.transform_mut(mesh).set_local_scale(Vector3::new(2.0, 2.0, 2.0));
        graph.update(&registry);

        let aabb = graph.aabb(mesh);
        assert_abs_diff_eq!(aabb.min_point.truncate(), Vector3::new(4.0, -1.0, -1.0), epsilon = 1e-6);
        assert_abs_diff_eq!(aabb.max_point.truncate(), Vector3::new(6.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_visibility_overwrites_subtree() {
        let mut graph = bare_graph();
        let a = graph.add_simple_node("a", NodeId::ROOT);
        let b = graph.add_simple_node("b", a);
        let c = graph.add_simple_node("c", b);

        graph.set_visibility(a, false);
        assert!(graph.descendants(a).iter().all(|&id| !graph[id].is_visible));
        assert!(graph[NodeId::ROOT].is_visible);

        graph[c].is_visible = true;
        graph.set_visibility(b, false);
        graph.set_visibility(a, true);
        assert!(graph.descendants(a).iter().all(|&id| graph[id].is_visible));
    }

    #[test]
    fn test_select_moves_selection() {
        let mut graph = bare_graph();
        let a = graph.add_simple_node("a", NodeId::ROOT);
        let a_child = graph.add_simple_node("a_child", a);
        let b = graph.add_simple_node("b", NodeId::ROOT);

        graph.select(Some(a));
        assert!(graph[a].is_selected && graph[a_child].is_selected);
        assert_eq!(graph.selected_node(), Some(a));

        graph.select(Some(b));
        assert!(!graph[a].is_selected && !graph[a_child].is_selected);
        assert!(graph[b].is_selected);

        graph.select(None);
        assert!(!graph[b].is_selected);
        assert_eq!(graph.selected_node(), None);
    }

    #[test]
    fn test_reattaching_color_and_material_appends() {
        let mut graph = bare_graph();
        let node = graph.add_simple_node("a", NodeId::ROOT);

        let first = graph.add_color_to_node(node, [1.0, 0.0, 0.0]);
        let second = graph.add_color_to_node(node, [0.0, 1.0, 0.0]);
        assert_ne!(first, second);
        assert_eq!(graph[node].color(), Some(second));
        assert_eq!(graph.color(first), [1.0, 0.0, 0.0]);

        *graph.color_mut(second) = [0.5, 0.5, 0.5];
        assert_eq!(graph.color(second), [0.5, 0.5, 0.5]);

        let slot = graph.add_material_to_node(node, MaterialId(0));
        let again = graph.add_material_to_node(node, MaterialId(0));
        assert_eq!(graph[node].material(), Some(again));
        assert_ne!(slot, again);
        assert_eq!(graph.material(again), MaterialId(0));
    }

    #[test]
    fn test_off_axis_child_is_culled() {
        init_logger();
        let (registry, cube, phong) = cube_registry();
        let mut graph = SceneGraph::new();
        let a = graph.add_mesh_node("a", NodeId::ROOT, cube, phong);
        let b = graph.add_mesh_node("b", a, cube, phong);
        graph.transform_mut(b).set_local_position(Vector3::new(10.0, 0.0, 0.0));

        let frustum = camera_frustum(Point3::new(0.0, 0.0, 5.0), Deg(10.0));
        let mut recorder = CommandRecorder::new();
        graph.draw(&frustum, &registry, &mut recorder);

        assert_eq!(graph.total_drawn_objects(), 1);
        assert_eq!(recorder.draw_count(), 1);
        assert!(graph.aabb(a).is_in_frustum(&frustum));
        assert!(!graph.aabb(b).is_in_frustum(&frustum));
        assert_eq!(graph.collect_visible(&frustum), vec![a]);
        assert!(graph.total_culled_nodes() >= 1);
    }

    #[test]
    fn test_hidden_subtree_is_not_drawn() {
        let (registry, cube, phong) = cube_registry();
        let mut graph = bare_graph();
        let group = graph.add_simple_node("group", NodeId::ROOT);
        graph.add_mesh_node("a", group, cube, phong);
        graph.add_mesh_node("b", group, cube, phong);

        let frustum = camera_frustum(Point3::new(0.0, 0.0, 5.0), Deg(60.0));
        let mut recorder = CommandRecorder::new();

        graph.draw(&frustum, &registry, &mut recorder);
        assert_eq!(graph.total_drawn_objects(), 2);

        graph.set_visibility(group, false);
        recorder.clear();
        graph.draw(&frustum, &registry, &mut recorder);
        assert_eq!(graph.total_drawn_objects(), 0);
        assert_eq!(recorder.draw_count(), 0);
        assert_eq!(graph.total_culled_nodes(), 0);
    }

    #[test]
    fn test_draw_uploads_node_uniforms() {
        let (mut registry, cube, phong) = cube_registry();
        let matte = registry.add_material(Material::new("matte", [0.2, 0.3, 0.4, 1.0], 0.0, 0.9));

        let mut graph = SceneGraph::with_settings(
            SceneGraphSettings::default()
                .with_light_position(Vector3::new(0.0, 10.0, 0.0))
                .with_light_color([0.5, 0.5, 0.5]),
        );
        let node = graph.add_mesh_node("cube", NodeId::ROOT, cube, phong);
        graph.transform_mut(node).set_local_position(Vector3::new(0.0, 0.0, -1.0));
        graph.add_color_to_node(node, [1.0, 0.5, 0.0]);
        graph.add_material_to_node(node, matte);

        let frustum = camera_frustum(Point3::new(0.0, 0.0, 5.0), Deg(60.0));
        let mut recorder = CommandRecorder::new();
        // First frame brings the light transform up to date
        graph.draw(&frustum, &registry, &mut recorder);
        recorder.clear();
        graph.draw(&frustum, &registry, &mut recorder);

        assert_eq!(recorder.commands()[0], DrawCommand::BindShader("phong".to_string()));
        let model = graph.transform(node).global_model();
        assert_eq!(recorder.uniform_at_draw(0, "u_model"), Some(UniformValue::Mat4(model)));
        assert_eq!(
            recorder.uniform_at_draw(0, "u_mvp"),
            Some(UniformValue::Mat4(frustum.view_projection() * model))
        );
        assert_eq!(
            recorder.uniform_at_draw(0, "u_color"),
            Some(UniformValue::Vec3(Vector3::new(1.0, 0.5, 0.0)))
        );
        assert_eq!(
            recorder.uniform_at_draw(0, "u_light_position"),
            Some(UniformValue::Vec3(Vector3::new(0.0, 10.0, 0.0)))
        );
        assert_eq!(
            recorder.uniform_at_draw(0, "u_light_color"),
            Some(UniformValue::Vec3(Vector3::new(0.5, 0.5, 0.5)))
        );
        assert_eq!(
            recorder.uniform_at_draw(0, "u_material.roughness"),
            Some(UniformValue::Float(0.9))
        );
        assert_eq!(
            recorder.uniform_at_draw(0, "u_normal_matrix"),
            Some(UniformValue::Mat3(Matrix3::identity()))
        );
    }

    #[test]
    fn test_light_position_lags_one_frame() {
        let (registry, cube, phong) = cube_registry();
        let mut graph = SceneGraph::new();
        graph.add_mesh_node("cube", NodeId::ROOT, cube, phong);
        let light = graph.light_node().unwrap();
        let frustum = camera_frustum(Point3::new(0.0, 0.0, 5.0), Deg(60.0));
        let mut recorder = CommandRecorder::new();

        graph.draw(&frustum, &registry, &mut recorder);
        let first_position = graph.transform(light).global_position();

        graph.transform_mut(light).set_local_position(Vector3::new(-7.0, 0.0, 0.0));
        recorder.clear();
        graph.draw(&frustum, &registry, &mut recorder);

        assert_eq!(
            recorder.uniform_at_draw(0, "u_light_position"),
            Some(UniformValue::Vec3(first_position))
        );
    }

    #[test]
    fn test_debug_box_colors() {
        let (registry, cube, phong) = cube_registry();
        let mut graph = bare_graph();
        let group = graph.add_simple_node("group", NodeId::ROOT);
        graph.add_mesh_node("cube", group, cube, phong);

        let frustum = camera_frustum(Point3::new(0.0, 0.0, 5.0), Deg(60.0));
        let mut recorder = CommandRecorder::new();

        graph.set_aabbs_drawn(true);
        graph.draw(&frustum, &registry, &mut recorder);
        // root box, group box, cube mesh, cube box
        assert_eq!(recorder.drawn_meshes(), vec![WIRE_CUBE_NAME, WIRE_CUBE_NAME, "cube", WIRE_CUBE_NAME]);
        assert_eq!(graph.total_drawn_objects(), 1);
        let green = Some(UniformValue::Vec3(Vector3::new(0.0, 1.0, 0.0)));
        assert_eq!(recorder.uniform_at_draw(0, "u_color"), green);
        assert_eq!(recorder.uniform_at_draw(1, "u_color"), green);
        assert_eq!(
            recorder.uniform_at_draw(3, "u_color"),
            Some(UniformValue::Vec3(Vector3::new(1.0, 0.0, 0.0)))
        );

        graph.set_aabbs_drawn(false);
        graph.select(Some(group));
        recorder.clear();
        graph.draw(&frustum, &registry, &mut recorder);
        // group box, cube mesh, cube box
        assert_eq!(recorder.drawn_meshes(), vec![WIRE_CUBE_NAME, "cube", WIRE_CUBE_NAME]);
        assert_eq!(
            recorder.uniform_at_draw(0, "u_color"),
            Some(UniformValue::Vec3(Vector3::new(0.0, 1.0, 1.0)))
        );
        assert_eq!(
            recorder.uniform_at_draw(2, "u_color"),
            Some(UniformValue::Vec3(Vector3::new(0.0, 0.0, 1.0)))
        );
    }

    #[test]
    fn test_debug_box_maps_wire_cube_onto_node_box() {
        let (registry, cube, phong) = cube_registry();
        let mut graph = bare_graph();
        let node = graph.add_mesh_node("cube", NodeId::ROOT, cube, phong);
        graph.select(Some(node));

        let frustum = camera_frustum(Point3::new(0.0, 0.0, 5.0), Deg(60.0));
        let mut recorder = CommandRecorder::new();
        graph.draw(&frustum, &registry, &mut recorder);

        let expected = frustum.view_projection() * graph.aabb(node).global_model_matrix();
        assert_eq!(recorder.uniform_at_draw(1, "u_mvp"), Some(UniformValue::Mat4(expected)));
    }
}
