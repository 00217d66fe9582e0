//! Scene nodes and the ids that address them
//!
//! Nodes live in the scene graph's arena and refer to each other by [`NodeId`].
//! A node's id is its permanent array position: nodes are never removed or moved.

use crate::gfx::resources::{MeshId, ShaderId};

/// Arena position of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node every scene graph is created with
    pub const ROOT: NodeId = NodeId(0);
}

/// Slot in the scene graph's color table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorId(pub usize);

/// Slot in the scene graph's material table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialSlot(pub usize);

/// Entry in the scene graph's table of loaded nested scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(pub usize);

/// What a node carries besides its placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Grouping node with no rendering data
    Simple,
    /// Draws `mesh` with `shader`
    Mesh { mesh: MeshId, shader: ShaderId },
    /// Attachment point of an externally loaded subtree
    SceneRoot { scene: SceneId },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub is_visible: bool,
    pub is_selected: bool,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    color: Option<ColorId>,
    material: Option<MaterialSlot>,
}

impl Node {
    /// Visible, unselected, with no color or material attached
    pub fn new(name: impl Into<String>, parent: Option<NodeId>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            is_visible: true,
            is_selected: false,
            kind,
            parent,
            children: Vec::new(),
            color: None,
            material: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// `None` only for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// In insertion order, which is also draw order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn color(&self) -> Option<ColorId> {
        self.color
    }

    pub fn material(&self) -> Option<MaterialSlot> {
        self.material
    }

    pub fn is_drawable(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh { .. })
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn set_color(&mut self, color: ColorId) {
        self.color = Some(color);
    }

    pub(crate) fn set_material(&mut self, material: MaterialSlot) {
        self.material = Some(material);
    }
}
