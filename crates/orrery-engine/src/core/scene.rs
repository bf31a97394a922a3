use crate::api::types::NodeId;
use crate::components::node::Node;

/// Presentation scene graph: flat node storage indexed by `NodeId`.
///
/// Ids are handed out densely from 0 by `EngineContext::next_id`, so a
/// node's id is also its slot. Nodes are never removed during a session.
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
        }
    }

    /// Create a scene with a specific node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the scene.
    pub fn spawn(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        match self.nodes.get(id.index()) {
            Some(node) if node.id == id => Some(node),
            _ => self.nodes.iter().find(|n| n.id == id),
        }
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let idx = id.index();
        if self.nodes.get(idx).map_or(false, |n| n.id == id) {
            return self.nodes.get_mut(idx);
        }
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Iterate over all nodes in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Largest slot index in use plus one.
    pub fn slot_count(&self) -> usize {
        self.nodes.iter().map(|n| n.id.index() + 1).max().unwrap_or(0)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
