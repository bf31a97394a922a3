use glam::Vec3;
use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;

/// Renderable scene node: the presentation-side handle for one object.
/// Simulation state lives elsewhere; nodes only carry what the renderer draws.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier (also the node's frame-buffer slot).
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Whether the renderer should draw this node.
    pub visible: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Euler rotation in radians (XYZ order).
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Mesh to build for this node (optional, lights and groups have none).
    pub mesh: Option<MeshComponent>,
}

impl Node {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }
}
