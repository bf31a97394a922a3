use serde::Serialize;
use crate::api::game::EngineContext;
use crate::components::mesh::{Color, MeshComponent};
use crate::systems::lighting::LightRig;

/// One renderable node as the host should build it.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestNode {
    /// Frame-buffer slot.
    pub index: u32,
    pub tag: String,
    pub mesh: Option<MeshComponent>,
}

/// Static scene description, serialized once after init.
///
/// The host builds its retained-mode objects from this; per-frame motion then
/// arrives through the frame buffer only.
#[derive(Debug, Clone, Serialize)]
pub struct SceneManifest {
    pub background: Color,
    pub lights: LightRig,
    pub point_count: usize,
    pub nodes: Vec<ManifestNode>,
}

impl SceneManifest {
    pub fn from_context(ctx: &EngineContext) -> Self {
        Self {
            background: ctx.background,
            lights: ctx.lights.clone(),
            point_count: ctx.points.len(),
            nodes: ctx
                .scene
                .iter()
                .map(|node| ManifestNode {
                    index: node.id.0,
                    tag: node.tag.clone(),
                    mesh: node.mesh,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;

    #[test]
    fn manifest_lists_nodes_in_slot_order() {
        let mut ctx = EngineContext::default();
        let sun = ctx.next_id();
        ctx.scene.spawn(
            Node::new(sun)
                .with_tag("Sun")
                .with_mesh(
                    MeshComponent::sphere(3.0, Color::from_hex(0xFDB813)).with_emissive(1.0),
                ),
        );
        let group = ctx.next_id();
        ctx.scene.spawn(Node::new(group).with_tag("belt"));

        let manifest = SceneManifest::from_context(&ctx);
        assert_eq!(manifest.nodes.len(), 2);
        assert_eq!(manifest.nodes[1].index, 1);

        let json = manifest.to_json().unwrap();
        assert!(json.contains(r#""tag":"Sun""#));
        assert!(json.contains(r#""kind":"sphere""#));
        assert!(json.contains(r#""mesh":null"#));
    }
}
