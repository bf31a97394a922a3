use crate::components::node::Node;
use crate::renderer::instance::{NodeInstance, TransformBuffer};

/// Build the transform buffer from a set of nodes.
/// Each node lands in the slot named by its id; nodes past `max_nodes` are
/// dropped with a warning.
pub fn build_transform_buffer<'a>(
    nodes: impl Iterator<Item = &'a Node>,
    buffer: &mut TransformBuffer,
    max_nodes: usize,
) {
    buffer.clear();

    for node in nodes {
        let slot = node.id.index();
        if slot >= max_nodes {
            log::warn!("node '{}' (slot {slot}) exceeds max_nodes {max_nodes}", node.tag);
            continue;
        }

        buffer.write(
            slot,
            NodeInstance {
                x: node.pos.x,
                y: node.pos.y,
                z: node.pos.z,
                rx: node.rotation.x,
                ry: node.rotation.y,
                rz: node.rotation.z,
                scale: node.scale,
                visible: if node.visible { 1.0 } else { 0.0 },
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::NodeId;
    use glam::Vec3;

    #[test]
    fn nodes_land_in_their_slots() {
        let nodes = vec![
            Node::new(NodeId(1)).with_pos(Vec3::new(1.0, 2.0, 3.0)),
            Node::new(NodeId(0)).with_rotation(Vec3::new(0.0, 0.5, 0.0)),
        ];
        let mut buffer = TransformBuffer::default();
        build_transform_buffer(nodes.iter(), &mut buffer, 16);

        assert_eq!(buffer.slot_count(), 2);
        assert_eq!(buffer.instances[0].ry, 0.5);
        assert_eq!(buffer.instances[1].z, 3.0);
        assert_eq!(buffer.instances[1].visible, 1.0);
    }

    #[test]
    fn hidden_nodes_are_flagged() {
        let mut node = Node::new(NodeId(0));
        node.visible = false;
        let mut buffer = TransformBuffer::default();
        build_transform_buffer(std::iter::once(&node), &mut buffer, 16);
        assert_eq!(buffer.instances[0].visible, 0.0);
    }

    #[test]
    fn overflow_is_dropped() {
        let nodes = vec![Node::new(NodeId(0)), Node::new(NodeId(4))];
        let mut buffer = TransformBuffer::default();
        build_transform_buffer(nodes.iter(), &mut buffer, 2);
        assert_eq!(buffer.slot_count(), 1);
    }
}
