use bytemuck::{Pod, Zeroable};

/// Per-node transform written to the frame buffer for the JS renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct NodeInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Euler rotation (XYZ order), radians.
    pub rx: f32,
    pub ry: f32,
    pub rz: f32,
    pub scale: f32,
    /// 1.0 = draw, 0.0 = hidden or unused slot.
    pub visible: f32,
}

impl NodeInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Slot-addressed node transforms for one frame.
pub struct TransformBuffer {
    /// Indexed by `NodeId`; unused slots stay zeroed (invisible).
    pub instances: Vec<NodeInstance>,
}

impl TransformBuffer {
    pub fn with_capacity(max_nodes: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_nodes),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Write a slot, growing the buffer with empty slots as needed.
    pub fn write(&mut self, slot: usize, instance: NodeInstance) {
        if slot >= self.instances.len() {
            self.instances.resize(slot + 1, NodeInstance::default());
        }
        self.instances[slot] = instance;
    }

    pub fn slot_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Flat float view of all slots.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for TransformBuffer {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<NodeInstance>(), NodeInstance::STRIDE_BYTES);
    }

    #[test]
    fn write_pads_missing_slots() {
        let mut buf = TransformBuffer::default();
        buf.write(2, NodeInstance { x: 1.0, visible: 1.0, ..Default::default() });
        assert_eq!(buf.slot_count(), 3);
        assert_eq!(buf.instances[0].visible, 0.0);
        assert_eq!(buf.as_floats().len(), 24);
        assert_eq!(buf.as_floats()[16], 1.0);
    }
}
