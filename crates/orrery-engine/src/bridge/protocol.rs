/// Frame buffer layout shared with the JavaScript renderer.
/// The host reads it through `get_frame_ptr` / `get_frame_len` and locates
/// each block via the `HEADER_*` slots below.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 16 floats]
/// [Nodes: max_nodes × 8 floats]
/// ```
///
/// Capacities and offsets are written into the header every frame.
/// TypeScript reads them from the header instead of hardcoding them.
/// Static points live in a separate buffer (3 floats per point).

use crate::api::game::SimConfig;
use crate::renderer::camera::CameraBlock;
use crate::renderer::instance::{NodeInstance, TransformBuffer};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_NODE_COUNT: usize = 2;
pub const HEADER_MAX_NODES: usize = 3;
pub const HEADER_POINT_COUNT: usize = 4;
pub const HEADER_CAMERA_OFFSET: usize = 5;
pub const HEADER_NODE_OFFSET: usize = 6;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per static point: x, y, z.
pub const POINT_FLOATS: usize = 3;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub max_nodes: usize,
    pub max_points: usize,

    /// Offset (in floats) where the camera block begins.
    pub camera_offset: usize,
    /// Offset (in floats) where node data begins.
    pub node_offset: usize,
    /// Size of the node section in floats.
    pub node_floats: usize,

    pub total_floats: usize,
    pub total_bytes: usize,
}

impl FrameLayout {
    pub fn new(max_nodes: usize, max_points: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let node_offset = camera_offset + CameraBlock::FLOATS;
        let node_floats = max_nodes * NodeInstance::FLOATS;
        let total_floats = node_offset + node_floats;

        Self {
            max_nodes,
            max_points,
            camera_offset,
            node_offset,
            node_floats,
            total_floats,
            total_bytes: total_floats * 4,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.max_nodes, config.max_points)
    }
}

/// Owned frame buffer. JS views it through `as_ptr`/`len`.
pub struct FrameBuffer {
    layout: FrameLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(layout: FrameLayout) -> Self {
        let mut buffer = Self {
            data: vec![0.0; layout.total_floats],
            layout,
        };
        buffer.data[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buffer.data[HEADER_MAX_NODES] = buffer.layout.max_nodes as f32;
        buffer.data[HEADER_CAMERA_OFFSET] = buffer.layout.camera_offset as f32;
        buffer.data[HEADER_NODE_OFFSET] = buffer.layout.node_offset as f32;
        buffer
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Write one frame: header counters, camera block and node transforms.
    /// Slots beyond the transform buffer are zeroed (hidden).
    pub fn write_frame(
        &mut self,
        frame: u64,
        point_count: usize,
        camera: &CameraBlock,
        nodes: &TransformBuffer,
    ) {
        let node_count = (nodes.slot_count() as usize).min(self.layout.max_nodes);
        self.data[HEADER_FRAME_COUNTER] = frame as f32;
        self.data[HEADER_NODE_COUNT] = node_count as f32;
        self.data[HEADER_POINT_COUNT] = point_count.min(self.layout.max_points) as f32;

        let cam = self.layout.camera_offset;
        self.data[cam..cam + CameraBlock::FLOATS]
            .copy_from_slice(bytemuck::cast_slice(std::slice::from_ref(camera)));

        let start = self.layout.node_offset;
        let used = node_count * NodeInstance::FLOATS;
        let section = &mut self.data[start..start + self.layout.node_floats];
        section[..used].copy_from_slice(&nodes.as_floats()[..used]);
        section[used..].fill(0.0);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    /// Length in floats.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
