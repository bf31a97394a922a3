use serde::Serialize;

/// Unique identifier for a renderable node in the scene graph.
/// Doubles as the node's slot in the transform block of the frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Slot index in the frame buffer's node block.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A presentation update communicated from Rust to the DOM layer.
///
/// The simulation never touches DOM elements itself: it queues updates,
/// and the JavaScript host applies them after each tick. Element names
/// are DOM ids (e.g. `"play-pause"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UiUpdate {
    /// Replace an element's text content.
    SetText { element: String, text: String },
    /// Replace an element's inner HTML.
    SetHtml { element: String, html: String },
    /// Show the hover tooltip at viewport pixel coordinates.
    ShowTooltip { text: String, left: f32, top: f32 },
    /// Hide the hover tooltip.
    HideTooltip,
    /// Set the document cursor style (`"pointer"`, `"default"`).
    SetCursor { cursor: String },
    /// Toggle a class on `<body>`.
    SetBodyClass { class: String, enabled: bool },
    /// Create a range slider bound to one body's speed multiplier.
    AddSpeedSlider {
        index: u32,
        id: String,
        label: String,
        min: f32,
        max: f32,
        step: f32,
        value: f32,
        readout: String,
    },
}

impl UiUpdate {
    pub fn text(element: impl Into<String>, text: impl Into<String>) -> Self {
        UiUpdate::SetText { element: element.into(), text: text.into() }
    }

    pub fn html(element: impl Into<String>, html: impl Into<String>) -> Self {
        UiUpdate::SetHtml { element: element.into(), html: html.into() }
    }

    pub fn cursor(cursor: impl Into<String>) -> Self {
        UiUpdate::SetCursor { cursor: cursor.into() }
    }
}
