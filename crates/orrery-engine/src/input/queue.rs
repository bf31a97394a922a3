/// Which pointer button started a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(button: u32) -> Self {
        match button {
            2 => PointerButton::Secondary,
            _ => PointerButton::Primary,
        }
    }
}

/// Input event types the engine understands.
/// Pointer coordinates are viewport pixels (DOM client coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A button was pressed at (x, y).
    PointerDown { x: f32, y: f32, button: PointerButton },
    /// A button was released at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A click completed at (x, y).
    Click { x: f32, y: f32 },
    /// Mouse wheel; positive `delta` scrolls away from the user.
    Wheel { delta: f32 },
    /// The viewport was resized.
    Resize { width: f32, height: f32 },
    /// A custom event from the UI layer (sliders, buttons).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame,
/// in arrival order.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 10.0, y: 20.0 });
        q.push(InputEvent::Click { x: 10.0, y: 20.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[0], InputEvent::PointerMove { x: 10.0, y: 20.0 });
        assert_eq!(events[1], InputEvent::Click { x: 10.0, y: 20.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        let events = q.drain();
        assert_eq!(events.len(), 1);
        match events[0] {
            InputEvent::Custom { kind, a, b, c } => {
                assert_eq!(kind, 7);
                assert_eq!(a, 1.5);
                assert_eq!(b, 2.5);
                assert_eq!(c, 3.5);
            }
            _ => panic!("Expected Custom event"),
        }
    }

    #[test]
    fn dom_button_mapping() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
    }
}
