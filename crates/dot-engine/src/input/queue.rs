/// Input event types the engine understands.
/// Carries no game-specific meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A press ended at world coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The pointer moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The pointer left the drawing surface.
    PointerLeave,
    /// A custom event from the UI layer (DOM buttons, audio element, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// World position carried by pointer events.
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::PointerMove { x, y } => Some((x, y)),
            _ => None,
        }
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(64),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    ///
    /// Pointer events with non-finite coordinates are dropped here so the
    /// game never sees them.
    pub fn push(&mut self, event: InputEvent) {
        if let Some((x, y)) = event.position() {
            if !x.is_finite() || !y.is_finite() {
                log::warn!("dropping pointer event with non-finite position: {event:?}");
                return;
            }
        }
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
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerLeave);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn non_finite_pointer_events_are_dropped() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: f32::NAN, y: 20.0 });
        q.push(InputEvent::PointerDown { x: 1.0, y: f32::INFINITY });
        assert!(q.is_empty());

        // Custom payloads are passed through untouched.
        q.push(InputEvent::Custom { kind: 1, a: f32::NAN, b: 0.0, c: 0.0 });
        assert_eq!(q.len(), 1);
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
    fn position_only_for_pointer_events() {
        assert_eq!(InputEvent::PointerUp { x: 3.0, y: 4.0 }.position(), Some((3.0, 4.0)));
        assert_eq!(InputEvent::PointerLeave.position(), None);
    }
}
