/// Input events the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at screen coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to screen coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A press ended at screen coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The browser window changed size.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// JS pushes events as they happen; the engine drains them at the start of each frame.
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

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

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
    fn push_and_drain_in_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Resize { width: 800.0, height: 600.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown { x: 10.0, y: 20.0 },
                InputEvent::Resize { width: 800.0, height: 600.0 },
            ]
        );
        assert!(q.is_empty());
    }
}
