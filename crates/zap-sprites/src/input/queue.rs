use glam::Vec2;

/// Pointer events the dispatcher understands, at world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A touch/click began.
    Pressed(Vec2),
    /// A touch/click ended.
    Released(Vec2),
    /// A press and release without movement.
    Clicked(Vec2),
    /// The pointer moved while pressed.
    Dragged(Vec2),
}

impl PointerEvent {
    /// Where the event happened.
    pub fn point(&self) -> Vec2 {
        match *self {
            PointerEvent::Pressed(p)
            | PointerEvent::Released(p)
            | PointerEvent::Clicked(p)
            | PointerEvent::Dragged(p) => p,
        }
    }
}

/// A queue of pointer events.
/// The host pushes events as they arrive; the dispatcher drains them each frame.
pub struct InputQueue {
    events: Vec<PointerEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &PointerEvent> {
        self.events.iter()
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
