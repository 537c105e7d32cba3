/// Unique identifier for a sprite in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u32);

/// A pointer event delivered to a sprite's registered handler.
/// Generic, with no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteEvent {
    /// The pointer was pressed over the sprite and it took focus.
    Pressed,
    /// The pointer was released away from where it was pressed.
    Released,
    /// A click completed while the sprite had focus.
    Clicked,
    /// The sprite was dragged to a new position.
    Dragged,
}
