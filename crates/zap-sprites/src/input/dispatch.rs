//! Pointer dispatch: routes pointer events to sprite handlers.
//!
//! At most one sprite holds focus at a time. A press gives focus to the
//! frontmost sprite under the pointer that has a handler; clicks and
//! releases take it away again, and drags move the focused sprite if it is
//! draggable. Invisible or dead sprites never receive events.

use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::{SpriteEvent, SpriteId};
use crate::components::sprite::Sprite;
use crate::core::scene::Scene;
use crate::input::queue::{InputQueue, PointerEvent};

/// Callback fired for a sprite's pointer events.
pub type SpriteHandler = Box<dyn FnMut(&mut Sprite, SpriteEvent)>;

/// Owns pointer focus and the registered sprite handlers.
pub struct PointerDispatch {
    handlers: HashMap<SpriteId, SpriteHandler>,
    focus: Option<SpriteId>,
    press_point: Option<Vec2>,
    dragging: bool,
}

impl PointerDispatch {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            focus: None,
            press_point: None,
            dragging: false,
        }
    }

    /// Make a sprite respond to the pointer. Replaces any earlier handler.
    pub fn register<F>(&mut self, id: SpriteId, handler: F)
    where
        F: FnMut(&mut Sprite, SpriteEvent) + 'static,
    {
        self.handlers.insert(id, Box::new(handler));
    }

    /// Stop a sprite responding to the pointer. Returns false if it had no handler.
    pub fn unregister(&mut self, id: SpriteId) -> bool {
        if self.focus == Some(id) {
            self.release_focus();
        }
        self.handlers.remove(&id).is_some()
    }

    pub fn is_registered(&self, id: SpriteId) -> bool {
        self.handlers.contains_key(&id)
    }

    /// The sprite holding pointer focus.
    pub fn focus(&self) -> Option<SpriteId> {
        self.focus
    }

    /// Whether the focused sprite is between a press and its release.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Drop focus without firing anything.
    pub fn release_focus(&mut self) {
        if let Some(id) = self.focus.take() {
            log::debug!("{:?} lost focus", id);
        }
        self.press_point = None;
        self.dragging = false;
    }

    /// Route one event. Returns the sprite and event fired, if any.
    pub fn dispatch(&mut self, scene: &mut Scene, event: PointerEvent) -> Option<(SpriteId, SpriteEvent)> {
        // A focused sprite that left the scene can't keep focus.
        if let Some(id) = self.focus.filter(|id| scene.get(*id).is_none()) {
            self.release_focus();
            self.handlers.remove(&id);
        }

        match event {
            PointerEvent::Pressed(point) => {
                let id = self.target_at(scene, point)?;
                if self.focus == Some(id) {
                    return None;
                }
                self.focus = Some(id);
                self.press_point = Some(point);
                self.dragging = true;
                log::debug!("{:?} took focus at {}", id, point);
                self.fire(scene, id, SpriteEvent::Pressed)
            }
            PointerEvent::Clicked(_) => {
                let id = self.receiving_focus(scene)?;
                self.release_focus();
                self.fire(scene, id, SpriteEvent::Clicked)
            }
            PointerEvent::Released(point) => {
                let id = self.receiving_focus(scene)?;
                if self.press_point == Some(point) {
                    return None;
                }
                self.release_focus();
                self.fire(scene, id, SpriteEvent::Released)
            }
            PointerEvent::Dragged(point) => {
                let id = self.receiving_focus(scene)?;
                let sprite = scene.get_mut(id)?;
                if !sprite.draggable {
                    return None;
                }
                sprite.pos = point;
                self.dragging = true;
                self.fire(scene, id, SpriteEvent::Dragged)
            }
        }
    }

    /// Drop handlers whose sprites are no longer in the scene.
    /// Returns how many were removed.
    pub fn prune(&mut self, scene: &Scene) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|id, _| scene.get(*id).is_some());
        if self.focus.is_some_and(|id| !self.handlers.contains_key(&id)) {
            self.release_focus();
        }
        let removed = before - self.handlers.len();
        if removed > 0 {
            log::debug!("pruned {} stale pointer handlers", removed);
        }
        removed
    }

    /// Route every queued event in order, emptying the queue.
    ///
    /// Handlers of despawned sprites are pruned first.
    pub fn drain_queue(&mut self, scene: &mut Scene, queue: &mut InputQueue) -> Vec<(SpriteId, SpriteEvent)> {
        self.prune(scene);
        queue
            .drain()
            .into_iter()
            .filter_map(|event| self.dispatch(scene, event))
            .collect()
    }

    /// Frontmost visible, live sprite under `point` that has a handler.
    fn target_at(&self, scene: &Scene, point: Vec2) -> Option<SpriteId> {
        let collider = scene.collider();
        scene
            .iter()
            .rev()
            .filter(|s| s.visible && !s.dead && self.handlers.contains_key(&s.id))
            .find(|s| collider.is_over(s, point))
            .map(|s| s.id)
    }

    /// The focused sprite, if it may currently receive events.
    fn receiving_focus(&self, scene: &Scene) -> Option<SpriteId> {
        let id = self.focus?;
        let sprite = scene.get(id)?;
        (sprite.visible && !sprite.dead).then_some(id)
    }

    fn fire(&mut self, scene: &mut Scene, id: SpriteId, event: SpriteEvent) -> Option<(SpriteId, SpriteEvent)> {
        let handler = self.handlers.get_mut(&id)?;
        let sprite = scene.get_mut(id)?;
        handler(sprite, event);
        Some((id, event))
    }
}

impl Default for PointerDispatch {
    fn default() -> Self {
        Self::new()
    }
}
