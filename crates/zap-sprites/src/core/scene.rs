use glam::Vec2;

use crate::api::config::EngineConfig;
use crate::api::types::SpriteId;
use crate::components::domain::{BoundaryAction, Domain};
use crate::components::frames::Frame;
use crate::components::sprite::Sprite;
use crate::core::order::sort_by_z_order;
use crate::systems::animation::tick_animations;
use crate::systems::collision::{Collider, CollisionMode};
use crate::systems::kinematics::tick_kinematics;

/// Sprite storage using a flat Vec kept sorted by ascending z-order.
/// Designed for small-to-medium sprite counts (hundreds, not millions).
///
/// Iteration order is draw order: back (lowest z) to front. Sprites with
/// equal z stay in the order they were spawned.
pub struct Scene {
    sprites: Vec<Sprite>,
    next_id: u32,
    config: EngineConfig,
    collider: Collider,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a scene with custom engine settings.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            sprites: Vec::with_capacity(256),
            next_id: 1,
            collider: Collider::from_config(&config),
            config,
        }
    }

    /// Create a scene with a specific sprite capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut scene = Self::new();
        scene.sprites = Vec::with_capacity(capacity);
        scene
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The collision tester configured for this scene's alpha level.
    pub fn collider(&self) -> Collider {
        self.collider
    }

    /// Generate the next unique sprite ID.
    pub fn next_id(&mut self) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a sprite, placing it after every sprite with the same or lower z.
    pub fn spawn(&mut self, sprite: Sprite) -> SpriteId {
        let id = sprite.id;
        let z = sprite.z_order();
        let idx = self.sprites.partition_point(|s| s.z_order() <= z);
        self.sprites.insert(idx, sprite);
        id
    }

    /// Remove a sprite by ID. Returns the removed sprite if found.
    pub fn despawn(&mut self, id: SpriteId) -> Option<Sprite> {
        let idx = self.index_of(id)?;
        Some(self.sprites.remove(idx))
    }

    /// Remove every sprite flagged dead.
    pub fn remove_dead(&mut self) -> usize {
        let before = self.sprites.len();
        self.sprites.retain(|s| !s.dead);
        before - self.sprites.len()
    }

    fn index_of(&self, id: SpriteId) -> Option<usize> {
        self.sprites.iter().position(|s| s.id == id)
    }

    /// Get a reference to a sprite by ID.
    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.id == id)
    }

    /// Get a mutable reference to a sprite by ID.
    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.id == id)
    }

    /// Get two different sprites mutably at once.
    pub fn get_pair_mut(&mut self, a: SpriteId, b: SpriteId) -> Option<(&mut Sprite, &mut Sprite)> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if ia == ib {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.sprites.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.sprites.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    /// Iterate over all sprites, back to front.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sprite> {
        self.sprites.iter()
    }

    /// Iterate over all sprites mutably, back to front.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut Sprite> {
        self.sprites.iter_mut()
    }

    /// Find the first sprite with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.tag == tag)
    }

    /// Find the first sprite with the given tag (mutable).
    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.tag == tag)
    }

    /// Find all sprites with the given tag.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Sprite> {
        self.sprites.iter().filter(|s| s.tag == tag).collect()
    }

    /// Number of sprites in the scene.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Clear all sprites.
    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    // -- Ordering --

    /// Change a sprite's z-order and re-sort. Returns false if not found.
    pub fn set_z_order(&mut self, id: SpriteId, z_order: i32) -> bool {
        let Some(sprite) = self.get_mut(id) else {
            return false;
        };
        sprite.set_z_order(z_order);
        sort_by_z_order(&mut self.sprites);
        log::debug!("{:?} moved to z {}; scene re-sorted", id, z_order);
        true
    }

    // -- Simulation --

    /// Advance every live sprite: kinematics first, then animation.
    pub fn update(&mut self, dt: f32) {
        tick_kinematics(self, dt);
        tick_animations(self, dt);
    }

    /// Give every sprite the same domain.
    pub fn set_domain_all(&mut self, domain: Domain, action: BoundaryAction) {
        for sprite in &mut self.sprites {
            sprite.set_domain(domain, action);
        }
    }

    // -- Queries --

    /// Run a collision test between two sprites.
    /// Returns false if either is missing or both IDs are the same.
    pub fn test_collision(&mut self, mode: CollisionMode, a: SpriteId, b: SpriteId) -> bool {
        let collider = self.collider;
        match self.get_pair_mut(a, b) {
            Some((a, b)) => collider.test(mode, a, b),
            None => false,
        }
    }

    /// Whether a world point is over the sprite.
    pub fn is_over(&self, id: SpriteId, point: Vec2) -> bool {
        self.get(id)
            .is_some_and(|s| self.collider.is_over(s, point))
    }

    /// The frontmost visible, live sprite under a world point.
    pub fn sprite_at(&self, point: Vec2) -> Option<SpriteId> {
        self.sprites
            .iter()
            .rev()
            .find(|s| s.visible && !s.dead && self.collider.is_over(s, point))
            .map(|s| s.id)
    }

    /// Whether a sprite may be inside the configured screen area.
    pub fn is_on_screen(&self, id: SpriteId) -> bool {
        self.get(id).is_some_and(|s| s.is_on_screen(&self.config.screen))
    }

    /// A sprite's collision mask frames, built with the scene's settings.
    pub fn collision_mask(&mut self, id: SpriteId) -> Option<&[Frame]> {
        let (level, color) = (self.config.alpha_level, self.config.mask_color);
        self.get_mut(id).map(|s| s.collision_mask(level, color))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
