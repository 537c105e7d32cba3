//! Debug overlay: describes the area each sprite collides with.
//!
//! Nothing here draws. `collision_areas()` reports, per visible sprite, the
//! shape the engine would use for it so a host renderer can outline circles
//! and boxes or blit the flat-colored collision mask.

use glam::Vec2;

use crate::api::types::SpriteId;
use crate::components::frames::{Frame, Rgba};
use crate::components::sprite::Sprite;
use crate::core::scene::Scene;

/// Segments used to approximate a circle outline.
const CIRCLE_SEGMENTS: usize = 24;

/// The collision area of one sprite in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionArea<'a> {
    /// Rotated sprites collide with their scaled collision circle.
    Circle { center: Vec2, radius: f32 },
    /// Scaled sprites collide with their scaled box.
    Box { center: Vec2, half_extents: Vec2 },
    /// Untransformed sprites collide pixel by pixel with the current mask frame.
    Mask { top_left: Vec2, frame: &'a Frame },
}

impl CollisionArea<'_> {
    /// Closed outline of the area. Masks are outlined by their frame border.
    pub fn outline(&self) -> Vec<[f32; 2]> {
        match *self {
            CollisionArea::Circle { center, radius } => {
                let mut points = Vec::with_capacity(CIRCLE_SEGMENTS + 1);
                for i in 0..=CIRCLE_SEGMENTS {
                    let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
                    let p = center + Vec2::from_angle(angle) * radius;
                    points.push(p.to_array());
                }
                points
            }
            CollisionArea::Box { center, half_extents } => rect_outline(center - half_extents, center + half_extents),
            CollisionArea::Mask { top_left, frame } => {
                let size = Vec2::new(frame.width() as f32, frame.height() as f32);
                rect_outline(top_left, top_left + size)
            }
        }
    }
}

fn rect_outline(min: Vec2, max: Vec2) -> Vec<[f32; 2]> {
    vec![
        [min.x, min.y],
        [max.x, min.y],
        [max.x, max.y],
        [min.x, max.y],
        [min.x, min.y],
    ]
}

/// One entry of the debug overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugArea<'a> {
    pub id: SpriteId,
    pub area: CollisionArea<'a>,
    /// The pointer is over this sprite; hosts highlight it.
    pub selected: bool,
}

/// Collision area of a single sprite, building its mask if needed.
pub fn collision_area(sprite: &mut Sprite, alpha_level: u8, mask_color: Rgba) -> CollisionArea<'_> {
    let center = sprite.pos;
    if sprite.is_rotated() {
        return CollisionArea::Circle { center, radius: sprite.scaled_radius() };
    }
    let half_extents = sprite.scaled_half_extents();
    if sprite.is_scaled() {
        return CollisionArea::Box { center, half_extents };
    }
    let top_left = center - half_extents;
    let current = sprite.current_frame();
    match sprite.collision_mask(alpha_level, mask_color).get(current) {
        Some(frame) => CollisionArea::Mask { top_left, frame },
        None => CollisionArea::Box { center, half_extents },
    }
}

/// Collision areas for every visible, live sprite, back to front.
///
/// `pointer` is the current pointer position in world space, if any.
pub fn collision_areas(scene: &mut Scene, pointer: Option<Vec2>) -> Vec<DebugArea<'_>> {
    let collider = scene.collider();
    let config = scene.config();
    let (level, color) = (config.alpha_level, config.mask_color);

    let mut areas = Vec::with_capacity(scene.len());
    for sprite in scene.iter_mut() {
        if !sprite.visible || sprite.dead {
            continue;
        }
        let selected = pointer.is_some_and(|p| collider.is_over(sprite, p));
        let id = sprite.id;
        let area = collision_area(sprite, level, color);
        areas.push(DebugArea { id, area, selected });
    }
    areas
}
