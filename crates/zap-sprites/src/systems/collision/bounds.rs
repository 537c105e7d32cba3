//! Axis-aligned boxes used by the box, overlap and pixel tests.

use glam::{IVec2, Vec2};

use crate::components::sprite::Sprite;

/// World-space box of a sprite, honoring scale but not rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn of(sprite: &Sprite) -> Self {
        let half = sprite.scaled_half_extents();
        Self {
            min: sprite.pos - half,
            max: sprite.pos + half,
        }
    }

    /// Boxes that merely touch do not overlap.
    pub fn is_disjoint(&self, other: &Bounds) -> bool {
        self.max.y <= other.min.y
            || other.max.y <= self.min.y
            || self.max.x <= other.min.x
            || other.max.x <= self.min.x
    }

    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        if self.is_disjoint(other) {
            return None;
        }
        Some(Bounds {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }

    pub fn area(&self) -> f32 {
        let size = self.max - self.min;
        size.x * size.y
    }
}

/// Integer box covering a sprite's unscaled pixels in world space.
///
/// `min` is the world pixel that holds local pixel (0, 0); `max` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelBounds {
    pub min: IVec2,
    pub max: IVec2,
}

impl PixelBounds {
    pub fn of(sprite: &Sprite) -> Self {
        let min = (sprite.pos - sprite.half_extents()).floor().as_ivec2();
        let frames = sprite.frames();
        let size = IVec2::new(frames.width() as i32, frames.height() as i32);
        // `as_ivec2` saturates far from the origin; keep `max` from wrapping.
        Self { min, max: min.saturating_add(size) }
    }

    pub fn is_disjoint(&self, other: &PixelBounds) -> bool {
        self.max.y <= other.min.y
            || other.max.y <= self.min.y
            || self.max.x <= other.min.x
            || other.max.x <= self.min.x
    }

    pub fn intersection(&self, other: &PixelBounds) -> Option<PixelBounds> {
        if self.is_disjoint(other) {
            return None;
        }
        Some(PixelBounds {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }

    /// Convert a world pixel into this sprite's local frame coordinates.
    pub fn to_local(&self, world: IVec2) -> IVec2 {
        world - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SpriteId;
    use crate::components::frames::{Frame, Rgba};

    fn sprite(w: u32, h: u32, pos: Vec2) -> Sprite {
        let frame = Frame::filled(w, h, Rgba::opaque(0, 0, 0)).unwrap();
        Sprite::from_frame(SpriteId(1), frame, 0).with_pos(pos)
    }

    #[test]
    fn touching_boxes_are_disjoint() {
        let a = Bounds::of(&sprite(10, 10, Vec2::ZERO));
        let b = Bounds::of(&sprite(10, 10, Vec2::new(10.0, 0.0)));
        assert!(a.is_disjoint(&b));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn intersection_area() {
        let a = Bounds::of(&sprite(10, 10, Vec2::ZERO));
        let b = Bounds::of(&sprite(10, 10, Vec2::new(5.0, 5.0)));
        let o = a.intersection(&b).unwrap();
        assert_eq!(o.min, Vec2::ZERO);
        assert_eq!(o.max, Vec2::splat(5.0));
        assert_eq!(o.area(), 25.0);
    }

    #[test]
    fn pixel_bounds_match_frame_size() {
        for x in [-3.5f32, -0.25, 0.0, 0.7, 12.5] {
            let b = PixelBounds::of(&sprite(7, 4, Vec2::new(x, x)));
            assert_eq!(b.max - b.min, IVec2::new(7, 4));
        }
        let b = PixelBounds::of(&sprite(10, 10, Vec2::new(5.0, -5.0)));
        assert_eq!(b.min, IVec2::new(0, -10));
        assert_eq!(b.to_local(IVec2::new(3, -1)), IVec2::new(3, 9));
    }

    #[test]
    fn pixel_bounds_saturate_far_away() {
        let far = PixelBounds::of(&sprite(10, 10, Vec2::splat(3.0e9)));
        assert_eq!(far.min, IVec2::splat(i32::MAX));
        assert_eq!(far.max, IVec2::splat(i32::MAX));

        let near = PixelBounds::of(&sprite(10, 10, Vec2::ZERO));
        assert!(far.is_disjoint(&near));
        assert!(far.intersection(&far).is_none());
    }
}
