//! Collision engine: four interchangeable sprite-vs-sprite tests.
//!
//! Every test is a pure function of the two sprites' current state, apart
//! from the pixel test recording where the sprites touched. Invisible sprites
//! never collide.
//!
//! Tests that rely on axis-aligned or untransformed pixel data degrade when a
//! transform breaks that assumption:
//!
//! | test      | rotated  | scaled    |
//! |-----------|----------|-----------|
//! | `circle`  | n/a      | n/a       |
//! | `boxes`   | `circle` | honored   |
//! | `overlap` | `circle` | honored   |
//! | `pixel`   | `boxes`  | `boxes`   |
//!
//! (`boxes` itself then falls back to `circle` when rotated.)

mod bounds;
mod pixel;

use glam::Vec2;

use crate::api::config::{EngineConfig, ALPHA_LEVEL};
use crate::components::sprite::Sprite;
use bounds::Bounds;

pub use pixel::PixelHit;

/// Which collision test to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionMode {
    /// Collision circles.
    Circle,
    /// Overlapping image borders.
    Box,
    /// Image borders overlapping by more than `percent` of the first sprite's box.
    Overlap { percent: f32 },
    /// Overlapping non-transparent pixels.
    Pixel,
}

/// Collision circles: centers closer than the sum of the scaled radii.
/// Symmetric; rotation is irrelevant.
pub fn circle(a: &Sprite, b: &Sprite) -> bool {
    if !a.visible || !b.visible {
        return false;
    }
    let reach = a.scaled_radius() + b.scaled_radius();
    a.pos.distance_squared(b.pos) < reach * reach
}

/// Overlapping scaled boxes. Falls back to [`circle`] if either sprite is rotated.
pub fn boxes(a: &Sprite, b: &Sprite) -> bool {
    if !a.visible || !b.visible {
        return false;
    }
    if a.is_rotated() || b.is_rotated() {
        return circle(a, b);
    }
    !Bounds::of(a).is_disjoint(&Bounds::of(b))
}

/// Percentage of `a`'s scaled box covered by `b`'s scaled box, ignoring rotation.
///
/// Not symmetric: a small sprite inside a large one is fully covered, the
/// large one only slightly.
pub fn coverage(a: &Sprite, b: &Sprite) -> f32 {
    let box_a = Bounds::of(a);
    let area = box_a.area();
    if area <= 0.0 {
        return 0.0;
    }
    box_a
        .intersection(&Bounds::of(b))
        .map_or(0.0, |o| o.area() * 100.0 / area)
}

/// `b` covers more than `percent` of `a`'s box. Falls back to [`circle`] if
/// either sprite is rotated; scale is honored.
///
/// Callers wanting a symmetric answer must test both directions.
pub fn overlap(a: &Sprite, b: &Sprite, percent: f32) -> bool {
    if !a.visible || !b.visible {
        return false;
    }
    if a.is_rotated() || b.is_rotated() {
        return circle(a, b);
    }
    coverage(a, b) > percent
}

/// Tests that need the alpha threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    /// Pixels with alpha below this are transparent.
    pub alpha_level: u8,
}

impl Default for Collider {
    fn default() -> Self {
        Self::new(ALPHA_LEVEL)
    }
}

impl Collider {
    pub fn new(alpha_level: u8) -> Self {
        Self { alpha_level }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.alpha_level)
    }

    /// Run the test selected by `mode`.
    pub fn test(&self, mode: CollisionMode, a: &mut Sprite, b: &mut Sprite) -> bool {
        match mode {
            CollisionMode::Circle => circle(a, b),
            CollisionMode::Box => boxes(a, b),
            CollisionMode::Overlap { percent } => overlap(a, b, percent),
            CollisionMode::Pixel => self.pixel(a, b),
        }
    }

    /// Overlapping opaque pixels in the current frames.
    ///
    /// Falls back to [`boxes`] if either sprite is rotated or scaled. On a hit
    /// each sprite's [`Sprite::hit`] is set to the touching pixel in its own
    /// frame.
    pub fn pixel(&self, a: &mut Sprite, b: &mut Sprite) -> bool {
        if !a.visible || !b.visible {
            return false;
        }
        if a.is_rotated() || b.is_rotated() || a.is_scaled() || b.is_scaled() {
            return boxes(a, b);
        }
        match pixel::first_shared_pixel(a, b, self.alpha_level) {
            Some(hit) => {
                a.set_hit(hit.a);
                b.set_hit(hit.b);
                true
            }
            None => false,
        }
    }

    /// Where the pixel test would find a hit, without recording it.
    ///
    /// Returns None when the sprites don't touch, or when the pixel test does
    /// not apply (either sprite invisible, rotated or scaled).
    pub fn pixel_hit(&self, a: &Sprite, b: &Sprite) -> Option<PixelHit> {
        if !a.visible || !b.visible {
            return None;
        }
        if a.is_rotated() || b.is_rotated() || a.is_scaled() || b.is_scaled() {
            return None;
        }
        pixel::first_shared_pixel(a, b, self.alpha_level)
    }

    /// Whether a world point is over the sprite.
    ///
    /// Rotated sprites use the scaled collision circle, scaled sprites their
    /// scaled box, and untransformed sprites the alpha of the pixel under the
    /// point in the current frame.
    pub fn is_over(&self, sprite: &Sprite, point: Vec2) -> bool {
        let d = point - sprite.pos;
        if sprite.is_rotated() {
            let r = sprite.scaled_radius();
            return d.length_squared() < r * r;
        }
        let half = sprite.scaled_half_extents();
        let inside = d.x.abs() < half.x && d.y.abs() < half.y;
        if sprite.is_scaled() || !inside {
            return inside;
        }
        let local = (d + half).floor().as_ivec2();
        pixel::is_opaque(sprite, local, self.alpha_level)
    }
}
