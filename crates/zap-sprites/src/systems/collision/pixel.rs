//! Pixel-exact overlap scan.

use glam::IVec2;

use super::bounds::PixelBounds;
use crate::components::sprite::Sprite;

/// Where two sprites first touched, in each sprite's local frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelHit {
    pub a: IVec2,
    pub b: IVec2,
}

/// Scan the overlap of two unrotated, unscaled sprites for a pixel that is
/// opaque in both current frames.
///
/// Only the overlap rectangle is visited, row by row from the top, left to
/// right within a row; the first shared opaque pixel wins.
pub(crate) fn first_shared_pixel(a: &Sprite, b: &Sprite, alpha_level: u8) -> Option<PixelHit> {
    let box_a = PixelBounds::of(a);
    let box_b = PixelBounds::of(b);
    let overlap = box_a.intersection(&box_b)?;

    for y in overlap.min.y..overlap.max.y {
        for x in overlap.min.x..overlap.max.x {
            let world = IVec2::new(x, y);
            let local_a = box_a.to_local(world);
            if !is_opaque(a, local_a, alpha_level) {
                continue;
            }
            let local_b = box_b.to_local(world);
            if is_opaque(b, local_b, alpha_level) {
                return Some(PixelHit { a: local_a, b: local_b });
            }
        }
    }
    None
}

/// Pixels outside the frame count as transparent.
pub(crate) fn is_opaque(sprite: &Sprite, local: IVec2, alpha_level: u8) -> bool {
    sprite.alpha_at(local).is_some_and(|alpha| alpha >= alpha_level)
}
