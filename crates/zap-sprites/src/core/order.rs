use std::cmp::Ordering;

use crate::components::sprite::Sprite;

/// Draw/update priority. Controls the order sprites are visited in.
///
/// Sprites are drawn back-to-front: lowest z first, so higher values end up
/// nearer the viewer. Has no effect on physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ZOrder(pub i32);

/// Compare two sprites by ascending z-order.
pub fn by_z_order(a: &Sprite, b: &Sprite) -> Ordering {
    a.z_order().cmp(&b.z_order())
}

/// Stable sort by ascending z-order; sprites with equal z keep their relative order.
pub fn sort_by_z_order(sprites: &mut [Sprite]) {
    sprites.sort_by(by_z_order);
}
