//! Animation system: advances every live sprite's frame timer.

use crate::core::scene::Scene;

/// Tick all sprite animations.
///
/// Call this once per frame, after kinematics.
pub fn tick_animations(scene: &mut Scene, dt: f32) {
    for sprite in scene.iter_mut().filter(|s| !s.dead) {
        sprite.tick_animation(dt);
    }
}
