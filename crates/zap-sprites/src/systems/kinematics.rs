//! Kinematics system: explicit Euler integration with optional domain clamping.

use crate::components::domain::BoundaryAction;
use crate::components::sprite::Sprite;
use crate::core::scene::Scene;

/// Integrate one sprite over `dt` seconds.
///
/// Velocity is updated from acceleration first, then position from velocity.
/// If the sprite has a domain, its scaled bounds are pushed back inside: the
/// x axis (left, else right) and the y axis (top, else bottom) are handled
/// independently, so a corner can correct both in one step.
///
/// `dt` must be non-negative; this is only checked in debug builds.
pub fn integrate(sprite: &mut Sprite, dt: f32) {
    debug_assert!(dt >= 0.0, "negative time step: {dt}");

    sprite.vel += sprite.acc * dt;
    sprite.pos += sprite.vel * dt;

    let Some(clamp) = sprite.domain else {
        return;
    };
    let half = sprite.scaled_half_extents();
    let domain = clamp.domain;

    if sprite.pos.x - half.x < domain.left {
        sprite.pos.x = domain.left + half.x;
        hit_edge(&mut sprite.vel.x, &mut sprite.acc.x, clamp.action);
        log::trace!("{:?} hit left edge", sprite.id);
    } else if sprite.pos.x + half.x > domain.right {
        sprite.pos.x = domain.right - half.x;
        hit_edge(&mut sprite.vel.x, &mut sprite.acc.x, clamp.action);
        log::trace!("{:?} hit right edge", sprite.id);
    }

    if sprite.pos.y - half.y < domain.top {
        sprite.pos.y = domain.top + half.y;
        hit_edge(&mut sprite.vel.y, &mut sprite.acc.y, clamp.action);
        log::trace!("{:?} hit top edge", sprite.id);
    } else if sprite.pos.y + half.y > domain.bottom {
        sprite.pos.y = domain.bottom - half.y;
        hit_edge(&mut sprite.vel.y, &mut sprite.acc.y, clamp.action);
        log::trace!("{:?} hit bottom edge", sprite.id);
    }
}

fn hit_edge(vel: &mut f32, acc: &mut f32, action: BoundaryAction) {
    match action {
        BoundaryAction::Rebound => {
            *vel = -*vel;
            *acc = -*acc;
        }
        BoundaryAction::Halt => {
            *vel = 0.0;
            *acc = 0.0;
        }
    }
}

/// Integrate every live sprite in the scene.
pub fn tick_kinematics(scene: &mut Scene, dt: f32) {
    for sprite in scene.iter_mut().filter(|s| !s.dead) {
        integrate(sprite, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SpriteId;
    use crate::components::domain::Domain;
    use crate::components::frames::{Frame, Rgba};
    use glam::Vec2;

    fn sprite(size: u32) -> Sprite {
        let frame = Frame::filled(size, size, Rgba::opaque(9, 9, 9)).unwrap();
        Sprite::from_frame(SpriteId(1), frame, 0)
    }

    #[test]
    fn velocity_updates_before_position() {
        let mut s = sprite(4).with_acceleration(Vec2::new(2.0, -4.0));
        integrate(&mut s, 1.0);
        assert_eq!(s.vel, Vec2::new(2.0, -4.0));
        assert_eq!(s.pos, Vec2::new(2.0, -4.0));
    }

    #[test]
    fn no_domain_is_unconstrained() {
        let mut s = sprite(4).with_velocity(Vec2::new(-1000.0, 0.0));
        integrate(&mut s, 1.0);
        assert_eq!(s.pos.x, -1000.0);
        assert_eq!(s.vel.x, -1000.0);
    }

    #[test]
    fn rebound_reflects_velocity_and_acceleration() {
        let mut s = sprite(10)
            .with_pos(Vec2::new(10.0, 50.0))
            .with_velocity(Vec2::new(-20.0, 0.0))
            .with_acceleration(Vec2::new(-1.0, 0.0))
            .with_domain(Domain::new(0.0, 0.0, 100.0, 100.0), BoundaryAction::Rebound);
        integrate(&mut s, 0.5);
        assert_eq!(s.pos.x, 5.0);
        assert_eq!(s.vel.x, 20.5);
        assert_eq!(s.acc.x, 1.0);
    }

    #[test]
    fn halt_zeroes_axis() {
        let mut s = sprite(10)
            .with_pos(Vec2::new(90.0, 50.0))
            .with_velocity(Vec2::new(40.0, 3.0))
            .with_acceleration(Vec2::new(5.0, 1.0))
            .with_domain(Domain::new(0.0, 0.0, 100.0, 100.0), BoundaryAction::Halt);
        integrate(&mut s, 1.0);
        assert_eq!(s.pos.x, 95.0);
        assert_eq!(s.vel.x, 0.0);
        assert_eq!(s.acc.x, 0.0);
        // The other axis is untouched
        assert_eq!(s.vel.y, 4.0);
        assert_eq!(s.acc.y, 1.0);
    }

    #[test]
    fn corner_corrects_both_axes() {
        let mut s = sprite(10)
            .with_pos(Vec2::new(6.0, 94.0))
            .with_velocity(Vec2::new(-10.0, 10.0))
            .with_domain(Domain::new(0.0, 0.0, 100.0, 100.0), BoundaryAction::Rebound);
        integrate(&mut s, 1.0);
        assert_eq!(s.pos, Vec2::new(5.0, 95.0));
        assert_eq!(s.vel, Vec2::new(10.0, -10.0));
    }

    #[test]
    fn clamp_uses_scaled_extents() {
        let mut s = sprite(10)
            .with_scale(2.0)
            .with_pos(Vec2::new(50.0, 12.0))
            .with_velocity(Vec2::new(0.0, -5.0))
            .with_domain(Domain::new(0.0, 0.0, 100.0, 100.0), BoundaryAction::Halt);
        integrate(&mut s, 1.0);
        assert_eq!(s.pos.y, 10.0);
        assert_eq!(s.vel.y, 0.0);
    }

    #[test]
    fn dead_sprites_are_not_integrated() {
        let mut scene = Scene::new();
        let id = scene.next_id();
        let mut s = Sprite::from_frame(id, Frame::filled(2, 2, Rgba::opaque(0, 0, 0)).unwrap(), 0)
            .with_velocity(Vec2::new(1.0, 0.0));
        s.dead = true;
        scene.spawn(s);
        tick_kinematics(&mut scene, 1.0);
        assert_eq!(scene.get(id).unwrap().pos, Vec2::ZERO);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        const EPS: f32 = 1e-3;

        proptest! {
            #[test]
            fn rebound_keeps_box_inside_and_flips_velocity(
                size in 2u32..20,
                scale in 0.5f32..2.0,
                fx in 0.0f32..1.0,
                fy in 0.0f32..1.0,
                vx in -500.0f32..500.0,
                vy in -500.0f32..500.0,
                ax in -100.0f32..100.0,
                ay in -100.0f32..100.0,
                dt in 0.0f32..0.1,
            ) {
                let domain = Domain::new(0.0, 0.0, 200.0, 150.0);
                let mut s = sprite(size).with_scale(scale);
                let half = s.scaled_half_extents();
                let start = Vec2::new(
                    half.x + fx * (domain.width() - 2.0 * half.x),
                    half.y + fy * (domain.height() - 2.0 * half.y),
                );
                s = s
                    .with_pos(start)
                    .with_velocity(Vec2::new(vx, vy))
                    .with_acceleration(Vec2::new(ax, ay))
                    .with_domain(domain, BoundaryAction::Rebound);

                let v = Vec2::new(vx, vy) + Vec2::new(ax, ay) * dt;
                let p = start + v * dt;
                integrate(&mut s, dt);

                prop_assert!(s.pos.x - half.x >= domain.left - EPS);
                prop_assert!(s.pos.x + half.x <= domain.right + EPS);
                prop_assert!(s.pos.y - half.y >= domain.top - EPS);
                prop_assert!(s.pos.y + half.y <= domain.bottom + EPS);

                let crossed_x = p.x - half.x < domain.left || p.x + half.x > domain.right;
                let crossed_y = p.y - half.y < domain.top || p.y + half.y > domain.bottom;
                prop_assert_eq!(s.vel.x, if crossed_x { -v.x } else { v.x });
                prop_assert_eq!(s.vel.y, if crossed_y { -v.y } else { v.y });
            }

            #[test]
            fn halt_zeroes_clamped_axis(
                x in -50.0f32..250.0,
                vx in -500.0f32..500.0,
                ax in -100.0f32..100.0,
                dt in 0.0f32..0.5,
            ) {
                let domain = Domain::new(0.0, 0.0, 200.0, 200.0);
                let mut s = sprite(10)
                    .with_pos(Vec2::new(x, 100.0))
                    .with_velocity(Vec2::new(vx, 0.0))
                    .with_acceleration(Vec2::new(ax, 0.0))
                    .with_domain(domain, BoundaryAction::Halt);
                let v = vx + ax * dt;
                let px = x + v * dt;
                integrate(&mut s, dt);
                if px - 5.0 < domain.left || px + 5.0 > domain.right {
                    prop_assert_eq!(s.vel.x, 0.0);
                    prop_assert_eq!(s.acc.x, 0.0);
                }
            }
        }
    }
}
