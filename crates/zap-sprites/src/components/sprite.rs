use glam::{IVec2, Vec2};

use crate::api::types::SpriteId;
use crate::components::animation::AnimationTimer;
use crate::components::domain::{BoundaryAction, Domain, DomainClamp};
use crate::components::frames::{Frame, FrameStore, Rgba};
use crate::core::order::ZOrder;
use crate::systems::kinematics;

/// A bitmap sprite with kinematic state.
///
/// Position is the sprite's center in world space. Width and height come
/// from the frames and never change; `scale` is applied uniformly on top.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Unique identifier.
    pub id: SpriteId,
    /// String tag for finding sprites by name.
    pub tag: String,
    /// Center position in world space.
    pub pos: Vec2,
    /// Velocity in world units per second.
    pub vel: Vec2,
    /// Acceleration in world units per second squared.
    pub acc: Vec2,
    /// Rotation in radians (0 = axis-aligned).
    pub rotation: f32,
    /// Uniform scale multiplier (1 = natural size).
    pub scale: f32,
    /// Radius used by circle-based tests, before scaling.
    pub collision_radius: f32,
    /// Invisible sprites never collide.
    pub visible: bool,
    /// Dead sprites are skipped by the scene's update.
    pub dead: bool,
    /// Whether pointer drags move this sprite.
    pub draggable: bool,
    /// Optional rectangle the sprite is kept inside.
    pub domain: Option<DomainClamp>,
    z_order: ZOrder,
    hit: IVec2,
    half_extents: Vec2,
    frames: FrameStore,
    anim: AnimationTimer,
}

impl Sprite {
    /// Create a sprite at the origin from its frames.
    pub fn new(id: SpriteId, frames: FrameStore, z_order: i32) -> Self {
        let width = frames.width() as f32;
        let height = frames.height() as f32;
        Self {
            id,
            tag: String::new(),
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
            collision_radius: (width + height) / 4.0,
            visible: true,
            dead: false,
            draggable: false,
            domain: None,
            z_order: ZOrder(z_order),
            hit: IVec2::ZERO,
            half_extents: Vec2::new(width / 2.0, height / 2.0),
            anim: AnimationTimer::new(frames.len()),
            frames,
        }
    }

    /// Create a sprite with a single frame.
    pub fn from_frame(id: SpriteId, frame: Frame, z_order: i32) -> Self {
        Self::new(id, FrameStore::single(frame), z_order)
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_acceleration(mut self, acc: Vec2) -> Self {
        self.acc = acc;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_collision_radius(mut self, radius: f32) -> Self {
        self.collision_radius = radius;
        self
    }

    pub fn with_domain(mut self, domain: Domain, action: BoundaryAction) -> Self {
        self.set_domain(domain, action);
        self
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    // -- Simulation --

    /// Advance kinematics, then animation, by `dt` seconds (`dt >= 0`).
    pub fn advance(&mut self, dt: f32) {
        kinematics::integrate(self, dt);
        self.tick_animation(dt);
    }

    /// Advance only the frame animation. Returns true if the frame changed.
    pub fn tick_animation(&mut self, dt: f32) -> bool {
        self.anim.tick(dt)
    }

    /// Keep the sprite inside `domain`, applying `action` at the edges.
    pub fn set_domain(&mut self, domain: Domain, action: BoundaryAction) {
        self.domain = Some(DomainClamp::new(domain, action));
    }

    /// Let the sprite move anywhere.
    pub fn clear_domain(&mut self) {
        self.domain = None;
    }

    // -- Geometry --

    /// Unscaled width in pixels.
    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    /// Unscaled height in pixels.
    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    pub fn scaled_width(&self) -> f32 {
        self.width() * self.scale
    }

    pub fn scaled_height(&self) -> f32 {
        self.height() * self.scale
    }

    /// Unscaled half width and half height.
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    pub fn scaled_half_extents(&self) -> Vec2 {
        self.half_extents * self.scale
    }

    /// Collision radius after scaling.
    pub fn scaled_radius(&self) -> f32 {
        self.collision_radius * self.scale
    }

    pub fn is_rotated(&self) -> bool {
        self.rotation != 0.0
    }

    pub fn is_scaled(&self) -> bool {
        self.scale != 1.0
    }

    /// Whether any part of the sprite may be inside `screen`.
    /// Uses the full scaled size as margin, so it errs on the side of "visible".
    pub fn is_on_screen(&self, screen: &Domain) -> bool {
        let w = self.scaled_width();
        let h = self.scaled_height();
        !(self.pos.x + w < screen.left
            || self.pos.x - w > screen.right
            || self.pos.y + h < screen.top
            || self.pos.y - h > screen.bottom)
    }

    // -- Polar velocity / acceleration helpers --

    /// Magnitude of the velocity.
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Change the speed, keeping the direction of travel.
    /// A stationary sprite starts moving in the direction it is rotated to.
    pub fn set_speed(&mut self, speed: f32) {
        let current = self.speed();
        if current == 0.0 {
            self.set_speed_angle(speed, self.rotation);
        } else {
            self.vel *= speed / current;
        }
    }

    /// Set the velocity from a speed and a heading in radians.
    pub fn set_speed_angle(&mut self, speed: f32, angle: f32) {
        self.vel = Vec2::from_angle(angle) * speed;
    }

    /// Heading of the velocity in radians.
    pub fn direction(&self) -> f32 {
        self.vel.y.atan2(self.vel.x)
    }

    /// Point both velocity and acceleration along `angle`, keeping their magnitudes.
    pub fn set_direction(&mut self, angle: f32) {
        let speed = self.speed();
        let acc = self.acceleration_mag();
        self.set_speed_angle(speed, angle);
        self.set_acceleration_angle(acc, angle);
    }

    /// Magnitude of the acceleration.
    pub fn acceleration_mag(&self) -> f32 {
        self.acc.length()
    }

    /// Accelerate along the direction of travel, or along the rotation if stationary.
    pub fn set_acceleration_mag(&mut self, acceleration: f32) {
        let angle = if self.speed() == 0.0 { self.rotation } else { self.direction() };
        self.set_acceleration_angle(acceleration, angle);
    }

    /// Set the acceleration from a magnitude and a heading in radians.
    pub fn set_acceleration_angle(&mut self, acceleration: f32, angle: f32) {
        self.acc = Vec2::from_angle(angle) * acceleration;
    }

    // -- Ordering --

    pub fn z_order(&self) -> ZOrder {
        self.z_order
    }

    /// Change the draw order. Sprites kept in a host collection must be
    /// re-sorted afterwards with [`crate::core::order::sort_by_z_order`];
    /// [`crate::Scene::set_z_order`] does both for sprites in a scene.
    pub fn set_z_order(&mut self, z_order: i32) {
        self.z_order = ZOrder(z_order);
    }

    // -- Frames & animation --

    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    /// Index of the frame currently shown.
    pub fn current_frame(&self) -> usize {
        self.anim.current()
    }

    /// The frame currently shown.
    pub fn frame(&self) -> &Frame {
        &self.frames.frames()[self.anim.current()]
    }

    /// Alpha at a local pixel of the current frame. None outside the frame.
    pub fn alpha_at(&self, local: IVec2) -> Option<u8> {
        self.frames.alpha(self.anim.current(), local.x, local.y)
    }

    pub fn animation(&self) -> &AnimationTimer {
        &self.anim
    }

    /// See [`AnimationTimer::start`].
    pub fn start_animation(&mut self, first: usize, last: usize, interval: f32, repeats: u32) {
        self.anim.start(first, last, interval, repeats);
    }

    /// See [`AnimationTimer::start_looping`].
    pub fn start_looping(&mut self, first: usize, last: usize, interval: f32) {
        self.anim.start_looping(first, last, interval);
    }

    pub fn stop_animation(&mut self) {
        self.anim.stop();
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_animating()
    }

    /// Stop animating and show `frame` (clamped to a valid index).
    pub fn set_frame(&mut self, frame: usize) {
        self.anim.set_frame(frame);
    }

    /// Collision mask frames (see [`FrameStore::collision_mask`]).
    pub fn collision_mask(&mut self, alpha_level: u8, color: Rgba) -> &[Frame] {
        self.frames.collision_mask(alpha_level, color)
    }

    // -- Pixel hits & bites --

    /// Local pixel coordinates of the most recent pixel-level collision.
    pub fn hit(&self) -> IVec2 {
        self.hit
    }

    pub fn set_hit(&mut self, hit: IVec2) {
        self.hit = hit;
    }

    /// Clear a disc of pixels (local coordinates) in every frame.
    pub fn bite(&mut self, center: IVec2, radius: i32) {
        self.frames.bite(center, radius);
    }

    /// Bite around the point of the most recent pixel-level collision.
    pub fn bite_at_hit(&mut self, radius: i32) {
        self.frames.bite(self.hit, radius);
    }

    /// Undo all bites.
    pub fn restore_frames(&mut self) {
        self.frames.restore();
    }
}
