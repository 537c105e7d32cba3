pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{EngineConfig, ALPHA_LEVEL};
pub use api::error::FrameError;
pub use api::types::{SpriteEvent, SpriteId};
pub use components::animation::{AnimationTimer, REPEAT_FOREVER};
pub use components::domain::{BoundaryAction, Domain, DomainClamp};
pub use components::frames::{Frame, FrameStore, Rgba};
pub use components::sprite::Sprite;
pub use crate::core::order::ZOrder;
pub use crate::core::scene::Scene;
pub use input::dispatch::{PointerDispatch, SpriteHandler};
pub use input::queue::{InputQueue, PointerEvent};
pub use systems::animation::tick_animations;
pub use systems::collision::{Collider, CollisionMode, PixelHit};
pub use systems::debug::{collision_areas, CollisionArea, DebugArea};
pub use systems::kinematics::{integrate, tick_kinematics};
