use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned world rectangle. `top` is the smaller y value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Domain {
    /// Create a domain. `left < right` and `top < bottom` are expected;
    /// a zero-sized domain is a caller bug.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        debug_assert!(left < right && top < bottom, "degenerate domain");
        Self { left, top, right, bottom }
    }

    /// Create a domain from its top-left corner and size.
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Whether a point lies inside the domain (edges included).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// What a sprite does when it reaches a domain edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryAction {
    /// Stop: velocity and acceleration on that axis become zero.
    Halt,
    /// Bounce: velocity and acceleration on that axis are reversed.
    #[default]
    Rebound,
}

/// A domain together with the action taken at its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainClamp {
    pub domain: Domain,
    pub action: BoundaryAction,
}

impl DomainClamp {
    pub fn new(domain: Domain, action: BoundaryAction) -> Self {
        Self { domain, action }
    }
}
