use bevy_ecs::prelude::Component;

use crate::components::mapposition::MapPosition;
use crate::resources::spritemanager::Rect;

/// Axis-aligned body size, anchored at the entity's [`MapPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub w: f32,
    pub h: f32,
}

impl BoxCollider {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// World-space rectangle for an entity at `position`.
    pub fn rect(&self, position: &MapPosition) -> Rect {
        Rect::new(position.x, position.y, self.w, self.h)
    }

    /// AABB overlap test against another collider at a different position.
    pub fn overlaps(&self, position: &MapPosition, other: &Self, other_position: &MapPosition) -> bool {
        self.rect(position).overlaps(&other.rect(other_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_and_touching_edges() {
        let a = BoxCollider::new(16.0, 16.0);
        let b = BoxCollider::new(8.0, 8.0);
        assert!(a.overlaps(&MapPosition::new(0.0, 0.0), &b, &MapPosition::new(10.0, 10.0)));
        assert!(!a.overlaps(&MapPosition::new(0.0, 0.0), &b, &MapPosition::new(16.0, 0.0)));
    }
}
