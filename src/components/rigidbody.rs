//! Kinematic body for the platformer physics.
//!
//! Velocities are in native pixels per console frame, matching the tuning
//! constants in [`crate::hardware`]. The movement system scales them by the
//! frame delta expressed in console frames.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    pub vx: f32,
    pub vy: f32,
    /// Apply [`GRAVITY`](crate::hardware::GRAVITY) every frame.
    pub gravity: bool,
    /// Set by the movement system when the body rests on the ground.
    pub on_ground: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    pub fn new() -> Self {
        Self {
            vx: 0.0,
            vy: 0.0,
            gravity: true,
            on_ground: false,
        }
    }

    /// A body unaffected by gravity.
    pub fn floating() -> Self {
        Self {
            gravity: false,
            ..Self::new()
        }
    }
}
