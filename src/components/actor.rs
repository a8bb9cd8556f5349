//! Gameplay identity of an entity.
//!
//! The sprite display manager treats every sprite alike; gameplay systems
//! tell them apart with this tag.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Actor {
    Player,
    Enemy,
    Coin,
    Block,
}

/// Horizontal patrol range for enemies, in world pixels.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Patrol {
    pub min_x: f32,
    pub max_x: f32,
}

/// Marks a coin that has been picked up.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Collected;
