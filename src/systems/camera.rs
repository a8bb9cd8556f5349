//! Camera follow system.

use bevy_ecs::prelude::*;

use crate::components::actor::Actor;
use crate::components::mapposition::MapPosition;
use crate::hardware::NATIVE_WIDTH;
use crate::resources::camera::CameraState;

/// Keep the player a third of the way into the viewport, never scrolling
/// left of the level start.
pub fn camera_follow(mut camera: ResMut<CameraState>, query: Query<(&Actor, &MapPosition)>) {
    let lead = NATIVE_WIDTH as f32 / 3.0;
    if let Some((_, pos)) = query.iter().find(|(a, _)| **a == Actor::Player) {
        camera.x = (pos.x - lead).max(0.0);
    }
}
