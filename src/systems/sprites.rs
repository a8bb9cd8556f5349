//! Sprite set maintenance systems.
//!
//! Run in this order every frame, after gameplay and before composition:
//! 1. [`sync_sprite_rects`] copies entity positions into the sprite records.
//! 2. [`sprite_visibility_system`] publishes the active list.
//!
//! Nothing may move a record between step 2 and the compositor's walk of
//! the active list.

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::components::actor::Collected;
use crate::components::mapposition::MapPosition;
use crate::components::spritelink::SpriteLink;
use crate::hardware::TILE_SIZE;
use crate::resources::camera::CameraState;
use crate::resources::spritemanager::SpriteDisplayManager;

/// Where collected pickups are parked. Records are never removed mid-level,
/// so a parked sprite is still evaluated and still occupies a band slot.
pub const PARKED_POSITION: (f32, f32) = (-(TILE_SIZE as f32) * 4.0, -(TILE_SIZE as f32) * 8.0);

/// Copy every linked entity's position into its sprite record.
pub fn sync_sprite_rects(
    mut manager: ResMut<SpriteDisplayManager>,
    query: Query<(&SpriteLink, &MapPosition, Has<Collected>)>,
) {
    for (link, pos, collected) in query.iter() {
        let (x, y) = if collected {
            PARKED_POSITION
        } else {
            (pos.x, pos.y)
        };
        if !manager.set_position(link.0, x, y) {
            debug!("entity links to unknown sprite {:?}", link.0);
        }
    }
}

/// Recompute the active list for the current camera.
pub fn sprite_visibility_system(
    mut manager: ResMut<SpriteDisplayManager>,
    camera: Res<CameraState>,
) {
    manager.update_with(&camera);
    let report = manager.last_report();
    if report.dropped > 0 {
        trace!(
            "band budget hid {} of {} sprites (busiest band {})",
            report.dropped, report.candidates, report.busiest_band
        );
    }
}
