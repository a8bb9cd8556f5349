use bevy_ecs::prelude::Component;

use crate::resources::spritemanager::SpriteId;

/// Ties an entity to the sprite record that draws it.
///
/// The sync system copies the entity's [`MapPosition`] into the record
/// before every visibility pass.
///
/// [`MapPosition`]: crate::components::mapposition::MapPosition
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteLink(pub SpriteId);
