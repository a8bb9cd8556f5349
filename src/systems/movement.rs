//! Platformer physics and gameplay reactions.
//!
//! Positions live on entities ([`MapPosition`]); these systems only touch the
//! ECS side. [`crate::systems::sprites::sync_sprite_rects`] copies the result
//! into the sprite set afterwards.

use bevy_ecs::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::components::actor::{Actor, Collected, Patrol};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::{AudioCmd, AudioCue};
use crate::hardware::{
    ENEMY_MOVE_SPEED, GRAVITY, PLAYER_JUMP_STRENGTH, PLAYER_MOVE_SPEED, TILE_SIZE, level_height,
};
use crate::resources::input::InputState;
use crate::resources::score::Score;
use crate::resources::worldtime::WorldTime;

/// Top of the ground row, in world pixels.
pub fn ground_y() -> f32 {
    (level_height() - TILE_SIZE) as f32
}

/// Translate input into the player's velocity; jump from the ground.
pub fn player_control(
    input: Res<InputState>,
    mut query: Query<(&Actor, &mut RigidBody)>,
    mut audio: MessageWriter<AudioCmd>,
) {
    for (actor, mut body) in query.iter_mut() {
        if *actor != Actor::Player {
            continue;
        }
        body.vx = input.horizontal() * PLAYER_MOVE_SPEED;
        if input.jump.just_pressed && body.on_ground {
            body.vy = PLAYER_JUMP_STRENGTH;
            body.on_ground = false;
            audio.write(AudioCmd::PlayCue(AudioCue::Jump));
        }
    }
}

/// Walk enemies back and forth inside their patrol range.
pub fn enemy_patrol(mut query: Query<(&MapPosition, &Patrol, &mut RigidBody)>) {
    for (pos, patrol, mut body) in query.iter_mut() {
        if body.vx == 0.0 {
            body.vx = ENEMY_MOVE_SPEED;
        }
        if pos.x <= patrol.min_x {
            body.vx = ENEMY_MOVE_SPEED;
        } else if pos.x >= patrol.max_x {
            body.vx = -ENEMY_MOVE_SPEED;
        }
    }
}

/// Integrate velocities, apply gravity, and rest bodies on the ground.
pub fn movement(
    mut query: Query<(&mut MapPosition, &mut RigidBody, &BoxCollider)>,
    time: Res<WorldTime>,
) {
    let frames = time.frames();
    let floor = ground_y();
    for (mut pos, mut body, collider) in query.iter_mut() {
        if body.gravity {
            body.vy += GRAVITY * frames;
        }
        pos.x += body.vx * frames;
        pos.y += body.vy * frames;

        if body.gravity && pos.y + collider.h >= floor {
            pos.y = floor - collider.h;
            body.vy = 0.0;
            body.on_ground = true;
        } else {
            body.on_ground = false;
        }
        pos.x = pos.x.max(0.0);
    }
}

/// Collect coins the player touches.
pub fn coin_pickup(
    mut commands: Commands,
    players: Query<(&Actor, &MapPosition, &BoxCollider)>,
    coins: Query<(Entity, &Actor, &MapPosition, &BoxCollider), Without<Collected>>,
    mut score: ResMut<Score>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let mut cues: SmallVec<[AudioCue; 4]> = SmallVec::new();
    for (actor, ppos, pbox) in players.iter() {
        if *actor != Actor::Player {
            continue;
        }
        for (entity, kind, cpos, cbox) in coins.iter() {
            if *kind != Actor::Coin || !pbox.overlaps(ppos, cbox, cpos) {
                continue;
            }
            commands.entity(entity).insert(Collected);
            let powerup = score.add_coin();
            debug!("coin collected at ({:.0}, {:.0}), total {}", cpos.x, cpos.y, score.coins);
            cues.push(AudioCue::Coin);
            if powerup {
                cues.push(AudioCue::PowerUp);
            }
        }
    }
    if !cues.is_empty() {
        audio.write_batch(cues.into_iter().map(AudioCmd::PlayCue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_is_one_tile_above_level_bottom() {
        assert_eq!(ground_y(), 224.0);
    }
}
