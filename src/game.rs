//! Game context: world construction, level setup, and the frame schedule.
//!
//! Everything the frame loop needs lives in one [`World`]: the sprite display
//! manager, the camera, the image store, the device surface, the cue bank,
//! and the configuration are resources; player, enemies, coins, and blocks
//! are entities linked to their sprite records.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::actor::{Actor, Patrol};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::spritelink::SpriteLink;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::hardware::{NATIVE_WIDTH, TILE_SIZE};
use crate::palette::Palette;
use crate::resources::audio::AudioBridge;
use crate::resources::camera::CameraState;
use crate::resources::framebuffer::FrameBuffer;
use crate::resources::gameconfig::GameConfig;
use crate::resources::imagestore::{ImageStore, RasterImage};
use crate::resources::input::{Autopilot, InputState};
use crate::resources::score::Score;
use crate::resources::spritemanager::{Rect, SpriteDisplayManager, SpriteRecord};
use crate::resources::tonebank::ToneBank;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::camera::camera_follow;
use crate::systems::gameconfig::apply_gameconfig_changes;
use crate::systems::input::autopilot_input;
use crate::systems::movement::{coin_pickup, enemy_patrol, ground_y, movement, player_control};
use crate::systems::render::compose_frame;
use crate::systems::sprites::{sprite_visibility_system, sync_sprite_rects};
use crate::systems::time::update_world_time;

/// Level length in world pixels (eight screens).
pub const LEVEL_WIDTH: f32 = (NATIVE_WIDTH * 8) as f32;

/// Where the frame loop reads input from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Autopilot,
    #[cfg(feature = "raylib")]
    Keyboard,
}

const PLAYER_ART: [&str; 16] = [
    "....RRRRR.......",
    "...RRRRRRRRR....",
    "...BBBYYBY......",
    "..BYBYYYBYYY....",
    "..BYBBYYYBYYY...",
    "..BBYYYYBBBB....",
    "....YYYYYYY.....",
    "...RRBRRR.......",
    "..RRRBRRBRRR....",
    ".RRRRBBBBRRRR...",
    ".YYRBYBBYBRYY...",
    ".YYYBBBBBBYYY...",
    ".YYBBBBBBBBYY...",
    "...BBB..BBB.....",
    "..BBB....BBB....",
    ".BBBB....BBBB...",
];

const ENEMY_ART: [&str; 16] = [
    "......NNNN......",
    ".....NNNNNN.....",
    "....NNNNNNNN....",
    "...NNNNNNNNNN...",
    "..NWWNNNNNNWWN..",
    ".NNNKWNNNNWKNNN.",
    ".NNNKWWNNWWKNNN.",
    "NNNNKWWNNWWKNNNN",
    "NNNNNNNNNNNNNNNN",
    "NNNNNNNNNNNNNNNN",
    ".NNNNWWWWWWNNNN.",
    "....WWWWWWWW....",
    "...WWWWWWWWWW...",
    "..KKWWWWWWWWKK..",
    "..KKKKWWWWKKKK..",
    "...KKKK..KKKK...",
];

const COIN_ART: [&str; 16] = [
    "...YYYY.",
    "..YYYYYY",
    ".YYWWYYY",
    ".YYWYYYY",
    "YYWYYYYY",
    "YYWYYYYY",
    "YYWYYYYY",
    "YYWYYYYY",
    "YYWYYYYY",
    "YYWYYYYY",
    "YYWYYYYY",
    "YYWYYYYY",
    ".YYWYYYY",
    ".YYYYYYY",
    "..YYYYYY",
    "...YYYY.",
];

const BLOCK_ART: [&str; 16] = [
    "KKKKKKKKKKKKKKKK",
    "KYYYYYYYYYYYYYYK",
    "KYGYYYYYYYYYYGYK",
    "KYYYYKKKKKYYYYYK",
    "KYYYKKYYYKKYYYYK",
    "KYYYKKYYYKKYYYYK",
    "KYYYYYYYKKKYYYYK",
    "KYYYYYYKKKYYYYYK",
    "KYYYYYYKKYYYYYYK",
    "KYYYYYYYYYYYYYYK",
    "KYYYYYYKKYYYYYYK",
    "KYYYYYYKKYYYYYYK",
    "KYGYYYYYYYYYYGYK",
    "KYYYYYYYYYYYYYYK",
    "KKKKKKKKKKKKKKKK",
    "KKKKKKKKKKKKKKKK",
];

const LEGEND: [(char, Palette); 7] = [
    ('R', Palette::Red),
    ('B', Palette::Brown),
    ('Y', Palette::Yellow),
    ('N', Palette::Brown),
    ('W', Palette::White),
    ('K', Palette::DarkGray),
    ('G', Palette::Gray),
];

/// Register the art used by [`setup_level`].
pub fn load_images(store: &mut ImageStore) {
    store.insert("player", RasterImage::from_rows(&PLAYER_ART, &LEGEND));
    store.insert("enemy", RasterImage::from_rows(&ENEMY_ART, &LEGEND));
    store.insert("coin", RasterImage::from_rows(&COIN_ART, &LEGEND));
    store.insert("block", RasterImage::from_rows(&BLOCK_ART, &LEGEND));
}

/// Build the game context with every resource the schedule needs.
///
/// Audio is not started here; see [`crate::resources::audio::setup_audio`].
pub fn init_world(config: GameConfig) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(CameraState::default());
    world.insert_resource(SpriteDisplayManager::with_band_mode(config.band_mode));
    let mut images = ImageStore::new();
    load_images(&mut images);
    world.insert_resource(images);
    world.insert_resource(FrameBuffer::default());
    world.insert_resource(ToneBank::new());
    world.insert_resource(InputState::default());
    world.insert_resource(Autopilot::default());
    world.insert_resource(Score::default());
    world.insert_resource(config);
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<AudioMessage>>();
    world
}

/// Spawn an entity and admit its sprite record.
///
/// Entities whose sprite is refused by the global budget are not spawned.
fn spawn_actor(
    world: &mut World,
    actor: Actor,
    image: &str,
    pos: MapPosition,
    size: (f32, f32),
    body: Option<RigidBody>,
) -> Option<Entity> {
    let rect = Rect::new(pos.x, pos.y, size.0, size.1);
    let id = world
        .resource_mut::<SpriteDisplayManager>()
        .add(SpriteRecord::new(rect, image))?;
    let mut entity = world.spawn((actor, pos, BoxCollider::new(size.0, size.1), SpriteLink(id)));
    if let Some(body) = body {
        entity.insert(body);
    }
    Some(entity.id())
}

/// Populate the level: player, question blocks, patrolling enemies, a coin
/// row, and scattered coins.
///
/// The level asks for more sprites than the global budget allows; the excess
/// is refused at admission and logged. Returns the number of admitted sprites.
pub fn setup_level(world: &mut World) -> usize {
    let seed = world
        .get_resource::<GameConfig>()
        .map(|c| c.seed)
        .unwrap_or(0);
    let mut rng = fastrand::Rng::with_seed(seed);
    let tile = TILE_SIZE as f32;
    let floor = ground_y();
    let mut requested = 0;
    let mut denied = 0;
    let mut track = |spawned: Option<Entity>| {
        requested += 1;
        if spawned.is_none() {
            denied += 1;
        }
    };

    track(spawn_actor(
        world,
        Actor::Player,
        "player",
        MapPosition::new(2.0 * tile, floor - tile),
        (tile, tile),
        Some(RigidBody::new()),
    ));

    for i in 0..8 {
        let x = 10.0 * tile + i as f32 * 12.0 * tile;
        track(spawn_actor(
            world,
            Actor::Block,
            "block",
            MapPosition::new(x, 9.0 * tile),
            (tile, tile),
            None,
        ));
    }

    for i in 0..6 {
        let x = 20.0 * tile + i as f32 * 18.0 * tile;
        let spawned = spawn_actor(
            world,
            Actor::Enemy,
            "enemy",
            MapPosition::new(x, floor - tile),
            (tile, tile),
            Some(RigidBody::new()),
        );
        if let Some(entity) = spawned {
            world.entity_mut(entity).insert(Patrol {
                min_x: x - 3.0 * tile,
                max_x: x + 3.0 * tile,
            });
        }
        track(spawned);
    }

    // Twelve coins on one row: more than a band can show at once.
    for i in 0..12 {
        track(spawn_actor(
            world,
            Actor::Coin,
            "coin",
            MapPosition::new(18.0 * tile + i as f32 * 20.0, 6.0 * tile),
            (tile / 2.0, tile),
            None,
        ));
    }

    for _ in 0..40 {
        let x = rng.f32() * (LEVEL_WIDTH - 8.0 * tile) + 4.0 * tile;
        let y = (4 + rng.u32(0..8)) as f32 * tile;
        track(spawn_actor(
            world,
            Actor::Coin,
            "coin",
            MapPosition::new(x, y),
            (tile / 2.0, tile),
            None,
        ));
    }

    let admitted = requested - denied;
    info!("Level ready: {} sprites admitted", admitted);
    if denied > 0 {
        warn!(
            "Sprite budget full: {} of {} requested sprites refused",
            denied, requested
        );
    }
    admitted
}

/// Build the per-frame schedule.
///
/// Gameplay, sprite sync, visibility, and composition run as one chain so
/// sprite positions cannot change between the visibility pass and the
/// compositor's walk of the active list. Audio forwarding follows.
pub fn build_schedule(input: InputSource) -> Schedule {
    let mut update = Schedule::default();
    match input {
        InputSource::Autopilot => {
            update.add_systems(autopilot_input.before(player_control));
        }
        #[cfg(feature = "raylib")]
        InputSource::Keyboard => {
            update.add_systems(crate::systems::input::update_input_state.before(player_control));
        }
    }
    update.add_systems(
        (
            player_control,
            enemy_patrol,
            movement,
            coin_pickup,
            camera_follow,
            apply_gameconfig_changes.run_if(resource_exists::<GameConfig>),
            sync_sprite_rects,
            sprite_visibility_system,
            compose_frame,
        )
            .chain(),
    );
    update.add_systems(
        // audio systems must be together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds.run_if(resource_exists::<AudioBridge>),
            poll_audio_messages.run_if(resource_exists::<AudioBridge>),
            update_bevy_audio_messages,
        )
            .chain()
            .after(compose_frame),
    );
    update
}

/// Advance the world by one frame of `dt` seconds.
pub fn run_frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}
