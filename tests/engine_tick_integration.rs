//! Engine tick integration tests for gameplay, sprite sync, and audio.

use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_ecs::system::{ScheduleSystem, SystemState};

use retroscan::components::actor::{Actor, Collected, Patrol};
use retroscan::components::boxcollider::BoxCollider;
use retroscan::components::mapposition::MapPosition;
use retroscan::components::rigidbody::RigidBody;
use retroscan::components::spritelink::SpriteLink;
use retroscan::events::audio::{AudioCmd, AudioCue, AudioMessage};
use retroscan::game::{InputSource, build_schedule, init_world, run_frame, setup_level};
use retroscan::hardware::{FPS, MAX_SPRITES, PLAYER_JUMP_STRENGTH, SPRITES_PER_SCANLINE};
use retroscan::palette::Palette;
use retroscan::resources::audio::{AudioBackend, AudioBridge, setup_audio, shutdown_audio};
use retroscan::resources::camera::CameraState;
use retroscan::resources::framebuffer::FrameBuffer;
use retroscan::resources::gameconfig::GameConfig;
use retroscan::resources::input::InputState;
use retroscan::resources::score::Score;
use retroscan::resources::spritemanager::{
    BandMode, Rect, SpriteDisplayManager, SpriteId, SpriteRecord, band_of,
};
use retroscan::systems::audio::{forward_audio_cmds, update_bevy_audio_cmds};
use retroscan::systems::camera::camera_follow;
use retroscan::systems::gameconfig::apply_gameconfig_changes;
use retroscan::systems::movement::{coin_pickup, enemy_patrol, ground_y, movement, player_control};
use retroscan::systems::sprites::{PARKED_POSITION, sprite_visibility_system, sync_sprite_rects};
use retroscan::systems::time::update_world_time;

const FRAME: f32 = 1.0 / FPS as f32;
const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    init_world(GameConfig::new())
}

fn tick<M>(world: &mut World, systems: impl IntoScheduleConfigs<ScheduleSystem, M>) {
    let mut schedule = Schedule::default();
    schedule.add_systems(systems);
    schedule.run(world);
}

fn read_audio_cmds(world: &mut World) -> Vec<AudioCmd> {
    let mut state = SystemState::<MessageReader<AudioCmd>>::new(world);
    let mut reader = state.get_mut(world);
    reader.read().cloned().collect()
}

fn spawn_linked(
    world: &mut World,
    actor: Actor,
    pos: MapPosition,
    size: (f32, f32),
) -> (Entity, SpriteId) {
    let id = world
        .resource_mut::<SpriteDisplayManager>()
        .add(SpriteRecord::new(Rect::new(pos.x, pos.y, size.0, size.1), "coin"))
        .unwrap();
    let entity = world
        .spawn((actor, pos, BoxCollider::new(size.0, size.1), SpriteLink(id)))
        .id();
    (entity, id)
}

#[test]
fn gravity_pulls_body_down_until_ground() {
    let mut world = make_world();
    let entity = world
        .spawn((
            MapPosition::new(0.0, 0.0),
            RigidBody::new(),
            BoxCollider::new(16.0, 16.0),
        ))
        .id();

    update_world_time(&mut world, FRAME);
    tick(&mut world, movement);
    let body = *world.get::<RigidBody>(entity).unwrap();
    let pos = *world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(body.vy, 0.8));
    assert!(approx_eq(pos.y, 0.8));
    assert!(!body.on_ground);

    for _ in 0..120 {
        update_world_time(&mut world, FRAME);
        tick(&mut world, movement);
    }
    let body = *world.get::<RigidBody>(entity).unwrap();
    let pos = *world.get::<MapPosition>(entity).unwrap();
    assert!(body.on_ground);
    assert!(approx_eq(pos.y, ground_y() - 16.0));
    assert_eq!(body.vy, 0.0);
}

#[test]
fn floating_body_ignores_gravity() {
    let mut world = make_world();
    let entity = world
        .spawn((
            MapPosition::new(10.0, 50.0),
            RigidBody::floating(),
            BoxCollider::new(16.0, 16.0),
        ))
        .id();
    update_world_time(&mut world, FRAME);
    tick(&mut world, movement);
    assert_eq!(*world.get::<MapPosition>(entity).unwrap(), MapPosition::new(10.0, 50.0));
}

#[test]
fn jump_from_ground_sets_velocity_and_plays_cue() {
    let mut world = make_world();
    let mut body = RigidBody::new();
    body.on_ground = true;
    let player = world
        .spawn((Actor::Player, MapPosition::new(0.0, 100.0), body))
        .id();
    {
        let mut input = world.resource_mut::<InputState>();
        input.jump.update(true);
        input.right.update(true);
    }

    tick(&mut world, player_control);

    let body = world.get::<RigidBody>(player).unwrap();
    assert_eq!(body.vy, PLAYER_JUMP_STRENGTH);
    assert_eq!(body.vx, 2.0);
    assert!(!body.on_ground);
    assert_eq!(read_audio_cmds(&mut world), vec![AudioCmd::PlayCue(AudioCue::Jump)]);
}

#[test]
fn jump_in_the_air_is_ignored() {
    let mut world = make_world();
    let player = world
        .spawn((Actor::Player, MapPosition::new(0.0, 100.0), RigidBody::new()))
        .id();
    world.resource_mut::<InputState>().jump.update(true);

    tick(&mut world, player_control);

    assert_eq!(world.get::<RigidBody>(player).unwrap().vy, 0.0);
    assert!(read_audio_cmds(&mut world).is_empty());
}

#[test]
fn enemy_turns_around_at_patrol_edge() {
    let mut world = make_world();
    let mut body = RigidBody::floating();
    body.vx = 1.0;
    let enemy = world
        .spawn((
            Actor::Enemy,
            MapPosition::new(50.0, 0.0),
            Patrol {
                min_x: 0.0,
                max_x: 50.0,
            },
            body,
        ))
        .id();
    tick(&mut world, enemy_patrol);
    assert_eq!(world.get::<RigidBody>(enemy).unwrap().vx, -1.0);
}

#[test]
fn coin_pickup_scores_parks_sprite_and_plays_cues() {
    let mut world = make_world();
    spawn_linked(&mut world, Actor::Player, MapPosition::new(100.0, 100.0), (16.0, 16.0));
    let mut coins = Vec::new();
    for i in 0..5 {
        coins.push(spawn_linked(
            &mut world,
            Actor::Coin,
            MapPosition::new(104.0 + i as f32, 100.0),
            (8.0, 16.0),
        ));
    }
    let (far_coin, _) = spawn_linked(&mut world, Actor::Coin, MapPosition::new(500.0, 100.0), (8.0, 16.0));

    tick(&mut world, (coin_pickup, sync_sprite_rects).chain());

    assert_eq!(world.resource::<Score>().coins, 5);
    for (entity, id) in coins.iter() {
        assert!(world.get::<Collected>(*entity).is_some());
        let rect = world.resource::<SpriteDisplayManager>().get(*id).unwrap().rect;
        assert_eq!((rect.x, rect.y), PARKED_POSITION);
    }
    assert!(world.get::<Collected>(far_coin).is_none());

    let cmds = read_audio_cmds(&mut world);
    assert_eq!(cmds.iter().filter(|c| **c == AudioCmd::PlayCue(AudioCue::Coin)).count(), 5);
    assert_eq!(cmds.last(), Some(&AudioCmd::PlayCue(AudioCue::PowerUp)));
}

#[test]
fn collected_coin_is_not_collected_twice() {
    let mut world = make_world();
    spawn_linked(&mut world, Actor::Player, MapPosition::new(0.0, 0.0), (16.0, 16.0));
    spawn_linked(&mut world, Actor::Coin, MapPosition::new(4.0, 0.0), (8.0, 16.0));

    tick(&mut world, coin_pickup);
    tick(&mut world, coin_pickup);
    assert_eq!(world.resource::<Score>().coins, 1);
}

#[test]
fn sync_then_visibility_uses_entity_positions() {
    let mut world = make_world();
    let (entity, id) = spawn_linked(&mut world, Actor::Coin, MapPosition::new(0.0, 0.0), (8.0, 16.0));
    world.get_mut::<MapPosition>(entity).unwrap().x = 321.0;

    tick(&mut world, (sync_sprite_rects, sprite_visibility_system).chain());

    let manager = world.resource::<SpriteDisplayManager>();
    assert_eq!(manager.get(id).unwrap().rect.x, 321.0);
    assert_eq!(manager.active_ids(), &[id]);
}

#[test]
fn camera_follows_player_but_not_past_level_start() {
    let mut world = make_world();
    let player = world
        .spawn((Actor::Player, MapPosition::new(20.0, 0.0)))
        .id();
    tick(&mut world, camera_follow);
    assert_eq!(world.resource::<CameraState>().x, 0.0);

    world.get_mut::<MapPosition>(player).unwrap().x = 1000.0;
    tick(&mut world, camera_follow);
    let expected = 1000.0 - 256.0 / 3.0;
    assert!(approx_eq(world.resource::<CameraState>().x, expected));
}

#[test]
fn config_edits_reach_sprite_manager_and_audio() {
    let mut world = make_world();
    let mut schedule = Schedule::default();
    schedule.add_systems(apply_gameconfig_changes);

    schedule.run(&mut world);
    assert!(read_audio_cmds(&mut world).is_empty());
    assert_eq!(
        world.resource::<SpriteDisplayManager>().band_mode(),
        BandMode::CameraX
    );

    {
        let mut config = world.resource_mut::<GameConfig>();
        config.band_mode = BandMode::CameraY;
        config.volume = 0.3;
    }
    schedule.run(&mut world);

    assert_eq!(
        world.resource::<SpriteDisplayManager>().band_mode(),
        BandMode::CameraY
    );
    assert_eq!(read_audio_cmds(&mut world), vec![AudioCmd::Volume(0.3)]);
}

#[test]
fn level_setup_fills_global_budget() {
    let mut world = make_world();
    let admitted = setup_level(&mut world);
    assert_eq!(admitted, MAX_SPRITES);
    assert!(world.resource::<SpriteDisplayManager>().is_full());

    let linked = world.query::<&SpriteLink>().iter(&world).count();
    assert_eq!(linked, MAX_SPRITES);
}

#[test]
fn headless_frames_keep_budgets_and_draw() {
    let mut world = make_world();
    setup_level(&mut world);
    let mut schedule = build_schedule(InputSource::Autopilot);

    let start_x = {
        let mut q = world.query::<(&Actor, &MapPosition)>();
        q.iter(&world)
            .find(|(a, _)| **a == Actor::Player)
            .map(|(_, p)| p.x)
            .unwrap()
    };

    for _ in 0..180 {
        run_frame(&mut world, &mut schedule, FRAME);

        let camera_x = world.resource::<CameraState>().x;
        let manager = world.resource::<SpriteDisplayManager>();
        assert!(manager.active().count() <= MAX_SPRITES);
        let mut counts = std::collections::BTreeMap::new();
        for s in manager.active() {
            *counts.entry(band_of(s.rect.y, camera_x)).or_insert(0usize) += 1;
        }
        assert!(counts.values().all(|n| *n <= SPRITES_PER_SCANLINE));
    }

    let end_x = {
        let mut q = world.query::<(&Actor, &MapPosition)>();
        q.iter(&world)
            .find(|(a, _)| **a == Actor::Player)
            .map(|(_, p)| p.x)
            .unwrap()
    };
    assert!(end_x > start_x + 100.0, "player walked from {start_x} to {end_x}");
    assert!(world.resource::<CameraState>().x > 0.0);

    let fb = world.resource::<FrameBuffer>();
    let black = Palette::Black.rgb();
    assert!(fb.pixels().iter().any(|p| *p != black));
}

#[test]
fn audio_thread_plays_forwarded_cues() {
    let mut world = make_world();
    setup_audio(&mut world, AudioBackend::Log, 1.0);

    {
        let mut state = SystemState::<MessageWriter<AudioCmd>>::new(&mut world);
        let mut writer = state.get_mut(&mut world);
        writer.write(AudioCmd::PlayCue(AudioCue::Coin));
    }
    tick(&mut world, (update_bevy_audio_cmds, forward_audio_cmds).chain());

    let received: Vec<AudioMessage> = {
        let bridge = world.resource::<AudioBridge>();
        let timeout = Duration::from_secs(5);
        vec![
            bridge.rx_msg.recv_timeout(timeout).unwrap(),
            bridge.rx_msg.recv_timeout(timeout).unwrap(),
        ]
    };
    assert_eq!(
        received,
        vec![
            AudioMessage::CuesLoaded { count: 3 },
            AudioMessage::CuePlayed(AudioCue::Coin),
        ]
    );

    shutdown_audio(&mut world);
    assert!(world.get_resource::<AudioBridge>().is_none());
}
