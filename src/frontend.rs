//! raylib window front-end.
//!
//! Presents the composed [`FrameBuffer`] through a streaming texture and
//! feeds keyboard input into the schedule. The surface is already at device
//! resolution, so the texture is drawn 1:1 at the window origin. B and the
//! minus/equals keys edit the band mode and volume through [`GameConfig`].

use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::*;

use crate::game::run_frame;
use crate::hardware::{screen_height, screen_width};
use crate::resources::camera::{CameraState, Point};
use crate::resources::framebuffer::FrameBuffer;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::score::Score;
use crate::resources::spritemanager::SpriteDisplayManager;

/// Open the window and run the frame loop until it is closed or Escape is
/// pressed. The schedule must read input with `InputSource::Keyboard`.
pub fn run_window(world: &mut World, schedule: &mut Schedule) -> Result<(), String> {
    let (w, h) = (screen_width() as i32, screen_height() as i32);
    let fps = world
        .get_resource::<GameConfig>()
        .map(|c| c.target_fps)
        .unwrap_or(crate::hardware::FPS);

    let (mut rl, thread) = raylib::init().size(w, h).title("Retroscan").build();
    rl.set_target_fps(fps);
    // Escape is read as the back button instead.
    rl.set_exit_key(None);

    let blank = Image::gen_image_color(w, h, Color::BLACK);
    let mut texture = rl
        .load_texture_from_image(&thread, &blank)
        .map_err(|e| format!("Failed to create frame texture: {}", e))?;
    info!("Window open at {}x{}, {} fps", w, h, fps);

    world.insert_non_send_resource(rl);

    loop {
        let (should_close, dt) = {
            let rl = world.non_send_resource::<RaylibHandle>();
            (rl.window_should_close(), rl.get_frame_time())
        };
        if should_close || world.resource::<InputState>().back.active {
            break;
        }

        // B flips the band mode; minus and equals step the volume.
        let (flip_band, volume_step) = {
            let rl = world.non_send_resource::<RaylibHandle>();
            let step = if rl.is_key_pressed(KeyboardKey::KEY_MINUS) {
                -0.1
            } else if rl.is_key_pressed(KeyboardKey::KEY_EQUAL) {
                0.1
            } else {
                0.0
            };
            (rl.is_key_pressed(KeyboardKey::KEY_B), step)
        };
        if flip_band || volume_step != 0.0 {
            let mut config = world.resource_mut::<GameConfig>();
            if flip_band {
                config.band_mode = config.band_mode.toggled();
            }
            config.volume = (config.volume + volume_step).clamp(0.0, 1.0);
        }

        run_frame(world, schedule, dt);

        let bytes = world.resource::<FrameBuffer>().to_rgba();
        if let Err(e) = texture.update_texture(&bytes) {
            warn!("Frame upload failed: {:?}", e);
        }

        let camera = *world.resource::<CameraState>();
        let (active, total, dropped) = {
            let manager = world.resource::<SpriteDisplayManager>();
            (manager.active().count(), manager.len(), manager.last_report().dropped)
        };
        let coins = world.resource::<Score>().coins;

        let mut rl = world.non_send_resource_mut::<RaylibHandle>();
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&texture, 0, 0, Color::WHITE);

        let mouse = d.get_mouse_position();
        let world_pos = camera.device_to_world(Point::new(mouse.x, mouse.y));
        let hud = format!(
            "FPS {} | sprites {}/{} hidden {} | coins {} | cam {:.0} | mouse world ({:.0}, {:.0})",
            d.get_fps(),
            active,
            total,
            dropped,
            coins,
            camera.x,
            world_pos.x,
            world_pos.y
        );
        d.draw_text(&hud, 8, h - 18, 10, Color::WHITE);
    }

    drop(texture);
    world.remove_non_send_resource::<RaylibHandle>();
    info!("Window closed");
    Ok(())
}
