use bevy_ecs::prelude::*;
use log::trace;

use crate::hardware::SCALE;
use crate::palette::Palette;
use crate::resources::camera::{CameraState, Point, to_device_pixel, vertical_scale};
use crate::resources::framebuffer::FrameBuffer;
use crate::resources::gameconfig::GameConfig;
use crate::resources::imagestore::ImageStore;
use crate::resources::spritemanager::SpriteDisplayManager;

/// Compose one frame into the device surface.
///
/// Clears to black, walks the active list in draw order, transforms each
/// sprite World → Device and blits its image stretched by `SCALE`
/// horizontally and `SCALE * ASPECT_RATIO` vertically. Finally paints a
/// black line every `SCALE` rows when scanlines are enabled.
pub fn compose_frame(
    mut fb: ResMut<FrameBuffer>,
    manager: Res<SpriteDisplayManager>,
    images: Res<ImageStore>,
    camera: Res<CameraState>,
    config: Option<Res<GameConfig>>,
) {
    fb.clear(Palette::Black);

    let sx = SCALE as f32;
    let sy = vertical_scale();
    let mut drawn = 0;
    for sprite in manager.active() {
        let Some(image) = images.get(&sprite.image) else {
            trace!("no image for key '{}'", sprite.image.0);
            continue;
        };
        let device = camera.world_to_device(Point::new(sprite.rect.x, sprite.rect.y));
        let (dx, dy) = to_device_pixel(device);
        if fb.blit_scaled(image, dx, dy, sx, sy) > 0 {
            drawn += 1;
        }
    }

    if config.is_none_or(|c| c.scanlines) {
        fb.overlay_scanlines(SCALE, Palette::Black);
    }
    trace!("composed frame: {} sprites on screen", drawn);
}
