//! Display geometry and hardware limits of the emulated console.
//!
//! Everything here is fixed at compile time. Geometry is stored in native
//! square-pixel space; only the compositor stretches vertically by
//! [`ASPECT_RATIO`].

/// Native horizontal resolution in pixels.
pub const NATIVE_WIDTH: u32 = 256;
/// Native vertical resolution in pixels.
pub const NATIVE_HEIGHT: u32 = 240;
/// Integer upscale factor applied by the compositor.
pub const SCALE: u32 = 3;
/// Pixel aspect ratio of the source console (8:7, wider than tall).
pub const ASPECT_RATIO: f32 = 8.0 / 7.0;

/// Tiles are 16x16 native pixels.
pub const TILE_SIZE: u32 = 16;
/// Global sprite budget.
pub const MAX_SPRITES: usize = 64;
/// Sprites allowed per scanline band.
pub const SPRITES_PER_SCANLINE: usize = 8;
/// Height of one scanline band, in device pixels.
pub const BAND_HEIGHT: f32 = (TILE_SIZE * SCALE) as f32;

/// Target frame cadence.
pub const FPS: u32 = 60;

/// 15 * 16 = 240, one screen tall.
pub const DEFAULT_LEVEL_HEIGHT_TILES: u32 = 15;

// Physics tuning, expressed per frame at FPS like the console original.
pub const GRAVITY: f32 = 0.8;
pub const PLAYER_JUMP_STRENGTH: f32 = -15.0;
pub const PLAYER_MOVE_SPEED: f32 = 2.0;
pub const ENEMY_MOVE_SPEED: f32 = 1.0;

/// Output surface width in device pixels.
pub const fn screen_width() -> u32 {
    NATIVE_WIDTH * SCALE
}

/// Output surface height in device pixels, `floor(240 * SCALE * 8/7)`.
pub fn screen_height() -> u32 {
    (NATIVE_HEIGHT as f32 * SCALE as f32 * ASPECT_RATIO) as u32
}

/// Level height in world pixels.
pub const fn level_height() -> u32 {
    DEFAULT_LEVEL_HEIGHT_TILES * TILE_SIZE
}
