//! Retroscan library.
//!
//! A side-scroller scaffold that reproduces the sprite limits of an 8-bit
//! home console: at most 64 sprites in play and at most 8 per scanline band.
//! The sprite display manager, the coordinate transforms, the compositor,
//! and the audio cue bank are exposed here for integration tests and for the
//! binary's front-ends.

pub mod components;
pub mod events;
#[cfg(feature = "raylib")]
pub mod frontend;
pub mod game;
pub mod hardware;
pub mod palette;
pub mod resources;
pub mod systems;
