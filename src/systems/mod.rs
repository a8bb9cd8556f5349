//! Engine systems.
//!
//! Submodules overview
//! - [`audio`] – audio thread, cue backends, and message bridging
//! - [`camera`] – horizontal camera follow
//! - [`gameconfig`] – apply runtime config edits (band mode, volume)
//! - [`input`] – autopilot and keyboard input
//! - [`movement`] – player control, enemy patrol, gravity, coin pickup
//! - [`render`] – compose the active list into the device surface
//! - [`sprites`] – sync sprite records and publish the active list
//! - [`time`] – update simulation time and delta

pub mod audio;
pub mod camera;
pub mod gameconfig;
pub mod input;
pub mod movement;
pub mod render;
pub mod sprites;
pub mod time;
