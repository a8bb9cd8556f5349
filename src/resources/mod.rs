//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `camera` – camera offset and the World → Camera → Device transforms
//! - `framebuffer` – software device surface the compositor draws into
//! - `gameconfig` – INI-backed runtime settings
//! - `imagestore` – raster images keyed by sprite image handles
//! - `input` – per-frame button state and the headless autopilot
//! - `score` – coins collected
//! - `spritemanager` – sprite set, budgets, and the per-frame active list
//! - `tonebank` – synthesized sine cues
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod camera;
pub mod framebuffer;
pub mod gameconfig;
pub mod imagestore;
pub mod input;
pub mod score;
pub mod spritemanager;
pub mod tonebank;
pub mod worldtime;
