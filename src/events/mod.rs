//! Message types exchanged across systems and threads.
//!
//! Submodules:
//! - [`audio`] – cue identifiers, commands to the audio thread, and its replies

pub mod audio;
