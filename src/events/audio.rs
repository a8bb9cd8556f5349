//! Audio cue messages exchanged between gameplay systems and the audio thread.

use bevy_ecs::message::Message;

/// Gameplay-triggered sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Jump,
    Coin,
    PowerUp,
}

impl AudioCue {
    pub const ALL: [AudioCue; 3] = [AudioCue::Jump, AudioCue::Coin, AudioCue::PowerUp];

    /// Tone frequency in Hz.
    pub fn frequency(self) -> f64 {
        match self {
            AudioCue::Jump => 523.0,
            AudioCue::Coin => 659.0,
            AudioCue::PowerUp => 784.0,
        }
    }

    /// Tone length in seconds.
    pub fn duration(self) -> f64 {
        match self {
            AudioCue::Jump => 0.10,
            AudioCue::Coin => 0.15,
            AudioCue::PowerUp => 0.30,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Jump => "jump",
            AudioCue::Coin => "coin",
            AudioCue::PowerUp => "powerup",
        }
    }
}

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Fire-and-forget playback of a cue.
    PlayCue(AudioCue),
    /// Change master volume, `0.0..=1.0`.
    Volume(f32),
    Shutdown,
}

/// Messages sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    CuesLoaded { count: usize },
    CuesLoadFailed { error: String },
    CuePlayed(AudioCue),
    VolumeChanged(f32),
}
