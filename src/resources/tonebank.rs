//! Pre-synthesized sound cues.
//!
//! All three cues are plain sine tones built once at startup: mono, signed
//! 16-bit, 44.1 kHz, peak amplitude `2^15 - 1`. No files are read.

use bevy_ecs::prelude::Resource;
use log::info;

use crate::events::audio::AudioCue;

pub const SAMPLE_RATE: u32 = 44_100;
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;
pub const MAX_AMPLITUDE: i16 = i16::MAX;

/// A synthesized mono tone.
#[derive(Clone, Debug, PartialEq)]
pub struct Tone {
    pub frequency: f64,
    pub duration: f64,
    pub samples: Vec<i16>,
}

impl Tone {
    /// Sine tone of `floor(SAMPLE_RATE * duration)` samples.
    ///
    /// Sample values are truncated toward zero.
    pub fn sine(frequency: f64, duration: f64) -> Self {
        let rate = SAMPLE_RATE as f64;
        let count = (rate * duration).floor() as usize;
        let samples = (0..count)
            .map(|n| {
                let phase = 2.0 * std::f64::consts::PI * frequency * n as f64 / rate;
                (MAX_AMPLITUDE as f64 * phase.sin()) as i16
            })
            .collect();
        Self {
            frequency,
            duration,
            samples,
        }
    }

    /// Encode as a RIFF/WAVE PCM file image.
    pub fn to_wav(&self) -> Vec<u8> {
        let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
        let byte_rate = SAMPLE_RATE * block_align as u32;
        let data_len = (self.samples.len() * 2) as u32;

        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&CHANNELS.to_le_bytes());
        out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        out.extend_from_slice(&byte_rate.to_le_bytes());
        out.extend_from_slice(&block_align.to_le_bytes());
        out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for s in self.samples.iter() {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }
}

/// The cue bank: one tone per [`AudioCue`].
#[derive(Resource, Clone, Debug)]
pub struct ToneBank {
    jump: Tone,
    coin: Tone,
    powerup: Tone,
}

impl Default for ToneBank {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneBank {
    pub fn new() -> Self {
        let bank = Self {
            jump: Self::synthesize(AudioCue::Jump),
            coin: Self::synthesize(AudioCue::Coin),
            powerup: Self::synthesize(AudioCue::PowerUp),
        };
        info!(
            "Synthesized cue bank: jump={} coin={} powerup={} samples",
            bank.jump.samples.len(),
            bank.coin.samples.len(),
            bank.powerup.samples.len()
        );
        bank
    }

    fn synthesize(cue: AudioCue) -> Tone {
        Tone::sine(cue.frequency(), cue.duration())
    }

    pub fn tone(&self, cue: AudioCue) -> &Tone {
        match cue {
            AudioCue::Jump => &self.jump,
            AudioCue::Coin => &self.coin,
            AudioCue::PowerUp => &self.powerup,
        }
    }
}
