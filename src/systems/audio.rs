//! Audio cue playback on a dedicated thread.
//!
//! This module hosts the background audio thread and the systems that bridge
//! it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the output backend, and
//!   processes [`AudioCmd`] messages, emitting [`AudioMessage`] responses.
//! - [`forward_audio_cmds`] pushes this frame's `AudioCmd` messages into the
//!   thread's channel.
//! - [`poll_audio_messages`] non-blockingly drains the audio thread's
//!   responses into the ECS message queue each frame.
//!
//! Backends implement [`CueSink`]. The headless [`LogSink`] only logs; with
//! the `raylib` feature, [`RaylibSink`] uploads every tone of the
//! [`ToneBank`] as a raylib `Sound` and plays it fire-and-forget.
//!
//! See also: [`crate::events::audio`] and [`crate::resources::audio`].

use bevy_ecs::prelude::{MessageReader, MessageWriter, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};

use crate::events::audio::{AudioCmd, AudioCue, AudioMessage};
use crate::resources::audio::{AudioBackend, AudioBridge};
use crate::resources::tonebank::ToneBank;

/// Output backend driven by the audio thread.
pub trait CueSink {
    /// Start playing `cue`. Overlapping plays of one cue may cut each other.
    fn play(&mut self, cue: AudioCue) -> Result<(), String>;
    fn set_volume(&mut self, volume: f32);
    /// Number of cues the backend can play.
    fn loaded(&self) -> usize;
}

/// Backend without an audio device: logs every play.
#[derive(Debug, Default)]
pub struct LogSink {
    volume: f32,
    plays: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            plays: 0,
        }
    }

    pub fn plays(&self) -> usize {
        self.plays
    }
}

impl CueSink for LogSink {
    fn play(&mut self, cue: AudioCue) -> Result<(), String> {
        self.plays += 1;
        debug!(
            "[audio] cue '{}' ({} Hz, {:.2}s) vol={:.2}",
            cue.name(),
            cue.frequency(),
            cue.duration(),
            self.volume
        );
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn loaded(&self) -> usize {
        AudioCue::ALL.len()
    }
}

#[cfg(feature = "raylib")]
pub use raylib_sink::RaylibSink;

#[cfg(feature = "raylib")]
mod raylib_sink {
    use raylib::core::audio::{RaylibAudio, Sound};
    use rustc_hash::FxHashMap;

    use super::CueSink;
    use crate::events::audio::AudioCue;
    use crate::resources::tonebank::ToneBank;

    /// Plays cues through raylib's audio device.
    pub struct RaylibSink<'aud> {
        audio: &'aud RaylibAudio,
        sounds: FxHashMap<AudioCue, Sound<'aud>>,
    }

    impl<'aud> RaylibSink<'aud> {
        /// Upload every tone of the bank as an in-memory WAV.
        pub fn new(audio: &'aud RaylibAudio, bank: &ToneBank) -> Result<Self, String> {
            let mut sounds = FxHashMap::default();
            for cue in AudioCue::ALL {
                let wav = bank.tone(cue).to_wav();
                let wave = audio
                    .new_wave_from_memory(".wav", &wav)
                    .map_err(|e| format!("Failed to decode '{}' tone: {}", cue.name(), e))?;
                let sound = audio
                    .new_sound_from_wave(&wave)
                    .map_err(|e| format!("Failed to upload '{}' tone: {}", cue.name(), e))?;
                sounds.insert(cue, sound);
            }
            Ok(Self { audio, sounds })
        }
    }

    impl CueSink for RaylibSink<'_> {
        fn play(&mut self, cue: AudioCue) -> Result<(), String> {
            match self.sounds.get(&cue) {
                Some(sound) => {
                    sound.play();
                    Ok(())
                }
                None => Err(format!("cue '{}' not loaded", cue.name())),
            }
        }

        fn set_volume(&mut self, volume: f32) {
            self.audio.set_master_volume(volume);
        }

        fn loaded(&self) -> usize {
            self.sounds.len()
        }
    }
}

/// Drain any pending messages from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // Ignore send errors during shutdown.
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Process commands against `sink` until [`AudioCmd::Shutdown`] arrives or
/// every sender is dropped.
pub fn run_cue_loop(sink: &mut dyn CueSink, rx_cmd: &Receiver<AudioCmd>, tx_msg: &Sender<AudioMessage>) {
    let _ = tx_msg.send(AudioMessage::CuesLoaded {
        count: sink.loaded(),
    });
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::PlayCue(cue) => match sink.play(cue) {
                Ok(()) => {
                    let _ = tx_msg.send(AudioMessage::CuePlayed(cue));
                }
                Err(e) => warn!("[audio] cue '{}' failed: {}", cue.name(), e),
            },
            AudioCmd::Volume(vol) => {
                let vol = vol.clamp(0.0, 1.0);
                sink.set_volume(vol);
                let _ = tx_msg.send(AudioMessage::VolumeChanged(vol));
            }
            AudioCmd::Shutdown => {
                info!("[audio] shutdown requested");
                break;
            }
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Creates the backend on this thread (raylib requires the audio device to be
/// used from the thread that opened it), then blocks in [`run_cue_loop`].
pub fn audio_thread(
    backend: AudioBackend,
    bank: ToneBank,
    volume: f32,
    rx_cmd: Receiver<AudioCmd>,
    tx_msg: Sender<AudioMessage>,
) {
    info!(
        "[audio] thread starting (id={:?}, backend={:?})",
        std::thread::current().id(),
        backend
    );

    match backend {
        AudioBackend::Log => {
            let mut sink = LogSink::new();
            sink.set_volume(volume);
            run_cue_loop(&mut sink, &rx_cmd, &tx_msg);
            info!("[audio] {} cues played", sink.plays());
        }
        #[cfg(feature = "raylib")]
        AudioBackend::Raylib => {
            let audio = match raylib::core::audio::RaylibAudio::init_audio_device() {
                Ok(device) => device,
                Err(e) => {
                    let _ = tx_msg.send(AudioMessage::CuesLoadFailed {
                        error: e.to_string(),
                    });
                    log::error!("[audio] failed to open device: {}", e);
                    return;
                }
            };
            match RaylibSink::new(&audio, &bank) {
                Ok(mut sink) => {
                    sink.set_volume(volume);
                    run_cue_loop(&mut sink, &rx_cmd, &tx_msg);
                }
                Err(e) => {
                    log::error!("[audio] {}", e);
                    let _ = tx_msg.send(AudioMessage::CuesLoadFailed { error: e });
                }
            }
        }
    }
    // Only the raylib backend reads the bank.
    drop(bank);

    info!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
}
