//! Game configuration change detection system.
//!
//! Re-applies the parts of [`GameConfig`] that can change while the game
//! runs: the sprite band mode and the master volume. Everything else is read
//! once at startup.

use bevy_ecs::prelude::*;
use log::info;

use crate::events::audio::AudioCmd;
use crate::resources::gameconfig::GameConfig;
use crate::resources::spritemanager::SpriteDisplayManager;

/// Push config edits into the sprite manager and the audio thread.
///
/// The first run only records the startup volume, which the audio thread
/// already received through `setup_audio`.
pub fn apply_gameconfig_changes(
    config: Res<GameConfig>,
    mut manager: ResMut<SpriteDisplayManager>,
    mut audio: MessageWriter<AudioCmd>,
    mut applied_volume: Local<Option<f32>>,
) {
    if !config.is_changed() {
        return;
    }

    if manager.band_mode() != config.band_mode {
        info!(
            "Band mode {} -> {}",
            manager.band_mode().as_str(),
            config.band_mode.as_str()
        );
        manager.set_band_mode(config.band_mode);
    }

    let previous = *applied_volume.get_or_insert(config.volume);
    if previous != config.volume {
        audio.write(AudioCmd::Volume(config.volume));
        *applied_volume = Some(config.volume);
    }
}
