//! Game configuration resource.
//!
//! Runtime settings loaded from an INI configuration file. Display geometry
//! is fixed by [`crate::hardware`] and is not configurable; the file only
//! tunes presentation, audio, band computation, and headless runs.
//!
//! # Configuration File Format
//!
//! ```ini
//! [display]
//! scanlines = true
//! target_fps = 60
//!
//! [sprites]
//! band_mode = camera_x
//!
//! [audio]
//! enabled = true
//! volume = 0.8
//!
//! [run]
//! frames = 600
//! seed = 1985
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::hardware::FPS;
use crate::resources::spritemanager::BandMode;

/// Default safe values for startup
const DEFAULT_SCANLINES: bool = true;
const DEFAULT_AUDIO_ENABLED: bool = true;
const DEFAULT_VOLUME: f32 = 0.8;
const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_SEED: u64 = 1985;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Overlay black scanlines on the composed frame.
    pub scanlines: bool,
    /// Target frames per second.
    pub target_fps: u32,
    /// Offset used by the sprite band computation.
    pub band_mode: BandMode,
    /// Play audio cues at all.
    pub audio_enabled: bool,
    /// Master volume, `0.0..=1.0`.
    pub volume: f32,
    /// Frames simulated by a headless run.
    pub frames: u32,
    /// Seed for level generation.
    pub seed: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            scanlines: DEFAULT_SCANLINES,
            target_fps: FPS,
            band_mode: BandMode::default(),
            audio_enabled: DEFAULT_AUDIO_ENABLED,
            volume: DEFAULT_VOLUME,
            frames: DEFAULT_FRAMES,
            seed: DEFAULT_SEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [display] section
        if let Some(scanlines) = config.getbool("display", "scanlines").ok().flatten() {
            self.scanlines = scanlines;
        }
        if let Some(fps) = config.getuint("display", "target_fps").ok().flatten() {
            if fps > 0 {
                self.target_fps = fps as u32;
            }
        }

        // [sprites] section
        if let Some(mode) = config.get("sprites", "band_mode") {
            match BandMode::parse(&mode) {
                Some(mode) => self.band_mode = mode,
                None => warn!("Unknown band_mode '{}', keeping {}", mode, self.band_mode.as_str()),
            }
        }

        // [audio] section
        if let Some(enabled) = config.getbool("audio", "enabled").ok().flatten() {
            self.audio_enabled = enabled;
        }
        if let Some(volume) = config.getfloat("audio", "volume").ok().flatten() {
            self.volume = (volume as f32).clamp(0.0, 1.0);
        }

        // [run] section
        if let Some(frames) = config.getuint("run", "frames").ok().flatten() {
            self.frames = frames as u32;
        }
        if let Some(seed) = config.getuint("run", "seed").ok().flatten() {
            self.seed = seed;
        }

        info!(
            "Loaded config: scanlines={}, fps={}, band_mode={}, audio={} vol={:.2}, frames={}, seed={}",
            self.scanlines,
            self.target_fps,
            self.band_mode.as_str(),
            self.audio_enabled,
            self.volume,
            self.frames,
            self.seed
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("display", "scanlines", Some(self.scanlines.to_string()));
        config.set("display", "target_fps", Some(self.target_fps.to_string()));
        config.set("sprites", "band_mode", Some(self.band_mode.as_str().to_string()));
        config.set("audio", "enabled", Some(self.audio_enabled.to_string()));
        config.set("audio", "volume", Some(self.volume.to_string()));
        config.set("run", "frames", Some(self.frames.to_string()));
        config.set("run", "seed", Some(self.seed.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Seconds per frame at the target rate.
    pub fn frame_time(&self) -> f32 {
        1.0 / self.target_fps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GameConfig::new();
        assert!(cfg.scanlines);
        assert_eq!(cfg.target_fps, 60);
        assert_eq!(cfg.band_mode, BandMode::CameraX);
        assert_eq!(cfg.frames, 600);
    }

    #[test]
    fn test_load_from_str_overrides_present_keys() {
        let mut cfg = GameConfig::new();
        cfg.load_from_str(
            "[display]\nscanlines = false\n[sprites]\nband_mode = camera_y\n[audio]\nvolume = 4.0\n[run]\nframes = 12\n",
        )
        .unwrap();
        assert!(!cfg.scanlines);
        assert_eq!(cfg.band_mode, BandMode::CameraY);
        assert_eq!(cfg.volume, 1.0);
        assert_eq!(cfg.frames, 12);
        assert_eq!(cfg.target_fps, 60);
        assert_eq!(cfg.seed, 1985);
    }

    #[test]
    fn test_unknown_band_mode_keeps_default() {
        let mut cfg = GameConfig::new();
        cfg.load_from_str("[sprites]\nband_mode = diagonal\n").unwrap();
        assert_eq!(cfg.band_mode, BandMode::CameraX);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut cfg = GameConfig::with_path("/nonexistent/retroscan/config.ini");
        assert!(cfg.load_from_file().is_err());
    }
}
