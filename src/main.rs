//! Retroscan main entry point.
//!
//! A side-scroller scaffold that emulates the display and audio limits of an
//! 8-bit console, built on:
//! - **bevy_ecs** for the game context, systems, and messages
//! - **raylib** (feature `raylib`) for the window, keyboard, and audio device
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, build the ECS world, populate the level
//! 2. Start the audio thread with the synthesized cue bank
//! 3. Every frame: input → gameplay → sprite sync → visibility pass →
//!    composition → audio forwarding
//! 4. Stop the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 600 --screenshot last.png
//! cargo run --release --features raylib -- --window
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use retroscan::game::{InputSource, build_schedule, init_world, run_frame, setup_level};
use retroscan::resources::audio::{AudioBackend, setup_audio, shutdown_audio};
use retroscan::resources::framebuffer::FrameBuffer;
use retroscan::resources::gameconfig::GameConfig;
use retroscan::resources::score::Score;
use retroscan::resources::spritemanager::SpriteDisplayManager;

/// Retroscan: 8-bit sprite limits, on purpose.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Frames to simulate in headless mode (overrides the config file).
    #[arg(long, value_name = "N")]
    frames: Option<u32>,

    /// Write the last composed frame to a PNG file.
    #[arg(long, value_name = "PATH")]
    screenshot: Option<PathBuf>,

    /// Open a raylib window with keyboard input instead of running headless.
    #[cfg(feature = "raylib")]
    #[arg(long)]
    window: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }

    #[cfg(feature = "raylib")]
    let windowed = cli.window;
    #[cfg(not(feature = "raylib"))]
    let windowed = false;

    let audio_enabled = config.audio_enabled;
    let volume = config.volume;
    let frames = config.frames;
    let frame_time = config.frame_time();

    let mut world = init_world(config);
    setup_level(&mut world);

    if audio_enabled {
        let backend = if windowed {
            #[cfg(feature = "raylib")]
            {
                AudioBackend::Raylib
            }
            #[cfg(not(feature = "raylib"))]
            {
                AudioBackend::Log
            }
        } else {
            AudioBackend::Log
        };
        setup_audio(&mut world, backend, volume);
    }

    let mut exit_code = 0;
    if windowed {
        #[cfg(feature = "raylib")]
        {
            let mut schedule = build_schedule(InputSource::Keyboard);
            if let Err(e) = retroscan::frontend::run_window(&mut world, &mut schedule) {
                error!("{}", e);
                exit_code = 1;
            }
        }
    } else {
        let mut schedule = build_schedule(InputSource::Autopilot);
        info!("Running {} frames headless", frames);
        for _ in 0..frames {
            run_frame(&mut world, &mut schedule, frame_time);
        }
    }

    {
        let manager = world.resource::<SpriteDisplayManager>();
        let report = manager.last_report();
        info!(
            "Final frame: {} of {} sprites active, {} hidden by band budget across {} bands; {} coins",
            manager.active().count(),
            manager.len(),
            report.dropped,
            report.bands,
            world.resource::<Score>().coins
        );
    }

    if let Some(path) = cli.screenshot.as_ref() {
        if let Err(e) = world.resource::<FrameBuffer>().save_png(path) {
            error!("{}", e);
            exit_code = 1;
        }
    }

    shutdown_audio(&mut world);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
