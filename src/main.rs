//! spritestage main entry point.
//!
//! Opens a window and runs the sprite presentation loop:
//! - an animated stick figure moved with WASD, rotated with the wheel and
//!   flipped with the mouse buttons
//! - color and alpha modulation stepped with U/J, I/K, O/L and Y/H
//! - a caption and a stopwatch drawn next to it
//! - four hit-tested buttons pinned to the window corners
//!
//! Settings come from `config.ini` (see
//! [`AppConfig`](spritestage::resources::gameconfig::AppConfig)).
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config config.ini
//! cargo run -- --write-config          # write the defaults to ./config.ini
//! cargo run -- --headless 120          # 120 frames without a window
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use spritestage::app::AppContext;
use spritestage::backend::headless::HeadlessBackend;
use spritestage::backend::window::RaylibBackend;
use spritestage::error::StartupError;
use spritestage::resources::gameconfig::AppConfig;

#[derive(Parser)]
#[command(version, about = "Animated sprite, transform and button demo built on raylib.")]
struct Cli {
    /// Configuration file. Defaults to ./config.ini when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the default configuration and exit.
    /// Optionally specify output path (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    write_config: Option<Option<PathBuf>>,

    /// Run this many frames without opening a window, then exit.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write the default config and quit (no window needed)
    if let Some(maybe_path) = cli.write_config {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("config.ini"));
        return match AppConfig::with_path(&path).save_to_file() {
            Ok(()) => {
                println!("Config written to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), StartupError> {
    let config = load_config(cli.config)?;

    if let Some(ticks) = cli.headless {
        let backend = HeadlessBackend::for_config(&config)?;
        let mut app = AppContext::new(backend, config)?;
        let rendered = app.run_for(ticks);
        info!("Headless run finished after {rendered} frames");
        return Ok(());
    }

    let backend = RaylibBackend::new(&config.window)?;
    let mut app = AppContext::new(backend, config)?;
    app.run();
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<AppConfig, StartupError> {
    let mut config = match path {
        Some(path) => AppConfig::with_path(path),
        None => {
            let config = AppConfig::new();
            if !config.file_exists() {
                info!(
                    "No config file at {}, using defaults",
                    config.config_path.display()
                );
                return Ok(config);
            }
            config
        }
    };
    config.load_from_file()?;
    Ok(config)
}
