//! The binary entry point for the Stardrift application.

use clap::Parser;
use stardrift_app::{PlatformDirs, StardriftApp};
use stardrift_config::{CliArgs, Config};
use tracing::{error, info};
use winit::event_loop::{ControlFlow, EventLoop};

fn main() {
    let args = CliArgs::parse();

    // Resolve and create platform directories before logging is up, so
    // failures here go straight to stderr.
    let dirs = match PlatformDirs::create() {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to initialize platform directories: {e}");
            std::process::exit(1);
        }
    };

    let config_dir = args.config.clone().unwrap_or_else(|| dirs.config_dir.clone());
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {e}", config_dir.display());
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    stardrift_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %config_dir.display(), "stardrift starting");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    // Redraws are requested explicitly by the frame driver; no polling.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = StardriftApp::with_config(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Event loop terminated with an error: {e}");
        std::process::exit(1);
    }
}
