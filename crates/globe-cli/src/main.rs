//! `globeprint`: turns an equirectangular world map into printable globes.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags:
//!
//! ```text
//! globeprint globe map.png globe.stl --stops 200
//! globeprint stencil map.png parts/ --thickness 0.85
//! globeprint flatten map.png strips/
//! ```

use std::process::ExitCode;

use clap::Parser;
use globe_cli::{Cli, run};
use globe_config::{Config, default_config_dir};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_dir = cli.args.config.clone().unwrap_or_else(default_config_dir);

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&cli.args);

    let log_dir = config_dir.join("logs");
    globe_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "globeprint failed");
            ExitCode::FAILURE
        }
    }
}
