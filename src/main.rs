//! swatchbook - Color Swatch Manager
//!
//! Command-line entry point: loads settings, installs error reporting and
//! logging, then dispatches to the CLI.

use color_eyre::Result;
use std::error::Error;
use swatchbook::cli;
use swatchbook::config::Settings;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;

    let (settings, config_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(error) => (Settings::default().with_env_overrides(), Some(error)),
    };
    init_tracing(&settings);
    if let Some(error) = config_error {
        warn!("Using default settings: {}", error);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    cli::execute_cli(&args, &settings)
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
