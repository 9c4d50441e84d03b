mod app;
mod cli;
mod config;
mod converter;
mod error;
mod inputs;
mod metadata;
mod prompt;
mod updater;
mod walker;
mod writer;
mod writers;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::prompt::ConsolePrompter;
use crate::writers::exiftool::ExifTool;
use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::new(&cli)?;

    // Initialize env_logger based on config.log_level
    env_logger::Builder::new()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    info!("Starting image_tagger");

    let exiftool = ExifTool::new(config.exiftool_path.clone());
    match exiftool.version() {
        Ok(version) => info!("Using exiftool {}", version),
        Err(e) => log::warn!("exiftool check failed, every update will likely fail: {}", e),
    }

    let outcome = app::run(&config, &mut ConsolePrompter, &exiftool)?;
    println!("{}", outcome);

    info!("image_tagger finished");
    Ok(())
}
