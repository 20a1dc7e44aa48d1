//! TimingOffset command-line interface.

mod cli;
mod render;
mod run;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tof_core::config::{ConfigManager, Settings};
use tof_core::logging::{init_tracing, LogLevel};
use tracing::{debug, info};

use crate::cli::Cli;

/// Settings from `--config`, written out with defaults if the file is missing.
fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let mut manager = ConfigManager::new(path);
    manager
        .load_or_create()
        .with_context(|| format!("Failed to load config from {}", manager.path().display()))?;
    Ok(manager.into_settings())
}

fn log_level(cli: &Cli, settings: &Settings) -> LogLevel {
    if cli.quiet {
        LogLevel::Error
    } else {
        settings.logging.level.more_verbose(cli.verbose)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    init_tracing(log_level(&cli, &settings));
    info!("TimingOffset v{}", tof_core::version());
    debug!(?settings, "Using settings");

    if cli.no_color || !settings.display.color {
        console::set_colors_enabled(false);
    }

    let summary = run::run(&cli, &settings)?;
    if summary.failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["timing-offset", "a", "b"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn verbosity_flags_adjust_configured_level() {
        let settings = Settings::default();
        assert_eq!(log_level(&cli(&[]), &settings), LogLevel::Warn);
        assert_eq!(log_level(&cli(&["-v"]), &settings), LogLevel::Info);
        assert_eq!(log_level(&cli(&["-vvvv"]), &settings), LogLevel::Trace);
        assert_eq!(log_level(&cli(&["-q"]), &settings), LogLevel::Error);
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.sources.ffprobe_path, "ffprobe");
    }

    #[test]
    fn missing_config_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timing-offset.toml");

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timing-offset.toml");
        std::fs::write(&path, "[display\ncolor = ").unwrap();
        assert!(load_settings(Some(&path)).is_err());
    }
}
