//! Configuration management for TimingOffset.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Defaults for every missing key
//!
//! # Example
//!
//! ```no_run
//! use tof_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new("timing-offset.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Display frame rate: {}", config.settings().display.frame_rate());
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{DisplaySettings, LoggingSettings, Settings, SourceSettings};
