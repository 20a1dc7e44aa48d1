//! Settings struct with TOML-based sections.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::FrameRate;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Console output settings.
    #[serde(default)]
    pub display: DisplaySettings,

    /// Keyframe source handling.
    #[serde(default)]
    pub sources: SourceSettings,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Console output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Colorize console output.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Frame rate numerator used to print frame timestamps.
    #[serde(default = "default_fps_num")]
    pub fps_num: u32,

    /// Frame rate denominator used to print frame timestamps.
    #[serde(default = "default_fps_den")]
    pub fps_den: u32,
}

fn default_true() -> bool {
    true
}

fn default_fps_num() -> u32 {
    FrameRate::NTSC_FILM.num
}

fn default_fps_den() -> u32 {
    FrameRate::NTSC_FILM.den
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            color: true,
            fps_num: default_fps_num(),
            fps_den: default_fps_den(),
        }
    }
}

impl DisplaySettings {
    /// Configured frame rate, falling back to 24000/1001 if either part is zero.
    pub fn frame_rate(&self) -> FrameRate {
        FrameRate::new(self.fps_num, self.fps_den).unwrap_or_default()
    }
}

/// Keyframe source handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Files larger than this many bytes are always treated as video.
    #[serde(default = "default_video_size_threshold")]
    pub video_size_threshold: u64,

    /// ffprobe executable used to read keyframes from video files.
    #[serde(default = "default_ffprobe")]
    pub ffprobe_path: String,
}

fn default_video_size_threshold() -> u64 {
    16 * 1024 * 1024
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            video_size_threshold: default_video_size_threshold(),
            ffprobe_path: default_ffprobe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.sources.video_size_threshold, 16_777_216);
        assert_eq!(settings.display.frame_rate(), FrameRate::NTSC_FILM);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let settings: Settings = toml::from_str("[display]\nfps_num = 25\nfps_den = 1\n").unwrap();
        assert!(settings.display.color);
        assert_eq!(settings.display.frame_rate(), FrameRate { num: 25, den: 1 });
        assert_eq!(settings.sources.ffprobe_path, "ffprobe");
    }

    #[test]
    fn zero_frame_rate_falls_back() {
        let display = DisplaySettings {
            fps_den: 0,
            ..Default::default()
        };
        assert_eq!(display.frame_rate(), FrameRate::NTSC_FILM);
    }

    #[test]
    fn log_level_is_lowercase() {
        let settings: Settings = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(settings.logging.level, LogLevel::Debug);
    }
}
