//! Rational frame rate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame rate as a `numerator / denominator` pair (e.g. 24000/1001).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate {
    pub num: u32,
    pub den: u32,
}

impl FrameRate {
    /// NTSC film rate, the default for timestamp display.
    pub const NTSC_FILM: FrameRate = FrameRate {
        num: 24000,
        den: 1001,
    };

    /// Create a frame rate. Returns `None` if either part is zero.
    pub fn new(num: u32, den: u32) -> Option<Self> {
        (num != 0 && den != 0).then_some(Self { num, den })
    }

    /// Frames per second.
    pub fn fps(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Split a frame index into whole minutes and seconds.
    pub fn minutes_seconds(&self, frame: usize) -> (u64, u64) {
        let frames_per_minute = self.fps() * 60.0;
        let frame = frame as f64;
        let minutes = (frame / frames_per_minute).floor();
        let seconds = ((frame % frames_per_minute) / self.fps()).floor();
        (minutes as u64, seconds as u64)
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::NTSC_FILM
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Error parsing a frame rate string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid frame rate '{0}', expected NUM/DEN or an integer")]
pub struct FrameRateParseError(pub String);

impl FromStr for FrameRate {
    type Err = FrameRateParseError;

    /// Accepts `24000/1001` or a plain integer such as `25`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || FrameRateParseError(s.to_string());
        let (num, den) = match s.trim().split_once('/') {
            Some((num, den)) => (num.trim(), den.trim()),
            None => (s.trim(), "1"),
        };
        let num = num.parse().map_err(|_| err())?;
        let den = den.parse().map_err(|_| err())?;
        FrameRate::new(num, den).ok_or_else(err)
    }
}
