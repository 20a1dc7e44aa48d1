//! Types and errors for keyframe loading.

use std::path::PathBuf;

use crate::models::{FrameRate, KeyframeSource};

/// Kind of keyframe source a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    /// Text list of keyframe indices (`# keyframe format` / `fps` header).
    KeyframeFormat,
    /// L-SMASH Works index cache with per-frame `Key=` markers.
    Lwi,
    /// Anything else, treated as a video to probe.
    Video,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::KeyframeFormat => write!(f, "keyframe format"),
            SourceKind::Lwi => write!(f, "lwi"),
            SourceKind::Video => write!(f, "video"),
        }
    }
}

/// Keyframes loaded from one file.
#[derive(Debug, Clone)]
pub struct LoadedKeyframes {
    /// File the keyframes came from.
    pub path: PathBuf,
    /// Detected kind of the file.
    pub kind: SourceKind,
    /// Keyframe data, dense or sparse depending on the kind.
    pub source: KeyframeSource,
    /// Frame rate reported by the video stream, if the file was probed.
    pub frame_rate: Option<FrameRate>,
}

/// Error types for keyframe loading.
#[derive(Debug, thiserror::Error)]
pub enum KeyframeError {
    /// IO error.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file not found.
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    /// An index cache line could not be interpreted.
    #[error("Malformed index at line {line}: {message}")]
    MalformedIndex { line: usize, message: String },

    /// FFprobe could not be run or exited with an error.
    #[error("{tool} failed: {message}")]
    ProbeFailed { tool: String, message: String },

    /// FFprobe output could not be parsed.
    #[error("Failed to parse probe output: {0}")]
    ProbeOutput(String),
}

impl KeyframeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Type alias for keyframe loading results.
pub type KeyframeResult<T> = Result<T, KeyframeError>;
