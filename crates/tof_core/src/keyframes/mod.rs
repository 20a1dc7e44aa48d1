//! Keyframe loading from the supported source files.
//!
//! Three kinds of file are understood:
//! - keyframe-format text lists (sparse keyframe indices)
//! - L-SMASH Works index caches (dense per-frame markers)
//! - video files, probed with ffprobe (dense per-frame markers)
//!
//! Loading is the only part of the pipeline that does I/O. The analysis
//! consumes the resulting `KeyframeSource` values.

mod keyframe_format;
mod lwi;
mod types;
mod video;

pub use keyframe_format::parse_keyframe_format;
pub use lwi::parse_lwi;
pub use types::{KeyframeError, KeyframeResult, LoadedKeyframes, SourceKind};
pub use video::{parse_probe_json, probe_video, ProbedVideo};

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::SourceSettings;
use crate::models::KeyframeSource;

const KEYFRAME_FORMAT_HEADERS: [&str; 2] = ["# keyframe format", "fps"];
const LWI_HEADER: &str = "<LSMASHWorksIndexVersion";

/// Classify a first line of text.
fn kind_from_first_line(line: &str) -> SourceKind {
    if KEYFRAME_FORMAT_HEADERS.iter().any(|h| line.starts_with(h)) {
        SourceKind::KeyframeFormat
    } else if line.starts_with(LWI_HEADER) {
        SourceKind::Lwi
    } else {
        SourceKind::Video
    }
}

/// Detect what kind of keyframe source a file is.
///
/// Files larger than `video_size_threshold` bytes are video. Smaller files
/// are classified by their first line; anything unrecognised, including
/// files that are not UTF-8 text, is treated as video.
pub fn detect_kind(path: &Path, video_size_threshold: u64) -> KeyframeResult<SourceKind> {
    let metadata = fs::metadata(path).map_err(|e| KeyframeError::io(path, e))?;
    if metadata.len() > video_size_threshold {
        return Ok(SourceKind::Video);
    }

    let file = fs::File::open(path).map_err(|e| KeyframeError::io(path, e))?;
    let mut first_line = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut first_line)
        .map_err(|e| KeyframeError::io(path, e))?;

    Ok(match std::str::from_utf8(&first_line) {
        Ok(line) => kind_from_first_line(line),
        Err(_) => SourceKind::Video,
    })
}

/// Read a text source, replacing invalid UTF-8 instead of failing.
fn read_text(path: &Path) -> KeyframeResult<String> {
    let bytes = fs::read(path).map_err(|e| KeyframeError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Load keyframes from a file of any supported kind.
pub fn load_keyframes(path: &Path, settings: &SourceSettings) -> KeyframeResult<LoadedKeyframes> {
    if !path.exists() {
        return Err(KeyframeError::SourceNotFound(path.to_path_buf()));
    }

    let kind = detect_kind(path, settings.video_size_threshold)?;
    tracing::debug!("Loading {} as {}", path.display(), kind);

    let (source, frame_rate) = match kind {
        SourceKind::KeyframeFormat => {
            let indices = parse_keyframe_format(&read_text(path)?);
            (KeyframeSource::Sparse(indices), None)
        }
        SourceKind::Lwi => {
            let signal = parse_lwi(&read_text(path)?)?;
            (KeyframeSource::Dense(signal), None)
        }
        SourceKind::Video => {
            let probed = probe_video(path, &settings.ffprobe_path)?;
            (KeyframeSource::Dense(probed.signal), probed.frame_rate)
        }
    };

    tracing::info!(
        "Loaded {} keyframes from {} ({})",
        source.keyframe_count(),
        path.display(),
        kind
    );

    Ok(LoadedKeyframes {
        path: path.to_path_buf(),
        kind,
        source,
        frame_rate,
    })
}
